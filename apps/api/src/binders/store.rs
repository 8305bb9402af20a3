//! Binder persistence. Documents live in jsonb columns so the shape stored
//! here is exactly the shape served (and exactly what binders exported from
//! the original app look like).

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::binder::{
    Binder, BinderMetadata, BinderRow, BinderSettings, BinderSummary, CardMap,
};

pub async fn insert_binder(
    pool: &PgPool,
    owner_id: Uuid,
    metadata: BinderMetadata,
    settings: BinderSettings,
) -> Result<Binder, sqlx::Error> {
    let id = Uuid::new_v4();
    let row: BinderRow = sqlx::query_as(
        r#"
        INSERT INTO binders (id, owner_id, metadata, settings, cards)
        VALUES ($1, $2, $3, $4, '{}'::jsonb)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(Json(metadata))
    .bind(Json(settings))
    .fetch_one(pool)
    .await?;

    info!("Created binder {id} for owner {owner_id}");
    Ok(row.into_binder())
}

pub async fn fetch_binder(pool: &PgPool, id: Uuid) -> Result<Option<Binder>, sqlx::Error> {
    let row: Option<BinderRow> = sqlx::query_as("SELECT * FROM binders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(BinderRow::into_binder))
}

/// Owner's shelf: name plus occupied-slot count per binder.
pub async fn list_binders(pool: &PgPool, owner_id: Uuid) -> Result<Vec<BinderSummary>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id,
               metadata->>'name' AS name,
               (SELECT COUNT(*) FROM jsonb_object_keys(cards)) AS card_count,
               updated_at
        FROM binders
        WHERE owner_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Replaces the binder's settings document. Returns false if the binder does
/// not exist.
pub async fn update_settings(
    pool: &PgPool,
    id: Uuid,
    settings: &BinderSettings,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE binders SET settings = $1, updated_at = now() WHERE id = $2")
        .bind(Json(settings))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Writes the whole card map back. Mutations are read-modify-write over the
/// document; concurrent writers resolve as last write wins.
pub async fn put_cards(pool: &PgPool, id: Uuid, cards: &CardMap) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE binders SET cards = $1, updated_at = now() WHERE id = $2")
        .bind(Json(cards))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_binder(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM binders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        info!("Deleted binder {id}");
        Ok(true)
    } else {
        Ok(false)
    }
}
