use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::binders::mutations::{move_card, remove_card, set_card};
use crate::binders::store;
use crate::errors::AppError;
use crate::layout::grid::GridConfig;
use crate::layout::settings::DEFAULT_MAX_PAGES;
use crate::layout::{
    cards_for_page, compute_total_pages, has_unreachable_cards, page_config, PageConfig,
    ResolvedSettings,
};
use crate::models::binder::{
    Binder, BinderMetadata, BinderSettings, BinderSummary, CardEntry, CardMap,
};
use crate::models::card::Card;
use crate::nav::Pager;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerIdQuery {
    pub owner_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateBinderRequest {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub settings: BinderSettings,
}

/// POST /api/v1/binders
pub async fn handle_create_binder(
    State(state): State<AppState>,
    Json(req): Json<CreateBinderRequest>,
) -> Result<(StatusCode, Json<Binder>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("binder name must not be empty".into()));
    }
    validate_settings(&req.settings)?;

    let metadata = BinderMetadata {
        name: req.name,
        description: req.description,
        created_at: Some(chrono::Utc::now()),
    };
    let binder = store::insert_binder(&state.db, req.owner_id, metadata, req.settings).await?;
    Ok((StatusCode::CREATED, Json(binder)))
}

/// GET /api/v1/binders?owner_id=...
pub async fn handle_list_binders(
    State(state): State<AppState>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<Json<Vec<BinderSummary>>, AppError> {
    Ok(Json(store::list_binders(&state.db, params.owner_id).await?))
}

/// GET /api/v1/binders/:id
pub async fn handle_get_binder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Binder>, AppError> {
    let binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;
    Ok(Json(binder))
}

/// DELETE /api/v1/binders/:id
pub async fn handle_delete_binder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if store::delete_binder(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Binder {id} not found")))
    }
}

/// PATCH /api/v1/binders/:id/settings
///
/// Replaces the settings document. Grid-size changes do NOT re-flow stored
/// card positions; the layout engine re-derives everything on the next view.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(settings): Json<BinderSettings>,
) -> Result<Json<Binder>, AppError> {
    validate_settings(&settings)?;

    if !store::update_settings(&state.db, id, &settings).await? {
        return Err(AppError::NotFound(format!("Binder {id} not found")));
    }
    let binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;
    Ok(Json(binder))
}

#[derive(Deserialize)]
pub struct SetCardRequest {
    pub position: u32,
    pub entry: CardEntry,
}

/// POST /api/v1/binders/:id/cards
pub async fn handle_set_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetCardRequest>,
) -> Result<StatusCode, AppError> {
    let mut binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;

    set_card(&mut binder.cards, req.position, req.entry);
    store::put_cards(&state.db, id, &binder.cards).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/binders/:id/cards/:position
///
/// Idempotent: clearing an already-empty slot succeeds.
pub async fn handle_remove_card(
    State(state): State<AppState>,
    Path((id, position)): Path<(Uuid, u32)>,
) -> Result<StatusCode, AppError> {
    let mut binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;

    if remove_card(&mut binder.cards, position).is_some() {
        store::put_cards(&state.db, id, &binder.cards).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct MoveCardRequest {
    pub from: u32,
    pub to: u32,
}

/// POST /api/v1/binders/:id/cards/move
///
/// Drag-and-drop reorder. Occupied targets swap; nothing re-flows.
pub async fn handle_move_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveCardRequest>,
) -> Result<StatusCode, AppError> {
    let mut binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;

    if req.from == req.to {
        return Ok(StatusCode::NO_CONTENT);
    }
    if !move_card(&mut binder.cards, req.from, req.to) {
        return Err(AppError::Validation(format!(
            "no card at position {}",
            req.from
        )));
    }
    store::put_cards(&state.db, id, &binder.cards).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ViewQuery {
    /// Logical binder page the client is on. Stale indices (the binder
    /// shrank since the client last looked) clamp to the last page.
    pub page: Option<usize>,
    /// Single-page (mobile) rendering instead of the two-page spread.
    pub mobile: Option<bool>,
}

#[derive(Serialize)]
pub struct CardPageView {
    pub card_page_index: u32,
    pub page_number: u32,
    pub slots: Vec<Option<Card>>,
}

/// The rendering contract consumed by the binder UI.
#[derive(Serialize)]
pub struct BinderViewResponse {
    pub binder_id: Uuid,
    pub current_page_index: usize,
    pub total_pages: usize,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub page_config: PageConfig,
    pub card_pages: Vec<CardPageView>,
    /// True when the max_pages cap leaves stored cards beyond the reachable
    /// page range (carried-over behavior; surfaced so the UI can warn).
    pub has_unreachable_cards: bool,
}

/// GET /api/v1/binders/:id/view?page=N&mobile=bool
pub async fn handle_get_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<BinderViewResponse>, AppError> {
    let binder = store::fetch_binder(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Binder {id} not found")))?;

    let settings = ResolvedSettings::resolve(&binder.settings);
    let total_pages = compute_total_pages(&binder.cards, &settings);
    let pager = Pager::restore(query.page.unwrap_or(0), total_pages as usize);
    let is_mobile = query.mobile.unwrap_or(false);

    let config = page_config(
        pager.current_page_index(),
        is_mobile,
        settings.page_order.as_deref(),
    );

    let indices = config.card_page_indices();
    let lookup = load_card_lookup(
        &state,
        &binder.cards,
        settings.cards_per_page(),
        &indices,
    )
    .await;

    let card_pages = indices
        .iter()
        .map(|&idx| CardPageView {
            card_page_index: idx,
            page_number: idx + 1,
            slots: cards_for_page(&binder.cards, settings.cards_per_page(), idx, &lookup),
        })
        .collect();

    Ok(Json(BinderViewResponse {
        binder_id: binder.id,
        current_page_index: pager.current_page_index(),
        total_pages: pager.total_pages(),
        can_go_next: pager.can_go_next(),
        can_go_prev: pager.can_go_prev(),
        page_config: config,
        card_pages,
        has_unreachable_cards: has_unreachable_cards(&binder.cards, &settings),
    }))
}

/// Pre-fetches full card data for every entry on the given card-pages:
/// cache first, then the card API (caching the result). Failures degrade to
/// a lookup miss — slot resolution falls back to inline data/placeholders,
/// so a broken cache or API never fails the view.
async fn load_card_lookup(
    state: &AppState,
    cards: &CardMap,
    cards_per_page: u32,
    card_page_indices: &[u32],
) -> HashMap<String, Card> {
    let mut wanted: BTreeSet<String> = BTreeSet::new();
    for &idx in card_page_indices {
        let start = idx * cards_per_page;
        for i in 0..cards_per_page {
            if let Some(entry) = cards.get(&(start + i).to_string()) {
                wanted.insert(entry.card_id.clone());
            }
        }
    }

    let mut lookup = HashMap::new();
    for card_id in wanted {
        match state.card_cache.get(&card_id).await {
            Ok(Some(card)) => {
                lookup.insert(card_id, card);
                continue;
            }
            Ok(None) => {}
            Err(e) => warn!("Card cache lookup failed for {card_id}: {e}"),
        }

        match state.cards.get_card(&card_id).await {
            Ok(card) => {
                if let Err(e) = state.card_cache.put(&card).await {
                    warn!("Failed to cache card {card_id}: {e}");
                }
                lookup.insert(card_id, card);
            }
            Err(e) => warn!("Card {card_id} unresolved, slot will degrade: {e}"),
        }
    }
    lookup
}

fn validate_settings(settings: &BinderSettings) -> Result<(), AppError> {
    if let Some(grid_size) = &settings.grid_size {
        if GridConfig::parse(grid_size).is_none() {
            return Err(AppError::Validation(format!(
                "grid_size '{grid_size}' is not a valid RxC grid"
            )));
        }
    }
    if let (Some(min), Some(max)) = (settings.min_pages, settings.max_pages) {
        if min > max {
            return Err(AppError::Validation(format!(
                "min_pages ({min}) must not exceed max_pages ({max})"
            )));
        }
    }
    if let Some(order) = &settings.page_order {
        let cap = settings.max_pages.unwrap_or(DEFAULT_MAX_PAGES) as usize;
        if let Some(&bad) = order.iter().find(|&&p| p >= cap) {
            return Err(AppError::Validation(format!(
                "page_order entry {bad} is beyond the last page"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_settings_accepts_defaults_and_valid_grids() {
        assert!(validate_settings(&BinderSettings::default()).is_ok());
        assert!(validate_settings(&BinderSettings {
            grid_size: Some("4x3".to_string()),
            min_pages: Some(1),
            max_pages: Some(50),
            ..BinderSettings::default()
        })
        .is_ok());
    }

    #[test]
    fn test_validate_settings_rejects_bad_grid() {
        let result = validate_settings(&BinderSettings {
            grid_size: Some("0x3".to_string()),
            ..BinderSettings::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_settings_bounds_page_order_entries() {
        // In range (max_pages defaults to 100): fine.
        assert!(validate_settings(&BinderSettings {
            page_order: Some(vec![0, 2, 1, 99]),
            ..BinderSettings::default()
        })
        .is_ok());

        // An entry past the last page never reaches the layout engine.
        let result = validate_settings(&BinderSettings {
            page_order: Some(vec![0, u32::MAX as usize]),
            ..BinderSettings::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));

        // The bound follows an explicit max_pages.
        let result = validate_settings(&BinderSettings {
            max_pages: Some(5),
            page_order: Some(vec![5]),
            ..BinderSettings::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_settings_rejects_inverted_page_bounds() {
        let result = validate_settings(&BinderSettings {
            min_pages: Some(10),
            max_pages: Some(2),
            ..BinderSettings::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
