#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::card::Card;

/// Sparse position→card map. Keys are non-negative integer positions encoded
/// as strings (the document shape inherited from the original Firestore
/// binders); only the numeric value matters, insertion order does not.
pub type CardMap = BTreeMap<String, CardEntry>;

/// A binder document: a named collection of card slots organized into pages.
///
/// Document fields stay camelCase on the wire so binders exported from the
/// original app deserialize unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binder {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub metadata: BinderMetadata,
    #[serde(default)]
    pub settings: BinderSettings,
    #[serde(default)]
    pub cards: CardMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinderMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw per-binder settings as stored. All fields are optional; resolution
/// into concrete values (with defaults) happens once in
/// `layout::ResolvedSettings::resolve`, not at call sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinderSettings {
    pub grid_size: Option<String>,
    pub page_count: Option<u32>,
    pub min_pages: Option<u32>,
    pub max_pages: Option<u32>,
    /// Optional permutation of logical→physical binder page indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_order: Option<Vec<usize>>,
}

/// One occupied slot in the binder's sparse card map.
///
/// Older documents sometimes store full card fields (`name`, `image`)
/// directly on the entry instead of under `cardData`; slot resolution
/// accepts both shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    pub card_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_data: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlotMetadata>,
}

impl CardEntry {
    /// Bare reference to a card, no inline data.
    pub fn of(card_id: &str) -> Self {
        CardEntry {
            card_id: card_id.to_string(),
            card_data: None,
            name: None,
            image: None,
            metadata: None,
        }
    }
}

/// Per-slot metadata (e.g. instances the owner does not have yet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_instances: Option<u32>,
}

/// Database row for a binder. `metadata`, `settings` and `cards` live in
/// jsonb columns so the document keeps the original shape end to end.
#[derive(Debug, Clone, FromRow)]
pub struct BinderRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub metadata: Json<BinderMetadata>,
    pub settings: Json<BinderSettings>,
    pub cards: Json<CardMap>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BinderRow {
    pub fn into_binder(self) -> Binder {
        Binder {
            id: self.id,
            owner_id: self.owner_id,
            metadata: self.metadata.0,
            settings: self.settings.0,
            cards: self.cards.0,
        }
    }
}

/// Compact listing entry for an owner's binder shelf.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BinderSummary {
    pub id: Uuid,
    pub name: String,
    pub card_count: i64,
    pub updated_at: DateTime<Utc>,
}
