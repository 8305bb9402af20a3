#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A fully-resolved card as rendered in a binder slot.
///
/// `image` is the small-image URL; an empty string means "no artwork
/// available" and the UI renders a placeholder frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl Card {
    /// Minimal placeholder used when a slot's card cannot be resolved from
    /// the cache, inline data, or the entry itself.
    pub fn placeholder(card_id: &str) -> Self {
        Card {
            id: card_id.to_string(),
            name: "Unknown Card".to_string(),
            image: String::new(),
            image_large: None,
            set_name: None,
            number: None,
            rarity: None,
            supertype: None,
            types: None,
        }
    }
}
