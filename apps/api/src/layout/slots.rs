//! Slot resolution — the cards belonging to one card-page, fully resolved.
//!
//! The engine stays pure: callers fetch whatever card data they want ahead
//! of time and hand it in as a synchronous [`CardLookup`]. Slots degrade to
//! inline data and finally to a placeholder instead of erroring.

use std::collections::HashMap;

use crate::models::binder::{CardEntry, CardMap};
use crate::models::card::Card;

/// Synchronous lookup into already-fetched card data, injected by the
/// caller rather than read from any ambient global.
pub trait CardLookup {
    fn card(&self, card_id: &str) -> Option<Card>;
}

impl CardLookup for HashMap<String, Card> {
    fn card(&self, card_id: &str) -> Option<Card> {
        self.get(card_id).cloned()
    }
}

/// Lookup that always misses. Forces resolution through inline data.
pub struct NoCards;

impl CardLookup for NoCards {
    fn card(&self, _card_id: &str) -> Option<Card> {
        None
    }
}

/// Resolves one occupied slot to a full card.
///
/// Priority: (1) the injected lookup by `card_id`, (2) inline `card_data`,
/// (3) the entry itself when it already carries `name` and `image`,
/// (4) the "Unknown Card" placeholder.
pub fn resolve_entry(entry: &CardEntry, lookup: &impl CardLookup) -> Card {
    if let Some(card) = lookup.card(&entry.card_id) {
        return card;
    }
    if let Some(card) = &entry.card_data {
        return card.clone();
    }
    if let (Some(name), Some(image)) = (&entry.name, &entry.image) {
        return Card {
            id: entry.card_id.clone(),
            name: name.clone(),
            image: image.clone(),
            ..Card::placeholder(&entry.card_id)
        };
    }
    Card::placeholder(&entry.card_id)
}

/// The slots of one card-page, in slot order.
///
/// Always returns exactly `cards_per_page` elements; empty slots are `None`.
pub fn cards_for_page(
    cards: &CardMap,
    cards_per_page: u32,
    card_page_index: u32,
    lookup: &impl CardLookup,
) -> Vec<Option<Card>> {
    let start = card_page_index * cards_per_page;
    (0..cards_per_page)
        .map(|i| {
            cards
                .get(&(start + i).to_string())
                .map(|entry| resolve_entry(entry, lookup))
        })
        .collect()
}
