//! Pure card-map mutations. Handlers read the document, apply one of these,
//! and write the whole map back (last write wins, matching the original
//! document-store semantics).

use crate::models::binder::{CardEntry, CardMap};

/// Places (or replaces) a card at a position.
pub fn set_card(cards: &mut CardMap, position: u32, entry: CardEntry) {
    cards.insert(position.to_string(), entry);
}

/// Clears a position. Returns the removed entry, if any.
pub fn remove_card(cards: &mut CardMap, position: u32) -> Option<CardEntry> {
    cards.remove(&position.to_string())
}

/// Moves the card at `from` to `to`. An occupied target swaps; positions are
/// otherwise untouched (no re-flow). Returns false when there is nothing at
/// `from` or the move is degenerate.
pub fn move_card(cards: &mut CardMap, from: u32, to: u32) -> bool {
    if from == to {
        return false;
    }
    let from_key = from.to_string();
    let to_key = to.to_string();

    let Some(moved) = cards.remove(&from_key) else {
        return false;
    };
    if let Some(displaced) = cards.insert(to_key, moved) {
        cards.insert(from_key, displaced);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(card_id: &str) -> CardEntry {
        CardEntry::of(card_id)
    }

    #[test]
    fn test_set_and_remove_round_trip() {
        let mut cards = CardMap::new();
        set_card(&mut cards, 17, entry("base1-17"));
        assert!(cards.contains_key("17"));

        let removed = remove_card(&mut cards, 17);
        assert_eq!(removed.map(|e| e.card_id), Some("base1-17".to_string()));
        assert!(cards.is_empty());
    }

    #[test]
    fn test_remove_empty_slot_is_none() {
        let mut cards = CardMap::new();
        assert!(remove_card(&mut cards, 3).is_none());
    }

    #[test]
    fn test_move_to_empty_slot() {
        let mut cards = CardMap::new();
        set_card(&mut cards, 0, entry("base1-1"));

        assert!(move_card(&mut cards, 0, 9));
        assert!(!cards.contains_key("0"));
        assert_eq!(cards["9"].card_id, "base1-1");
    }

    #[test]
    fn test_move_to_occupied_slot_swaps() {
        let mut cards = CardMap::new();
        set_card(&mut cards, 0, entry("base1-1"));
        set_card(&mut cards, 5, entry("base1-2"));

        assert!(move_card(&mut cards, 0, 5));
        assert_eq!(cards["5"].card_id, "base1-1");
        assert_eq!(cards["0"].card_id, "base1-2");
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_move_from_empty_or_onto_itself_is_rejected() {
        let mut cards = CardMap::new();
        set_card(&mut cards, 2, entry("base1-1"));

        assert!(!move_card(&mut cards, 7, 2));
        assert!(!move_card(&mut cards, 2, 2));
        assert_eq!(cards["2"].card_id, "base1-1");
    }
}
