//! Page-count math — mapping the sparse card map onto binder pages.
//!
//! Terminology: a *card-page* is one grid of slots; a *binder page* is what
//! the reader turns. Binder page 1 holds the cover plus card-page 0; every
//! binder page after that holds a pair of card-pages. So `p` binder pages
//! address `cards_per_page * (1 + 2*(p-1))` slots.

use tracing::warn;

use crate::layout::settings::ResolvedSettings;
use crate::models::binder::CardMap;

/// Largest occupied card position, or `None` when the binder holds no cards.
///
/// Keys that do not parse as non-negative integers are skipped rather than
/// rejected; a damaged key must not take down the whole view.
pub fn max_card_position(cards: &CardMap) -> Option<u32> {
    cards.keys().filter_map(|k| k.parse::<u32>().ok()).max()
}

/// Number of card-pages needed to show every stored card.
pub fn required_card_pages(cards: &CardMap, cards_per_page: u32) -> u32 {
    match max_card_position(cards) {
        None => 0,
        Some(max_position) => (max_position + 1).div_ceil(cards_per_page),
    }
}

/// Card slots addressable within `total_pages` binder pages.
pub fn page_capacity(total_pages: u32, cards_per_page: u32) -> u32 {
    if total_pages == 0 {
        return 0;
    }
    cards_per_page + 2 * cards_per_page * (total_pages - 1)
}

/// Total binder pages for the given card map and settings.
///
/// Result is always ≥ 1, ≥ `min_pages`, ≥ `page_count`, and large enough to
/// reach every stored card — except when `max_pages` caps it first. The cap
/// is applied as stored with no re-flow: cards whose position falls beyond
/// the capped capacity stay in the document but are unreachable through
/// normal navigation. That carried-over behavior is deliberate (see
/// `has_unreachable_cards`); we log it instead of fixing it.
pub fn compute_total_pages(cards: &CardMap, settings: &ResolvedSettings) -> u32 {
    if cards.is_empty() {
        return settings.min_pages.max(settings.page_count);
    }

    let required_card_pages = required_card_pages(cards, settings.cards_per_page());
    let required_binder_pages = if required_card_pages <= 1 {
        1
    } else {
        1 + (required_card_pages - 1).div_ceil(2)
    };

    let uncapped = settings
        .page_count
        .max(required_binder_pages)
        .max(settings.min_pages);
    let total = uncapped.min(settings.max_pages);

    if total < required_binder_pages {
        warn!(
            max_pages = settings.max_pages,
            required = required_binder_pages,
            "max_pages cap leaves stored cards beyond reachable pages"
        );
    }

    total
}

/// True when the `max_pages` cap makes some stored card positions
/// unreachable through navigation.
pub fn has_unreachable_cards(cards: &CardMap, settings: &ResolvedSettings) -> bool {
    match max_card_position(cards) {
        None => false,
        Some(max_position) => {
            let total = compute_total_pages(cards, settings);
            max_position + 1 > page_capacity(total, settings.cards_per_page())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::binder::{BinderSettings, CardEntry};

    fn settings_3x3() -> ResolvedSettings {
        ResolvedSettings::resolve(&BinderSettings::default())
    }

    fn cards_at(positions: &[u32]) -> CardMap {
        positions
            .iter()
            .map(|p| (p.to_string(), CardEntry::of(&format!("base1-{p}"))))
            .collect()
    }

    // ── max position / required card-pages ──────────────────────────────────

    #[test]
    fn test_max_card_position_empty() {
        assert_eq!(max_card_position(&CardMap::new()), None);
    }

    #[test]
    fn test_max_card_position_is_numeric_not_lexicographic() {
        // "9" > "17" lexicographically; the numeric max must win.
        assert_eq!(max_card_position(&cards_at(&[9, 17, 2])), Some(17));
    }

    #[test]
    fn test_max_card_position_skips_malformed_keys() {
        let mut cards = cards_at(&[3]);
        cards.insert("not-a-position".to_string(), CardEntry::of("base1-4"));
        assert_eq!(max_card_position(&cards), Some(3));
    }

    #[test]
    fn test_required_card_pages_boundaries() {
        assert_eq!(required_card_pages(&cards_at(&[0]), 9), 1);
        assert_eq!(required_card_pages(&cards_at(&[8]), 9), 1);
        assert_eq!(required_card_pages(&cards_at(&[9]), 9), 2);
        assert_eq!(required_card_pages(&cards_at(&[17]), 9), 2);
        assert_eq!(required_card_pages(&cards_at(&[18]), 9), 3);
    }

    // ── compute_total_pages ─────────────────────────────────────────────────

    #[test]
    fn test_empty_binder_min_pages_one_page_count_one() {
        assert_eq!(compute_total_pages(&CardMap::new(), &settings_3x3()), 1);
    }

    #[test]
    fn test_empty_binder_honors_min_pages_and_page_count() {
        let mut settings = settings_3x3();
        settings.min_pages = 3;
        settings.page_count = 2;
        assert_eq!(compute_total_pages(&CardMap::new(), &settings), 3);

        settings.min_pages = 2;
        settings.page_count = 5;
        assert_eq!(compute_total_pages(&CardMap::new(), &settings), 5);
    }

    #[test]
    fn test_first_card_page_fits_on_one_binder_page() {
        // Positions 0..=8 all live on card-page 0, next to the cover.
        assert_eq!(compute_total_pages(&cards_at(&[0]), &settings_3x3()), 1);
        assert_eq!(compute_total_pages(&cards_at(&[8]), &settings_3x3()), 1);
    }

    #[test]
    fn test_card_on_second_card_page_bumps_to_two_binder_pages() {
        // Position 9 is the first slot of card-page 1: cover+page0, then a pair.
        assert_eq!(compute_total_pages(&cards_at(&[9]), &settings_3x3()), 2);
    }

    #[test]
    fn test_pairing_math_across_card_pages() {
        let s = settings_3x3();
        // card-pages 0..=2 → 1 + ceil(2/2) = 2 binder pages
        assert_eq!(compute_total_pages(&cards_at(&[18]), &s), 2);
        // card-page 3 starts a new pair
        assert_eq!(compute_total_pages(&cards_at(&[27]), &s), 3);
        assert_eq!(compute_total_pages(&cards_at(&[44]), &s), 3);
        assert_eq!(compute_total_pages(&cards_at(&[45]), &s), 4);
    }

    #[test]
    fn test_capacity_invariant_across_grids_and_positions() {
        // Every stored position must fit in the computed page count's
        // capacity (no max_pages cap in play here).
        for (rows, cols) in [(1u32, 1u32), (2, 2), (3, 3), (3, 4), (4, 4)] {
            let settings = ResolvedSettings::resolve(&BinderSettings {
                grid_size: Some(format!("{rows}x{cols}")),
                // high enough that the cap never bites, even for 1x1
                max_pages: Some(1000),
                ..BinderSettings::default()
            });
            for max_position in [0u32, 1, 8, 9, 17, 35, 99, 200] {
                let cards = cards_at(&[max_position]);
                let total = compute_total_pages(&cards, &settings);
                let capacity = page_capacity(total, settings.cards_per_page());
                assert!(
                    max_position + 1 <= capacity,
                    "{rows}x{cols} position {max_position}: {total} pages hold only {capacity} slots"
                );
            }
        }
    }

    #[test]
    fn test_max_pages_caps_and_flags_unreachable_cards() {
        let mut settings = settings_3x3();
        settings.max_pages = 2;
        // Position 100 needs 12 card-pages → 7 binder pages, capped to 2.
        let cards = cards_at(&[100]);
        assert_eq!(compute_total_pages(&cards, &settings), 2);
        assert!(has_unreachable_cards(&cards, &settings));

        // Within capacity (2 pages, 3 card-pages, 27 slots) nothing is lost.
        let cards = cards_at(&[26]);
        assert_eq!(compute_total_pages(&cards, &settings), 2);
        assert!(!has_unreachable_cards(&cards, &settings));
    }

    #[test]
    fn test_page_capacity_formula() {
        assert_eq!(page_capacity(0, 9), 0);
        assert_eq!(page_capacity(1, 9), 9);
        assert_eq!(page_capacity(2, 9), 27);
        assert_eq!(page_capacity(3, 9), 45);
        assert_eq!(page_capacity(2, 12), 36);
    }
}
