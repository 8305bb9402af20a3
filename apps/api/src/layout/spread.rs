//! Page configuration — which card-pages a given binder page shows.
//!
//! Desktop readers see a two-page spread (cover + card-page 0 on the first
//! binder page, pairs after that); mobile readers see one physical side at a
//! time. A binder may carry a `page_order` permutation for custom ordering;
//! without it the logical index is the physical index.

use serde::Serialize;

/// Reference to one card-page as shown to the reader.
/// `page_number` is the 1-based display number (`card_page_index + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardPageRef {
    pub card_page_index: u32,
    pub page_number: u32,
}

impl CardPageRef {
    fn new(card_page_index: u32) -> Self {
        CardPageRef {
            card_page_index,
            page_number: card_page_index + 1,
        }
    }
}

/// View-model for one binder page. Recomputed on every navigation, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageConfig {
    /// Desktop binder page 0: cover on the left, card-page 0 on the right.
    CoverAndFirst { right: CardPageRef },
    /// Desktop binder page ≥ 1: two card-pages side by side.
    CardsPair {
        left: CardPageRef,
        right: CardPageRef,
    },
    /// Mobile index 0: the cover alone.
    Cover,
    /// Mobile index ≥ 1: a single card-page.
    CardsSingle { page: CardPageRef },
}

impl PageConfig {
    /// Card-page indices this configuration renders, left to right. Used by
    /// callers to know which slot ranges to resolve.
    pub fn card_page_indices(&self) -> Vec<u32> {
        match self {
            PageConfig::Cover => vec![],
            PageConfig::CoverAndFirst { right } => vec![right.card_page_index],
            PageConfig::CardsSingle { page } => vec![page.card_page_index],
            PageConfig::CardsPair { left, right } => {
                vec![left.card_page_index, right.card_page_index]
            }
        }
    }
}

/// Largest physical page index the pair math can address without the
/// card-page numbering overflowing u32. Permutation entries beyond it are
/// malformed data, not valid pages.
const MAX_PHYSICAL_PAGE: usize = ((u32::MAX - 1) / 2) as usize;

/// Applies the optional `page_order` permutation. Indices the permutation
/// does not cover — or entries too large to be a real page — fall through
/// to identity. Stored permutations are untrusted input; a bad entry must
/// degrade, never panic.
pub fn physical_page_index(logical: usize, page_order: Option<&[usize]>) -> usize {
    let physical = page_order
        .and_then(|order| order.get(logical).copied())
        .unwrap_or(logical);
    if physical > MAX_PHYSICAL_PAGE {
        logical.min(MAX_PHYSICAL_PAGE)
    } else {
        physical
    }
}

/// Page configuration for a logical binder page index.
///
/// Pure and idempotent: same inputs, structurally identical output.
pub fn page_config(logical: usize, is_mobile: bool, page_order: Option<&[usize]>) -> PageConfig {
    let physical = physical_page_index(logical, page_order);

    if is_mobile {
        if physical == 0 {
            PageConfig::Cover
        } else {
            PageConfig::CardsSingle {
                page: CardPageRef::new(physical as u32 - 1),
            }
        }
    } else if physical == 0 {
        PageConfig::CoverAndFirst {
            right: CardPageRef::new(0),
        }
    } else {
        let left = (physical as u32 - 1) * 2 + 1;
        PageConfig::CardsPair {
            left: CardPageRef::new(left),
            right: CardPageRef::new(left + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_first_page_is_cover_and_first() {
        let config = page_config(0, false, None);
        assert_eq!(
            config,
            PageConfig::CoverAndFirst {
                right: CardPageRef {
                    card_page_index: 0,
                    page_number: 1
                }
            }
        );
    }

    #[test]
    fn test_desktop_pairs_after_first_page() {
        // Binder page 1 → card-pages 1,2; page 2 → 3,4; page 3 → 5,6.
        for (binder_page, left_idx) in [(1usize, 1u32), (2, 3), (3, 5)] {
            match page_config(binder_page, false, None) {
                PageConfig::CardsPair { left, right } => {
                    assert_eq!(left.card_page_index, left_idx);
                    assert_eq!(right.card_page_index, left_idx + 1);
                    assert_eq!(left.page_number, left_idx + 1);
                    assert_eq!(right.page_number, left_idx + 2);
                }
                other => panic!("expected CardsPair, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_mobile_single_pages() {
        assert_eq!(page_config(0, true, None), PageConfig::Cover);
        assert_eq!(
            page_config(1, true, None),
            PageConfig::CardsSingle {
                page: CardPageRef {
                    card_page_index: 0,
                    page_number: 1
                }
            }
        );
        assert_eq!(
            page_config(4, true, None),
            PageConfig::CardsSingle {
                page: CardPageRef {
                    card_page_index: 3,
                    page_number: 4
                }
            }
        );
    }

    #[test]
    fn test_page_order_permutation_applies() {
        let order = vec![2usize, 0, 1];
        match page_config(0, false, Some(&order)) {
            // logical 0 → physical 2 → card-pages 3,4
            PageConfig::CardsPair { left, right } => {
                assert_eq!(left.card_page_index, 3);
                assert_eq!(right.card_page_index, 4);
            }
            other => panic!("expected CardsPair, got {other:?}"),
        }
        // logical 1 → physical 0 → the cover spread
        assert!(matches!(
            page_config(1, false, Some(&order)),
            PageConfig::CoverAndFirst { .. }
        ));
    }

    #[test]
    fn test_page_order_out_of_range_falls_back_to_identity() {
        let order = vec![1usize];
        assert_eq!(page_config(3, false, Some(&order)), page_config(3, false, None));
    }

    #[test]
    fn test_page_order_absurd_entry_falls_back_to_identity() {
        // A stored permutation can carry any value; entries too large to be
        // a real page must not take down the view.
        for bad in [u32::MAX as usize, usize::MAX] {
            let order = vec![bad];
            assert_eq!(page_config(0, false, Some(&order)), page_config(0, false, None));
            assert_eq!(page_config(0, true, Some(&order)), page_config(0, true, None));
        }
        // Entries past the permutation are still plain identity.
        let order = vec![usize::MAX];
        assert_eq!(page_config(2, false, Some(&order)), page_config(2, false, None));
    }

    #[test]
    fn test_page_config_is_idempotent() {
        let order = vec![1usize, 0];
        for mobile in [false, true] {
            for logical in 0..4 {
                assert_eq!(
                    page_config(logical, mobile, Some(&order)),
                    page_config(logical, mobile, Some(&order))
                );
            }
        }
    }

    #[test]
    fn test_card_page_indices_per_variant() {
        assert!(page_config(0, true, None).card_page_indices().is_empty());
        assert_eq!(page_config(0, false, None).card_page_indices(), vec![0]);
        assert_eq!(page_config(2, false, None).card_page_indices(), vec![3, 4]);
        assert_eq!(page_config(2, true, None).card_page_indices(), vec![1]);
    }
}
