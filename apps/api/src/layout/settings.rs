//! Settings resolution — optional stored settings into concrete values.
//!
//! The original documents lean on scattered `?? default` fallbacks at every
//! read site; here the defaults are enumerated exactly once.

use crate::layout::grid::GridConfig;
use crate::models::binder::BinderSettings;

pub const DEFAULT_PAGE_COUNT: u32 = 1;
pub const DEFAULT_MIN_PAGES: u32 = 1;
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Fully-resolved binder settings. Every field has a concrete value; the
/// layout engine never touches raw `BinderSettings` again after this point.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub grid: GridConfig,
    pub page_count: u32,
    pub min_pages: u32,
    pub max_pages: u32,
    /// Logical→physical binder page permutation; `None` means identity.
    pub page_order: Option<Vec<usize>>,
}

impl ResolvedSettings {
    pub fn resolve(settings: &BinderSettings) -> Self {
        ResolvedSettings {
            grid: GridConfig::from_setting(settings.grid_size.as_deref()),
            page_count: settings.page_count.unwrap_or(DEFAULT_PAGE_COUNT).max(1),
            min_pages: settings.min_pages.unwrap_or(DEFAULT_MIN_PAGES).max(1),
            max_pages: settings.max_pages.unwrap_or(DEFAULT_MAX_PAGES).max(1),
            page_order: settings.page_order.clone(),
        }
    }

    pub fn cards_per_page(&self) -> u32 {
        self.grid.total()
    }
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        ResolvedSettings::resolve(&BinderSettings::default())
    }
}
