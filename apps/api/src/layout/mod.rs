// Binder layout engine: pure functions mapping a sparse card map plus
// settings onto binder pages. No I/O anywhere in this module tree; card
// data arrives pre-fetched through the `CardLookup` seam.

pub mod grid;
pub mod pages;
pub mod settings;
pub mod slots;
pub mod spread;

// Re-export the public API consumed by handlers.
pub use pages::{compute_total_pages, has_unreachable_cards};
pub use settings::ResolvedSettings;
pub use slots::{cards_for_page, CardLookup};
pub use spread::{page_config, PageConfig};
