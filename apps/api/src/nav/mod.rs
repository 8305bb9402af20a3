//! Binder navigation state: the pager and the drag edge-hold timer.

pub mod edge;
pub mod pager;

pub use edge::{EdgeNavigator, EdgeZone};
pub use pager::Pager;
