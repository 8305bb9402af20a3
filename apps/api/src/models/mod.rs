pub mod binder;
pub mod card;
