pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::binders::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Binder documents
        .route(
            "/api/v1/binders",
            post(handlers::handle_create_binder).get(handlers::handle_list_binders),
        )
        .route(
            "/api/v1/binders/:id",
            get(handlers::handle_get_binder).delete(handlers::handle_delete_binder),
        )
        .route(
            "/api/v1/binders/:id/settings",
            patch(handlers::handle_update_settings),
        )
        // Card slots
        .route("/api/v1/binders/:id/cards", post(handlers::handle_set_card))
        .route(
            "/api/v1/binders/:id/cards/move",
            post(handlers::handle_move_card),
        )
        .route(
            "/api/v1/binders/:id/cards/:position",
            delete(handlers::handle_remove_card),
        )
        // Rendered page view (the layout engine's HTTP surface)
        .route("/api/v1/binders/:id/view", get(handlers::handle_get_view))
        .with_state(state)
}
