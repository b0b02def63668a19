//! Top-level router assembly

use crate::{
    handlers::{health::handle_health, items::create_item_routes, users::create_user_routes},
    AppState,
};
use axum::{routing::get, Router};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .merge(create_item_routes())
        .merge(create_user_routes())
}
