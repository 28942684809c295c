//! # owner Routes Module
//!
//! Read-only views for store owners.

pub mod get;

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_store_owner;
use get::get_dashboard;

/// Builds the `/owner` route group.
///
/// - `GET /owner/dashboard` → `get_dashboard`
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route_layer(from_fn(allow_store_owner))
}
