//! # store Routes Module
//!
//! Store browsing for normal users and admins.

pub mod get;

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_store_viewer;
use get::list_stores;

/// Builds the `/store` route group.
///
/// - `GET /store` → `list_stores`
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores))
        .route_layer(from_fn(allow_store_viewer))
}
