//! # user Routes Module
//!
//! Rating endpoints for `normal_user` accounts.

pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_normal_user;
use get::get_my_ratings;
use post::rate_store;

/// Builds the `/user` route group.
///
/// - `GET /user/rating` → `get_my_ratings`
/// - `POST /user/stores/{store_id}/rate` → `rate_store`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/rating", get(get_my_ratings))
        .route("/stores/{store_id}/rate", post(rate_store))
        .route_layer(from_fn(allow_normal_user))
}
