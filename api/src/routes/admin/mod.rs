//! # admin Routes Module
//!
//! Administration endpoints. Every route requires the `admin` role.

pub mod get;
pub mod post;

use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use crate::routes::store::get::list_stores;
use get::{get_dashboard, get_owners, get_user, list_users};
use post::{create_store, create_user};

/// Builds the `/admin` route group.
///
/// - `GET /admin/stores` → `list_stores`
/// - `POST /admin/stores` → `create_store`
/// - `GET /admin/owners` → `get_owners`
/// - `GET /admin/dashboard` → `get_dashboard`
/// - `GET /admin/users` → `list_users`
/// - `POST /admin/users` → `create_user`
/// - `GET /admin/users/{user_id}` → `get_user`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores).post(create_store))
        .route("/owners", get(get_owners))
        .route("/dashboard", get(get_dashboard))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route_layer(from_fn(allow_admin))
}
