//! # auth Routes Module
//!
//! Routes for the `/auth` endpoint group.
//!
//! - `post.rs`: register, login, logout
//! - `get.rs`: current user
//! - `put.rs`: password change

pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use get::get_me;
use post::{login, logout, register};
use put::change_password;

/// Builds the `/auth` route group.
///
/// - `POST /auth/register` → `register` (public)
/// - `POST /auth/login` → `login` (public)
/// - `POST /auth/logout` → `logout` (signed in)
/// - `GET /auth/me` → `get_me` (signed in)
/// - `PUT /auth/password` → `change_password` (signed in)
pub fn auth_routes() -> Router<AppState> {
    let signed_in = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(get_me))
        .route("/password", put(change_password))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(signed_in)
}
