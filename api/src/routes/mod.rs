//! HTTP route entry point.
//!
//! Routes are grouped by audience, each protected by its access guard:
//! - `/health` → health check (public)
//! - `/auth` → registration, login and session endpoints
//! - `/store` → store browsing (normal users and admins)
//! - `/admin` → user and store administration (admins)
//! - `/user` → rating endpoints (normal users)
//! - `/owner` → store owner dashboard (store owners)

use axum::{Router, middleware::from_fn};
use tower_sessions::{SessionManagerLayer, SessionStore, service::SignedCookie};
use util::state::AppState;

use crate::auth::middleware::log_request;
use crate::routes::{
    admin::admin_routes, auth::auth_routes, health::health_routes, owner::owner_routes,
    store::store_routes, user::user_routes,
};

pub mod admin;
pub mod auth;
pub mod health;
pub mod owner;
pub mod store;
pub mod user;

/// Builds the application router for all HTTP endpoints, with state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/store", store_routes())
        .nest("/admin", admin_routes())
        .nest("/user", user_routes())
        .nest("/owner", owner_routes())
        .with_state(app_state)
}

/// Full application: routes, request logging and the session layer.
///
/// The session layer is outermost so both the guards and the request logger
/// can read the signed-in user. CORS is added by the binary.
pub fn app<Store>(app_state: AppState, sessions: SessionManagerLayer<Store, SignedCookie>) -> Router
where
    Store: SessionStore + Clone,
{
    routes(app_state)
        .layer(from_fn(log_request))
        .layer(sessions)
}
