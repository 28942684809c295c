use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use services::{
    dashboard_service::DashboardService,
    user_service::{UserListQuery, UserService},
};
use util::state::AppState;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
pub struct OwnerSearchQuery {
    pub q: Option<String>,
}

/// GET /admin/owners
///
/// Autocomplete over store owners for the store creation form.
///
/// ### Query Parameters
/// - `q` (optional): case-insensitive match on name or email; blank returns every owner
///
/// ### Responses
/// - `200 OK` `[ { "id": 2, "name": "…", "email": "…" } ]` ordered by name
pub async fn get_owners(
    State(app_state): State<AppState>,
    Query(query): Query<OwnerSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let owners = UserService::search_owners(app_state.db(), query.q.as_deref()).await?;
    tracing::debug!(count = owners.len(), q = ?query.q, "owner lookup");
    Ok(Json(owners))
}

/// GET /admin/dashboard
///
/// ### Responses
/// - `200 OK` `{ "totalUsers": 12, "totalStores": 5, "totalRatings": 31 }`
pub async fn get_dashboard(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = DashboardService::stats(app_state.db()).await?;
    Ok(Json(stats))
}

/// GET /admin/users
///
/// ### Query Parameters
/// - `search` (optional): matches name, email or address
/// - `role` (optional): comma-separated roles, e.g. `store_owner,normal_user`
/// - `sortBy` (optional): `name` (default), `email`, `address`, `role`
/// - `order` (optional): `ASC` (default) or `DESC`
/// - `page` (default 1), `limit` (default 5)
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "users": [ { "id": 2, "name": "…", "role": "store_owner", "averageStoreRating": 4.25, … } ],
///   "total": 9,
///   "page": 1,
///   "totalPages": 2
/// }
/// ```
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = UserService::list(app_state.db(), &query).await?;
    Ok(Json(page))
}

/// GET /admin/users/{user_id}
///
/// ### Responses
/// - `200 OK` the user; store owners include `averageStoreRating`
/// - `404 Not Found` `{ "success": false, "data": {}, "message": "User not found" }`
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::find_summary(app_state.db(), user_id).await?;
    Ok(Json(user))
}
