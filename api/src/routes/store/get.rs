use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use services::store_service::{StoreListQuery, StoreService};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiError;

/// GET /store
///
/// Paginated store listing for the signed-in user. Also mounted as
/// `GET /admin/stores`.
///
/// ### Query Parameters
/// - `search` (optional): case-insensitive match on name or address (admins: also email)
/// - `email` (optional): case-insensitive email substring
/// - `sortBy` (optional): `name` (default), `email`, `address`
/// - `order` (optional): `ASC` (default) or `DESC`
/// - `page` (optional, default 1) and `limit` (optional, default 2), both clamped to ≥ 1
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "stores": [
///     { "id": 3, "name": "Corner Mart", "email": "mart@example.com", "address": "1 Main St",
///       "averageRating": 4.5, "userRating": null }
///   ],
///   "pagination": { "currentPage": 1, "limit": 2, "totalCount": 5, "totalPages": 3, "hasMore": true }
/// }
/// ```
/// - `400 Bad Request` unknown `sortBy` or `order`
/// - `500 Internal Server Error` `{ "success": false, "data": {}, "message": "Internal server error" }`
pub async fn list_stores(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<StoreListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = StoreService::list(app_state.db(), user.viewer(), &query).await?;
    Ok(Json(page))
}
