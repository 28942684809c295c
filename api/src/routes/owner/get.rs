use axum::{Json, extract::State, response::IntoResponse};
use services::store_service::StoreService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiError;

/// GET /owner/dashboard
///
/// The signed-in owner's stores with their average rating and raters.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "stores": [
///     { "id": 3, "name": "Corner Mart", "email": "…", "address": "…", "averageRating": 3.5,
///       "ratings": [ { "user": { "id": 7, "name": "…", "email": "…" }, "rating": 3 } ] }
///   ]
/// }
/// ```
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = StoreService::owner_dashboard(app_state.db(), user.id).await?;
    Ok(Json(dashboard))
}
