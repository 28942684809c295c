use axum::{Json, extract::State, response::IntoResponse};
use services::rating_service::RatingService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiError;

/// GET /user/rating
///
/// Every rating the signed-in user has submitted, most recent first.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// [
///   { "id": 4, "storeId": 3, "userId": 7, "rating": 5, "createdAt": "…", "updatedAt": "…",
///     "store": { "id": 3, "name": "Corner Mart", "email": "…", "address": "…" } }
/// ]
/// ```
pub async fn get_my_ratings(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let ratings = RatingService::list_for_user(app_state.db(), user.id).await?;
    Ok(Json(ratings))
}
