use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use services::rating_service::{RatingService, SubmittedRating};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiError;

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i32,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: SubmittedRating,
}

/// POST /user/stores/{store_id}/rate
///
/// Creates the user's rating of the store, or replaces it if one exists.
///
/// ### Request Body
/// ```json
/// { "rating": 4 }
/// ```
///
/// ### Responses
/// - `200 OK` `{ "message": "Rating submitted", "rating": { … }, "avgRating": 4.33 }`
/// - `400 Bad Request` rating outside 1..=5
/// - `404 Not Found` unknown store
pub async fn rate_store(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(store_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<RateRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = RatingService::submit(app_state.db(), user.id, store_id, req.rating).await?;

    Ok(Json(RateResponse {
        message: "Rating submitted",
        outcome,
    }))
}
