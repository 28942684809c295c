use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use services::user_service::{ChangePassword, UserService};
use util::state::AppState;

use super::post::MessageResponse;
use crate::auth::AuthUser;
use crate::response::ApiError;

/// PUT /auth/password
///
/// ### Request Body
/// ```json
/// { "currentPassword": "Secret#123", "newPassword": "Fresh#4567" }
/// ```
///
/// ### Responses
/// - `200 OK` `{ "message": "Password updated" }`
/// - `400 Bad Request` weak new password or wrong current password
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<ChangePassword>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    UserService::change_password(app_state.db(), user.id, &req).await?;
    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}
