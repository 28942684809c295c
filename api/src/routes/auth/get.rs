use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use services::user_service::{UserService, UserSummary};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiError;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserSummary,
}

/// GET /auth/me
///
/// Returns the signed-in user's current record (never the password).
///
/// ### Responses
/// - `200 OK` `{ "user": { "id": 1, "name": "…", "email": "…", "address": "…", "role": "normal_user", … } }`
/// - `401 Unauthorized`
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::find_summary(app_state.db(), user.id).await?;
    Ok(Json(MeResponse { user }))
}
