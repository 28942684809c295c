use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use services::user_service::{LoginRequest, RegisterUser, UserService};
use tower_sessions::Session;
use util::state::AppState;

use crate::auth::session::{SESSION_USER_KEY, SessionUser};
use crate::response::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedResponse {
    pub message: &'static str,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /auth/register
///
/// Self-registration. The account is always created as `normal_user`.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Jordan Example Normal User",
///   "email": "jordan@example.com",
///   "password": "Secret#123",
///   "address": "12 Long Road"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` `{ "message": "User registered", "userId": 7 }`
/// - `400 Bad Request` validation failure
/// - `409 Conflict` `{ "success": false, "data": {}, "message": "Email already exists." }`
pub async fn register(
    State(app_state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterUser>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::register(app_state.db(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User registered",
            user_id: user.id,
        }),
    ))
}

/// POST /auth/login
///
/// Verifies credentials, rotates the session id and stores the user in the
/// session. The response carries the session cookie.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "message": "Login successful",
///   "user": { "id": 1, "name": "…", "email": "…", "role": "admin" }
/// }
/// ```
/// - `401 Unauthorized` `{ "success": false, "data": {}, "message": "Invalid email or password" }`
pub async fn login(
    State(app_state): State<AppState>,
    session: Session,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::authenticate(app_state.db(), &req).await?;
    let session_user = SessionUser::from(&user);

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::Internal(format!("session cycle failed: {e}")))?;
    session
        .insert(SESSION_USER_KEY, &session_user)
        .await
        .map_err(|e| ApiError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "user signed in");

    Ok(Json(LoginResponse {
        message: "Login successful",
        user: session_user,
    }))
}

/// POST /auth/logout
///
/// Destroys the session.
///
/// ### Responses
/// - `200 OK` `{ "message": "Logged out" }`
/// - `401 Unauthorized` when not signed in
pub async fn logout(session: Session) -> Result<impl IntoResponse, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::Internal(format!("session flush failed: {e}")))?;

    Ok(Json(MessageResponse { message: "Logged out" }))
}
