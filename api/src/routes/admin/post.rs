use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use services::{
    store_service::{CreateStore, StoreService},
    user_service::{CreateUser, UserService},
};
use util::state::AppState;

use crate::response::ApiError;
use crate::routes::auth::post::UserCreatedResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCreatedResponse {
    pub message: &'static str,
    pub store_id: i64,
}

/// POST /admin/stores
///
/// ### Request Body
/// ```json
/// { "name": "Corner Mart", "email": "mart@example.com", "address": "1 Main St", "owner_id": 2 }
/// ```
///
/// ### Responses
/// - `201 Created` `{ "message": "Store created", "storeId": 9 }`
/// - `400 Bad Request` `{ "success": false, "data": {}, "message": "Invalid store owner ID." }`
pub async fn create_store(
    State(app_state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateStore>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let store = StoreService::create(app_state.db(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(StoreCreatedResponse {
            message: "Store created",
            store_id: store.id,
        }),
    ))
}

/// POST /admin/users
///
/// ### Request Body
/// ```json
/// {
///   "name": "Jordan Example Store Owner",
///   "email": "jordan@example.com",
///   "password": "Secret#123",
///   "address": "12 Long Road",
///   "role": "store_owner"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` `{ "message": "User created", "userId": 4 }`
/// - `400 Bad Request` validation failure
/// - `409 Conflict` `{ "success": false, "data": {}, "message": "Email already exists." }`
pub async fn create_user(
    State(app_state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateUser>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserService::create(app_state.db(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created",
            user_id: user.id,
        }),
    ))
}
