use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::ServiceError;

/// Standardized envelope used for health checks and every error response.
///
/// ```json
/// {
///   "success": false,
///   "data": {},
///   "message": "Invalid store owner ID."
/// }
/// ```
///
/// Successful endpoint payloads are returned bare, in the shape the store
/// client consumes.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response with default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Serializes as `{}`.
#[derive(Serialize, Default)]
pub struct Empty {}

/// Every failure a handler or guard can produce.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body.
    BadRequest(String),
    Unauthorized(&'static str),
    Forbidden(&'static str),
    Service(ServiceError),
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

/// Body deserialization failures use the error envelope with `400`.
///
/// ```ignore
/// WithRejection(Json(req), _): WithRejection<Json<CreateStore>, ApiError>
/// ```
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Service(err) => match err {
                ServiceError::Validation(_) | ServiceError::InvalidOwner => StatusCode::BAD_REQUEST,
                ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => msg.to_owned(),
            ApiError::Service(ServiceError::Database(e)) => {
                tracing::error!(error = %e, "database error");
                "Internal server error".to_owned()
            }
            ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "internal error");
                "Internal server error".to_owned()
            }
            ApiError::Service(err) => err.to_string(),
        };

        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}
