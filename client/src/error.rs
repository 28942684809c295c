use thiserror::Error;

/// Errors returned by the store API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No session, or the session expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status, with the server's `message`.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}
