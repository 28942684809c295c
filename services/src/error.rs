use db::DbErr;
use sea_orm::SqlErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Failure modes shared by every service.
///
/// The HTTP layer maps each variant onto exactly one status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request fields failed validation.
    #[error("{0}")]
    Validation(String),

    /// `owner_id` does not reference an existing store owner.
    #[error("Invalid store owner ID.")]
    InvalidOwner,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(format_validation_errors(&errors))
    }
}

impl ServiceError {
    /// True when the underlying database error is a unique-index violation.
    pub fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

/// Joins every field error message into a single `; `-separated string.
///
/// Fields are visited in name order so the message is stable.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
