use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::{duplicate_key_index, is_duplicate_key_error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User with this email or phone already exists")]
    AlreadyExists,

    #[error("Email or phone already in use by another user")]
    ContactInUse,

    /// Unique index rejected a write; carries the index name when known
    #[error("Duplicate key on index {0:?}")]
    DuplicateKey(Option<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("{0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound(err.to_string()),
            UserError::AlreadyExists | UserError::ContactInUse => {
                AppError::Conflict(err.to_string())
            }
            UserError::DuplicateKey(_) => {
                AppError::Conflict(UserError::ContactInUse.to_string())
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key_error(&err) {
            UserError::DuplicateKey(duplicate_key_index(&err))
        } else {
            UserError::Database(err.to_string())
        }
    }
}
