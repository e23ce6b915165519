use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::{duplicate_key_index, is_duplicate_key_error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Product with this name already exists")]
    AlreadyExists,

    /// Unique index rejected a write; carries the index name when known
    #[error("Duplicate key on index {0:?}")]
    DuplicateKey(Option<String>),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => AppError::NotFound(err.to_string()),
            ProductError::AlreadyExists | ProductError::DuplicateKey(_) => {
                AppError::Conflict(ProductError::AlreadyExists.to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key_error(&err) {
            ProductError::DuplicateKey(duplicate_key_index(&err))
        } else {
            ProductError::Database(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::NotFound, StatusCode::NOT_FOUND),
            (ProductError::AlreadyExists, StatusCode::CONFLICT),
            (
                ProductError::DuplicateKey(Some("idx_products_name_unique".into())),
                StatusCode::CONFLICT,
            ),
            (
                ProductError::Validation("Invalid page number".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database("timeout".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_duplicate_key_reports_name_conflict() {
        let app_error = AppError::from(ProductError::DuplicateKey(None));
        assert_eq!(app_error.message(), "Product with this name already exists");
    }
}
