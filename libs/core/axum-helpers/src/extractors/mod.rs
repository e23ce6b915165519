//! Custom extractors for Axum handlers.
//!
//! Each one turns its rejection into an [`AppError`](crate::errors::AppError)
//! so every 400 shares the `{"error": ...}` body.

pub mod object_id_path;
pub mod validated_json;
pub mod validated_query;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
