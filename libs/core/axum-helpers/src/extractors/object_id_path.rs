//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a single MongoDB ObjectId path parameter.
///
/// A value that is not 24 hex characters is rejected with
/// 400 `Invalid <param>`, named after the route parameter.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::ObjectIdPath;
///
/// // GET /user/zzz -> 400 {"error": "Invalid userId"}
/// async fn get_user(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/user/{userId}", get(get_user));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let Some((name, value)) = params.into_iter().next() else {
            return Err(AppError::InternalServerError(
                "ObjectIdPath used on a route without path parameters".to_string(),
            ));
        };

        ObjectId::parse_str(&value)
            .map(ObjectIdPath)
            .map_err(|_| AppError::InvalidId(format!("Invalid {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/product/{productId}",
            get(|ObjectIdPath(id): ObjectIdPath| async move { id.to_hex() }),
        )
    }

    async fn send(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_object_id() {
        let id = ObjectId::new();
        let (status, body) = send(&format!("/product/{}", id.to_hex())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_hex());
    }

    #[tokio::test]
    async fn test_invalid_object_id_names_parameter() {
        let (status, body) = send("/product/not-an-id").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Invalid productId"}"#);
    }
}
