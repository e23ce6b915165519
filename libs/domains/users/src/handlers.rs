use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, Created, ObjectIdPath, StatusMessage, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, Role, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(get_user, create_user, update_user, delete_user),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, Role),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User registration and profile endpoints")
    )
)]
pub struct ApiDoc;

/// Users router: `POST /user` and `GET|PUT|DELETE /user/{userId}`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/user", post(create_user))
        .route(
            "/user/{userId}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/user/{userId}",
    tag = "Users",
    params(
        ("userId" = String, Path, description = "User ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(ApiResponse::success(user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered successfully", body = Created),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let id = service.create_user(input).await?;
    Ok(Created::new("User registered successfully", id.to_hex()))
}

/// Update a user's profile fields
#[utoipa::path(
    put,
    path = "/user/{userId}",
    tag = "Users",
    params(
        ("userId" = String, Path, description = "User ObjectId (24 hex characters)")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = StatusMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<StatusMessage> {
    service.update_user(id, input).await?;
    Ok(StatusMessage::success("User updated successfully"))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    tag = "Users",
    params(
        ("userId" = String, Path, description = "User ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = StatusMessage),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> UserResult<StatusMessage> {
    service.delete_user(id).await?;
    Ok(StatusMessage::success("User deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mongodb::bson::oid::ObjectId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn app(mock_repo: MockUserRepository) -> Router {
        router(UserService::new(mock_repo))
    }

    #[tokio::test]
    async fn test_create_user_returns_201_with_id() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_exists_by_contact()
            .returning(|_, _, _| Ok(false));
        mock_repo.expect_insert().returning(|user| Ok(user.id));

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/user",
                json!({
                    "firstname": "Linus",
                    "email": "linus@example.com",
                    "password": "penguin",
                    "phone": "5551234"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "User registered successfully");
        assert!(ObjectId::parse_str(body["id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_create_user_missing_phone_returns_400() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_insert().never();

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/user",
                json!({ "firstname": "Linus", "email": "linus@example.com", "password": "x" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response.into_body()).await,
            json!({ "error": "Firstname, Email, Password and Phone are required" })
        );
    }

    #[tokio::test]
    async fn test_create_user_duplicate_returns_409() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_exists_by_contact()
            .returning(|_, _, _| Ok(true));

        let response = app(mock_repo)
            .oneshot(json_request(
                "POST",
                "/user",
                json!({
                    "firstname": "Linus",
                    "email": "linus@example.com",
                    "password": "penguin",
                    "phone": "5551234"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(response.into_body()).await["error"],
            "User with this email or phone already exists"
        );
    }

    #[tokio::test]
    async fn test_create_user_malformed_json_returns_400() {
        let response = app(MockUserRepository::new())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/user")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"firstname\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_user_returns_envelope_without_password() {
        let user = User::new(
            CreateUser {
                firstname: "Ken".to_string(),
                email: "ken@example.com".to_string(),
                password: "unix".to_string(),
                phone: "5550000".to_string(),
                ..Default::default()
            },
            "$argon2id$v=19$stored".to_string(),
        );
        let id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let response = app(mock_repo)
            .oneshot(empty_request("GET", &format!("/user/{}", id.to_hex())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["id"], id.to_hex());
        assert_eq!(body["data"]["email"], "ken@example.com");
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_get_user_unknown_returns_404() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(mock_repo)
            .oneshot(empty_request(
                "GET",
                &format!("/user/{}", ObjectId::new().to_hex()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response.into_body()).await,
            json!({ "error": "User not found" })
        );
    }

    #[tokio::test]
    async fn test_malformed_id_returns_400_on_every_route() {
        for method in ["GET", "PUT", "DELETE"] {
            let request = if method == "PUT" {
                json_request(method, "/user/12345", json!({}))
            } else {
                empty_request(method, "/user/12345")
            };

            let response = app(MockUserRepository::new())
                .oneshot(request)
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(
                json_body(response.into_body()).await,
                json!({ "error": "Invalid userId" })
            );
        }
    }

    #[tokio::test]
    async fn test_update_user_empty_body_succeeds() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_exists_by_contact().never();
        mock_repo
            .expect_update()
            .withf(|_, input| *input == UpdateUser::default())
            .returning(|_, _| Ok(true));

        let response = app(mock_repo)
            .oneshot(json_request(
                "PUT",
                &format!("/user/{}", ObjectId::new().to_hex()),
                json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response.into_body()).await,
            json!({ "status": "success", "message": "User updated successfully" })
        );
    }

    #[tokio::test]
    async fn test_update_user_contact_in_use_returns_409() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_exists_by_contact()
            .returning(|_, _, _| Ok(true));

        let response = app(mock_repo)
            .oneshot(json_request(
                "PUT",
                &format!("/user/{}", ObjectId::new().to_hex()),
                json!({ "phone": "5559999" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(response.into_body()).await["error"],
            "Email or phone already in use by another user"
        );
    }

    #[tokio::test]
    async fn test_delete_user_unknown_returns_404() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let response = app(mock_repo)
            .oneshot(empty_request(
                "DELETE",
                &format!("/user/{}", ObjectId::new().to_hex()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_returns_success_message() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(true));

        let response = app(mock_repo)
            .oneshot(empty_request(
                "DELETE",
                &format!("/user/{}", ObjectId::new().to_hex()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response.into_body()).await,
            json!({ "status": "success", "message": "User deleted successfully" })
        );
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(UserError::Database("server selection timeout".into())));

        let response = app(mock_repo)
            .oneshot(empty_request(
                "GET",
                &format!("/user/{}", ObjectId::new().to_hex()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response.into_body()).await["error"],
            "server selection timeout"
        );
    }
}
