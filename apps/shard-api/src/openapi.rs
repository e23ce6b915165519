//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shard API",
        version = "0.1.0",
        description = "Users and products document API backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Users", description = "User registration and profile endpoints"),
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs
///
/// The resource routers are mounted at the root, so the domain documents are
/// merged rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
