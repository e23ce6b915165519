use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a fully built document, returning its id
    async fn insert(&self, product: Product) -> ProductResult<ObjectId>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Whether a product other than `exclude` already uses `name`
    async fn exists_by_name(&self, name: String, exclude: Option<ObjectId>)
    -> ProductResult<bool>;

    /// One page of matching products, newest first
    async fn list(&self, filter: ProductFilter, skip: u64, limit: i64)
    -> ProductResult<Vec<Product>>;

    /// Count products matching a filter
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Apply the supplied fields and refresh `updated_at`
    ///
    /// Returns `false` when no document has this id.
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<bool>;

    /// Returns `false` when no document has this id
    async fn delete(&self, id: ObjectId) -> ProductResult<bool>;
}
