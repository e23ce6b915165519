//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<Product>(COLLECTION),
        }
    }

    /// Create the unique name index and the listing sort index
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_products_name_unique".to_string())
                        .build(),
                )
                .build(),
            // Newest-first listing
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_products_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        // Price range, both bounds inclusive
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("price", price_filter);
        }

        if filter.in_stock {
            doc.insert("stock_quantity", doc! { "$gt": 0 });
        }

        doc
    }

    fn build_update(input: &UpdateProduct, now: bson::DateTime) -> Document {
        let mut set = doc! { "updated_at": now };

        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(ref description) = input.description {
            set.insert("description", description);
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(ref category) = input.category {
            set.insert("category", category);
        }
        if let Some(ref images) = input.images {
            set.insert("images", images.clone());
        }
        if let Some(stock_quantity) = input.stock_quantity {
            set.insert("stock_quantity", stock_quantity);
        }
        if let Some(is_active) = input.is_active {
            set.insert("is_active", is_active);
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, product: Product) -> ProductResult<ObjectId> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product.id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: String, exclude: Option<ObjectId>) -> ProductResult<bool> {
        let mut filter = doc! { "name": name };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": id });
        }

        let count = self.collection.count_documents(filter).limit(1).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<bool> {
        let update = Self::build_update(&input, bson::DateTime::now());
        let result = self.collection.update_one(doc! { "_id": id }, update).await?;

        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }
}
