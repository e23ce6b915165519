//! Product Service - catalogue rules on top of the repository

use axum_helpers::errors::validation_message;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ListQuery, Product, ProductPage, ProductResponse, UpdateProduct};
use crate::repository::ProductRepository;

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

fn name_conflict(err: ProductError) -> ProductError {
    match err {
        ProductError::DuplicateKey(_) => ProductError::AlreadyExists,
        other => other,
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ObjectId> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(validation_message(&e)))?;

        if self
            .repository
            .exists_by_name(input.name.clone(), None)
            .await?
        {
            return Err(ProductError::AlreadyExists);
        }

        self.repository
            .insert(Product::new(input))
            .await
            .map_err(name_conflict)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<ProductResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or(ProductError::NotFound)
    }

    /// One page of products plus the total matching the filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListQuery) -> ProductResult<ProductPage> {
        query
            .validate()
            .map_err(|e| ProductError::Validation(validation_message(&e)))?;

        let skip = query
            .skip()
            .ok_or_else(|| ProductError::Validation("Invalid page number".to_string()))?;

        let filter = query.filter();
        let (total, products) = tokio::try_join!(
            self.repository.count(filter.clone()),
            self.repository.list(filter, skip, query.limit),
        )?;

        Ok(ProductPage::new(
            products.into_iter().map(ProductResponse::from).collect(),
            total,
            query.page as u64,
            query.limit as u64,
        ))
    }

    /// Apply a sparse update; a new name must not belong to another product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: ObjectId, input: UpdateProduct) -> ProductResult<()> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(validation_message(&e)))?;

        if let Some(ref name) = input.name {
            if self
                .repository
                .exists_by_name(name.clone(), Some(id))
                .await?
            {
                return Err(ProductError::AlreadyExists);
            }
        }

        let matched = self
            .repository
            .update(id, input)
            .await
            .map_err(name_conflict)?;

        if !matched {
            return Err(ProductError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound);
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductFilter;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn create_input() -> CreateProduct {
        CreateProduct {
            name: "Desk lamp".to_string(),
            description: "Warm white".to_string(),
            price: 24.5,
            category: "lighting".to_string(),
            images: vec![],
            stock_quantity: 3,
            is_active: true,
        }
    }

    fn product(name: &str) -> Product {
        Product::new(CreateProduct {
            name: name.to_string(),
            ..create_input()
        })
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_name()
            .with(eq("Desk lamp".to_string()), eq(None))
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_insert()
            .withf(|p| p.name == "Desk lamp" && p.is_active)
            .returning(|p| Ok(p.id));

        let service = ProductService::new(mock_repo);
        assert!(service.create_product(create_input()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_product_duplicate_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_name()
            .returning(|_, _| Ok(true));
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let err = service.create_product(create_input()).await.unwrap_err();
        assert!(matches!(err, ProductError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_create_product_index_race() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_name()
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_insert()
            .returning(|_| Err(ProductError::DuplicateKey(None)));

        let service = ProductService::new(mock_repo);
        let err = service.create_product(create_input()).await.unwrap_err();
        assert!(matches!(err, ProductError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_create_product_zero_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_exists_by_name().never();

        let service = ProductService::new(mock_repo);
        let input = CreateProduct {
            price: 0.0,
            ..create_input()
        };

        match service.create_product(input).await.unwrap_err() {
            ProductError::Validation(msg) => assert_eq!(
                msg,
                "Name and price are required. Price must be greater than 0"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_products_paginates() {
        let mut mock_repo = MockProductRepository::new();
        let expected_filter = ProductFilter {
            category: Some("lighting".to_string()),
            min_price: Some(10.0),
            max_price: Some(20.0),
            in_stock: false,
        };

        mock_repo
            .expect_count()
            .with(eq(expected_filter.clone()))
            .returning(|_| Ok(21));
        mock_repo
            .expect_list()
            .with(eq(expected_filter), eq(10), eq(10))
            .returning(|_, _, _| Ok(vec![product("a"), product("b")]));

        let service = ProductService::new(mock_repo);
        let page = service
            .list_products(ListQuery {
                page: 2,
                limit: 10,
                category: Some("lighting".to_string()),
                min_price: Some(10.0),
                max_price: Some(20.0),
                in_stock: None,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
        assert_eq!(page.pages, 3);
        assert_eq!(page.products.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_rejects_limit() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().never();
        mock_repo.expect_list().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .list_products(ListQuery {
                limit: 0,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_products_page_past_offset_range() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().never();
        mock_repo.expect_list().never();

        let service = ProductService::new(mock_repo);
        match service
            .list_products(ListQuery {
                page: i64::MAX,
                ..Default::default()
            })
            .await
            .unwrap_err()
        {
            ProductError::Validation(msg) => assert_eq!(msg, "Invalid page number"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_product_name_taken() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_name()
            .with(eq("Floor lamp".to_string()), eq(Some(id)))
            .returning(|_, _| Ok(true));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let input = UpdateProduct {
            name: Some("Floor lamp".to_string()),
            ..Default::default()
        };

        let err = service.update_product(id, input).await.unwrap_err();
        assert!(matches!(err, ProductError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_update_product_negative_stock() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let input = UpdateProduct {
            stock_quantity: Some(-1),
            ..Default::default()
        };

        let err = service
            .update_product(ObjectId::new(), input)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_exists_by_name().never();
        mock_repo.expect_update().returning(|_, _| Ok(false));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(ObjectId::new(), UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let err = service.delete_product(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
    }
}
