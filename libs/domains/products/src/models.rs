use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

fn default_true() -> bool {
    true
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Query values sent empty (`?minPrice=`) count as absent.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn page_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_string_as_none(deserializer)?.unwrap_or(DEFAULT_PAGE))
}

fn limit_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_string_as_none(deserializer)?.unwrap_or(DEFAULT_LIMIT))
}

/// Product document as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            images: input.images,
            stock_quantity: input.stock_quantity,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for `POST /product`
///
/// A missing `name` or `price` deserializes to its empty value and then fails
/// validation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(
        min = 1,
        message = "Name and price are required. Price must be greater than 0"
    ))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(range(
        exclusive_min = 0.0,
        message = "Name and price are required. Price must be greater than 0"
    ))]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for `PUT /product/{productId}`
///
/// Every key is optional. A present key overwrites the stored value, so
/// `"description": ""` or `"images": []` clear those fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1
    #[serde(default = "default_page", deserialize_with = "page_or_default")]
    #[validate(range(min = 1, message = "Invalid page number"))]
    #[param(default = 1, minimum = 1)]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit", deserialize_with = "limit_or_default")]
    #[validate(range(min = 1, max = 100, message = "Invalid limit. Must be between 1 and 100"))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<f64>,
    /// `true` keeps only products with `stock_quantity > 0`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub in_stock: Option<bool>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            min_price: None,
            max_price: None,
            in_stock: None,
        }
    }
}

impl ListQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone().filter(|c| !c.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock.unwrap_or(false),
        }
    }

    /// Documents to skip for the requested page
    ///
    /// `None` when the offset does not fit the driver's signed 64-bit skip.
    pub fn skip(&self) -> Option<u64> {
        self.page
            .checked_sub(1)?
            .checked_mul(self.limit)
            .and_then(|skip| u64::try_from(skip).ok())
    }
}

/// Listing filter handed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: bool,
}

/// Product as returned by the read endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// 24-character hex ObjectId
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            images: product.images,
            stock_quantity: product.stock_quantity,
            is_active: product.is_active,
            created_at: DateTime::<Utc>::from(product.created_at.to_system_time()),
            updated_at: DateTime::<Utc>::from(product.updated_at.to_system_time()),
        }
    }
}

/// One page of `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<ProductResponse>,
    /// Products matching the filter across all pages
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl ProductPage {
    pub fn new(products: Vec<ProductResponse>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            products,
            total,
            page,
            limit,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}
