use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::{UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a fully built document, returning its id
    async fn insert(&self, user: User) -> UserResult<ObjectId>;

    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// Whether any user other than `exclude` has the given email or phone
    ///
    /// `None` for both contact fields always yields `false`.
    async fn exists_by_contact(
        &self,
        email: Option<String>,
        phone: Option<String>,
        exclude: Option<ObjectId>,
    ) -> UserResult<bool>;

    /// Apply the supplied fields and refresh `updated_at`
    ///
    /// Returns `false` when no document has this id.
    async fn update(&self, id: ObjectId, input: UpdateUser) -> UserResult<bool>;

    /// Returns `false` when no document has this id
    async fn delete(&self, id: ObjectId) -> UserResult<bool>;
}
