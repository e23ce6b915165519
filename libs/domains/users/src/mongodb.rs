//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{UpdateUser, User};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("shardDB"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>(COLLECTION),
        }
    }

    /// Create the unique email and phone indexes
    ///
    /// Idempotent; safe to run on every startup.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_users_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "phone": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_users_phone_unique".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    /// `{ $or: [{email}, {phone}], _id: { $ne: exclude } }`, or `None` when
    /// neither contact field is given
    fn build_contact_filter(
        email: Option<&str>,
        phone: Option<&str>,
        exclude: Option<ObjectId>,
    ) -> Option<Document> {
        let mut or = Vec::new();
        if let Some(email) = email {
            or.push(doc! { "email": email });
        }
        if let Some(phone) = phone {
            or.push(doc! { "phone": phone });
        }
        if or.is_empty() {
            return None;
        }

        let mut filter = doc! { "$or": or };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": id });
        }
        Some(filter)
    }

    /// Update document for the supplied fields
    ///
    /// An empty `profile_picture_url` removes the field.
    fn build_update(input: &UpdateUser, now: bson::DateTime) -> Document {
        let mut set = doc! { "updated_at": now };

        if let Some(ref firstname) = input.firstname {
            set.insert("firstname", firstname);
        }
        if let Some(ref lastname) = input.lastname {
            set.insert("lastname", lastname);
        }
        if let Some(ref email) = input.email {
            set.insert("email", email);
        }
        if let Some(ref phone) = input.phone {
            set.insert("phone", phone);
        }

        let mut update = doc! {};
        match input.profile_picture_url.as_deref() {
            Some("") => {
                update.insert("$unset", doc! { "profile_picture_url": "" });
            }
            Some(url) => {
                set.insert("profile_picture_url", url);
            }
            None => {}
        }
        update.insert("$set", set);

        update
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> UserResult<ObjectId> {
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user.id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn exists_by_contact(
        &self,
        email: Option<String>,
        phone: Option<String>,
        exclude: Option<ObjectId>,
    ) -> UserResult<bool> {
        let Some(filter) = Self::build_contact_filter(email.as_deref(), phone.as_deref(), exclude)
        else {
            return Ok(false);
        };

        let count = self.collection.count_documents(filter).limit(1).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: ObjectId, input: UpdateUser) -> UserResult<bool> {
        let update = Self::build_update(&input, bson::DateTime::now());
        let result = self.collection.update_one(doc! { "_id": id }, update).await?;

        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(user_id = %id, "User updated successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(user_id = %id, "User deleted successfully");
        Ok(true)
    }
}
