//! User Service - registration, profile updates and password hashing

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::errors::validation_message;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user, storing an Argon2 hash instead of the password
    ///
    /// The email/phone lookup returns the friendly conflict early; the unique
    /// indexes catch anything that races past it.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<ObjectId> {
        input
            .validate()
            .map_err(|e| UserError::Validation(validation_message(&e)))?;

        if self
            .repository
            .exists_by_contact(Some(input.email.clone()), Some(input.phone.clone()), None)
            .await?
        {
            return Err(UserError::AlreadyExists);
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input, password_hash);

        self.repository
            .insert(user)
            .await
            .map_err(|e| match e {
                UserError::DuplicateKey(_) => UserError::AlreadyExists,
                other => other,
            })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ObjectId) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound)
    }

    /// Apply a sparse update
    ///
    /// A new email or phone must not belong to any other user.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: ObjectId, input: UpdateUser) -> UserResult<()> {
        input
            .validate()
            .map_err(|e| UserError::Validation(validation_message(&e)))?;

        if input.touches_contact()
            && self
                .repository
                .exists_by_contact(input.email.clone(), input.phone.clone(), Some(id))
                .await?
        {
            return Err(UserError::ContactInUse);
        }

        let matched = self
            .repository
            .update(id, input)
            .await
            .map_err(|e| match e {
                UserError::DuplicateKey(_) => UserError::ContactInUse,
                other => other,
            })?;

        if !matched {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: ObjectId) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Salted Argon2id hash in PHC string format
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
