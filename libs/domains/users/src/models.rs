use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

const REQUIRED_FIELDS: &str = "Firstname, Email, Password and Phone are required";

/// User role
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

fn default_roles() -> Vec<Role> {
    vec![Role::User]
}

fn default_true() -> bool {
    true
}

/// User document as stored in the `users` collection
///
/// Holds the password hash, so it is never returned over HTTP; see
/// [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub email: String,
    pub phone: String,
    /// Argon2 PHC string
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub orders: Vec<String>,
    #[serde(default)]
    pub cart: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<bson::DateTime>,
}

impl User {
    /// Build a new document from validated input and an already hashed password
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            phone: input.phone,
            password: password_hash,
            profile_picture_url: input.profile_picture_url.filter(|url| !url.is_empty()),
            roles: default_roles(),
            orders: Vec::new(),
            cart: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }
}

/// Request body for `POST /user`
///
/// Absent keys deserialize to empty strings so that a missing field and an
/// empty one fail validation the same way.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "Firstname, Email, Password and Phone are required"))]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Firstname, Email, Password and Phone are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Firstname, Email, Password and Phone are required"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Firstname, Email, Password and Phone are required"))]
    pub phone: String,
    pub profile_picture_url: Option<String>,
}

impl CreateUser {
    /// Message reported when any required field is missing
    pub fn required_fields_message() -> &'static str {
        REQUIRED_FIELDS
    }
}

/// Request body for `PUT /user/{userId}`
///
/// An absent key leaves the field unchanged. `lastname` and
/// `profile_picture_url` may be set to `""` to clear them; the contact
/// fields and `firstname` must stay non-empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Firstname cannot be empty"))]
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl UpdateUser {
    pub fn touches_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

/// User as returned by `GET /user/{userId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// 24-character hex ObjectId
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub roles: Vec<Role>,
    pub orders: Vec<String>,
    pub cart: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

fn to_chrono(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(dt.to_system_time())
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            phone: user.phone,
            profile_picture_url: user.profile_picture_url,
            roles: user.roles,
            orders: user.orders,
            cart: user.cart,
            is_active: user.is_active,
            created_at: to_chrono(user.created_at),
            updated_at: to_chrono(user.updated_at),
            last_login: user.last_login.map(to_chrono),
        }
    }
}
