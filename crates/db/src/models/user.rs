//! User model and DTOs.
//!
//! Users are mirrored from the external identity provider: `external_id`
//! holds the token subject and the row is upserted on first authenticated
//! request.

use roomly_core::pagination::{Entity, FieldValue};
use roomly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::page_source::PgEntity;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub external_id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for User {
    type Id = DbId;
    const NAME: &'static str = "User";
    const FIELDS: &'static [&'static str] = &["id", "email", "display_name", "role"];

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "email" => Some(self.email.as_str().into()),
            "display_name" => Some(self.display_name.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            _ => None,
        }
    }
}

impl PgEntity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str =
        "id, external_id, email, display_name, role, created_at, updated_at";
}

/// Identity facts taken from a validated access token.
#[derive(Debug, Clone)]
pub struct IdentitySync {
    pub external_id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// DTO for an admin updating a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    pub role: Option<String>,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
    /// Case-insensitive substring of the email address.
    pub search: Option<String>,
}
