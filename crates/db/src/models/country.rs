//! Country model and DTOs.

use roomly_core::pagination::{Entity, FieldValue};
use roomly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::page_source::PgEntity;

/// A row from the `countries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    /// ISO 3166-1 alpha-2, upper case.
    pub iso_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Country {
    type Id = DbId;
    const NAME: &'static str = "Country";
    const FIELDS: &'static [&'static str] = &["id", "name", "iso_code"];

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "iso_code" => Some(self.iso_code.as_str().into()),
            _ => None,
        }
    }
}

impl PgEntity for Country {
    const TABLE: &'static str = "countries";
    const COLUMNS: &'static str = "id, name, iso_code, created_at, updated_at";
}

/// DTO for creating a country.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCountry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(equal = 2))]
    pub iso_code: String,
}

/// DTO for updating a country. `None` fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCountry {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(equal = 2))]
    pub iso_code: Option<String>,
}

/// Query parameters for `GET /countries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryListParams {
    /// Case-insensitive substring of the country name.
    pub search: Option<String>,
}
