//! City model and DTOs.

use roomly_core::pagination::{Entity, FieldValue};
use roomly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::page_source::PgEntity;

/// A row from the `cities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub country_id: DbId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for City {
    type Id = DbId;
    const NAME: &'static str = "City";
    const FIELDS: &'static [&'static str] = &["id", "country_id", "name", "latitude", "longitude"];

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "country_id" => Some(self.country_id.into()),
            "name" => Some(self.name.as_str().into()),
            "latitude" => Some(self.latitude.into()),
            "longitude" => Some(self.longitude.into()),
            _ => None,
        }
    }
}

impl PgEntity for City {
    const TABLE: &'static str = "cities";
    const COLUMNS: &'static str =
        "id, country_id, name, latitude, longitude, created_at, updated_at";
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCity {
    pub country_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCity {
    pub country_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Query parameters for `GET /cities`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityListParams {
    pub country_id: Option<DbId>,
    pub search: Option<String>,
}
