//! Apartment listing model and DTOs.

use roomly_core::pagination::{Entity, FieldValue};
use roomly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::page_source::PgEntity;

/// A row from the `apartments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Apartment {
    pub id: DbId,
    pub landlord_id: DbId,
    pub city_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub price_per_night: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqm: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Apartment {
    type Id = DbId;
    const NAME: &'static str = "Apartment";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "landlord_id",
        "city_id",
        "title",
        "description",
        "address",
        "price_per_night",
        "bedrooms",
        "bathrooms",
        "area_sqm",
        "latitude",
        "longitude",
        "is_available",
    ];

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "landlord_id" => Some(self.landlord_id.into()),
            "city_id" => Some(self.city_id.into()),
            "title" => Some(self.title.as_str().into()),
            "description" => self.description.as_deref().map(FieldValue::from),
            "address" => Some(self.address.as_str().into()),
            "price_per_night" => Some(self.price_per_night.into()),
            "bedrooms" => Some(self.bedrooms.into()),
            "bathrooms" => Some(self.bathrooms.into()),
            "area_sqm" => Some(self.area_sqm.into()),
            "latitude" => Some(self.latitude.into()),
            "longitude" => Some(self.longitude.into()),
            "is_available" => Some(self.is_available.into()),
            _ => None,
        }
    }
}

impl PgEntity for Apartment {
    const TABLE: &'static str = "apartments";
    const COLUMNS: &'static str = "\
        id, landlord_id, city_id, title, description, address, price_per_night, \
        bedrooms, bathrooms, area_sqm, latitude, longitude, is_available, \
        created_at, updated_at";
}

/// DTO for creating an apartment. The landlord comes from the caller's token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApartment {
    pub city_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[validate(range(min = 0, max = 50))]
    pub bedrooms: i32,
    #[validate(range(min = 0, max = 50))]
    pub bathrooms: i32,
    #[validate(range(exclusive_min = 0.0))]
    pub area_sqm: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub is_available: Option<bool>,
}

/// DTO for updating an apartment. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateApartment {
    pub city_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub address: Option<String>,
    #[validate(range(min = 0.0))]
    pub price_per_night: Option<f64>,
    #[validate(range(min = 0, max = 50))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0, max = 50))]
    pub bathrooms: Option<i32>,
    #[validate(range(exclusive_min = 0.0))]
    pub area_sqm: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub is_available: Option<bool>,
}

/// Sort orders offered by the apartment grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApartmentSort {
    /// `id DESC`. Cursors from these pages continue with
    /// `direction=Backward`: the last cursor is the smallest id shown.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    BedroomsDesc,
}

/// Query parameters for `GET /apartments` and the landlord dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApartmentListParams {
    pub city_id: Option<DbId>,
    pub landlord_id: Option<DbId>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub available: Option<bool>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: ApartmentSort,
}
