//! Integration tests for listing entity CRUD.
//!
//! Exercises the repository layer against a real database:
//! - Create the full hierarchy (country -> city -> apartment, plus landlord)
//! - Partial updates through COALESCE
//! - Unique and foreign key violations carry the constraint name
//! - Identity sync and cascade delete

use roomly_db::models::apartment::{CreateApartment, UpdateApartment};
use roomly_db::models::city::{CreateCity, UpdateCity};
use roomly_db::models::country::{CreateCountry, UpdateCountry};
use roomly_db::models::user::{IdentitySync, UpdateUser};
use roomly_db::repositories::{ApartmentRepo, CityRepo, CountryRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_country(name: &str, iso: &str) -> CreateCountry {
    CreateCountry {
        name: name.to_string(),
        iso_code: iso.to_string(),
    }
}

fn new_city(country_id: i64, name: &str) -> CreateCity {
    CreateCity {
        country_id,
        name: name.to_string(),
        latitude: 38.72,
        longitude: -9.14,
    }
}

fn identity(subject: &str, role: &str) -> IdentitySync {
    IdentitySync {
        external_id: subject.to_string(),
        email: format!("{subject}@example.com"),
        display_name: subject.to_string(),
        role: role.to_string(),
    }
}

fn new_apartment(city_id: i64, title: &str) -> CreateApartment {
    CreateApartment {
        city_id,
        title: title.to_string(),
        description: None,
        address: "Rua Augusta 1".to_string(),
        price_per_night: 80.0,
        bedrooms: 2,
        bathrooms: 1,
        area_sqm: 55.0,
        latitude: 38.71,
        longitude: -9.13,
        is_available: None,
    }
}

/// Code and constraint name of a database error, if it is one.
fn db_error(err: &sqlx::Error) -> Option<(String, String)> {
    match err {
        sqlx::Error::Database(db) => Some((
            db.code().map(|c| c.to_string()).unwrap_or_default(),
            db.constraint().unwrap_or_default().to_string(),
        )),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_full_hierarchy(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Portugal", "pt"))
        .await
        .unwrap();
    assert_eq!(country.iso_code, "PT");

    let city = CityRepo::create(&pool, &new_city(country.id, "Lisbon"))
        .await
        .unwrap();
    assert_eq!(city.country_id, country.id);

    let landlord = UserRepo::sync_from_identity(&pool, &identity("kc-1", "landlord"))
        .await
        .unwrap();
    assert_eq!(landlord.role, "landlord");

    let apt = ApartmentRepo::create(&pool, landlord.id, &new_apartment(city.id, "Alfama loft"))
        .await
        .unwrap();
    assert_eq!(apt.landlord_id, landlord.id);
    assert!(apt.is_available);

    let found = ApartmentRepo::find_by_id(&pool, apt.id).await.unwrap();
    assert_eq!(found.map(|a| a.title), Some("Alfama loft".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_leaves_missing_fields_untouched(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Spain", "ES"))
        .await
        .unwrap();
    let city = CityRepo::create(&pool, &new_city(country.id, "Madrid"))
        .await
        .unwrap();
    let landlord = UserRepo::sync_from_identity(&pool, &identity("kc-2", "landlord"))
        .await
        .unwrap();
    let apt = ApartmentRepo::create(&pool, landlord.id, &new_apartment(city.id, "Centro"))
        .await
        .unwrap();

    let updated = ApartmentRepo::update(
        &pool,
        apt.id,
        &UpdateApartment {
            price_per_night: Some(95.5),
            is_available: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.price_per_night, 95.5);
    assert!(!updated.is_available);
    assert_eq!(updated.title, "Centro");

    let renamed = CityRepo::update(
        &pool,
        city.id,
        &UpdateCity {
            country_id: None,
            name: Some("Madrid Centro".into()),
            latitude: None,
            longitude: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Madrid Centro");
    assert_eq!(renamed.latitude, city.latitude);

    let missing = CountryRepo::update(
        &pool,
        999_999,
        &UpdateCountry {
            name: Some("Nowhere".into()),
            iso_code: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_country_name_violates_unique(pool: PgPool) {
    CountryRepo::create(&pool, &new_country("France", "FR"))
        .await
        .unwrap();
    let err = CountryRepo::create(&pool, &new_country("France", "FX"))
        .await
        .unwrap_err();
    assert_eq!(
        db_error(&err),
        Some(("23505".to_string(), "uq_countries_name".to_string()))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_city_with_unknown_country_fails(pool: PgPool) {
    let err = CityRepo::create(&pool, &new_city(424_242, "Atlantis"))
        .await
        .unwrap_err();
    assert_eq!(
        db_error(&err),
        Some(("23503".to_string(), "fk_cities_country_id".to_string()))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_country_with_cities_cannot_be_deleted(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Greece", "GR"))
        .await
        .unwrap();
    CityRepo::create(&pool, &new_city(country.id, "Athens"))
        .await
        .unwrap();

    let err = CountryRepo::delete(&pool, country.id).await.unwrap_err();
    assert_eq!(
        db_error(&err),
        Some(("23503".to_string(), "fk_cities_country_id".to_string()))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_identity_sync_is_idempotent_and_keeps_role(pool: PgPool) {
    let first = UserRepo::sync_from_identity(&pool, &identity("kc-3", "tenant"))
        .await
        .unwrap();

    UserRepo::update(
        &pool,
        first.id,
        &UpdateUser {
            display_name: None,
            role: Some("landlord".into()),
        },
    )
    .await
    .unwrap();

    let mut again = identity("kc-3", "tenant");
    again.display_name = "Renamed".into();
    let second = UserRepo::sync_from_identity(&pool, &again).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.display_name, "Renamed");
    assert_eq!(second.role, "landlord");

    let by_subject = UserRepo::find_by_external_id(&pool, "kc-3").await.unwrap();
    assert_eq!(by_subject.map(|u| u.id), Some(first.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_user_cascades_to_apartments(pool: PgPool) {
    let country = CountryRepo::create(&pool, &new_country("Italy", "IT"))
        .await
        .unwrap();
    let city = CityRepo::create(&pool, &new_city(country.id, "Rome"))
        .await
        .unwrap();
    let landlord = UserRepo::sync_from_identity(&pool, &identity("kc-4", "landlord"))
        .await
        .unwrap();
    let apt = ApartmentRepo::create(&pool, landlord.id, &new_apartment(city.id, "Trastevere"))
        .await
        .unwrap();

    assert!(UserRepo::delete(&pool, landlord.id).await.unwrap());
    assert!(ApartmentRepo::find_by_id(&pool, apt.id).await.unwrap().is_none());
    assert!(!UserRepo::delete(&pool, landlord.id).await.unwrap());
}
