//! Pagination against Postgres.
//!
//! The SQL resolver must agree with the in-memory page source the core is
//! tested with: same windows, same flags, same cursor walk.

use assert_matches::assert_matches;
use roomly_core::pagination::{
    CursorDirection, PaginationError, PaginationRequest, UNKNOWN_TOTAL_COUNT,
};
use roomly_db::models::apartment::{ApartmentListParams, ApartmentSort, CreateApartment};
use roomly_db::models::city::CreateCity;
use roomly_db::models::country::{CountryListParams, CreateCountry};
use roomly_db::models::user::IdentitySync;
use roomly_db::repositories::{ApartmentRepo, CityRepo, CountryRepo, UserRepo};
use roomly_db::specifications;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed `n` apartments in one city owned by one landlord.
///
/// Prices cycle 50, 60, 70, 80. Every fifth apartment is unavailable.
/// Returns `(city_id, landlord_id, apartment ids in insertion order)`.
async fn seed_apartments(pool: &PgPool, n: i64) -> (i64, i64, Vec<i64>) {
    let country = CountryRepo::create(
        pool,
        &CreateCountry {
            name: "Portugal".into(),
            iso_code: "PT".into(),
        },
    )
    .await
    .unwrap();
    let city = CityRepo::create(
        pool,
        &CreateCity {
            country_id: country.id,
            name: "Porto".into(),
            latitude: 41.15,
            longitude: -8.61,
        },
    )
    .await
    .unwrap();
    let landlord = UserRepo::sync_from_identity(
        pool,
        &IdentitySync {
            external_id: "kc-landlord".into(),
            email: "landlord@example.com".into(),
            display_name: "Landlord".into(),
            role: "landlord".into(),
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::new();
    for i in 0..n {
        let apt = ApartmentRepo::create(
            pool,
            landlord.id,
            &CreateApartment {
                city_id: city.id,
                title: format!("Flat {i}"),
                description: None,
                address: format!("Rua {i}"),
                price_per_night: 50.0 + (i % 4) as f64 * 10.0,
                bedrooms: (i % 3) as i32 + 1,
                bathrooms: 1,
                area_sqm: 40.0,
                latitude: 41.1,
                longitude: -8.6,
                is_available: Some(i % 5 != 0),
            },
        )
        .await
        .unwrap();
        ids.push(apt.id);
    }
    (city.id, landlord.id, ids)
}

fn cursor(key: impl Into<String>, size: i64, direction: CursorDirection) -> PaginationRequest {
    PaginationRequest::after_cursor(key, size, direction)
}

// ---------------------------------------------------------------------------
// Offset mode
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_offset_last_page(pool: PgPool) {
    seed_apartments(&pool, 25).await;
    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        PaginationRequest::offset(3, 10),
    );
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.metadata.current_page_size, 5);
    assert_eq!(page.metadata.total_count, 25);
    assert!(!page.metadata.has_next_page);
    assert!(page.metadata.has_previous_page);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_offset_pages_are_disjoint(pool: PgPool) {
    seed_apartments(&pool, 25).await;
    let params = ApartmentListParams {
        sort: ApartmentSort::PriceAsc,
        ..Default::default()
    };

    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let spec = specifications::apartment_list(&params, PaginationRequest::offset(page_number, 10));
        let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
        for apt in page.items {
            assert!(!seen.contains(&apt.id), "apartment {} repeated", apt.id);
            seen.push(apt.id);
        }
    }
    assert_eq!(seen.len(), 25);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_table(pool: PgPool) {
    let spec = specifications::country_list(
        &CountryListParams::default(),
        PaginationRequest::offset(1, 10),
    );
    let page = CountryRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.metadata.total_count, 0);
    assert!(!page.metadata.has_next_page);
    assert!(!page.metadata.has_previous_page);
    assert_eq!(page.metadata.first_cursor, None);
    assert_eq!(page.metadata.last_cursor, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filters_apply_to_count_and_items(pool: PgPool) {
    seed_apartments(&pool, 20).await;
    let params = ApartmentListParams {
        min_price: Some(70.0),
        available: Some(true),
        sort: ApartmentSort::PriceAsc,
        ..Default::default()
    };
    let spec = specifications::apartment_list(&params, PaginationRequest::offset(1, 100));
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();

    assert!(!page.items.is_empty());
    assert!(page
        .items
        .iter()
        .all(|a| a.price_per_night >= 70.0 && a.is_available));
    assert_eq!(page.metadata.total_count, page.items.len() as i64);

    let prices: Vec<f64> = page.items.iter().map(|a| a.price_per_night).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_wildcards_literally(pool: PgPool) {
    seed_apartments(&pool, 3).await;
    let params = ApartmentListParams {
        search: Some("%".into()),
        ..Default::default()
    };
    let spec = specifications::apartment_list(&params, PaginationRequest::default());
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
    assert_eq!(page.metadata.total_count, 0);

    let params = ApartmentListParams {
        search: Some("flat 1".into()),
        ..Default::default()
    };
    let spec = specifications::apartment_list(&params, PaginationRequest::default());
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
    assert_eq!(page.metadata.total_count, 1);
}

// ---------------------------------------------------------------------------
// Cursor mode
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_cursor_walk_visits_every_row_once(pool: PgPool) {
    let (_, _, ids) = seed_apartments(&pool, 23).await;
    let params = ApartmentListParams::default();

    let mut seen: Vec<i64> = Vec::new();
    let mut key = "0".to_string();
    loop {
        let spec = specifications::apartment_list(&params, cursor(key.clone(), 10, CursorDirection::Forward));
        let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
        assert_eq!(page.metadata.total_count, UNKNOWN_TOTAL_COUNT);

        for apt in &page.items {
            assert!(!seen.contains(&apt.id));
            seen.push(apt.id);
        }
        if !page.metadata.has_next_page {
            break;
        }
        key = page.metadata.last_cursor.unwrap();
    }

    assert_eq!(seen, ids);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_backward_cursor_returns_preceding_block(pool: PgPool) {
    let (_, _, ids) = seed_apartments(&pool, 12).await;

    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        cursor(ids[8].to_string(), 3, CursorDirection::Backward),
    );
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();

    let got: Vec<i64> = page.items.iter().map(|a| a.id).collect();
    assert_eq!(got, ids[5..8].to_vec());
    assert!(page.metadata.has_next_page);
    assert!(page.metadata.has_previous_page);
    assert_eq!(page.metadata.first_cursor, Some(ids[5].to_string()));
    assert_eq!(page.metadata.last_cursor, Some(ids[7].to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cursor_respects_filters(pool: PgPool) {
    let (city_id, _, _) = seed_apartments(&pool, 15).await;
    let params = ApartmentListParams {
        city_id: Some(city_id),
        available: Some(false),
        ..Default::default()
    };
    let spec = specifications::apartment_list(&params, cursor("0", 10, CursorDirection::Forward));
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();

    // Indexes 0, 5 and 10 are unavailable.
    assert_eq!(page.items.len(), 3);
    assert!(page.items.iter().all(|a| !a.is_available));
    assert!(!page.metadata.has_next_page);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_newest_first_pages_continue_backward(pool: PgPool) {
    let (_, _, ids) = seed_apartments(&pool, 25).await;
    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        PaginationRequest::offset(1, 10),
    );
    let first = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new())
        .await
        .unwrap();
    let first_ids: Vec<i64> = first.items.iter().map(|a| a.id).collect();
    assert_eq!(first_ids, ids[15..].iter().rev().copied().collect::<Vec<_>>());

    // Under id DESC the last cursor is the smallest id on the page, so the
    // next block lies behind it.
    let last = first.metadata.last_cursor.unwrap();
    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        cursor(last.clone(), 10, CursorDirection::Backward),
    );
    let next = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new())
        .await
        .unwrap();
    let next_ids: Vec<i64> = next.items.iter().map(|a| a.id).collect();
    assert_eq!(next_ids, ids[5..15].to_vec());
    assert!(next.metadata.has_next_page);

    // Forward from the same cursor only revisits the first page.
    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        cursor(last, 10, CursorDirection::Forward),
    );
    let forward = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new())
        .await
        .unwrap();
    assert!(forward.items.iter().all(|a| first_ids.contains(&a.id)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cancelled_listing_returns_no_rows(pool: PgPool) {
    seed_apartments(&pool, 3).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        PaginationRequest::offset(1, 10),
    );
    let result = ApartmentRepo::list_page(&pool, &spec, &cancel).await;
    assert_matches!(result, Err(PaginationError::Cancelled));

    let spec = specifications::apartment_list(
        &ApartmentListParams::default(),
        cursor("0", 10, CursorDirection::Forward),
    );
    let result = ApartmentRepo::list_page(&pool, &spec, &cancel).await;
    assert_matches!(result, Err(PaginationError::Cancelled));
}

// ---------------------------------------------------------------------------
// Landlord scope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_landlord_listing_only_returns_own_rows(pool: PgPool) {
    let (_, landlord_id, _) = seed_apartments(&pool, 6).await;

    let spec = specifications::landlord_apartments(
        landlord_id + 1,
        &ApartmentListParams::default(),
        PaginationRequest::default(),
    );
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
    assert!(page.items.is_empty());

    let spec = specifications::landlord_apartments(
        landlord_id,
        &ApartmentListParams::default(),
        PaginationRequest::default(),
    );
    let page = ApartmentRepo::list_page(&pool, &spec, &CancellationToken::new()).await.unwrap();
    assert_eq!(page.metadata.total_count, 6);
}
