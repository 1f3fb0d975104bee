//! Per-listing pagination specifications.
//!
//! Each list endpoint turns its query parameters into filters and a domain
//! ordering here. Paging and the `id` tiebreaker come from
//! [`PaginationSpecification`] itself.

use roomly_core::pagination::{Filter, PaginationRequest, PaginationSpecification, SortDirection};
use roomly_core::types::DbId;

use crate::models::apartment::{Apartment, ApartmentListParams, ApartmentSort};
use crate::models::city::{City, CityListParams};
use crate::models::country::{Country, CountryListParams};
use crate::models::user::{User, UserListParams};

/// Treat blank search strings as absent.
fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn country_list(
    params: &CountryListParams,
    request: PaginationRequest,
) -> PaginationSpecification<Country> {
    PaginationSpecification::new(request)
        .filter_if(search_term(&params.search), |s| Filter::contains("name", s))
        .order_by("name", SortDirection::Asc)
}

pub fn city_list(params: &CityListParams, request: PaginationRequest) -> PaginationSpecification<City> {
    PaginationSpecification::new(request)
        .filter_if(params.country_id, |id| Filter::eq("country_id", id))
        .filter_if(search_term(&params.search), |s| Filter::contains("name", s))
        .order_by("name", SortDirection::Asc)
}

pub fn user_list(params: &UserListParams, request: PaginationRequest) -> PaginationSpecification<User> {
    PaginationSpecification::new(request)
        .filter_if(params.role.clone(), |r| Filter::eq("role", r))
        .filter_if(search_term(&params.search), |s| Filter::contains("email", s))
        .order_by("email", SortDirection::Asc)
}

pub fn apartment_list(
    params: &ApartmentListParams,
    request: PaginationRequest,
) -> PaginationSpecification<Apartment> {
    let spec = PaginationSpecification::new(request)
        .filter_if(params.city_id, |id| Filter::eq("city_id", id))
        .filter_if(params.landlord_id, |id| Filter::eq("landlord_id", id))
        .filter_if(params.min_price, |p| Filter::gte("price_per_night", p))
        .filter_if(params.max_price, |p| Filter::lte("price_per_night", p))
        .filter_if(params.min_bedrooms, |n| Filter::gte("bedrooms", n))
        .filter_if(params.available, |a| Filter::eq("is_available", a))
        .filter_if(search_term(&params.search), |s| Filter::contains("title", s));

    match params.sort {
        ApartmentSort::Newest => spec.order_by("id", SortDirection::Desc),
        ApartmentSort::PriceAsc => spec.order_by("price_per_night", SortDirection::Asc),
        ApartmentSort::PriceDesc => spec.order_by("price_per_night", SortDirection::Desc),
        ApartmentSort::BedroomsDesc => spec.order_by("bedrooms", SortDirection::Desc),
    }
}

/// Landlord dashboard: the same filters, pinned to one landlord.
pub fn landlord_apartments(
    landlord_id: DbId,
    params: &ApartmentListParams,
    request: PaginationRequest,
) -> PaginationSpecification<Apartment> {
    let params = ApartmentListParams {
        landlord_id: Some(landlord_id),
        ..params.clone()
    };
    apartment_list(&params, request)
}
