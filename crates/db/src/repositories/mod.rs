//! Repository layer: one zero-sized struct per table with async CRUD
//! functions taking a `&PgPool`.

pub mod apartment_repo;
pub mod city_repo;
pub mod country_repo;
pub mod user_repo;

pub use apartment_repo::ApartmentRepo;
pub use city_repo::CityRepo;
pub use country_repo::CountryRepo;
pub use user_repo::UserRepo;
