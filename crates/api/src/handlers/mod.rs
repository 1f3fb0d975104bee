pub mod apartments;
pub mod cities;
pub mod countries;
pub mod me;
pub mod users;
