pub mod apartment;
pub mod city;
pub mod country;
pub mod user;
