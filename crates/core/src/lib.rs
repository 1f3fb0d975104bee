//! Roomly domain core.
//!
//! Holds the shared primitive types, the domain error, role constants, and the
//! pagination core that every list endpoint is built on. This crate has no
//! storage or HTTP dependencies so it can be exercised in isolation.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
