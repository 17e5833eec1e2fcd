//! mindcare-core
//!
//! Pure domain types, analytics reducers, and store key conventions.
//! No AWS SDK dependency; this is the shared vocabulary of the Mindcare system.

pub mod analytics;
pub mod error;
pub mod keys;
pub mod models;
