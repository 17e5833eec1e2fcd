//! mindcare-storage
//!
//! The key-value store behind every record: an S3 backend for deployments
//! and an in-memory backend for local runs and tests, plus the daily
//! analytics counters built on top of them.

pub mod client;
pub mod counters;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;

pub use store::Store;
