//! mindcare-auth
//!
//! Bearer token validation. Turns an identity provider's JWT into a
//! [`mindcare_core::models::identity::Identity`].

pub mod error;
pub mod jwt;
