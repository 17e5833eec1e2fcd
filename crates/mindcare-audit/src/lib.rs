//! mindcare-audit
//!
//! Application-level audit events, emitted through `tracing`.

pub mod events;
