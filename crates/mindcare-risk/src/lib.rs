//! mindcare-risk
//!
//! Turns free text into a risk tier, decides when an elevated tier books a
//! follow-up appointment, and picks the supportive reply shown in chat.

pub mod classifier;
pub mod escalation;
pub mod responses;
