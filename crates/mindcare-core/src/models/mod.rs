pub mod appointment;
pub mod assessment;
pub mod chat;
pub mod forum;
pub mod identity;
pub mod profile;
pub mod risk;
