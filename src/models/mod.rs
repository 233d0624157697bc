//! Diesel row types and their conversions to and from the domain model.

pub mod application;
pub mod campaign;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod profile;
pub mod user;
