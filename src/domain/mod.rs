//! Domain model of the marketplace: profiles, campaigns, applications,
//! categories and the rules governing them.

pub mod access;
pub mod application;
pub mod auth;
pub mod campaign;
pub mod category;
pub mod filter;
pub mod profile;
pub mod types;
