//! Core library exports for the Komponi marketplace.
//!
//! Influencers and companies meet through campaigns: companies publish them,
//! influencers apply, and companies accept or reject the applications. The
//! `data` feature exposes the domain, persistence and form layers; `server`
//! adds the Actix-web services, routes and templates on top.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod i18n;
#[cfg(feature = "server")]
pub mod identity;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
