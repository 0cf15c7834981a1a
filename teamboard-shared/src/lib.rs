//! # Teamboard Shared Library
//!
//! Data model and validation layer for the Teamboard API.
//!
//! ## Module Organization
//!
//! - `schemas`: request/response payloads and their validation rules
//! - `models`: persistent entities and their store operations
//! - `db`: connection pool, migrations and the connectivity self-test
//! - `error`: integrity-violation classification and bootstrap errors

pub mod db;
pub mod error;
pub mod models;
pub mod schemas;

/// Current version of the Teamboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
