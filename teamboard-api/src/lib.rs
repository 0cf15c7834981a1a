//! # Teamboard API Server Library
//!
//! HTTP layer of the project management service: projects, their tasks,
//! users with optional profiles, and project membership.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Validating request extractors
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
