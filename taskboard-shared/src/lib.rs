//! # Taskboard Shared Library
//!
//! This crate contains the data layer and authentication primitives
//! used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing and JWT token handling
//! - `db`: Connection pool, migrations, and bootstrap seeding

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
