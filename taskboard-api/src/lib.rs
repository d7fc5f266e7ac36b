//! # Taskboard API Server Library
//!
//! This library provides the core functionality for the Taskboard API
//! server: a task-tracking backend where users own projects, projects
//! contain tasks, and tasks carry comments.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Authentication and role gating
//! - `response`: The uniform `{success, data, message}` envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
