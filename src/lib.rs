//! Athenaeum Library Management System
//!
//! A Rust REST API server for a campus library: student and librarian
//! accounts, book catalog, reservations, fines, and group-discussion room
//! bookings.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
