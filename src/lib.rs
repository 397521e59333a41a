//! SCEI Equipment Maintenance Tracking System
//!
//! A Rust implementation of the SCEI server, providing a REST JSON API for
//! tracking computer equipment and its maintenance history across
//! organizational departments, with a state/trajectory analytics engine and
//! an audit trail.

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
