//! BookHotel client
//!
//! A command-line client for the BookHotel booking service.
//! This library provides typed wrappers around the booking REST API,
//! one view-state controller per screen (login, hotel list and detail
//! with map, booking form and list, password change, hotel creation),
//! and the session handling that ties them together.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BookHotelError, Result};

// Re-export main components for easy access
pub use services::{ApiClient, ServiceFactory};
pub use state::{Navigator, Screen, SessionContext, SessionStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
