//! Configuration validation module
//!
//! This module provides validation functions for client configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{BookHotelError, Result};
use super::Settings;

/// Map providers the client knows how to render
pub const MAP_PROVIDERS: [&str; 2] = ["google_static", "openstreetmap"];

/// Map types accepted by the static map renderer
pub const MAP_TYPES: [&str; 4] = ["roadmap", "satellite", "hybrid", "terrain"];

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_geocoding_config(&settings.geocoding)?;
    validate_map_config(&settings.map)?;
    validate_session_config(&settings.session)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_http_url(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BookHotelError::Config(format!("{} is required", what)));
    }

    let url = Url::parse(value)
        .map_err(|e| BookHotelError::Config(format!("{} is not a valid URL: {}", what, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BookHotelError::Config(format!(
            "{} must use http or https, got {}",
            what,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validate booking API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    validate_http_url(&config.base_url, "API base URL")?;

    if config.timeout_seconds == 0 {
        return Err(BookHotelError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate geocoding configuration
fn validate_geocoding_config(config: &super::GeocodingConfig) -> Result<()> {
    validate_http_url(&config.api_url, "Geocoding API URL")?;

    if config.timeout_seconds == 0 {
        return Err(BookHotelError::Config(
            "Geocoding timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate map configuration
fn validate_map_config(config: &super::MapConfig) -> Result<()> {
    if !MAP_PROVIDERS.contains(&config.provider.as_str()) {
        return Err(BookHotelError::Config(
            format!("Invalid map provider: {}. Valid providers: {:?}", config.provider, MAP_PROVIDERS)
        ));
    }

    if config.zoom > 21 {
        return Err(BookHotelError::Config(
            "Map zoom must be between 0 and 21".to_string()
        ));
    }

    if !MAP_TYPES.contains(&config.map_type.as_str()) {
        return Err(BookHotelError::Config(
            format!("Invalid map type: {}. Valid types: {:?}", config.map_type, MAP_TYPES)
        ));
    }

    if config.provider == "google_static" {
        validate_http_url(&config.static_map_url, "Static map URL")?;

        if !(1..=640).contains(&config.width) || !(1..=640).contains(&config.height) {
            return Err(BookHotelError::Config(
                "Static map size must be between 1 and 640 pixels".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.file_path.trim().is_empty() {
        return Err(BookHotelError::Config(
            "Session file path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BookHotelError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BookHotelError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
