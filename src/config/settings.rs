//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main client configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub geocoding: GeocodingConfig,
    pub map: MapConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Booking API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Geocoding endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

/// Map rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// `google_static` or `openstreetmap`
    pub provider: String,
    pub static_map_url: String,
    pub api_key: Option<String>,
    pub zoom: u8,
    /// `roadmap`, `satellite`, `hybrid` or `terrain`
    pub map_type: String,
    pub width: u32,
    pub height: u32,
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub file_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stderr only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub map_display: bool,
    pub admin_panel: bool,
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Load settings, reading `path` instead of `bookhotel.toml` when given
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("bookhotel").required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(config::Environment::with_prefix("BOOKHOTEL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BookHotelError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000".to_string(),
                timeout_seconds: 30,
                user_agent: "BookHotel-Client/1.0".to_string(),
            },
            geocoding: GeocodingConfig {
                api_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
                api_key: None,
                timeout_seconds: 10,
            },
            map: MapConfig {
                provider: "openstreetmap".to_string(),
                static_map_url: "https://maps.googleapis.com/maps/api/staticmap".to_string(),
                api_key: None,
                zoom: 10,
                map_type: "roadmap".to_string(),
                width: 600,
                height: 400,
            },
            session: SessionConfig {
                file_path: ".bookhotel/session.toml".to_string(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                file_path: None,
                json: false,
            },
            features: FeaturesConfig {
                map_display: true,
                admin_panel: true,
            },
        }
    }
}
