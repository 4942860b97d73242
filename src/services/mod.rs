//! Services module
//!
//! This module contains the clients of the external collaborators:
//! the booking API, the geocoder and the map renderer.

pub mod api;
pub mod geocoding;
pub mod map;

// Re-export commonly used services
pub use api::ApiClient;
pub use geocoding::GeocodingService;
pub use map::{MapRenderer, MapType, MapView, OpenStreetMapRenderer, StaticMapRenderer};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub geocoding: GeocodingService,
    pub map_renderer: Arc<dyn MapRenderer>,
    pub settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let api = ApiClient::new(&settings.api)?;
        let geocoding = GeocodingService::new(settings.geocoding.clone())?;
        let map_renderer: Arc<dyn MapRenderer> = Arc::from(map::renderer_for(&settings.map)?);

        Ok(Self {
            api,
            geocoding,
            map_renderer,
            settings,
        })
    }

    /// Whether the hotel detail screen should geocode and show a map
    pub fn map_enabled(&self) -> bool {
        self.settings.features.map_display
    }
}
