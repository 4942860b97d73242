//! Hotel detail screen with map

use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::MapConfig;
use crate::models::{Hotel, LatLng};
use crate::services::{ApiClient, GeocodingService, MapRenderer, MapView};
use crate::utils::helpers::format_price;

/// Controller of the hotel detail view
pub struct HotelViewController {
    api: ApiClient,
    geocoder: Option<GeocodingService>,
    renderer: Arc<dyn MapRenderer>,
    map_config: MapConfig,
    pub hotel: Option<Hotel>,
    pub location: Option<LatLng>,
    pub map: Option<MapView>,
    pub error: Option<String>,
}

impl HotelViewController {
    /// `geocoder` is `None` when map display is turned off
    pub fn new(
        api: ApiClient,
        geocoder: Option<GeocodingService>,
        renderer: Arc<dyn MapRenderer>,
        map_config: MapConfig,
    ) -> Self {
        Self {
            api,
            geocoder,
            renderer,
            map_config,
            hotel: None,
            location: None,
            map: None,
            error: None,
        }
    }

    /// Load a hotel, then place it on the map
    ///
    /// Geocoding failures only leave the map empty.
    pub async fn init(&mut self, hotel_id: i64) {
        self.hotel = None;
        self.location = None;
        self.map = None;
        self.error = None;

        let hotel = match self.api.get_hotel(hotel_id).await {
            Ok(hotel) => hotel,
            Err(e) => {
                self.error = Some(e.display_message());
                return;
            }
        };

        if let Some(geocoder) = &self.geocoder {
            match geocoder.locate_hotel(&hotel).await {
                Ok(Some(location)) => {
                    self.location = Some(location);
                    self.map = Some(
                        MapView::with_config(location, &self.map_config)
                            .unwrap_or_else(|_| MapView::centered(location)),
                    );
                }
                Ok(None) => debug!(hotel_id = hotel_id, "Hotel address not found by geocoder"),
                Err(e) => warn!(hotel_id = hotel_id, error = %e, "Geocoding failed"),
            }
        }

        self.hotel = Some(hotel);
    }

    /// Displayable map reference, when the hotel was located
    pub fn map_link(&self) -> Option<String> {
        self.map.as_ref().map(|view| self.renderer.render(view))
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Could not load hotel: {}", error);
        }
        let Some(hotel) = &self.hotel else {
            return "No hotel loaded.".to_string();
        };

        let mut lines = vec![
            hotel.name.clone(),
            format!("{}, {}, {} {}, {}", hotel.address, hotel.city, hotel.state, hotel.zipcode, hotel.country),
            format!("Nightly rate: {}", format_price(hotel.nightly_rate)),
        ];
        if !hotel.description.is_empty() {
            lines.push(String::new());
            lines.push(hotel.description.clone());
        }
        if let Some(link) = self.map_link() {
            lines.push(String::new());
            lines.push(format!("Map: {}", link));
        }
        lines.join("\n")
    }
}
