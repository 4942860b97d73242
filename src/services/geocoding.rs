//! Geocoding service implementation
//!
//! Resolves a hotel's postal address to coordinates through an external
//! geocoding HTTP endpoint speaking the Google Geocoding API format.

use std::time::Duration;
use reqwest::Client;
use tracing::debug;
use crate::config::GeocodingConfig;
use crate::models::{GeocodeResponse, Hotel, LatLng};
use crate::utils::errors::{BookHotelError, GeocodingError, GeocodingResult, Result};
use crate::utils::logging;

/// Geocoding service for the hotel detail map
#[derive(Clone, Debug)]
pub struct GeocodingService {
    client: Client,
    config: GeocodingConfig,
}

impl GeocodingService {
    /// Create a new GeocodingService instance
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("BookHotel-Client/1.0")
            .build()
            .map_err(BookHotelError::Http)?;

        Ok(Self { client, config })
    }

    /// Build the request URL for an address
    pub fn request_url(&self, address: &str) -> String {
        let mut url = format!(
            "{}?address={}&sensor=false",
            self.config.api_url,
            urlencoding::encode(address)
        );
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }
        url
    }

    /// Geocode a free-form address
    ///
    /// Returns `None` when the geocoder knows no such place.
    pub async fn geocode(&self, address: &str) -> GeocodingResult<Option<LatLng>> {
        let url = self.request_url(address);
        debug!(address = address, "Making geocoding request");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeocodingError::RequestFailed(
                format!("HTTP {}: {}", status, error_text)
            ));
        }

        let body: GeocodeResponse = response.json().await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        let location = interpret_response(body)?;
        logging::log_geocode(address, location.is_some());
        Ok(location)
    }

    /// Geocode a hotel from its street, city, state and zipcode
    pub async fn locate_hotel(&self, hotel: &Hotel) -> GeocodingResult<Option<LatLng>> {
        self.geocode(&hotel.full_address()).await
    }
}

fn interpret_response(body: GeocodeResponse) -> GeocodingResult<Option<LatLng>> {
    match body.status.as_str() {
        "OK" | "" => Ok(body.results.first().map(|r| r.geometry.location)),
        "ZERO_RESULTS" => Ok(None),
        other => Err(GeocodingError::Status {
            status: other.to_string(),
            message: body.error_message.unwrap_or_default(),
        }),
    }
}
