//! Mock booking API server for testing
//!
//! This module provides a mock HTTP server that simulates the booking REST API
//! and the geocoder for testing purposes. It uses wiremock to create configurable
//! mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use BookHotel::config::Settings;
use BookHotel::models::Token;
use BookHotel::services::{ApiClient, GeocodingService, ServiceFactory};

/// Path the geocoder mock answers on
pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Mock booking API server
pub struct BookingApiMockServer {
    pub server: MockServer,
    pub base_url: String,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    /// Failure with the server's `{"error": ...}` body
    pub fn error(status: u16, error: Value) -> Self {
        Self {
            status,
            delay_ms: None,
            custom_response: Some(json!({ "error": error })),
        }
    }

    fn respond(self, default_body: Value) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status)
            .set_body_json(self.custom_response.unwrap_or(default_body));
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }
        response
    }
}

impl BookingApiMockServer {
    /// Create a new mock booking API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Settings pointing the API and the geocoder at this server
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = self.base_url.clone();
        settings.api.timeout_seconds = 5;
        settings.geocoding.api_url = format!("{}{}", self.base_url, GEOCODE_PATH);
        settings.geocoding.timeout_seconds = 5;
        settings
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(&self.settings().api).expect("Failed to create API client")
    }

    pub fn geocoder(&self) -> GeocodingService {
        GeocodingService::new(self.settings().geocoding).expect("Failed to create geocoder")
    }

    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(self.settings()).expect("Failed to create services")
    }

    /// Setup mock for `POST /api/login`
    pub async fn mock_login(&self, token: &Token, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(config.respond(json!({ "token": token.as_str() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `POST /api/users`
    pub async fn mock_signup(&self, token: &Token, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(config.respond(json!({ "token": token.as_str() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `GET /api/get_token`
    pub async fn mock_get_token(&self, token: &Token, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path("/api/get_token"))
            .respond_with(config.respond(json!({ "token": token.as_str() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `GET /api/hotels/`, only answering requests carrying `token`
    pub async fn mock_list_hotels(&self, token: &Token, hotels: Value) {
        Mock::given(method("GET"))
            .and(path("/api/hotels/"))
            .and(header("Authorization", token.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(hotels))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `GET /api/hotels/{id}`
    pub async fn mock_get_hotel(&self, hotel_id: i64, config: MockResponseConfig, hotel: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/hotels/{}", hotel_id)))
            .respond_with(config.respond(json!({ "result": hotel })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `POST /api/hotels/`
    pub async fn mock_create_hotel(&self, hotel_id: i64, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/hotels/"))
            .respond_with(config.respond(json!({ "hotel": hotel_id.to_string() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `GET /api/bookings/`
    pub async fn mock_list_bookings(&self, bookings: Value) {
        Mock::given(method("GET"))
            .and(path("/api/bookings/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bookings))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `POST /api/bookings/`
    pub async fn mock_create_booking(&self, booking_id: i64, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/bookings/"))
            .respond_with(config.respond(json!({ "booking_id": booking_id.to_string() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `DELETE /api/bookings/{id}`; the server answers 201 `{}`
    pub async fn mock_cancel_booking(&self, booking_id: i64, config: MockResponseConfig) {
        let config = MockResponseConfig {
            status: if config.status == 200 { 201 } else { config.status },
            ..config
        };
        Mock::given(method("DELETE"))
            .and(path(format!("/api/bookings/{}", booking_id)))
            .respond_with(config.respond(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `POST /api/change_password`
    pub async fn mock_change_password(&self, user_id: i64, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/change_password"))
            .respond_with(config.respond(json!({ "user": user_id.to_string() })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for `GET /logout`
    pub async fn mock_logout(&self) {
        Mock::given(method("GET"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>Logged out</html>"))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the geocoder, answering `body` for `address`
    pub async fn mock_geocode(&self, address: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .and(query_param("address", address))
            .and(query_param("sensor", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup an HTML `abort(400)` page for any request on `route`
    pub async fn mock_abort(&self, http_method: &str, route: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string("<!DOCTYPE HTML><title>400 Bad Request</title><h1>Bad Request</h1>"),
            )
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn received(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
