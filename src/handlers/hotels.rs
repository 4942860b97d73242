//! Hotel listing screen

use tracing::warn;
use crate::models::Hotel;
use crate::services::ApiClient;
use crate::utils::helpers::{format_price, truncate_text};
use super::ensure_token;

/// Controller of the hotel list
#[derive(Debug, Clone)]
pub struct HotelListingController {
    api: ApiClient,
    pub hotel_list: Vec<Hotel>,
    pub error: Option<String>,
}

impl HotelListingController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            hotel_list: Vec::new(),
            error: None,
        }
    }

    /// Load the token, then the hotels
    pub async fn load(&mut self) {
        self.error = None;
        self.hotel_list.clear();

        if let Err(e) = ensure_token(&self.api).await {
            warn!(error = %e, "Could not obtain a token for the hotel list");
            self.error = Some(e.display_message());
            return;
        }

        match self.api.list_hotels().await {
            Ok(hotels) => self.hotel_list = hotels,
            Err(e) => self.error = Some(e.display_message()),
        }
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Could not load hotels: {}", error);
        }
        if self.hotel_list.is_empty() {
            return "No hotels available.".to_string();
        }

        self.hotel_list
            .iter()
            .map(|hotel| {
                format!(
                    "#{:<4} {:<30} {:<20} {:>10}/night",
                    hotel.id,
                    truncate_text(&hotel.name, 30),
                    truncate_text(&format!("{}, {}", hotel.city, hotel.state), 20),
                    format_price(hotel.nightly_rate),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
