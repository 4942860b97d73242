//! Booking listing screen

use tracing::{info, warn};
use crate::models::Booking;
use crate::services::ApiClient;
use crate::utils::helpers::format_price;
use super::ensure_token;

/// Controller of the user's booking list
#[derive(Debug, Clone)]
pub struct HotelBookingListingController {
    api: ApiClient,
    pub booking_list: Vec<Booking>,
    pub error: Option<String>,
}

impl HotelBookingListingController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            booking_list: Vec::new(),
            error: None,
        }
    }

    /// Load the token, then the bookings
    pub async fn load(&mut self) {
        self.error = None;
        self.booking_list.clear();

        if let Err(e) = ensure_token(&self.api).await {
            warn!(error = %e, "Could not obtain a token for the booking list");
            self.error = Some(e.display_message());
            return;
        }

        match self.api.list_bookings().await {
            Ok(bookings) => self.booking_list = bookings,
            Err(e) => self.error = Some(e.display_message()),
        }
    }

    /// Cancel a booking and drop it from the list
    ///
    /// Returns whether the server accepted the cancellation.
    pub async fn cancel_booking(&mut self, booking_id: i64) -> bool {
        self.error = None;

        match self.api.cancel_booking(booking_id).await {
            Ok(()) => {
                let before = self.booking_list.len();
                self.booking_list.retain(|booking| booking.id != booking_id);
                info!(
                    booking_id = booking_id,
                    removed = before - self.booking_list.len(),
                    "Booking removed from list"
                );
                true
            }
            Err(e) => {
                self.error = Some(e.display_message());
                false
            }
        }
    }

    /// A single booking of the list, for the booking detail screen
    pub fn find(&self, booking_id: i64) -> Option<&Booking> {
        self.booking_list.iter().find(|booking| booking.id == booking_id)
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(error) = &self.error {
            lines.push(format!("Error: {}", error));
        }

        if self.booking_list.is_empty() {
            lines.push("You have no bookings.".to_string());
        }

        for booking in &self.booking_list {
            lines.push(render_booking(booking));
        }
        lines.join("\n")
    }
}

/// One line summary of a booking
pub fn render_booking(booking: &Booking) -> String {
    let hotel = booking
        .hotel
        .as_ref()
        .map(|h| h.name.clone())
        .unwrap_or_else(|| format!("hotel #{}", booking.hotel_id));
    let dates = match (booking.check_in, booking.check_out) {
        (Some(check_in), Some(check_out)) => format!("{} -> {}", check_in, check_out),
        _ => "dates unknown".to_string(),
    };
    let total = booking
        .total_cost()
        .map(format_price)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "#{:<4} {:<30} {:<26} rooms: {}  total: {}",
        booking.id, hotel, dates, booking.room_preference, total
    )
}
