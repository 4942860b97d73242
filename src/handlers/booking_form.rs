//! Booking form screen
//!
//! The form is validated locally with the same rules the server applies,
//! previewed with the computed stay price, then posted.

use std::collections::BTreeMap;
use tracing::{debug, info};
use crate::models::{Hotel, NewBooking};
use crate::services::ApiClient;
use crate::state::Screen;
use crate::utils::errors::ErrorPayload;
use crate::utils::helpers::{
    booking_total, day_diff, format_price, is_valid_card_number, mask_card_number, normalize_card_number,
    parse_date, MAX_CARD_DIGITS,
};
use super::ensure_token;

const REQUIRED: &str = "This field is required";
const BAD_DATE: &str = "Incorrect data format, should be YYYY-MM-DD";

/// Values bound to the booking form inputs
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFormData {
    pub check_in: String,
    pub check_out: String,
    /// Number of rooms, "1" to "3"
    pub room_preference: String,
    pub smoking_preference: bool,
    pub credit_card_number: String,
    pub credit_card_name: String,
    pub credit_card_expiry: String,
}

impl Default for BookingFormData {
    fn default() -> Self {
        Self {
            check_in: String::new(),
            check_out: String::new(),
            room_preference: String::new(),
            // the server treats `false` as a missing field
            smoking_preference: true,
            credit_card_number: String::new(),
            credit_card_name: String::new(),
            credit_card_expiry: String::new(),
        }
    }
}

impl BookingFormData {
    /// Field name to message for every invalid input
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        let required = [
            ("check_in", &self.check_in),
            ("check_out", &self.check_out),
            ("room_preference", &self.room_preference),
            ("credit_card_number", &self.credit_card_number),
            ("credit_card_name", &self.credit_card_name),
            ("credit_card_expiry", &self.credit_card_expiry),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), REQUIRED.to_string());
            }
        }

        let mut dates = BTreeMap::new();
        for (field, value) in [
            ("check_in", &self.check_in),
            ("check_out", &self.check_out),
            ("credit_card_expiry", &self.credit_card_expiry),
        ] {
            if errors.contains_key(field) {
                continue;
            }
            match parse_date(value) {
                Ok(date) => {
                    dates.insert(field, date);
                }
                Err(_) => {
                    errors.insert(field.to_string(), BAD_DATE.to_string());
                }
            }
        }

        if let (Some(check_in), Some(check_out)) = (dates.get("check_in"), dates.get("check_out")) {
            if check_out <= check_in {
                errors.insert("check_out".to_string(), "Check-out must be after check-in".to_string());
            }
        }

        if !errors.contains_key("room_preference") && self.rooms().is_none() {
            errors.insert("room_preference".to_string(), "Select a value between 1 to 3".to_string());
        }

        let card = self.card_number();
        if !errors.contains_key("credit_card_number") && (!is_valid_card_number(&card) || card.len() > MAX_CARD_DIGITS) {
            errors.insert("credit_card_number".to_string(), "Invalid credit card number".to_string());
        }

        errors
    }

    /// Room count, when it is exactly one of "1", "2" or "3"
    pub fn rooms(&self) -> Option<u8> {
        match self.room_preference.trim() {
            "1" => Some(1),
            "2" => Some(2),
            "3" => Some(3),
            _ => None,
        }
    }

    /// Card number as the server stores it, digits only
    pub fn card_number(&self) -> String {
        normalize_card_number(self.credit_card_number.trim())
    }

    /// Nights between the two dates, when both parse
    pub fn nights(&self) -> Option<u32> {
        let check_in = parse_date(&self.check_in).ok()?;
        let check_out = parse_date(&self.check_out).ok()?;
        Some(day_diff(check_in, check_out))
    }
}

/// Controller of the booking form
#[derive(Debug, Clone)]
pub struct HotelBookingFormController {
    api: ApiClient,
    pub user_id: Option<i64>,
    pub hotel: Option<Hotel>,
    pub form_data: BookingFormData,
    /// Local validation messages per field
    pub form_errors: BTreeMap<String, String>,
    /// Error reported by the server or by loading the page
    pub form_error: Option<ErrorPayload>,
    pub preview: bool,
    pub submitted: bool,
    pub total_cost: Option<f64>,
    pub booking_id: Option<i64>,
}

impl HotelBookingFormController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            user_id: None,
            hotel: None,
            form_data: BookingFormData::default(),
            form_errors: BTreeMap::new(),
            form_error: None,
            preview: false,
            submitted: false,
            total_cost: None,
            booking_id: None,
        }
    }

    /// Load the token, then the hotel being booked, and reset the form
    ///
    /// Without an explicit `user_id` the id is read from the token.
    pub async fn init(&mut self, hotel_id: i64, user_id: Option<i64>) {
        self.user_id = user_id;
        self.hotel = None;
        self.form_data = BookingFormData::default();
        self.form_errors.clear();
        self.form_error = None;
        self.preview = false;
        self.submitted = false;
        self.total_cost = None;
        self.booking_id = None;

        if let Err(e) = ensure_token(&self.api).await {
            self.form_error = Some(ErrorPayload::Message(e.display_message()));
            return;
        }

        if self.user_id.is_none() {
            self.user_id = self.api.token().await.and_then(|token| token.user_id());
        }

        match self.api.get_hotel(hotel_id).await {
            Ok(hotel) => self.hotel = Some(hotel),
            Err(e) => self.form_error = Some(ErrorPayload::Message(e.display_message())),
        }
    }

    /// Validate the form and, when valid, show the price preview
    pub fn submit(&mut self) -> bool {
        self.submitted = true;
        self.form_errors = self.form_data.validate();

        let Some(hotel) = &self.hotel else {
            self.preview = false;
            return false;
        };

        if !self.form_errors.is_empty() {
            debug!(errors = ?self.form_errors, "Booking form is invalid");
            self.preview = false;
            self.total_cost = None;
            return false;
        }

        let nights = self.form_data.nights().unwrap_or_default();
        let rooms = self.form_data.rooms().unwrap_or_default();
        self.total_cost = Some(booking_total(nights, rooms, hotel.nightly_rate));
        self.preview = true;
        true
    }

    /// Post the booking; goes to the booking list on success
    pub async fn post_booking(&mut self) -> Option<Screen> {
        if !self.submit() {
            return None;
        }

        let hotel_id = self.hotel.as_ref()?.id;
        let Some(user_id) = self.user_id else {
            self.preview = false;
            self.form_error = Some(ErrorPayload::Message(
                "Unknown user, please log in again".to_string(),
            ));
            return None;
        };

        let booking = NewBooking {
            hotel_id,
            user_id,
            check_in: self.form_data.check_in.trim().to_string(),
            check_out: self.form_data.check_out.trim().to_string(),
            room_preference: self.form_data.rooms()?.to_string(),
            smoking_preference: self.form_data.smoking_preference,
            credit_card_number: self.form_data.card_number(),
            credit_card_name: self.form_data.credit_card_name.trim().to_string(),
            credit_card_expiry: self.form_data.credit_card_expiry.trim().to_string(),
        };

        match self.api.create_booking(&booking).await {
            Ok(booking_id) => {
                info!(booking_id = booking_id, hotel_id = hotel_id, "Booking posted");
                self.booking_id = Some(booking_id);
                self.form_error = None;
                Some(Screen::Bookings)
            }
            Err(e) => {
                self.preview = false;
                self.form_error = Some(
                    e.payload()
                        .cloned()
                        .unwrap_or_else(|| ErrorPayload::Message(e.display_message())),
                );
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(hotel) = &self.hotel {
            lines.push(format!("Booking {} ({}/night)", hotel.name, format_price(hotel.nightly_rate)));
        }

        if self.preview {
            lines.push(format!("Check-in:  {}", self.form_data.check_in));
            lines.push(format!("Check-out: {}", self.form_data.check_out));
            lines.push(format!("Nights:    {}", self.form_data.nights().unwrap_or_default()));
            lines.push(format!("Rooms:     {}", self.form_data.room_preference));
            lines.push(format!("Card:      {}", mask_card_number(&self.form_data.credit_card_number)));
            if let Some(total) = self.total_cost {
                lines.push(format!("Total:     {}", format_price(total)));
            }
        }

        if self.submitted {
            for (field, message) in &self.form_errors {
                lines.push(format!("{}: {}", field, message));
            }
        }

        if let Some(error) = &self.form_error {
            lines.push(format!("Booking failed: {}", error));
        }

        if let Some(id) = self.booking_id {
            lines.push(format!("Booking #{} confirmed.", id));
        }

        lines.join("\n")
    }
}
