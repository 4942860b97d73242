//! Admin hotel creation screen

use std::collections::BTreeMap;
use tracing::info;
use crate::models::NewHotel;
use crate::services::ApiClient;
use crate::state::Screen;
use crate::utils::errors::ErrorPayload;
use super::ensure_token;

/// Values bound to the hotel creation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFormData {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub nightly_rate: String,
}

impl HotelFormData {
    /// Field name to message for every invalid input
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (field, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("country", &self.country),
            ("zipcode", &self.zipcode),
            ("nightly_rate", &self.nightly_rate),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), "This field is required".to_string());
            }
        }

        if !errors.contains_key("nightly_rate") && self.rate().is_none() {
            errors.insert("nightly_rate".to_string(), "Invalid nightly rate".to_string());
        }
        errors
    }

    /// Nightly rate, when it is a finite non-negative number
    pub fn rate(&self) -> Option<f64> {
        self.nightly_rate
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite() && *rate >= 0.0)
    }

    fn to_new_hotel(&self) -> Option<NewHotel> {
        Some(NewHotel {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            country: self.country.trim().to_string(),
            zipcode: self.zipcode.trim().to_string(),
            nightly_rate: self.rate()?,
        })
    }
}

/// Controller of the admin hotel creation form
#[derive(Debug, Clone)]
pub struct HotelCreateFormController {
    api: ApiClient,
    pub form_data: HotelFormData,
    pub form_errors: BTreeMap<String, String>,
    pub form_error: Option<ErrorPayload>,
    pub hotel_id: Option<i64>,
}

impl HotelCreateFormController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form_data: HotelFormData::default(),
            form_errors: BTreeMap::new(),
            form_error: None,
            hotel_id: None,
        }
    }

    /// Load the token and reset the form
    pub async fn init(&mut self) {
        self.form_data = HotelFormData::default();
        self.form_errors.clear();
        self.form_error = None;
        self.hotel_id = None;

        if let Err(e) = ensure_token(&self.api).await {
            self.form_error = Some(ErrorPayload::Message(e.display_message()));
        }
    }

    /// Post the hotel; goes to the hotel list on success
    pub async fn hotel_create(&mut self) -> Option<Screen> {
        self.form_error = None;
        self.form_errors = self.form_data.validate();
        if !self.form_errors.is_empty() {
            return None;
        }

        let hotel = self.form_data.to_new_hotel()?;
        match self.api.create_hotel(&hotel).await {
            Ok(id) => {
                info!(hotel_id = id, "Hotel created from form");
                self.hotel_id = Some(id);
                Some(Screen::Home)
            }
            Err(e) => {
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
        let mut lines: Vec<String> = self
            .form_errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        if let Some(error) = &self.form_error {
            lines.push(format!("Could not create hotel: {}", error));
        }
        if let Some(id) = self.hotel_id {
            lines.push(format!("Hotel #{} created.", id));
        }
        lines.join("\n")
    }
}
