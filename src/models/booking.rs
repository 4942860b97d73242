//! Booking model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::models::fields::{de_bool, de_i64, de_opt_date, de_opt_datetime, de_opt_i64, de_string};
use crate::models::hotel::Hotel;
use crate::utils::helpers::{booking_total, day_diff};

/// A reservation as listed by `GET /api/bookings/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_opt_datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub check_out: Option<NaiveDate>,
    #[serde(deserialize_with = "de_i64")]
    pub hotel_id: i64,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub user_id: Option<i64>,
    #[serde(deserialize_with = "de_i64")]
    pub room_preference: i64,
    #[serde(default, deserialize_with = "de_bool")]
    pub smoking_preference: bool,
    #[serde(default, deserialize_with = "de_string")]
    pub credit_card_number: String,
    #[serde(default, deserialize_with = "de_string")]
    pub credit_card_name: String,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub credit_card_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub hotel: Option<Hotel>,
}

impl Booking {
    /// Nights between check-in and check-out
    pub fn nights(&self) -> Option<u32> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(day_diff(check_in, check_out)),
            _ => None,
        }
    }

    /// Stay price, when both dates and the hotel rate are known
    pub fn total_cost(&self) -> Option<f64> {
        let nights = self.nights()?;
        let hotel = self.hotel.as_ref()?;
        let rooms = u8::try_from(self.room_preference).ok()?;
        Some(booking_total(nights, rooms, hotel.nightly_rate))
    }
}

/// Payload of `POST /api/bookings/`
///
/// The server compares `room_preference` against the strings "1" to "3"
/// and reads dates as `YYYY-MM-DD`, so both travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub hotel_id: i64,
    pub user_id: i64,
    pub check_in: String,
    pub check_out: String,
    pub room_preference: String,
    pub smoking_preference: bool,
    pub credit_card_number: String,
    pub credit_card_name: String,
    pub credit_card_expiry: String,
}

/// `{"booking_id": id}` returned after booking
#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreated {
    #[serde(deserialize_with = "de_i64")]
    pub booking_id: i64,
}
