//! Hotel model

use serde::{Deserialize, Serialize};
use crate::models::fields::{de_f64, de_i64, de_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de_string")]
    pub address: String,
    #[serde(default, deserialize_with = "de_string")]
    pub city: String,
    #[serde(default, deserialize_with = "de_string")]
    pub state: String,
    #[serde(default, deserialize_with = "de_string")]
    pub country: String,
    #[serde(default, deserialize_with = "de_string")]
    pub zipcode: String,
    #[serde(deserialize_with = "de_f64")]
    pub nightly_rate: f64,
    #[serde(default, deserialize_with = "de_string")]
    pub description: String,
}

impl Hotel {
    /// Address line handed to the geocoder: street, city, state, zipcode
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.zipcode]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `{"result": {...}}` wrapper of the hotel detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HotelDetailResponse {
    pub result: Hotel,
}

/// Payload of the admin hotel creation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHotel {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub nightly_rate: f64,
}

/// `{"hotel": id}` returned after creating a hotel
#[derive(Debug, Clone, Deserialize)]
pub struct HotelCreated {
    #[serde(deserialize_with = "de_i64")]
    pub hotel: i64,
}
