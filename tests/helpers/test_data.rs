//! Test data helpers
//!
//! Payloads shaped like the booking server's responses: every column
//! stringified, booleans as "True"/"False", nulls as "None".

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use BookHotel::models::{Hotel, Token};

pub const TEST_USERNAME: &str = "jdoe";
pub const TEST_PASSWORD: &str = "hunter2";
pub const TEST_USER_ID: i64 = 7;

/// Token whose payload carries `{"id": user_id}`
pub fn test_token(user_id: i64) -> Token {
    let value = encode(
        &Header::new(jsonwebtoken::Algorithm::HS512),
        &json!({ "id": user_id }),
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .expect("Failed to encode test token");
    Token::new(value)
}

pub fn hotel_json(id: i64, name: &str, rate: f64) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "address": "1 Pier Rd",
        "city": "Portland",
        "state": "ME",
        "country": "USA",
        "zipcode": "04101",
        "nightly_rate": format!("{:.1}", rate),
        "description": format!("{} by the sea", name),
    })
}

pub fn hotel_list_json() -> Value {
    json!([
        hotel_json(1, "Harbor Inn", 120.0),
        hotel_json(2, "Lighthouse Suites", 210.5),
    ])
}

pub fn test_hotel(id: i64, rate: f64) -> Hotel {
    serde_json::from_value(hotel_json(id, "Harbor Inn", rate)).expect("Failed to build test hotel")
}

pub fn booking_json(id: i64, hotel_id: i64, rooms: i64) -> Value {
    json!({
        "id": id.to_string(),
        "created": "2024-02-01 10:15:00.123456",
        "check_in": "2024-03-01",
        "check_out": "2024-03-04",
        "hotel_id": hotel_id.to_string(),
        "user_id": TEST_USER_ID.to_string(),
        "room_preference": rooms.to_string(),
        "smoking_preference": "True",
        "credit_card_number": "4111111111111111",
        "credit_card_name": "J DOE",
        "credit_card_expiry": "2027-01-01",
        "hotel": hotel_json(hotel_id, "Harbor Inn", 100.0),
    })
}

pub fn booking_list_json() -> Value {
    json!([booking_json(11, 1, 2), booking_json(12, 1, 1)])
}

/// Geocoder answer with a single match
pub fn geocode_ok_json(lat: f64, lng: f64) -> Value {
    json!({
        "status": "OK",
        "results": [
            { "geometry": { "location": { "lat": lat, "lng": lng } } }
        ]
    })
}
