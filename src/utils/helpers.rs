//! Helper functions and utilities
//!
//! Date handling, price arithmetic and card checks shared by the
//! booking screens.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use crate::utils::errors::{BookHotelError, Result};

/// Date format used by every date field of the booking API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if !date_pattern().is_match(text) {
        return Err(BookHotelError::InvalidInput(
            "Incorrect data format, should be YYYY-MM-DD".to_string(),
        ));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
        BookHotelError::InvalidInput("Incorrect data format, should be YYYY-MM-DD".to_string())
    })
}

/// Whole days between two dates, regardless of order
pub fn day_diff(first: NaiveDate, second: NaiveDate) -> u32 {
    (second - first).num_days().unsigned_abs() as u32
}

/// Total price of a stay: nights x rooms x nightly rate
pub fn booking_total(nights: u32, rooms: u8, nightly_rate: f64) -> f64 {
    f64::from(nights) * f64::from(rooms) * nightly_rate
}

/// Longest card number the booking store keeps
pub const MAX_CARD_DIGITS: usize = 16;

/// Card number with the spaces and dashes people type removed
pub fn normalize_card_number(number: &str) -> String {
    number.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Luhn check over a card number; spaces and dashes are ignored
pub fn is_valid_card_number(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                doubled / 10 + doubled % 10
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Keep only the last four digits of a card number visible
pub fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return digits.into_iter().collect();
    }
    let visible: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - 4), visible)
}

/// Format a price with two decimals
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
