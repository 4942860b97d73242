//! Lenient field decoding
//!
//! The booking API stringifies every column of the records it lists
//! (`"id": "3"`, `"nightly_rate": "120.0"`, `"smoking_preference": "True"`)
//! and renders a null column as `"None"`. These helpers accept both the
//! native JSON type and its stringified form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null(()),
}

fn is_none_literal(s: &str) -> bool {
    s.is_empty() || s == "None" || s == "null"
}

pub fn de_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Int(i) => Ok(i),
        Loose::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        Loose::Str(s) => s.trim().parse().map_err(|_| de::Error::custom(format!("invalid integer: {}", s))),
        _ => Err(de::Error::custom("expected an integer")),
    }
}

pub fn de_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Null(()) => Ok(None),
        Loose::Int(i) => Ok(Some(i)),
        Loose::Float(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
        Loose::Str(s) if is_none_literal(&s) => Ok(None),
        Loose::Str(s) => s.trim().parse().map(Some).map_err(|_| de::Error::custom(format!("invalid integer: {}", s))),
        _ => Err(de::Error::custom("expected an integer")),
    }
}

pub fn de_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Int(i) => Ok(i as f64),
        Loose::Float(f) => Ok(f),
        Loose::Str(s) => s.trim().parse().map_err(|_| de::Error::custom(format!("invalid number: {}", s))),
        _ => Err(de::Error::custom("expected a number")),
    }
}

pub fn de_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => Ok(b),
        Loose::Null(()) => Ok(false),
        Loose::Int(i) => Ok(i != 0),
        Loose::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "none" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean: {}", other))),
        },
        Loose::Float(_) => Err(de::Error::custom("expected a boolean")),
    }
}

/// Strings that may be missing or rendered as `"None"`
pub fn de_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Null(()) => Ok(String::new()),
        Loose::Str(s) if s == "None" => Ok(String::new()),
        Loose::Str(s) => Ok(s),
        Loose::Int(i) => Ok(i.to_string()),
        Loose::Float(f) => Ok(f.to_string()),
        Loose::Bool(b) => Ok(b.to_string()),
    }
}

pub fn de_opt_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Null(()) => Ok(None),
        Loose::Str(s) if is_none_literal(&s) => Ok(None),
        Loose::Str(s) => {
            // DATE columns may come back with a time part attached
            let date_part = s.trim().get(..10).unwrap_or(s.trim());
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid date: {}", s)))
        }
        _ => Err(de::Error::custom("expected a date string")),
    }
}

/// Timestamps are informational; unparseable values decode as `None`
pub fn de_opt_datetime<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Str(s) => {
            let s = s.trim();
            // drop any timezone suffix such as "+00:00"
            let head = s.get(..19).unwrap_or(s);
            let parsed = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
                .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S"))
                .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S"))
                .ok();
            Ok(parsed)
        }
        _ => Ok(None),
    }
}
