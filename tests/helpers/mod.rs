//! Test helpers module
//!
//! This module provides utilities and helpers for testing the BookHotel client.
//! It includes the mock booking API server, sample payloads, and test context setup.

#![allow(dead_code)]

pub mod booking_api_mock;
pub mod simple_test;
pub mod test_data;

pub use booking_api_mock::*;
pub use simple_test::*;
pub use test_data::*;
