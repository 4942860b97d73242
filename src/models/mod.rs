//! Data models for the BookHotel client
//!
//! This module contains the view-model records mirrored from API responses.

pub mod booking;
pub mod fields;
pub mod geo;
pub mod hotel;
pub mod user;

pub use booking::{Booking, BookingCreated, NewBooking};
pub use geo::{GeocodeResponse, LatLng};
pub use hotel::{Hotel, HotelCreated, HotelDetailResponse, NewHotel};
pub use user::{ChangePasswordRequest, ChangePasswordResponse, Credentials, SignupRequest, Token, TokenClaims, TokenResponse};
