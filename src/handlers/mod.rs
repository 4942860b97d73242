//! Screen controllers module
//!
//! One controller per screen of the booking client. Each controller owns
//! the view state of its screen, calls the API in sequence, and writes any
//! failure into a view-bound error field instead of returning it:
//! - Login and signup forms
//! - Hotel listing and hotel detail with map
//! - Booking form with price preview, booking listing with cancellation
//! - Password change modal and the admin hotel creation form

pub mod booking_form;
pub mod bookings;
pub mod hotel_create;
pub mod hotel_detail;
pub mod hotels;
pub mod login;
pub mod password;

// Re-export the controllers
pub use booking_form::{BookingFormData, HotelBookingFormController};
pub use bookings::HotelBookingListingController;
pub use hotel_create::{HotelCreateFormController, HotelFormData};
pub use hotel_detail::HotelViewController;
pub use hotels::HotelListingController;
pub use login::LoginController;
pub use password::{ChangePasswordModal, ModalState};

use tracing::debug;
use crate::services::ApiClient;
use crate::utils::errors::Result;

/// Fetch the session token unless one is already attached
pub async fn ensure_token(api: &ApiClient) -> Result<()> {
    if api.has_token().await {
        debug!("Token already attached");
        return Ok(());
    }
    api.fetch_token().await?;
    Ok(())
}
