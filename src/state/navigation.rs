//! Screen routing
//!
//! The screens of the booking client, their paths, and the navigator that
//! sends anonymous users back to the login screen.

use std::fmt;
use crate::utils::errors::{BookHotelError, Result};
use super::context::SessionContext;

/// A screen of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login and signup forms
    Login,
    /// Hotel listing
    Home,
    HotelDetail(i64),
    BookHotel(i64),
    Bookings,
    BookingDetail(i64),
    /// Admin hotel creation form
    CreateHotel,
    Logout,
}

impl Screen {
    /// Path of the screen; login and home share the root
    pub fn path(&self) -> String {
        match self {
            Screen::Login | Screen::Home => "/".to_string(),
            Screen::HotelDetail(id) => format!("/hotels/{}", id),
            Screen::BookHotel(id) => format!("/book_hotel/{}", id),
            Screen::Bookings => "/bookings".to_string(),
            Screen::BookingDetail(id) => format!("/bookings/{}", id),
            Screen::CreateHotel => "/create_hotel".to_string(),
            Screen::Logout => "/logout".to_string(),
        }
    }

    /// Resolve a path; query strings and trailing slashes are ignored
    pub fn from_path(path: &str) -> Result<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let parse_id = |raw: &str| {
            raw.parse::<i64>()
                .map_err(|_| BookHotelError::UnknownRoute(path.to_string()))
        };

        match segments.as_slice() {
            [] => Ok(Screen::Home),
            ["hotels", id] => Ok(Screen::HotelDetail(parse_id(*id)?)),
            ["book_hotel", id] => Ok(Screen::BookHotel(parse_id(*id)?)),
            ["bookings"] => Ok(Screen::Bookings),
            ["bookings", id] => Ok(Screen::BookingDetail(parse_id(*id)?)),
            ["create_hotel"] => Ok(Screen::CreateHotel),
            ["logout"] => Ok(Screen::Logout),
            _ => Err(BookHotelError::UnknownRoute(path.to_string())),
        }
    }

    /// Screens that need a logged-in user
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Login | Screen::Logout)
    }

    /// Screens the server only serves to administrators
    pub fn requires_admin(&self) -> bool {
        matches!(self, Screen::CreateHotel)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::Home => "hotel list",
            Screen::HotelDetail(_) => "hotel detail",
            Screen::BookHotel(_) => "booking form",
            Screen::Bookings => "bookings",
            Screen::BookingDetail(_) => "booking detail",
            Screen::CreateHotel => "create hotel",
            Screen::Logout => "logout",
        };
        write!(f, "{} ({})", name, self.path())
    }
}

/// Navigation state with history
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Screen::Login,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Go to a screen, redirecting to login when the session is anonymous
    pub fn navigate(&mut self, to: Screen, session: &SessionContext) -> Screen {
        let target = match to {
            Screen::Logout => Screen::Login,
            s if s.requires_auth() && !session.is_authenticated() => Screen::Login,
            s => s,
        };

        if target != self.current {
            self.history.push(self.current);
            self.current = target;
        }
        target
    }

    /// Return to the previous screen
    pub fn back(&mut self) -> Result<Screen> {
        let previous = self.history.pop().ok_or_else(|| BookHotelError::InvalidStateTransition {
            from: self.current.path(),
            to: "back".to_string(),
        })?;
        self.current = previous;
        Ok(previous)
    }
}
