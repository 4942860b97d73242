//! Booking API client
//!
//! Typed wrappers around every REST endpoint of the booking service,
//! including HTTP client setup, token propagation, response parsing
//! and mapping of the server's `error` field.

use std::sync::Arc;
use std::time::{Duration, Instant};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{header::AUTHORIZATION, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;
use crate::config::ApiConfig;
use crate::models::{
    Booking, BookingCreated, ChangePasswordRequest, ChangePasswordResponse, Credentials, Hotel,
    HotelCreated, HotelDetailResponse, NewBooking, NewHotel, SignupRequest, Token, TokenResponse,
};
use crate::utils::errors::{ApiError, BookHotelError, ErrorBody, ErrorPayload, Result};
use crate::utils::logging;

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client for the booking REST API
///
/// Clones share the HTTP connection pool, the cookie jar and the token slot.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    cookies: Arc<Jar>,
    token: Arc<RwLock<Option<Token>>>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .cookie_provider(cookies.clone())
            .build()
            .map_err(BookHotelError::Http)?;

        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(Self {
            client,
            base_url,
            cookies,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Server session cookies as a `Cookie` header value
    ///
    /// `GET /api/get_token` reads the token from this session, so the value
    /// is saved with the session file and handed back to `restore_cookies`.
    pub fn session_cookies(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|value| !value.is_empty())
    }

    /// Load cookies saved by `session_cookies` into the jar
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            self.cookies.add_cookie_str(&format!("{}; Path=/", pair), &self.base_url);
        }
        debug!("Restored session cookies");
    }

    /// Attach a token to every subsequent request
    pub async fn set_token(&self, token: Token) {
        *self.token.write().await = Some(token);
    }

    pub async fn token(&self) -> Option<Token> {
        self.token.read().await.clone()
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// `POST /api/users`: create an account and log it in
    pub async fn signup(&self, request: &SignupRequest) -> Result<Token> {
        let response: TokenResponse = self.send_json(Method::POST, "/api/users", Some(request)).await?;
        logging::log_user_action(Some(&request.username), "signup", None);
        self.set_token(response.token.clone()).await;
        Ok(response.token)
    }

    /// `POST /api/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<Token> {
        let response: TokenResponse = self.send_json(Method::POST, "/api/login", Some(credentials)).await?;
        logging::log_user_action(Some(&credentials.username), "login", None);
        self.set_token(response.token.clone()).await;
        Ok(response.token)
    }

    /// `GET /api/get_token`: token of the server-side session
    pub async fn fetch_token(&self) -> Result<Token> {
        let response: TokenResponse = self.send_json(Method::GET, "/api/get_token", None::<&()>).await?;
        debug!("Fetched token from server session");
        self.set_token(response.token.clone()).await;
        Ok(response.token)
    }

    /// `GET /api/hotels/`
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        self.send_json(Method::GET, "/api/hotels/", None::<&()>).await
    }

    /// `GET /api/hotels/{id}`
    pub async fn get_hotel(&self, hotel_id: i64) -> Result<Hotel> {
        let path = format!("/api/hotels/{}", hotel_id);
        let response: HotelDetailResponse = self.send_json(Method::GET, &path, None::<&()>).await?;
        Ok(response.result)
    }

    /// `POST /api/hotels/`: admin only
    pub async fn create_hotel(&self, hotel: &NewHotel) -> Result<i64> {
        let response: HotelCreated = self.send_json(Method::POST, "/api/hotels/", Some(hotel)).await?;
        info!(hotel_id = response.hotel, name = %hotel.name, "Hotel created");
        Ok(response.hotel)
    }

    /// `GET /api/bookings/`: bookings of the current user
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.send_json(Method::GET, "/api/bookings/", None::<&()>).await
    }

    /// `POST /api/bookings/`
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<i64> {
        let response: BookingCreated = self.send_json(Method::POST, "/api/bookings/", Some(booking)).await?;
        info!(booking_id = response.booking_id, hotel_id = booking.hotel_id, "Booking created");
        Ok(response.booking_id)
    }

    /// `DELETE /api/bookings/{id}`
    pub async fn cancel_booking(&self, booking_id: i64) -> Result<()> {
        let path = format!("/api/bookings/{}", booking_id);
        self.execute(Method::DELETE, &path, None::<&()>).await?;
        info!(booking_id = booking_id, "Booking cancelled");
        Ok(())
    }

    /// `POST /api/change_password`
    pub async fn change_password(&self, password: &str) -> Result<i64> {
        let request = ChangePasswordRequest { password: password.to_string() };
        let response: ChangePasswordResponse =
            self.send_json(Method::POST, "/api/change_password", Some(&request)).await?;
        logging::log_user_action(None, "change_password", Some(&format!("user {}", response.user)));
        Ok(response.user)
    }

    /// `GET /logout`: end the server session and forget the token
    pub async fn logout(&self) -> Result<()> {
        self.clear_token().await;
        self.execute(Method::GET, "/logout", None::<&()>).await?;
        logging::log_user_action(None, "logout", None);
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            logging::log_api_error("booking", &e.to_string(), Some(path));
            BookHotelError::Serialization(e)
        })
    }

    async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, &request_id);

        if let Some(token) = self.token.read().await.as_ref() {
            request = request.header(AUTHORIZATION, token.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            logging::log_api_error("booking", &e.to_string(), Some(path));
            BookHotelError::Http(e)
        })?;
        let status = response.status();
        logging::log_api_call(
            method.as_str(),
            path,
            status.as_u16(),
            started.elapsed().as_millis() as u64,
            &request_id,
        );

        if !status.is_success() {
            let error = BookHotelError::from(error_from_response(response).await);
            logging::log_failure(path, &error);
            return Err(error);
        }

        Ok(response)
    }
}

/// Build an ApiError from a failed response
///
/// Bodies without a JSON `error` field, such as HTML abort pages, fall back
/// to the status line.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    ApiError {
        status: status.as_u16(),
        payload: parse_error_payload(status, &text),
    }
}

fn parse_error_payload(status: StatusCode, body: &str) -> ErrorPayload {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => ErrorPayload::Message(
            format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or("")).trim_end().to_string(),
        ),
    }
}
