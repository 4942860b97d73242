//! Booking API client tests
//!
//! Every endpoint wrapper against the mock server, including the
//! stringified payloads and both shapes of the `error` field.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};
use BookHotel::models::{Credentials, NewBooking, NewHotel, SignupRequest};
use BookHotel::services::api::REQUEST_ID_HEADER;
use BookHotel::utils::errors::{BookHotelError, ErrorPayload};

fn credentials() -> Credentials {
    Credentials {
        username: TEST_USERNAME.to_string(),
        password: TEST_PASSWORD.to_string(),
    }
}

#[tokio::test]
#[serial]
async fn test_login_stores_token() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    let token = test_token(TEST_USER_ID);
    mock.mock_login(&token, MockResponseConfig::default()).await;

    let api = mock.api_client();
    assert!(!api.has_token().await);

    let received = api.login(&credentials()).await.expect("Login should succeed");
    assert_eq!(received, token);
    assert_eq!(api.token().await, Some(token.clone()));
    assert_eq!(received.user_id(), Some(TEST_USER_ID));
}

#[tokio::test]
#[serial]
async fn test_login_failure_carries_message() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_login(
        &test_token(TEST_USER_ID),
        MockResponseConfig::error(400, json!("Invalid username or password")),
    )
    .await;

    let api = mock.api_client();
    let error = api.login(&credentials()).await.unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert_eq!(error.display_message(), "Invalid username or password");
    assert!(!api.has_token().await);
}

#[tokio::test]
#[serial]
async fn test_signup_posts_all_fields() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    let token = test_token(TEST_USER_ID);

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_partial_json(json!({
            "username": "newbie",
            "realname": "New Bie",
            "password": "pw",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token.as_str() })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let api = mock.api_client();
    let request = SignupRequest {
        username: "newbie".to_string(),
        realname: "New Bie".to_string(),
        password: "pw".to_string(),
    };
    api.signup(&request).await.expect("Signup should succeed");
    assert!(api.has_token().await);
}

#[tokio::test]
#[serial]
async fn test_requests_carry_raw_token_and_request_id() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    let token = test_token(TEST_USER_ID);

    Mock::given(method("GET"))
        .and(path("/api/bookings/"))
        .and(header("Authorization", token.as_str()))
        .and(header_exists(REQUEST_ID_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock.server)
        .await;

    let api = mock.api_client();
    api.set_token(token).await;
    let bookings = api.list_bookings().await.expect("Listing should succeed");
    assert!(bookings.is_empty());
}

#[tokio::test]
#[serial]
async fn test_hotels_parse_stringified_rows() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    let token = test_token(TEST_USER_ID);
    mock.mock_list_hotels(&token, hotel_list_json()).await;
    mock.mock_get_hotel(2, MockResponseConfig::default(), hotel_json(2, "Lighthouse Suites", 210.5)).await;

    let api = mock.api_client();
    api.set_token(token).await;

    let hotels = api.list_hotels().await.expect("Listing should succeed");
    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0].id, 1);
    assert_eq!(hotels[0].nightly_rate, 120.0);
    assert_eq!(hotels[1].name, "Lighthouse Suites");

    let hotel = api.get_hotel(2).await.expect("Lookup should succeed");
    assert_eq!(hotel.id, 2);
    assert_eq!(hotel.nightly_rate, 210.5);
    assert_eq!(hotel.full_address(), "1 Pier Rd,Portland,ME,04101");
}

#[tokio::test]
#[serial]
async fn test_bookings_embed_hotel() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_list_bookings(booking_list_json()).await;

    let api = mock.api_client();
    let bookings = api.list_bookings().await.expect("Listing should succeed");

    assert_eq!(bookings.len(), 2);
    let first = &bookings[0];
    assert_eq!(first.id, 11);
    assert_eq!(first.room_preference, 2);
    assert!(first.smoking_preference);
    assert_eq!(first.nights(), Some(3));
    assert_eq!(first.total_cost(), Some(600.0));
    assert_eq!(first.hotel.as_ref().map(|h| h.name.as_str()), Some("Harbor Inn"));
}

#[tokio::test]
#[serial]
async fn test_create_booking_wire_format() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings/"))
        .and(body_partial_json(json!({
            "hotel_id": 1,
            "user_id": TEST_USER_ID,
            "room_preference": "2",
            "smoking_preference": true,
            "check_in": "2024-03-01",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "booking_id": "42" })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let booking = NewBooking {
        hotel_id: 1,
        user_id: TEST_USER_ID,
        check_in: "2024-03-01".to_string(),
        check_out: "2024-03-04".to_string(),
        room_preference: "2".to_string(),
        smoking_preference: true,
        credit_card_number: "4111111111111111".to_string(),
        credit_card_name: "J DOE".to_string(),
        credit_card_expiry: "2027-01-01".to_string(),
    };

    let api = mock.api_client();
    assert_eq!(api.create_booking(&booking).await.expect("Booking should succeed"), 42);
}

#[tokio::test]
#[serial]
async fn test_field_errors_are_kept_per_field() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_create_booking(
        0,
        MockResponseConfig::error(
            400,
            json!({
                "check_in": "Incorrect data format, should be YYYY-MM-DD",
                "smoking_preference": "This field is required.",
            }),
        ),
    )
    .await;

    let booking = NewBooking {
        hotel_id: 1,
        user_id: TEST_USER_ID,
        check_in: "01/03/2024".to_string(),
        check_out: "2024-03-04".to_string(),
        room_preference: "1".to_string(),
        smoking_preference: false,
        credit_card_number: "4111111111111111".to_string(),
        credit_card_name: "J DOE".to_string(),
        credit_card_expiry: "2027-01-01".to_string(),
    };

    let error = mock.api_client().create_booking(&booking).await.unwrap_err();
    let payload = error.payload().expect("API errors carry a payload");
    assert!(payload.is_field_errors());
    assert_eq!(payload.field("check_in"), Some("Incorrect data format, should be YYYY-MM-DD"));
    assert_eq!(payload.field("smoking_preference"), Some("This field is required."));
}

#[tokio::test]
#[serial]
async fn test_html_abort_page_falls_back_to_status() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_abort("GET", "/api/hotels/99").await;

    let error = mock.api_client().get_hotel(99).await.unwrap_err();
    assert_matches!(&error, BookHotelError::Api(api) if api.status == 400);
    assert_eq!(error.payload(), Some(&ErrorPayload::Message("HTTP 400 Bad Request".to_string())));
}

#[tokio::test]
#[serial]
async fn test_create_hotel_forbidden_for_non_admin() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_create_hotel(0, MockResponseConfig::error(403, json!("Only admins can create hotels")))
        .await;

    let hotel = NewHotel {
        name: "Harbor Inn".to_string(),
        description: "Seaside rooms".to_string(),
        address: "1 Pier Rd".to_string(),
        city: "Portland".to_string(),
        state: "ME".to_string(),
        country: "USA".to_string(),
        zipcode: "04101".to_string(),
        nightly_rate: 149.5,
    };

    let error = mock.api_client().create_hotel(&hotel).await.unwrap_err();
    assert_eq!(error.status(), Some(403));
    assert!(!error.is_recoverable());
}

#[tokio::test]
#[serial]
async fn test_cancel_and_change_password() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_cancel_booking(11, MockResponseConfig::default()).await;
    mock.mock_change_password(TEST_USER_ID, MockResponseConfig::default()).await;

    let api = mock.api_client();
    api.cancel_booking(11).await.expect("Cancellation should succeed");
    assert_eq!(api.change_password("new-secret").await.expect("Change should succeed"), TEST_USER_ID);
}

#[tokio::test]
#[serial]
async fn test_logout_forgets_token() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    mock.mock_logout().await;

    let api = mock.api_client();
    api.set_token(test_token(TEST_USER_ID)).await;
    api.logout().await.expect("Logout should succeed");
    assert!(!api.has_token().await);
}

#[tokio::test]
#[serial]
async fn test_get_token_uses_session_cookie() {
    init_test_env();
    let mock = BookingApiMockServer::new().await;
    let token = test_token(TEST_USER_ID);

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "session=abc123; Path=/")
                .set_body_json(json!({ "token": token.as_str() })),
        )
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/get_token"))
        .and(header("Cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token.as_str() })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let api = mock.api_client();
    api.login(&credentials()).await.expect("Login should succeed");
    api.clear_token().await;

    assert_eq!(api.fetch_token().await.expect("Token should be fetched"), token);
    assert!(api.has_token().await);
}
