//! Login and signup screen

use tracing::{debug, info};
use crate::models::{Credentials, SignupRequest, Token};
use crate::services::ApiClient;
use crate::state::Screen;

/// Controller of the login screen
#[derive(Debug, Clone)]
pub struct LoginController {
    api: ApiClient,
    /// Which of the two forms is showing
    pub show_login_form: bool,
    pub signup_error: Option<String>,
    pub login_error: Option<String>,
    /// Token obtained by the last successful login or signup
    pub token: Option<Token>,
}

impl LoginController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            show_login_form: true,
            signup_error: None,
            login_error: None,
            token: None,
        }
    }

    /// Switch between the login and the signup form
    pub fn toggle_form(&mut self) {
        self.show_login_form = !self.show_login_form;
    }

    /// Create an account; goes to the hotel list on success
    pub async fn signup(&mut self, username: &str, realname: &str, password: &str) -> Option<Screen> {
        self.signup_error = None;

        if username.trim().is_empty() || realname.trim().is_empty() || password.is_empty() {
            self.signup_error = Some("Username, real name and password are required".to_string());
            return None;
        }

        let request = SignupRequest {
            username: username.trim().to_string(),
            realname: realname.trim().to_string(),
            password: password.to_string(),
        };

        match self.api.signup(&request).await {
            Ok(token) => {
                info!(username = %request.username, "Signed up");
                self.token = Some(token);
                Some(Screen::Home)
            }
            Err(e) => {
                debug!(error = %e, "Signup failed");
                self.signup_error = Some(e.display_message());
                None
            }
        }
    }

    /// Log in; goes to the hotel list on success
    pub async fn login(&mut self, username: &str, password: &str) -> Option<Screen> {
        self.login_error = None;

        if username.trim().is_empty() || password.is_empty() {
            self.login_error = Some("Username and password are required".to_string());
            return None;
        }

        let credentials = Credentials {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(token) => {
                info!(username = %credentials.username, "Logged in");
                self.token = Some(token);
                Some(Screen::Home)
            }
            Err(e) => {
                debug!(error = %e, "Login failed");
                self.login_error = Some(e.display_message());
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let error = if self.show_login_form {
            &self.login_error
        } else {
            &self.signup_error
        };
        let form = if self.show_login_form { "Log in" } else { "Sign up" };

        match error {
            Some(message) => format!("{} failed: {}", form, message),
            None if self.token.is_some() => "Logged in.".to_string(),
            None => format!("{} to continue.", form),
        }
    }
}
