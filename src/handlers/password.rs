//! Password change modal

use tracing::{info, warn};
use crate::services::ApiClient;
use super::ensure_token;

/// Visibility of the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    /// Closed through the cancel button
    Dismissed,
}

/// Controller of the password change dialog
#[derive(Debug, Clone)]
pub struct ChangePasswordModal {
    api: ApiClient,
    pub state: ModalState,
    pub submitted: bool,
    pub password_changed: bool,
    pub error: Option<String>,
}

impl ChangePasswordModal {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ModalState::Closed,
            submitted: false,
            password_changed: false,
            error: None,
        }
    }

    pub fn open(&mut self) {
        self.state = ModalState::Open;
        self.submitted = false;
        self.password_changed = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    /// Confirm the dialog
    ///
    /// `is_valid` is the state of the dialog's form; nothing is sent
    /// when it is false or the password is empty.
    pub async fn ok(&mut self, is_valid: bool, password: &str) -> bool {
        self.submitted = true;
        self.error = None;

        if !is_valid || password.is_empty() {
            return false;
        }

        if let Err(e) = ensure_token(&self.api).await {
            self.error = Some(e.display_message());
            return false;
        }

        match self.api.change_password(password).await {
            Ok(user_id) => {
                info!(user_id = user_id, "Password changed");
                self.password_changed = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "Password change failed");
                self.error = Some(e.display_message());
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = ModalState::Dismissed;
    }

    pub fn render(&self) -> String {
        if self.password_changed {
            "Password changed.".to_string()
        } else if let Some(error) = &self.error {
            format!("Could not change password: {}", error)
        } else if self.submitted {
            "Password is required.".to_string()
        } else {
            "Enter a new password.".to_string()
        }
    }
}
