//! Session context management
//!
//! This module tracks who is logged in against which server, so a token
//! obtained by one CLI invocation can be reused by the next.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::models::Token;

/// Client-side session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// API base URL the token was issued by
    pub base_url: String,
    pub token: Option<Token>,
    pub username: Option<String>,
    /// Server session cookies, as a `Cookie` header value
    #[serde(default)]
    pub cookies: Option<String>,
    /// When this context was last updated
    pub saved_at: DateTime<Utc>,
}

impl SessionContext {
    /// Create an anonymous context for a server
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            username: None,
            cookies: None,
            saved_at: Utc::now(),
        }
    }

    /// Record a successful login or signup
    pub fn authenticate(&mut self, token: Token, username: Option<String>) {
        self.token = Some(token);
        self.username = username;
        self.saved_at = Utc::now();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Id of the logged-in user, read from the token payload
    pub fn user_id(&self) -> Option<i64> {
        self.token.as_ref().and_then(Token::user_id)
    }

    /// Whether the context belongs to the given server
    pub fn matches_server(&self, base_url: &str) -> bool {
        self.base_url.trim_end_matches('/') == base_url.trim_end_matches('/')
    }

    /// Forget the user
    pub fn clear(&mut self) {
        self.token = None;
        self.username = None;
        self.cookies = None;
        self.saved_at = Utc::now();
    }
}
