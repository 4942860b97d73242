//! User and session token models

use std::fmt;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use crate::models::fields::de_i64;
use crate::utils::errors::Result;

/// Opaque session credential issued by the booking API
///
/// Sent verbatim as the `Authorization` header value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

/// Claims carried in the token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the payload of the token without checking its signature
    ///
    /// The signing key lives on the server; the client only needs the
    /// user id the server put there.
    pub fn claims(&self) -> Result<TokenClaims> {
        let header = jsonwebtoken::decode_header(&self.0)?;
        let mut validation = Validation::new(header.alg);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<TokenClaims>(&self.0, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    /// User id from the token payload, if it can be read
    pub fn user_id(&self) -> Option<i64> {
        self.claims().ok().map(|claims| claims.id)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "Token({}...)", prefix)
    }
}

/// `{"token": "..."}` as returned by login, signup and get_token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

/// Login form payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Signup form payload
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub realname: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// `{"user": id}` returned after a password change
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordResponse {
    #[serde(deserialize_with = "de_i64")]
    pub user: i64,
}
