//! Request and response bodies for the Streakboard REST API.

use serde::{Deserialize, Serialize};

use crate::badge::Badge;
use crate::error::ValidationError;
use crate::streak::ReferenceInstant;

pub const MIN_PASSWORD_LEN: usize = 6;

/// A user as returned by `/users/me`, `/users/{username}` and login.
///
/// Public profiles come back with an empty `email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub sharing_code: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub last_relapse_datetime: ReferenceInstant,
    pub created_at: String,
    #[serde(default)]
    pub streak_seconds: i64,
    #[serde(default)]
    pub badge: Badge,
    #[serde(default)]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".into()
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub sharing_code: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateProfileRequest<'a> {
    pub sharing_code: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub remove_avatar: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateRelapseRequest {
    pub last_relapse_datetime: String,
}

/// Signup form as the user fills it in, confirmation included.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub sharing_code: Option<String>,
}

impl SignupForm {
    /// Checks done before the form is submitted.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: empty username/email, a password
    /// shorter than [`MIN_PASSWORD_LEN`], or a mismatched confirmation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    pub(crate) fn request(&self) -> SignupRequest<'_> {
        SignupRequest {
            username: self.username.trim(),
            email: self.email.trim(),
            password: &self.password,
            sharing_code: self
                .sharing_code
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        }
    }
}
