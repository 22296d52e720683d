//! REST client for the Streakboard backend.

mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{AvatarResponse, MessageResponse, SignupForm, TokenResponse, User};
