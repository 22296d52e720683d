//! Async client for the Streakboard REST API.
//!
//! All routes live under `/api` on the configured backend. Authenticated
//! routes send the stored token as `Authorization: Bearer <token>`. Non-2xx
//! responses are turned into [`ApiError::Status`] carrying the backend's
//! `detail` message.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use super::models::{
    AvatarResponse, LoginRequest, MessageResponse, SignupForm, TokenResponse,
    UpdateProfileRequest, UpdateRelapseRequest, User,
};
use crate::avatar::{content_type_for, validate_avatar_upload};
use crate::clock::TimeSource;
use crate::error::{ApiError, ValidationError};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Create an account. The backend sends a verification email.
    pub async fn signup(&self, form: &SignupForm) -> Result<MessageResponse, ApiError> {
        form.validate()?;
        let req = self
            .http
            .post(self.endpoint("auth/signup")?)
            .json(&form.request());
        self.send(req).await
    }

    /// Log in and remember the returned token on this client.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let req = self
            .http
            .post(self.endpoint("auth/login")?)
            .json(&LoginRequest { username, password });
        let resp: TokenResponse = self.send(req).await?;
        tracing::info!(username = %resp.user.username, "logged in");
        self.token = Some(resp.access_token.clone());
        Ok(resp)
    }

    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        let req = self
            .http
            .post(self.endpoint("auth/verify-email")?)
            .json(&json!({ "token": token }));
        self.send(req).await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let req = self
            .http
            .post(self.endpoint("auth/resend-verification")?)
            .json(&json!({ "email": email }));
        self.send(req).await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn me(&self) -> Result<User, ApiError> {
        let req = self.authed(self.http.get(self.endpoint("users/me")?))?;
        self.send(req).await
    }

    /// Public profile of a verified user, including their rank.
    pub async fn user_profile(&self, username: &str) -> Result<User, ApiError> {
        let path = format!("users/{}", urlencoding::encode(username));
        let req = self.http.get(self.endpoint(&path)?);
        self.send(req).await
    }

    pub async fn leaderboard(&self) -> Result<Leaderboard, ApiError> {
        let req = self.http.get(self.endpoint("leaderboard")?);
        let rows: Vec<LeaderboardEntry> = self.send(req).await?;
        tracing::debug!(rows = rows.len(), "fetched leaderboard");
        Ok(Leaderboard::from_entries(rows))
    }

    /// Set or clear (`None`) the sharing code.
    pub async fn update_sharing_code(&self, code: Option<&str>) -> Result<MessageResponse, ApiError> {
        let body = UpdateProfileRequest {
            sharing_code: code.map(str::trim).filter(|c| !c.is_empty()),
            remove_avatar: false,
        };
        let req = self.authed(self.http.put(self.endpoint("users/profile")?).json(&body))?;
        self.send(req).await
    }

    /// Drop the uploaded avatar, keeping the current sharing code.
    pub async fn remove_avatar(&self, sharing_code: Option<&str>) -> Result<MessageResponse, ApiError> {
        let body = UpdateProfileRequest {
            sharing_code,
            remove_avatar: true,
        };
        let req = self.authed(self.http.put(self.endpoint("users/profile")?).json(&body))?;
        self.send(req).await
    }

    /// Move the streak start. Future instants are rejected before sending.
    ///
    /// Returns the UTC timestamp that was stored, ready to feed a tracker.
    pub async fn update_relapse(
        &self,
        at: DateTime<Utc>,
        clock: &dyn TimeSource,
    ) -> Result<String, ApiError> {
        if at > clock.now() {
            return Err(ValidationError::FutureInstant(at).into());
        }
        let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let body = UpdateRelapseRequest {
            last_relapse_datetime: stamp.clone(),
        };
        let req = self.authed(self.http.put(self.endpoint("users/relapse")?).json(&body))?;
        let _: MessageResponse = self.send(req).await?;
        tracing::info!(%stamp, "streak start updated");
        Ok(stamp)
    }

    /// Restart the streak from now.
    pub async fn reset_streak(&self, clock: &dyn TimeSource) -> Result<String, ApiError> {
        self.update_relapse(clock.now(), clock).await
    }

    /// Upload a JPG/PNG avatar (at most 10 MiB).
    pub async fn upload_avatar(&self, path: &Path) -> Result<AvatarResponse, ApiError> {
        let content_type = content_type_for(path).unwrap_or("application/octet-stream");
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        validate_avatar_upload(path, content_type, bytes.len() as u64)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("avatar")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let req = self.authed(
            self.http
                .post(self.endpoint("users/upload-avatar")?)
                .multipart(form),
        )?;
        self.send(req).await
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut base = self.base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join("api/")?.join(path)?)
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        Ok(req.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let resp = error_for_status(resp).await?;
        Ok(resp.json::<T>().await?)
    }
}

async fn error_for_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    tracing::debug!(status = status.as_u16(), %detail, "API request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}
