//! Transport seam for the remote auth/profile API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client implements [`AuthApi`] with `gloo-net`, the CLI with
//! `reqwest`, and tests with a recording mock. Endpoint paths and response
//! decoding live here so every transport speaks the same contract.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{
    AuthResponse, AuthStartResponse, AvatarUpload, ProfileUpdate, SigninRequest, SignupRequest, User,
};

/// API origin used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// Version prefix prepended to every endpoint path.
pub const API_PREFIX: &str = "/api/v1";

pub const START_PATH: &str = "/auth/start";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const SIGNIN_PATH: &str = "/auth/signin";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const PROFILE_PATH: &str = "/profile/";
pub const AVATAR_PATH: &str = "/profile/avatar";

/// Multipart field name carrying the avatar file.
pub const AVATAR_FIELD: &str = "file";

/// Where the remote API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Configure an API origin such as `https://api.example.com`.
    ///
    /// Trailing slashes are dropped; a blank value selects the default origin.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Configured origin without the version prefix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as [`PROFILE_PATH`].
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }
}

/// Value for the `Authorization` header on authenticated routes.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Decode a JSON response body, mapping non-success statuses to
/// [`ApiError::Rejected`].
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] when `ok` is false and
/// [`ApiError::Decode`] when the body does not match `T`.
pub fn decode_json<T: DeserializeOwned>(status: u16, ok: bool, body: &str) -> Result<T, ApiError> {
    if !ok {
        return Err(ApiError::from_response(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Accept any success response, mapping failures to [`ApiError::Rejected`].
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] when `ok` is false.
pub fn expect_success(status: u16, ok: bool, body: &str) -> Result<(), ApiError> {
    if ok { Ok(()) } else { Err(ApiError::from_response(status, body)) }
}

/// Calls the client makes against the remote API.
///
/// Implementations run on a single cooperative thread (a browser task or a
/// sequential tokio task), so the returned futures carry no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /auth/start`: is this email already registered?
    async fn start(&self, email: &str) -> Result<AuthStartResponse, ApiError>;

    /// `POST /auth/signup`.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/signin`.
    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/forgot-password`.
    async fn forgot_password(&self, email: &str) -> Result<(), ApiError>;

    /// `GET /profile/` with the bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError>;

    /// `PATCH /profile/` with the bearer token.
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError>;

    /// `POST /profile/avatar` as multipart with the bearer token.
    async fn upload_avatar(&self, token: &str, avatar: &AvatarUpload) -> Result<(), ApiError>;

    /// `DELETE /profile/` with the bearer token.
    async fn delete_account(&self, token: &str) -> Result<(), ApiError>;
}
