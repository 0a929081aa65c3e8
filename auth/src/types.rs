//! REST wire DTOs for the auth and profile endpoints.
//!
//! DESIGN
//! ======
//! Field names follow the server's snake_case JSON. Response types tolerate
//! extra fields (the signin route returns the whole user row) and loosely
//! typed numbers so a schema drift on the server degrades instead of failing
//! the login.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// An account as returned by `/profile/` and embedded in auth responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Login email address.
    pub email: String,
    /// Public handle.
    pub username: String,
    /// Display name, if set.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Date of birth as an ISO 8601 date string, if known.
    #[serde(default)]
    pub dob: Option<String>,
    /// Avatar image URL, if uploaded.
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    /// Subscription tier (e.g. `"free"`).
    #[serde(default = "default_plan")]
    pub plan: String,
    /// Remaining credit balance.
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub credits: i64,
    /// Account creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

fn default_plan() -> String {
    "free".to_owned()
}

impl User {
    /// Name to show in chrome: full name when present, else the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// What the server expects the client to do after probing an email.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// Known account with a password.
    Password,
    /// Known account created through a social provider.
    SocialLogin,
    /// Unknown email; a new account is needed.
    CreateAccount,
}

/// Body of `POST /auth/start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub email: String,
}

/// Response of `POST /auth/start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStartResponse {
    /// Whether an account with this email already exists.
    pub exists: bool,
    /// Server hint for the next step, when provided.
    #[serde(default)]
    pub next: Option<NextStep>,
}

/// Body of `POST /auth/signin`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    pub full_name: String,
    pub dob: String,
}

/// Token and account returned by a successful signin or signup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Body of the profile update call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub username: String,
}

/// A local image file staged for upload as the account avatar.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Original file name, sent as the multipart filename.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Error body produced by the API: `{"detail": ...}`.
///
/// `detail` is a plain string for handled errors and a list of
/// `{loc, msg, type}` objects for request validation failures.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable message extracted from `detail`, if any.
    pub(crate) fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                if messages.is_empty() { None } else { Some(messages.join("; ")) }
            }
            _ => None,
        }
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
