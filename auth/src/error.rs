//! Errors returned by [`AuthApi`](crate::AuthApi) implementations.
//!
//! ERROR HANDLING
//! ==============
//! Every variant is recoverable: flows turn it into a transient notice and
//! stay on the current step, the session treats it as "keep prior state".

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::types::ErrorBody;

/// Failure of a single call to the remote API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// An authenticated call was attempted without a stored token.
    #[error("Not authenticated")]
    NotAuthenticated,
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    /// A success response whose body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a [`ApiError::Rejected`] from a status and raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message());
        Self::Rejected { status, detail }
    }

    /// Server-provided message, when the server sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Text for a transient notice: the server's message, else `fallback`.
    #[must_use]
    pub fn notice_text(&self, fallback: &str) -> String {
        match self {
            Self::NotAuthenticated => self.to_string(),
            _ => self.detail().unwrap_or(fallback).to_owned(),
        }
    }
}
