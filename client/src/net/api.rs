//! REST API client for the remote auth/profile service.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: every call fails with a transport error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics so auth/profile
//! failures become notices (or silent session degrades) without crashing
//! the render path.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use auth::api::ApiConfig;
#[cfg(feature = "csr")]
use auth::api::{
    AVATAR_FIELD, AVATAR_PATH, FORGOT_PASSWORD_PATH, PROFILE_PATH, SIGNIN_PATH, SIGNUP_PATH, START_PATH,
    bearer, decode_json, expect_success,
};
#[cfg(feature = "csr")]
use auth::types::StartRequest;
use auth::types::{AuthResponse, AuthStartResponse, AvatarUpload, ProfileUpdate, SigninRequest, SignupRequest, User};
use auth::{ApiError, AuthApi};
#[cfg(feature = "csr")]
use gloo_net::http::{Request, Response};

#[cfg(any(test, not(feature = "csr")))]
const NOT_IN_BROWSER: &str = "not available outside the browser";

/// Resolve the API origin from the compile-time `STUDIO_API_URL` value.
fn config_from(build_value: Option<&str>) -> ApiConfig {
    build_value.map_or_else(ApiConfig::default, ApiConfig::new)
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Transport(NOT_IN_BROWSER.to_owned())
}

#[cfg(feature = "csr")]
fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Read status and body text of a response.
#[cfg(feature = "csr")]
async fn read(response: Response) -> Result<(u16, bool, String), ApiError> {
    let status = response.status();
    let ok = response.ok();
    let body = response.text().await.map_err(transport)?;
    Ok((status, ok, body))
}

/// `gloo-net` implementation of [`AuthApi`], provided via context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpAuthApi {
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Client pointed at `STUDIO_API_URL` as set at build time, else the default origin.
    pub fn from_build_env() -> Self {
        Self::new(config_from(option_env!("STUDIO_API_URL")))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl AuthApi for HttpAuthApi {
    async fn start(&self, email: &str) -> Result<AuthStartResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = StartRequest { email: email.to_owned() };
            let response = Request::post(&self.config.endpoint(START_PATH))
                .json(&payload)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            decode_json(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = email;
            Err(unavailable())
        }
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let response = Request::post(&self.config.endpoint(SIGNUP_PATH))
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            decode_json(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(unavailable())
        }
    }

    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let response = Request::post(&self.config.endpoint(SIGNIN_PATH))
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            decode_json(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(unavailable())
        }
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = StartRequest { email: email.to_owned() };
            let response = Request::post(&self.config.endpoint(FORGOT_PASSWORD_PATH))
                .json(&payload)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            expect_success(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = email;
            Err(unavailable())
        }
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            let response = Request::get(&self.config.endpoint(PROFILE_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            decode_json(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(unavailable())
        }
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            let response = Request::patch(&self.config.endpoint(PROFILE_PATH))
                .header("Authorization", &bearer(token))
                .json(update)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            decode_json(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, update);
            Err(unavailable())
        }
    }

    async fn upload_avatar(&self, token: &str, avatar: &AvatarUpload) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let form = avatar_form(avatar)?;
            let response = Request::post(&self.config.endpoint(AVATAR_PATH))
                .header("Authorization", &bearer(token))
                .body(form)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            expect_success(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, avatar);
            Err(unavailable())
        }
    }

    async fn delete_account(&self, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let response = Request::delete(&self.config.endpoint(PROFILE_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(transport)?;
            let (status, ok, body) = read(response).await?;
            expect_success(status, ok, &body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(unavailable())
        }
    }
}

/// Multipart body with the avatar under [`AVATAR_FIELD`].
#[cfg(feature = "csr")]
fn avatar_form(avatar: &AvatarUpload) -> Result<web_sys::FormData, ApiError> {
    let js_error = |e: wasm_bindgen::JsValue| ApiError::Transport(format!("{e:?}"));
    let bytes = js_sys::Uint8Array::from(avatar.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&avatar.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(AVATAR_FIELD, &blob, &avatar.file_name)
        .map_err(js_error)?;
    Ok(form)
}
