//! `reqwest` implementation of the remote API.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::path::Path;

use auth::api::{
    AVATAR_FIELD, AVATAR_PATH, ApiConfig, FORGOT_PASSWORD_PATH, PROFILE_PATH, SIGNIN_PATH, SIGNUP_PATH, START_PATH,
    bearer, decode_json, expect_success,
};
use auth::profile::AVATAR_CONTENT_TYPES;
use auth::types::{
    AuthResponse, AuthStartResponse, AvatarUpload, ProfileUpdate, SigninRequest, SignupRequest, StartRequest, User,
};
use auth::{ApiError, AuthApi};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Status, success flag and body text of a response.
async fn read(response: reqwest::Response) -> Result<(u16, bool, String), ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    Ok((status.as_u16(), status.is_success(), body))
}

/// MIME type for an avatar file, from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => AVATAR_CONTENT_TYPES[0],
        "jpg" | "jpeg" => AVATAR_CONTENT_TYPES[1],
        "gif" => AVATAR_CONTENT_TYPES[2],
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestAuthApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(self.config.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        decode_json(status, ok, &body)
    }
}

impl AuthApi for ReqwestAuthApi {
    async fn start(&self, email: &str) -> Result<AuthStartResponse, ApiError> {
        self.post_json(START_PATH, &StartRequest { email: email.to_owned() }).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.post_json(SIGNUP_PATH, request).await
    }

    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        self.post_json(SIGNIN_PATH, request).await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.config.endpoint(FORGOT_PASSWORD_PATH))
            .json(&StartRequest { email: email.to_owned() })
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        expect_success(status, ok, &body)
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(PROFILE_PATH))
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        decode_json(status, ok, &body)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        let response = self
            .client
            .patch(self.config.endpoint(PROFILE_PATH))
            .header(AUTHORIZATION, bearer(token))
            .json(update)
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        decode_json(status, ok, &body)
    }

    async fn upload_avatar(&self, token: &str, avatar: &AvatarUpload) -> Result<(), ApiError> {
        let part = Part::bytes(avatar.bytes.clone())
            .file_name(avatar.file_name.clone())
            .mime_str(&avatar.content_type)
            .map_err(transport)?;
        let response = self
            .client
            .post(self.config.endpoint(AVATAR_PATH))
            .header(AUTHORIZATION, bearer(token))
            .multipart(Form::new().part(AVATAR_FIELD, part))
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        expect_success(status, ok, &body)
    }

    async fn delete_account(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.config.endpoint(PROFILE_PATH))
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(transport)?;
        let (status, ok, body) = read(response).await?;
        expect_success(status, ok, &body)
    }
}
