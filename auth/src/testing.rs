//! Recording `AuthApi` double shared by the unit tests.

use std::cell::RefCell;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::types::{
    AuthResponse, AuthStartResponse, AvatarUpload, ProfileUpdate, SigninRequest, SignupRequest, User,
};

/// One call observed by [`MockApi`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Start(String),
    Signup(SignupRequest),
    Signin(SigninRequest),
    ForgotPassword(String),
    FetchProfile(String),
    UpdateProfile(String, ProfileUpdate),
    UploadAvatar(String, usize),
    DeleteAccount(String),
}

/// Canned responses plus a log of every call.
pub struct MockApi {
    pub start: Result<AuthStartResponse, ApiError>,
    pub auth: Result<AuthResponse, ApiError>,
    pub profile: Result<User, ApiError>,
    pub write: Result<(), ApiError>,
    pub calls: RefCell<Vec<Call>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            start: Ok(AuthStartResponse { exists: false, next: None }),
            auth: Ok(AuthResponse {
                access_token: "tok-1".to_owned(),
                token_type: "bearer".to_owned(),
                user: user("u-1", "ada"),
            }),
            profile: Ok(user("u-1", "ada")),
            write: Ok(()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_owned(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        full_name: Some(format!("{username} full")),
        dob: Some("2000-01-01".to_owned()),
        profile_photo_url: None,
        plan: "free".to_owned(),
        credits: 100,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
    }
}

pub fn rejected(status: u16, detail: &str) -> ApiError {
    ApiError::Rejected { status, detail: Some(detail.to_owned()) }
}

impl AuthApi for MockApi {
    async fn start(&self, email: &str) -> Result<AuthStartResponse, ApiError> {
        self.record(Call::Start(email.to_owned()));
        self.start.clone()
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.record(Call::Signup(request.clone()));
        self.auth.clone()
    }

    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        self.record(Call::Signin(request.clone()));
        self.auth.clone()
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.record(Call::ForgotPassword(email.to_owned()));
        self.write.clone()
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        self.record(Call::FetchProfile(token.to_owned()));
        self.profile.clone()
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.record(Call::UpdateProfile(token.to_owned(), update.clone()));
        self.write.clone()?;
        self.profile.clone()
    }

    async fn upload_avatar(&self, token: &str, avatar: &AvatarUpload) -> Result<(), ApiError> {
        self.record(Call::UploadAvatar(token.to_owned(), avatar.bytes.len()));
        self.write.clone()
    }

    async fn delete_account(&self, token: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteAccount(token.to_owned()));
        self.write.clone()
    }
}
