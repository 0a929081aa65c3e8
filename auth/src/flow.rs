//! Sign-in / sign-up modal state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser auth modal keeps an `AuthFlow` in a signal; the CLI drives one
//! directly. Both follow the same three steps:
//!
//! ```text
//! EmailEntry --lookup{exists:true}--> Signin
//! EmailEntry --lookup{exists:false}-> Signup
//! Signin | Signup --change_email--> EmailEntry
//! any --reset (modal closed)------> EmailEntry, fields cleared
//! ```
//!
//! A submit is three phases so a reactive host never holds the flow borrowed
//! across an await: `submit()` validates locally and marks the request in
//! flight, [`dispatch`] performs the network call, `finish()` applies the
//! reply. [`AuthFlow::run`] chains them for hosts that own the flow.
//!
//! Success of signin/signup does not add a step: `finish()` yields an
//! [`Authenticated`] effect and the host logs the session in, then closes the
//! modal and navigates once [`SUCCESS_REDIRECT_DELAY`] has passed.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use std::time::Duration;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::notice::{self, Notice};
use crate::session::Session;
use crate::storage::TokenStore;
use crate::types::{AuthResponse, AuthStartResponse, NextStep, SigninRequest, SignupRequest, User};

/// Delay between the modal closing and the form reset, so the close
/// animation never shows the layout jumping back to the email step.
pub const CLOSE_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Delay between a successful signin/signup and closing the modal, so the
/// success notice is visible first.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Route of the authenticated landing view.
pub const AUTHENTICATED_ROUTE: &str = "/chat";

pub const MSG_EMAIL_REQUIRED: &str = "Please enter your email";
pub const MSG_PASSWORD_REQUIRED: &str = "Please enter your password";
pub const MSG_FIELDS_REQUIRED: &str = "Please fill in all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_SIGNED_IN: &str = "Successfully signed in!";
pub const MSG_SIGNED_UP: &str = "Account created successfully!";
pub const MSG_SOCIAL_ACCOUNT: &str = "This account uses Google sign-in.";
pub const MSG_SOCIAL_UNAVAILABLE: &str = "Google login coming soon!";
pub const MSG_RESET_SENT: &str = "If that email is registered, a reset link is on its way.";

const FALLBACK_LOOKUP: &str = "Something went wrong";
const FALLBACK_SIGNIN: &str = "Invalid credentials";
const FALLBACK_SIGNUP: &str = "Signup failed";
const FALLBACK_RESET: &str = "Could not send reset email";

/// Step of the auth modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStep {
    #[default]
    EmailEntry,
    Signin,
    Signup,
}

impl AuthStep {
    /// Modal heading for this step.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::EmailEntry => "Sign In or Join Now!",
            Self::Signin => "Welcome Back!",
            Self::Signup => "Create Your Account",
        }
    }

    /// Label of the primary submit button.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::EmailEntry => "Continue",
            Self::Signin => "Sign In",
            Self::Signup => "Create Account",
        }
    }
}

/// Raw form input as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    pub full_name: String,
    pub dob: String,
}

/// A validated request ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Lookup { email: String },
    Signin(SigninRequest),
    Signup(SignupRequest),
    ForgotPassword { email: String },
}

impl Submission {
    fn fallback(&self) -> &'static str {
        match self {
            Self::Lookup { .. } => FALLBACK_LOOKUP,
            Self::Signin(_) => FALLBACK_SIGNIN,
            Self::Signup(_) => FALLBACK_SIGNUP,
            Self::ForgotPassword { .. } => FALLBACK_RESET,
        }
    }
}

/// Server reply to a [`Submission`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Lookup(AuthStartResponse),
    Authenticated(AuthResponse),
    ResetRequested,
}

/// Outcome of a successful signin/signup, for the host to act on.
#[derive(Clone, Debug, PartialEq)]
pub struct Authenticated {
    pub token: String,
    pub user: User,
    /// Wait this long before closing the modal and navigating.
    pub close_after: Duration,
    /// Route to navigate to once closed.
    pub route: &'static str,
}

/// Validate the email step. Whitespace-only input counts as empty.
///
/// # Errors
///
/// Returns the notice text when the email is missing.
pub fn validate_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() { Err(MSG_EMAIL_REQUIRED) } else { Ok(email.to_owned()) }
}

/// Validate the signin step.
///
/// # Errors
///
/// Returns the notice text when the password is empty.
pub fn validate_signin(form: &AuthForm) -> Result<SigninRequest, &'static str> {
    if form.password.is_empty() {
        return Err(MSG_PASSWORD_REQUIRED);
    }
    Ok(SigninRequest { email: form.email.trim().to_owned(), password: form.password.clone() })
}

/// Validate the signup step: every field present, passwords equal.
///
/// Passwords are compared verbatim; the text fields are trimmed.
///
/// # Errors
///
/// Returns the notice text for the first failing guard.
pub fn validate_signup(form: &AuthForm) -> Result<SignupRequest, &'static str> {
    let username = form.username.trim();
    let full_name = form.full_name.trim();
    let dob = form.dob.trim();
    if form.password.is_empty()
        || form.confirm_password.is_empty()
        || username.is_empty()
        || full_name.is_empty()
        || dob.is_empty()
    {
        return Err(MSG_FIELDS_REQUIRED);
    }
    if form.password != form.confirm_password {
        return Err(MSG_PASSWORD_MISMATCH);
    }
    Ok(SignupRequest {
        email: form.email.trim().to_owned(),
        password: form.password.clone(),
        confirm_password: form.confirm_password.clone(),
        username: username.to_owned(),
        full_name: full_name.to_owned(),
        dob: dob.to_owned(),
    })
}

/// State of one auth modal instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthFlow {
    step: AuthStep,
    form: AuthForm,
    in_flight: Option<Submission>,
    notice: Option<Notice>,
}

impl AuthFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> AuthStep {
        self.step
    }

    #[must_use]
    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    /// Mutable access for input bindings.
    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    /// True while a request is in flight; the submit control is disabled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Auto-dismiss hook for the toast showing `shown`.
    pub fn dismiss_notice(&mut self, shown: &Notice) {
        notice::dismiss(&mut self.notice, shown);
    }

    /// Validate the current step and mark its request in flight.
    ///
    /// Returns `None` without side effects while another request is in
    /// flight, or with an error notice when a local guard fails.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_loading() {
            return None;
        }
        let validated = match self.step {
            AuthStep::EmailEntry => {
                validate_email(&self.form.email).map(|email| Submission::Lookup { email })
            }
            AuthStep::Signin => validate_signin(&self.form).map(Submission::Signin),
            AuthStep::Signup => validate_signup(&self.form).map(Submission::Signup),
        };
        self.begin(validated)
    }

    /// "Forgot password" from the signin step.
    pub fn request_password_reset(&mut self) -> Option<Submission> {
        if self.is_loading() {
            return None;
        }
        let validated = validate_email(&self.form.email).map(|email| Submission::ForgotPassword { email });
        self.begin(validated)
    }

    fn begin(&mut self, validated: Result<Submission, &'static str>) -> Option<Submission> {
        match validated {
            Ok(submission) => {
                self.in_flight = Some(submission.clone());
                Some(submission)
            }
            Err(message) => {
                self.notice = Some(Notice::error(message));
                None
            }
        }
    }

    /// Apply the reply to the in-flight request.
    ///
    /// Returns the [`Authenticated`] effect after a successful signin or
    /// signup, even when the flow was reset in the meantime. Errors surface
    /// as a notice and leave the step unchanged.
    pub fn finish(&mut self, result: Result<Reply, ApiError>) -> Option<Authenticated> {
        let Some(submission) = self.in_flight.take() else {
            // The modal was reset while the request was out. Credentials the
            // server accepted still establish the session, silently.
            if let Ok(Reply::Authenticated(auth)) = result {
                tracing::debug!("auth reply after reset; keeping the session");
                return Some(authenticated(auth));
            }
            tracing::debug!("auth reply without a pending request; ignoring");
            return None;
        };
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!(error = %e, "auth request rejected");
                self.notice = Some(Notice::error(e.notice_text(submission.fallback())));
                return None;
            }
        };
        match (submission, reply) {
            (Submission::Lookup { .. }, Reply::Lookup(start)) => {
                self.step = if start.exists { AuthStep::Signin } else { AuthStep::Signup };
                if start.next == Some(NextStep::SocialLogin) {
                    self.notice = Some(Notice::info(MSG_SOCIAL_ACCOUNT));
                }
                tracing::debug!(step = ?self.step, "email looked up");
                None
            }
            (Submission::Signin(_), Reply::Authenticated(auth)) => {
                self.notice = Some(Notice::success(MSG_SIGNED_IN));
                Some(authenticated(auth))
            }
            (Submission::Signup(_), Reply::Authenticated(auth)) => {
                self.notice = Some(Notice::success(MSG_SIGNED_UP));
                Some(authenticated(auth))
            }
            (Submission::ForgotPassword { .. }, Reply::ResetRequested) => {
                self.notice = Some(Notice::info(MSG_RESET_SENT));
                None
            }
            (submission, _) => {
                tracing::warn!("auth reply does not match request");
                self.notice = Some(Notice::error(submission.fallback()));
                None
            }
        }
    }

    /// Back to the email step, keeping the typed email.
    pub fn change_email(&mut self) {
        self.step = AuthStep::EmailEntry;
    }

    /// Social login is not offered yet.
    pub fn social_login_unavailable(&mut self) {
        self.notice = Some(Notice::info(MSG_SOCIAL_UNAVAILABLE));
    }

    /// Clear every field and return to the email step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Submit the current step end to end and log the session in on success.
    pub async fn run<A: AuthApi, S: TokenStore>(
        &mut self,
        api: &A,
        session: &mut Session<S>,
    ) -> Option<Authenticated> {
        let submission = self.submit()?;
        let result = dispatch(api, &submission).await;
        let done = self.finish(result)?;
        session.login(&done.token, done.user.clone());
        Some(done)
    }
}

fn authenticated(auth: AuthResponse) -> Authenticated {
    Authenticated {
        token: auth.access_token,
        user: auth.user,
        close_after: SUCCESS_REDIRECT_DELAY,
        route: AUTHENTICATED_ROUTE,
    }
}

/// Perform the network call for `submission`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn dispatch<A: AuthApi>(api: &A, submission: &Submission) -> Result<Reply, ApiError> {
    match submission {
        Submission::Lookup { email } => api.start(email).await.map(Reply::Lookup),
        Submission::Signin(request) => api.signin(request).await.map(Reply::Authenticated),
        Submission::Signup(request) => api.signup(request).await.map(Reply::Authenticated),
        Submission::ForgotPassword { email } => {
            api.forgot_password(email).await.map(|()| Reply::ResetRequested)
        }
    }
}
