use super::*;
use crate::storage::MemoryTokenStore;
use crate::testing::{Call, MockApi, rejected};

fn filled_signup_form(email: &str) -> AuthForm {
    AuthForm {
        email: email.to_owned(),
        password: "hunter22".to_owned(),
        confirm_password: "hunter22".to_owned(),
        username: "newbie".to_owned(),
        full_name: "New Person".to_owned(),
        dob: "2001-02-03".to_owned(),
    }
}

fn flow_at(step: AuthStep, form: AuthForm) -> AuthFlow {
    let mut flow = AuthFlow::new();
    *flow.form_mut() = form;
    flow.step = step;
    flow
}

// =============================================================
// validation guards
// =============================================================

#[test]
fn validate_email_trims_and_requires_value() {
    assert_eq!(validate_email("  a@b.com "), Ok("a@b.com".to_owned()));
    assert_eq!(validate_email(""), Err(MSG_EMAIL_REQUIRED));
    assert_eq!(validate_email("   "), Err(MSG_EMAIL_REQUIRED));
}

#[test]
fn validate_signin_requires_password() {
    let form = AuthForm { email: "a@b.com".to_owned(), ..AuthForm::default() };
    assert_eq!(validate_signin(&form), Err(MSG_PASSWORD_REQUIRED));
}

#[test]
fn validate_signup_rejects_each_missing_field() {
    let blanks: [fn(&mut AuthForm); 5] = [
        |f| f.password.clear(),
        |f| f.confirm_password.clear(),
        |f| f.username.clear(),
        |f| f.full_name = "  ".to_owned(),
        |f| f.dob.clear(),
    ];
    for blank in blanks {
        let mut form = filled_signup_form("n@x.com");
        blank(&mut form);
        assert_eq!(validate_signup(&form), Err(MSG_FIELDS_REQUIRED));
    }
}

#[test]
fn validate_signup_rejects_mismatched_passwords() {
    let mut form = filled_signup_form("n@x.com");
    form.password = "a".to_owned();
    form.confirm_password = "b".to_owned();
    assert_eq!(validate_signup(&form), Err(MSG_PASSWORD_MISMATCH));
}

#[test]
fn validate_signup_missing_fields_reported_before_mismatch() {
    let mut form = filled_signup_form("n@x.com");
    form.confirm_password = "other".to_owned();
    form.username.clear();
    assert_eq!(validate_signup(&form), Err(MSG_FIELDS_REQUIRED));
}

#[tokio::test]
async fn guard_failures_never_reach_the_network() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());

    let mut email_flow = AuthFlow::new();
    assert_eq!(email_flow.run(&api, &mut session).await, None);
    assert_eq!(email_flow.notice(), Some(&Notice::error(MSG_EMAIL_REQUIRED)));

    let mut signin_flow =
        flow_at(AuthStep::Signin, AuthForm { email: "a@b.com".to_owned(), ..AuthForm::default() });
    assert_eq!(signin_flow.run(&api, &mut session).await, None);
    assert_eq!(signin_flow.notice(), Some(&Notice::error(MSG_PASSWORD_REQUIRED)));

    let mut signup_flow = flow_at(AuthStep::Signup, AuthForm { email: "a@b.com".to_owned(), ..AuthForm::default() });
    assert_eq!(signup_flow.run(&api, &mut session).await, None);
    assert_eq!(signup_flow.notice(), Some(&Notice::error(MSG_FIELDS_REQUIRED)));

    assert!(api.calls().is_empty());
    assert!(!signup_flow.is_loading());
}

#[tokio::test]
async fn mismatched_signup_never_calls_signup_endpoint() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());
    let mut form = filled_signup_form("n@x.com");
    form.password = "a".to_owned();
    form.confirm_password = "b".to_owned();
    let mut flow = flow_at(AuthStep::Signup, form);

    assert_eq!(flow.run(&api, &mut session).await, None);
    assert_eq!(flow.notice(), Some(&Notice::error(MSG_PASSWORD_MISMATCH)));
    assert!(api.calls().is_empty());
    assert_eq!(flow.step(), AuthStep::Signup);
}

// =============================================================
// step transitions
// =============================================================

#[tokio::test]
async fn lookup_existing_email_moves_to_signin() {
    let api = MockApi {
        start: Ok(AuthStartResponse { exists: true, next: Some(NextStep::Password) }),
        ..MockApi::default()
    };
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "old@x.com".to_owned();

    assert_eq!(flow.run(&api, &mut session).await, None);
    assert_eq!(flow.step(), AuthStep::Signin);
    assert_eq!(flow.notice(), None);
    assert_eq!(api.calls(), vec![Call::Start("old@x.com".to_owned())]);
}

#[tokio::test]
async fn lookup_new_email_moves_to_signup() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "new@x.com".to_owned();

    flow.run(&api, &mut session).await;
    assert_eq!(flow.step(), AuthStep::Signup);
}

#[test]
fn lookup_social_account_moves_to_signin_with_notice() {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "g@x.com".to_owned();
    let _ = flow.submit();
    let done = flow.finish(Ok(Reply::Lookup(AuthStartResponse {
        exists: true,
        next: Some(NextStep::SocialLogin),
    })));
    assert_eq!(done, None);
    assert_eq!(flow.step(), AuthStep::Signin);
    assert_eq!(flow.notice(), Some(&Notice::info(MSG_SOCIAL_ACCOUNT)));
}

#[test]
fn lookup_failure_stays_on_email_step_with_fallback() {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "a@b.com".to_owned();
    let _ = flow.submit();
    flow.finish(Err(ApiError::Transport("offline".to_owned())));
    assert_eq!(flow.step(), AuthStep::EmailEntry);
    assert!(!flow.is_loading());
    assert_eq!(flow.notice(), Some(&Notice::error("Something went wrong")));
}

#[test]
fn change_email_returns_to_email_step_and_keeps_email() {
    let mut flow = flow_at(AuthStep::Signup, filled_signup_form("n@x.com"));
    flow.change_email();
    assert_eq!(flow.step(), AuthStep::EmailEntry);
    assert_eq!(flow.form().email, "n@x.com");
}

#[test]
fn reset_clears_fields_and_returns_to_email_step() {
    let mut flow = flow_at(AuthStep::Signup, filled_signup_form("n@x.com"));
    flow.social_login_unavailable();
    flow.reset();
    assert_eq!(flow, AuthFlow::new());
}

#[test]
fn step_titles_and_labels() {
    assert_eq!(AuthStep::EmailEntry.title(), "Sign In or Join Now!");
    assert_eq!(AuthStep::Signin.title(), "Welcome Back!");
    assert_eq!(AuthStep::Signup.submit_label(), "Create Account");
}

// =============================================================
// in-flight guard
// =============================================================

#[test]
fn submit_while_loading_is_noop() {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "a@b.com".to_owned();
    assert!(flow.submit().is_some());
    assert!(flow.is_loading());
    assert_eq!(flow.submit(), None);
    assert_eq!(flow.request_password_reset(), None);
    assert_eq!(flow.notice(), None);
}

#[test]
fn finish_without_pending_request_is_ignored() {
    let mut flow = AuthFlow::new();
    assert_eq!(flow.finish(Ok(Reply::ResetRequested)), None);
    assert_eq!(flow.notice(), None);
}

#[tokio::test]
async fn signin_reply_after_reset_still_logs_session_in() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = flow_at(
        AuthStep::Signin,
        AuthForm { email: "ada@example.com".to_owned(), password: "pw".to_owned(), ..AuthForm::default() },
    );

    let submission = flow.submit().expect("signin submitted");
    flow.reset();
    let result = dispatch(&api, &submission).await;
    let done = flow.finish(result).expect("accepted credentials are kept");
    session.login(&done.token, done.user);

    assert_eq!(api.calls().len(), 1);
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(flow.step(), AuthStep::EmailEntry);
    assert_eq!(flow.notice(), None);
}

#[tokio::test]
async fn lookup_reply_after_reset_leaves_flow_untouched() {
    let api = MockApi { start: Ok(AuthStartResponse { exists: true, next: None }), ..MockApi::default() };
    let mut flow = AuthFlow::new();
    flow.form_mut().email = "ada@example.com".to_owned();

    let submission = flow.submit().expect("lookup submitted");
    flow.reset();
    let result = dispatch(&api, &submission).await;
    assert_eq!(flow.finish(result), None);
    assert_eq!(flow.step(), AuthStep::EmailEntry);
}

// =============================================================
// signin / signup success and failure
// =============================================================

#[tokio::test]
async fn signin_success_logs_session_in_with_returned_token() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = flow_at(
        AuthStep::Signin,
        AuthForm { email: "ada@example.com".to_owned(), password: "pw".to_owned(), ..AuthForm::default() },
    );

    let done = flow.run(&api, &mut session).await.expect("authenticated");
    assert_eq!(done.token, "tok-1");
    assert_eq!(done.close_after, SUCCESS_REDIRECT_DELAY);
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(flow.notice(), Some(&Notice::success(MSG_SIGNED_IN)));
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn signin_rejection_shows_server_detail_and_stays() {
    let api = MockApi { auth: Err(rejected(401, "Invalid credentials")), ..MockApi::default() };
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = flow_at(
        AuthStep::Signin,
        AuthForm { email: "ada@example.com".to_owned(), password: "wrong".to_owned(), ..AuthForm::default() },
    );

    assert_eq!(flow.run(&api, &mut session).await, None);
    assert_eq!(flow.step(), AuthStep::Signin);
    assert_eq!(flow.notice(), Some(&Notice::error("Invalid credentials")));
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn signup_rejection_without_detail_uses_fallback() {
    let api = MockApi { auth: Err(ApiError::Rejected { status: 500, detail: None }), ..MockApi::default() };
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = flow_at(AuthStep::Signup, filled_signup_form("n@x.com"));

    assert_eq!(flow.run(&api, &mut session).await, None);
    assert_eq!(flow.notice(), Some(&Notice::error("Signup failed")));
    assert_eq!(flow.step(), AuthStep::Signup);
}

#[tokio::test]
async fn new_email_scenario_signs_up_once_and_schedules_redirect() {
    let api = MockApi::default();
    let mut session = Session::new(MemoryTokenStore::default());
    let mut flow = AuthFlow::new();

    flow.form_mut().email = "new@x.com".to_owned();
    flow.run(&api, &mut session).await;
    assert_eq!(flow.step(), AuthStep::Signup);

    let email = flow.form().email.clone();
    *flow.form_mut() = filled_signup_form(&email);
    let done = flow.run(&api, &mut session).await.expect("authenticated");

    let signups: Vec<_> = api.calls().into_iter().filter(|c| matches!(c, Call::Signup(_))).collect();
    assert_eq!(signups.len(), 1);
    let Call::Signup(request) = &signups[0] else { unreachable!() };
    assert_eq!(request.email, "new@x.com");
    assert_eq!(request.confirm_password, "hunter22");

    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(done.close_after, SUCCESS_REDIRECT_DELAY);
    assert_eq!(done.route, AUTHENTICATED_ROUTE);
    assert_eq!(flow.notice(), Some(&Notice::success(MSG_SIGNED_UP)));
}

// =============================================================
// supplementary actions
// =============================================================

#[tokio::test]
async fn password_reset_posts_email_and_confirms() {
    let api = MockApi::default();
    let mut flow = flow_at(
        AuthStep::Signin,
        AuthForm { email: " ada@example.com ".to_owned(), ..AuthForm::default() },
    );
    let submission = flow.request_password_reset().expect("valid");
    let result = dispatch(&api, &submission).await;
    assert_eq!(flow.finish(result), None);
    assert_eq!(flow.notice(), Some(&Notice::info(MSG_RESET_SENT)));
    assert_eq!(api.calls(), vec![Call::ForgotPassword("ada@example.com".to_owned())]);
    assert_eq!(flow.step(), AuthStep::Signin);
}

#[test]
fn dismiss_notice_only_clears_the_shown_notice() {
    let mut flow = AuthFlow::new();
    flow.social_login_unavailable();
    let shown = flow.notice().cloned().expect("notice");
    let _ = flow.submit();
    flow.dismiss_notice(&shown);
    assert_eq!(flow.notice(), Some(&Notice::error(MSG_EMAIL_REQUIRED)));
}
