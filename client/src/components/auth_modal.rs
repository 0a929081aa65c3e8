//! Email-first sign-in / sign-up modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The modal drives an `auth::AuthFlow`: the email step looks the address up on the backend,
//! then the flow branches into signin or signup. On success the session signal
//! is logged in and, after a short pause, the modal closes and routes to the
//! authenticated page.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use auth::flow::{AuthFlow, AuthForm, AuthStep, CLOSE_SETTLE_DELAY, Submission};
use auth::notice::Notice;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toast::Toast;
use crate::net::api::HttpAuthApi;
use crate::state::auth::AuthState;
use crate::util::timer::after;

/// Editable inputs of the auth form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    Email,
    Password,
    ConfirmPassword,
    Username,
    FullName,
    Dob,
}

impl Field {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::Username => "Username",
            Self::FullName => "Full Name",
            Self::Dob => "Date of Birth",
        }
    }

    pub(crate) fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password | Self::ConfirmPassword => "password",
            Self::Username | Self::FullName => "text",
            Self::Dob => "date",
        }
    }

    pub(crate) fn autocomplete(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "current-password",
            Self::ConfirmPassword => "new-password",
            Self::Username => "username",
            Self::FullName => "name",
            Self::Dob => "bday",
        }
    }

    pub(crate) fn value(self, form: &AuthForm) -> &str {
        match self {
            Self::Email => &form.email,
            Self::Password => &form.password,
            Self::ConfirmPassword => &form.confirm_password,
            Self::Username => &form.username,
            Self::FullName => &form.full_name,
            Self::Dob => &form.dob,
        }
    }

    pub(crate) fn slot(self, form: &mut AuthForm) -> &mut String {
        match self {
            Self::Email => &mut form.email,
            Self::Password => &mut form.password,
            Self::ConfirmPassword => &mut form.confirm_password,
            Self::Username => &mut form.username,
            Self::FullName => &mut form.full_name,
            Self::Dob => &mut form.dob,
        }
    }
}

/// Inputs rendered for each step, in display order.
pub(crate) fn step_fields(step: AuthStep) -> &'static [Field] {
    match step {
        AuthStep::EmailEntry => &[Field::Email],
        AuthStep::Signin => &[Field::Password],
        AuthStep::Signup => &[
            Field::Username,
            Field::FullName,
            Field::Dob,
            Field::Password,
            Field::ConfirmPassword,
        ],
    }
}

/// Auth modal; `open` is owned by the page that shows it.
#[component]
pub fn AuthModal(open: RwSignal<bool>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let api = expect_context::<HttpAuthApi>();
    let navigate = use_navigate();

    let flow = RwSignal::new(AuthFlow::new());
    let redirect = RwSignal::new(None::<&'static str>);
    let step = Memo::new(move |_| flow.with(AuthFlow::step));
    let loading = Memo::new(move |_| flow.with(AuthFlow::is_loading));

    Effect::new(move || {
        if let Some(route) = redirect.get() {
            redirect.set(None);
            navigate(route, NavigateOptions::default());
        }
    });

    // Clear the form once the close animation settles, unless reopened.
    Effect::new(move |was_open: Option<bool>| {
        let is_open = open.get();
        if was_open == Some(true) && !is_open {
            after(CLOSE_SETTLE_DELAY, move || {
                if open.try_get_untracked() == Some(false) {
                    flow.try_update(AuthFlow::reset);
                }
            });
        }
        is_open
    });

    let api_submit = api.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(submission) = flow.try_update(AuthFlow::submit).flatten() {
            send(submission, flow, auth, &api_submit, open, redirect);
        }
    };

    let on_forgot = Callback::new(move |_: leptos::ev::MouseEvent| {
        if let Some(submission) = flow.try_update(AuthFlow::request_password_reset).flatten() {
            send(submission, flow, auth, &api, open, redirect);
        }
    });

    let notice = Signal::derive(move || flow.with(|f| f.notice().cloned()));
    let on_dismiss = Callback::new(move |shown: Notice| flow.update(|f| f.dismiss_notice(&shown)));

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)>
                <div class="dialog dialog--auth" on:click=move |ev| ev.stop_propagation()>
                    <button class="dialog__close" title="Close" on:click=move |_| open.set(false)>
                        "×"
                    </button>
                    <h2>{move || step.get().title()}</h2>

                    <Toast notice=notice on_dismiss=on_dismiss/>

                    <Show when=move || step.get() != AuthStep::EmailEntry>
                        <EmailBanner flow=flow/>
                    </Show>

                    <form class="auth-form" on:submit=on_submit.clone()>
                        {move || {
                            step_fields(step.get())
                                .iter()
                                .map(|&field| view! { <FlowInput flow=flow field=field/> })
                                .collect_view()
                        }}
                        <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || loading.get()>
                            {move || if loading.get() { "Please wait…" } else { step.get().submit_label() }}
                        </button>
                    </form>

                    <Show when=move || step.get() == AuthStep::Signin>
                        <button class="btn btn--link" disabled=move || loading.get() on:click=move |ev| on_forgot.run(ev)>
                            "Forgot Password?"
                        </button>
                    </Show>

                    <Show when=move || step.get() == AuthStep::EmailEntry>
                        <div class="auth-divider">"or"</div>
                        <button
                            class="btn auth-google"
                            disabled=move || loading.get()
                            on:click=move |_| flow.update(AuthFlow::social_login_unavailable)
                        >
                            "Continue with Google"
                        </button>
                    </Show>

                    <p class="auth-footer">
                        "By continuing you agree to our Terms of Service and Privacy Policy."
                    </p>
                </div>
            </div>
        </Show>
    }
}

/// Send `submission` and apply the reply.
fn send(
    submission: Submission,
    flow: RwSignal<AuthFlow>,
    auth: RwSignal<AuthState>,
    api: &HttpAuthApi,
    open: RwSignal<bool>,
    redirect: RwSignal<Option<&'static str>>,
) {
    #[cfg(feature = "csr")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = auth::flow::dispatch(&api, &submission).await;
            // A disposed modal no longer shows the outcome, but an accepted
            // signin still logs the session in.
            let done = match flow.try_update(|f| f.finish(result.clone())) {
                Some(done) => done,
                None => AuthFlow::new().finish(result),
            };
            let Some(done) = done else {
                return;
            };
            let route = done.route;
            auth.update(|session| session.login(&done.token, done.user));
            after(done.close_after, move || {
                open.set(false);
                redirect.set(Some(route));
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (submission, flow, auth, api, open, redirect);
}

/// Email confirmed by the lookup, with a way back to the email step.
#[component]
fn EmailBanner(flow: RwSignal<AuthFlow>) -> impl IntoView {
    view! {
        <div class="auth-email">
            <span class="auth-email__value">{move || flow.with(|f| f.form().email.clone())}</span>
            <button
                class="btn btn--link"
                disabled=move || flow.with(AuthFlow::is_loading)
                on:click=move |_| flow.update(AuthFlow::change_email)
            >
                "Change"
            </button>
        </div>
    }
}

#[component]
fn FlowInput(flow: RwSignal<AuthFlow>, field: Field) -> impl IntoView {
    view! {
        <label class="auth-form__field">
            <span class="auth-form__label">{field.label()}</span>
            <input
                class="auth-form__input"
                type=field.input_type()
                autocomplete=field.autocomplete()
                prop:value=move || flow.with(|f| field.value(f.form()).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    flow.update(|f| *field.slot(f.form_mut()) = value);
                }
                disabled=move || flow.with(AuthFlow::is_loading)
            />
        </label>
    }
}
