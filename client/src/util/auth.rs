//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Where signed-out visitors are sent.
pub const SIGNED_OUT_ROUTE: &str = "/";

/// True once startup resolution finished without a user.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.is_loading() && !state.is_authenticated()
}

/// Redirect to [`SIGNED_OUT_ROUTE`] whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate(SIGNED_OUT_ROUTE, NavigateOptions::default());
        }
    });
}
