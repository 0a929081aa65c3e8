//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The signal holds an `auth::Session` over
//! `localStorage`; async helpers here release the signal across every await.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use auth::{AuthApi, Session};
use leptos::prelude::*;

use crate::util::token_storage::BrowserTokenStore;

/// Session over the browser's `localStorage`, provided as `RwSignal<AuthState>`.
pub type AuthState = Session<BrowserTokenStore>;

/// Session in its initial loading state.
pub fn new_auth_state() -> AuthState {
    Session::new(BrowserTokenStore)
}

/// Startup resolution of a persisted token.
pub async fn restore<A: AuthApi>(auth: RwSignal<AuthState>, api: &A) {
    let Some(token) = auth.try_update(Session::begin_restore).flatten() else {
        return;
    };
    let result = api.fetch_profile(&token).await;
    auth.update(|session| session.finish_restore(result));
}

/// Re-fetch the current user; failures leave the signal untouched.
pub async fn refresh_profile<A: AuthApi>(auth: RwSignal<AuthState>, api: &A) {
    let Some(token) = auth.with_untracked(Session::token) else {
        return;
    };
    let result = api.fetch_profile(&token).await;
    auth.update(|session| session.apply_refresh(result));
}

/// Short account line for the header, e.g. `"pro · 120 credits"`.
pub fn account_summary(state: &AuthState) -> Option<String> {
    state
        .user()
        .map(|user| format!("{} · {} credits", user.plan, user.credits))
}
