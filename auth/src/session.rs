//! Session store: who is logged in, and with which token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client keeps one `Session` in a Leptos context signal; the CLI
//! builds one per invocation over its token file. Components never touch the
//! token store directly, only these operations.
//!
//! DESIGN
//! ======
//! Each network-backed operation exists in two shapes. The split form
//! (`begin_restore`/`finish_restore`, `token`/`apply_refresh`) lets reactive
//! hosts release their borrow across the await; the async form composes the
//! two for hosts that own the session outright.
//!
//! A user record is only accepted while a token is stored. A profile response
//! that lands after `logout()` is dropped, so `is_authenticated()` can never
//! report a user without a token behind it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::storage::TokenStore;
use crate::types::User;

/// Current authentication state over a persistent token store.
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
    user: Option<User>,
    loading: bool,
}

impl<S: TokenStore> Session<S> {
    /// Fresh session awaiting startup resolution (`is_loading()` is true).
    pub fn new(store: S) -> Self {
        Self { store, user: None, loading: true }
    }

    /// Resolved user record, if authenticated.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True until startup resolution has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True iff a user record has been resolved.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Persisted bearer token, read fresh from the store.
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    /// Underlying token store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a successful signin/signup.
    pub fn login(&mut self, token: &str, user: User) {
        self.store.save(token);
        tracing::debug!(user_id = %user.id, "session established");
        self.user = Some(user);
        self.loading = false;
    }

    /// Forget the token and user.
    pub fn logout(&mut self) {
        self.store.clear();
        self.user = None;
        self.loading = false;
        tracing::debug!("session cleared");
    }

    /// Start startup resolution.
    ///
    /// Returns the token to resolve, or `None` when there is nothing to
    /// resolve, in which case loading is already finished.
    pub fn begin_restore(&mut self) -> Option<String> {
        let token = self.store.load();
        if token.is_none() {
            self.loading = false;
        }
        token
    }

    /// Complete startup resolution with the profile fetch result.
    ///
    /// A failed fetch means the stored token is unusable: it is removed and
    /// the session proceeds unauthenticated.
    pub fn finish_restore(&mut self, result: Result<User, ApiError>) {
        match result {
            Ok(user) if self.store.load().is_some() => self.user = Some(user),
            Ok(_) => tracing::debug!("discarding restored profile; token removed meanwhile"),
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed; clearing stored token");
                self.store.clear();
                self.user = None;
            }
        }
        self.loading = false;
    }

    /// Apply a profile refresh result. Failures keep the prior user.
    pub fn apply_refresh(&mut self, result: Result<User, ApiError>) {
        match result {
            Ok(user) if self.store.load().is_some() => self.user = Some(user),
            Ok(_) => tracing::debug!("discarding refreshed profile; token removed meanwhile"),
            Err(e) => tracing::warn!(error = %e, "profile refresh failed"),
        }
    }

    /// Resolve a persisted token into a user at startup.
    pub async fn restore<A: AuthApi>(&mut self, api: &A) {
        let Some(token) = self.begin_restore() else {
            return;
        };
        let result = api.fetch_profile(&token).await;
        self.finish_restore(result);
    }

    /// Re-fetch the current user. No-op without a token; failures are logged only.
    pub async fn refresh_profile<A: AuthApi>(&mut self, api: &A) {
        let Some(token) = self.token() else {
            return;
        };
        let result = api.fetch_profile(&token).await;
        self.apply_refresh(result);
    }
}
