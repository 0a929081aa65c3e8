//! Persistence of the bearer token across reloads and process restarts.

/// Well-known key the token is stored under.
pub const TOKEN_KEY: &str = "access_token";

/// Holder of the one persisted token string.
///
/// Storage failures are not modelled: writes are best effort and a failed
/// read is indistinguishable from "no token".
pub trait TokenStore {
    /// Current persisted token, if any.
    fn load(&self) -> Option<String>;
    /// Persist `token`, replacing any previous value.
    fn save(&mut self, token: &str);
    /// Remove the persisted token.
    fn clear(&mut self);
}

/// In-process token store, used by tests and ephemeral sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    /// Store pre-seeded with `token`, as if persisted by an earlier run.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Some(token.to_owned()) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) {
        self.token = Some(token.to_owned());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
