//! `localStorage`-backed bearer token persistence.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; without the `csr`
//! feature every call safely no-ops so native builds stay deterministic.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

use auth::TokenStore;
#[cfg(feature = "csr")]
use auth::storage::TOKEN_KEY;

/// Token store over `window.localStorage["access_token"]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&mut self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&mut self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}
