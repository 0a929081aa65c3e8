//! Shared authentication model for the Studio clients.
//!
//! This crate owns everything both front ends (`client` in the browser, `cli`
//! in a terminal) need to agree on: the REST wire types, the [`AuthApi`]
//! transport seam, the persisted [`Session`], and the two small state
//! machines that drive the sign-in modal ([`AuthFlow`]) and profile editing
//! ([`ProfileEditor`]).
//!
//! Nothing here touches the network or the browser directly. Hosts supply an
//! [`AuthApi`] implementation and a [`TokenStore`].

pub mod api;
pub mod error;
pub mod flow;
pub mod notice;
pub mod profile;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{ApiConfig, AuthApi};
pub use error::ApiError;
pub use flow::{AuthFlow, AuthStep, Authenticated, Submission};
pub use notice::{Notice, NoticeKind};
pub use profile::{ProfileEditor, ProfileEffect, ProfileRequest};
pub use session::Session;
pub use storage::{MemoryTokenStore, TokenStore};
pub use types::User;
