//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the shared `auth::AuthApi` contract over HTTP; wire types
//! come from the `auth` crate.

pub mod api;
