//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the auth and profile dialogs while reading/writing the
//! session signal and API client from Leptos context providers.

pub mod auth_modal;
pub mod profile_modal;
pub mod toast;
