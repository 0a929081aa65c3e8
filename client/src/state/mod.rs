//! Shared reactive state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the session is global. Modal flows own their state locally and write
//! into the session through its operations.

pub mod auth;
