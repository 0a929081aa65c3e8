//! # client
//!
//! Leptos + WASM front end for Studio: the sign-in / sign-up modal, profile
//! editing and the authenticated landing view.
//!
//! Session, flow and wire logic live in the `auth` crate; this crate binds
//! them to Leptos signals, the browser's `localStorage` and `gloo-net`.
//! Browser-only code is gated behind the `csr` feature so the crate still
//! builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
