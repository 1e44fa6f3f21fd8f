//! # rag-assistant
//!
//! Leptos + WASM chat client that forwards user text and file uploads to a
//! single external webhook and renders the reply as a chat bubble.
//!
//! The chat core (`session`, `state`, `net`) is platform-neutral and tested
//! natively. Browser glue (DOM, `fetch`, `localStorage`) is gated behind the
//! `csr` feature and degrades to no-ops without it.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod session;
pub mod state;
pub mod util;

/// Install console logging and the panic hook, then mount [`app::App`].
#[cfg(feature = "csr")]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already initialized");
    }
    leptos::mount::mount_to_body(app::App);
}
