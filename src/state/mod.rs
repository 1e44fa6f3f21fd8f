//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `conversation` is the observable store the dispatcher writes into;
//! `toast` and `ui` are plain models held in Leptos signals by the app.

pub mod conversation;
pub mod toast;
pub mod ui;
