//! Leptos view components for the chat shell.
//!
//! Components read shared state from context (`RwSignal<ConversationState>`,
//! `RwSignal<ToastState>`, `RwSignal<UiState>`, `DispatcherHandle`) provided
//! by [`crate::app::App`].

pub mod chat_input;
pub mod chat_layout;
pub mod header;
pub mod message_bubble;
pub mod toaster;
