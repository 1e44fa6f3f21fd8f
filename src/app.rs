//! Root application component and the dispatcher handle shared with children.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{chat_input::ChatInput, chat_layout::ChatLayout, header::Header, toaster::{ToastNotifier, Toaster}};
use crate::config::ChatConfig;
use crate::net::dispatcher::Dispatcher;
use crate::net::transport::BrowserTransport;
use crate::session;
use crate::state::conversation::{ConversationState, ConversationStore};
use crate::state::toast::ToastState;
use crate::state::ui::UiState;
use crate::util::theme;

pub type ChatDispatcher = Dispatcher<BrowserTransport, ToastNotifier>;

/// Copyable context handle around the app's single dispatcher.
///
/// Each call spawns the request on the local executor and returns
/// immediately; the conversation signal picks up the result.
#[derive(Clone, Copy)]
pub struct DispatcherHandle(StoredValue<Rc<ChatDispatcher>, LocalStorage>);

impl DispatcherHandle {
    pub fn new(dispatcher: ChatDispatcher) -> Self {
        Self(StoredValue::new_local(Rc::new(dispatcher)))
    }

    pub fn send_text(self, text: String) {
        let dispatcher = self.0.get_value();
        leptos::task::spawn_local(async move {
            if let Err(e) = dispatcher.send_text(text).await {
                log::debug!("send_text settled with error: {e}");
            }
        });
    }

    /// Upload the picked files. The user bubble shows their names while the
    /// contents are still being read.
    #[cfg(feature = "csr")]
    pub fn upload_browser_files(self, picked: Vec<web_sys::File>) {
        let dispatcher = self.0.get_value();
        let names: Vec<String> = picked.iter().map(web_sys::File::name).collect();
        leptos::task::spawn_local(async move {
            let read = crate::util::files::read_files(picked);
            if let Err(e) = dispatcher.upload_named(names, read).await {
                log::debug!("upload settled with error: {e}");
            }
        });
    }
}

/// Root application component.
///
/// Builds the conversation store and dispatcher once, mirrors the store into
/// a signal for rendering, and provides all shared state as context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ChatConfig::from_build_env();
    let session_id = session::current().clone();
    log::info!("session {session_id} posting to {}", config.webhook_url);

    let store = ConversationStore::new();
    let conversation = RwSignal::new(store.get_state());
    let _bridge = store.subscribe(move |state: &ConversationState| conversation.set(state.clone()));

    let toasts = RwSignal::new(ToastState::default());
    let ui = RwSignal::new(UiState { theme: theme::read_preference() });
    theme::apply(ui.get_untracked().theme);

    let dispatcher = Dispatcher::new(store, BrowserTransport, ToastNotifier::new(toasts), session_id, config.clone());

    provide_context(conversation);
    provide_context(toasts);
    provide_context(ui);
    provide_context(DispatcherHandle::new(dispatcher));

    let title = config.title;

    view! {
        <Title text=title.clone()/>
        <div class="app">
            <Toaster/>
            <div class="chat-shell">
                <Header title=title/>
                <ChatLayout/>
                <ChatInput/>
            </div>
        </div>
    }
}
