//! Scrollable message list with the typing placeholder.

use leptos::prelude::*;

use crate::components::message_bubble::{MessageBubble, TypingIndicator};
use crate::state::conversation::{ConversationState, Message};

#[component]
pub fn ChatLayout() -> impl IntoView {
    let conversation = expect_context::<RwSignal<ConversationState>>();
    let area_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest bubble in view.
    Effect::new(move || {
        conversation.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = area_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="chat-area" node_ref=area_ref>
            <Show when=move || conversation.with(|c| c.messages.is_empty() && !c.pending)>
                <div class="chat-area__empty">"Ask a question or drop a document to get started."</div>
            </Show>
            <For
                each=move || conversation.get().messages
                key=|message: &Message| message.id
                children=move |message: Message| view! { <MessageBubble message=message/> }
            />
            <Show when=move || conversation.get().pending>
                <TypingIndicator/>
            </Show>
        </div>
    }
}
