//! Chat bubbles and the typing placeholder.

use leptos::prelude::*;

use crate::state::conversation::{Message, MessageKind};
use crate::util::markdown::render_markdown_html;

/// One message. Assistant replies render as Markdown; user text stays plain.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let is_user = message.is_user;
    let is_assistant = !is_user;
    let is_fallback = message.kind == MessageKind::Fallback;

    let body = if is_user || is_fallback {
        view! { <span>{message.text}</span> }.into_any()
    } else {
        let rendered = render_markdown_html(&message.text);
        view! { <div class="bubble__markdown" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div
            class="bubble"
            class:bubble--user=is_user
            class:bubble--assistant=is_assistant
            class:bubble--fallback=is_fallback
        >
            {body}
        </div>
    }
}

#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="typing" aria-label="Assistant is typing">
            <span class="typing__dot"></span>
            <span class="typing__dot"></span>
            <span class="typing__dot"></span>
        </div>
    }
}
