//! Top bar with the assistant title and the theme toggle.

use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::theme::{self, Theme};

#[component]
pub fn Header(#[prop(into)] title: String) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_toggle = move |_| {
        let next = theme::toggle(ui.get_untracked().theme);
        ui.update(|u| u.theme = next);
    };

    view! {
        <header class="chat-header">
            <h1 class="chat-header__title">{title}</h1>
            <button class="chat-header__theme" on:click=on_toggle title="Toggle theme">
                {move || if ui.get().theme == Theme::Light { "☾" } else { "☀" }}
            </button>
        </header>
    }
}
