//! Message box, file picker, and drop zone.
//!
//! Empty or whitespace-only text is suppressed here; the dispatcher does not
//! re-validate. Files reach the dispatcher unfiltered.

use leptos::prelude::*;

use crate::app::DispatcherHandle;

#[component]
pub fn ChatInput() -> impl IntoView {
    let dispatcher = expect_context::<DispatcherHandle>();
    let input = RwSignal::new(String::new());
    let drag_active = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        dispatcher.send_text(text);
        input.set(String::new());
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;

            let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            if let Some(list) = el.files() {
                dispatcher.upload_browser_files(crate::util::files::collect(&list));
            }
            // Allow picking the same file again.
            el.set_value("");
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(true);
    };

    let on_drag_leave = move |_: leptos::ev::DragEvent| drag_active.set(false);

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(false);

        #[cfg(feature = "csr")]
        {
            if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
                dispatcher.upload_browser_files(crate::util::files::collect(&list));
            }
        }
    };

    view! {
        <div
            class="chat-input"
            class:chat-input--drag=move || drag_active.get()
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <form class="chat-input__form" on:submit=on_submit>
                <label class="chat-input__attach" title="Attach files">
                    "📎"
                    <input class="chat-input__file" type="file" multiple=true on:change=on_file_change/>
                </label>
                <input
                    class="chat-input__text"
                    name="message"
                    type="text"
                    placeholder="Type a message..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="chat-input__send" type="submit" disabled=move || input.get().trim().is_empty()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
