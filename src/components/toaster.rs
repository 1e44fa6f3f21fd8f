//! Transient notifications and the signal-backed [`Notifier`].

use leptos::prelude::*;

use crate::state::toast::{Notifier, Toast, ToastLevel, ToastState};

/// Visible time before a toast dismisses itself.
#[cfg(feature = "csr")]
const TOAST_DURATION_MS: u32 = 4000;

/// Pushes dispatcher notifications into the toast signal.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastState>,
}

impl ToastNotifier {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        let toasts = self.toasts;
        let Some(id) = toasts.try_update(|t| t.push(level, message)) else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || {
                toasts.update(|t| {
                    t.dismiss(id);
                });
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.get().toasts
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let is_info = toast.level == ToastLevel::Info;
                    let is_success = toast.level == ToastLevel::Success;
                    let is_error = toast.level == ToastLevel::Error;
                    view! {
                        <div
                            class="toast"
                            class:toast--info=is_info
                            class:toast--success=is_success
                            class:toast--error=is_error
                            on:click=move |_| toasts.update(|t| {
                                t.dismiss(id);
                            })
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
