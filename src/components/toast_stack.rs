//! Toast Stack Component
//!
//! Renders the notification queue in arrival order.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let notifier = use_app_context().notifier;

    view! {
        <div
            class=move || if notifier.is_empty() { "toast-stack empty" } else { "toast-stack" }
            role="status"
            aria-live="polite"
        >
            <For
                each=move || notifier.items()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", toast.severity.css_class())>
                            <span class="toast-message">{toast.message}</span>
                            <button
                                type="button"
                                class="toast-close"
                                title="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
