//! Log Panel Component
//!
//! Collapsible view of the in-memory log buffer for bug reports.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let lines = RwSignal::new(Vec::<String>::new());

    let reload = move || lines.set(ring_logger::recent_lines());

    view! {
        <footer class="log-panel">
            <button
                type="button"
                class="log-toggle"
                on:click=move |_| {
                    if !open.get_untracked() {
                        reload();
                    }
                    set_open.update(|o| *o = !*o);
                }
            >
                {move || if open.get() { "Hide logs" } else { "Show logs" }}
            </button>
            <Show when=move || open.get()>
                <div class="log-actions">
                    <button type="button" on:click=move |_| reload()>"Refresh"</button>
                    <button
                        type="button"
                        on:click=move |_| {
                            if let Some(logger) = ring_logger::logger() {
                                logger.clear();
                            }
                            reload();
                        }
                    >
                        "Clear"
                    </button>
                </div>
                <pre class="log-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </footer>
    }
}
