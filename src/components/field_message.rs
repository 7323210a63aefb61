use leptos::prelude::*;

use crate::error::{message_for, FieldError, FormField};

/// Inline validation message under a form input
#[component]
pub fn FieldMessage(#[prop(into)] errors: Signal<Vec<FieldError>>, field: FormField) -> impl IntoView {
    let message = move || errors.with(|errors| message_for(errors, field));

    view! {
        <Show when=move || message().is_some()>
            <p class="field-error">{move || message().unwrap_or_default()}</p>
        </Show>
    }
}
