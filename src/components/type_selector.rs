//! Type Selector Components
//!
//! Button groups for transaction type and recurrence frequency.

use leptos::prelude::*;

use crate::models::{Frequency, TransactionType};

/// Transaction type selector buttons
#[component]
pub fn TypeSelector(
    #[prop(into)] current: Signal<TransactionType>,
    on_change: impl Fn(TransactionType) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {TransactionType::ALL.into_iter().map(|kind| {
                let is_selected = move || current.get() == kind;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| on_change(kind)
                    >
                        {kind.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// Frequency selector buttons
#[component]
pub fn FrequencySelector(
    #[prop(into)] current: Signal<Frequency>,
    on_change: impl Fn(Frequency) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            {Frequency::ALL.into_iter().map(|frequency| {
                let is_selected = move || current.get() == frequency;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                        on:click=move |_| on_change(frequency)
                    >
                        {frequency.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
