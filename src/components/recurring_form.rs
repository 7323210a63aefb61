//! Recurring Form Modal
//!
//! Create/edit dialog driven by a `RecurrenceFormController` held in a signal.

use leptos::prelude::*;

use crate::components::{FieldMessage, FrequencySelector, TypeSelector};
use crate::context::use_app_context;
use crate::error::FormField;
use crate::recurrence::{RecurrenceForm, RecurrenceFormController, SubmitOutcome};
use crate::store::{store_request_reload, store_upsert_rule, use_finance_store, FinanceStateStoreFields};
use crate::tasks::TaskScope;

/// `on:input` handler writing the input's value into one buffer field
fn bind(
    form: RwSignal<RecurrenceFormController>,
    apply: fn(&mut RecurrenceForm, String),
) -> impl Fn(web_sys::Event) + Copy + 'static {
    move |ev| {
        let value = event_target_value(&ev);
        form.update(|c| apply(&mut c.buffer, value));
    }
}

#[component]
pub fn RecurringFormModal(form: RwSignal<RecurrenceFormController>, scope: TaskScope) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_finance_store();

    let errors = Signal::derive(move || form.with(|c| c.errors.clone()));
    let submitting = move || form.with(|c| c.submitting);
    let buffer = move |read: fn(&RecurrenceForm) -> String| form.with(|c| read(&c.buffer));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let categories = store.categories().get_untracked();
        let wallets = store.wallets().get_untracked();
        let Some(request) = form
            .try_update(|c| c.prepare(&categories, &wallets))
            .flatten()
        else {
            return;
        };

        let api = ctx.api();
        let notifier = ctx.notifier;
        scope.spawn(async move {
            let result = request.send(&api).await;
            if let Some(SubmitOutcome::Saved(rule)) = form.try_update(|c| c.finish(result, &notifier)) {
                store_upsert_rule(&store, rule);
                store_request_reload(&store);
            }
        });
    };

    view! {
        <Show when=move || form.with(|c| c.open)>
            <div class="modal-backdrop">
                <form class="modal recurring-form" on:submit=on_submit>
                    <h2>
                        {move || if form.with(|c| c.editing.is_some()) {
                            "Edit recurring transaction"
                        } else {
                            "New recurring transaction"
                        }}
                    </h2>

                    <TypeSelector
                        current=Signal::derive(move || form.with(|c| c.buffer.kind))
                        on_change=move |kind| form.update(|c| c.buffer.kind = kind)
                    />

                    <label class="form-row">
                        <span>"Amount"</span>
                        <input
                            type="text"
                            inputmode="decimal"
                            placeholder="0"
                            prop:value=move || buffer(|b| b.amount.clone())
                            on:input=bind(form, |b, v| b.amount = v)
                        />
                    </label>
                    <FieldMessage errors=errors field=FormField::Amount />

                    <label class="form-row">
                        <span>"Category"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|c| c.buffer.category_id = value.parse().ok());
                        }>
                            <option value="" prop:selected=move || form.with(|c| c.buffer.category_id.is_none())>
                                "Choose a category"
                            </option>
                            {move || store.categories().get().into_iter().map(|category| {
                                let id = category.id;
                                view! {
                                    <option
                                        value=id.to_string()
                                        prop:selected=move || form.with(|c| c.buffer.category_id == Some(id))
                                    >
                                        {category.name}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </label>
                    <FieldMessage errors=errors field=FormField::Category />

                    <label class="form-row">
                        <span>"Wallet"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|c| c.buffer.wallet_id = value.parse().ok());
                        }>
                            <option value="" prop:selected=move || form.with(|c| c.buffer.wallet_id.is_none())>
                                "Choose a wallet"
                            </option>
                            {move || store.wallets().get().into_iter().map(|wallet| {
                                let id = wallet.id;
                                view! {
                                    <option
                                        value=id.to_string()
                                        prop:selected=move || form.with(|c| c.buffer.wallet_id == Some(id))
                                    >
                                        {wallet.name}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </label>
                    <FieldMessage errors=errors field=FormField::Wallet />

                    <div class="form-row">
                        <span>"Repeats"</span>
                        <FrequencySelector
                            current=Signal::derive(move || form.with(|c| c.buffer.frequency))
                            on_change=move |frequency| form.update(|c| c.buffer.frequency = frequency)
                        />
                    </div>

                    <label class="form-row">
                        <span>"Starts"</span>
                        <input
                            type="date"
                            prop:value=move || buffer(|b| b.start_date.clone())
                            on:input=bind(form, |b, v| b.start_date = v)
                        />
                    </label>
                    <FieldMessage errors=errors field=FormField::StartDate />

                    <label class="form-row">
                        <span>"Ends (optional)"</span>
                        <input
                            type="date"
                            prop:value=move || buffer(|b| b.end_date.clone())
                            on:input=bind(form, |b, v| b.end_date = v)
                        />
                    </label>
                    <FieldMessage errors=errors field=FormField::EndDate />

                    <label class="form-row">
                        <span>"Remind days before"</span>
                        <input
                            type="number"
                            min="0"
                            prop:value=move || buffer(|b| b.notify_before.clone())
                            on:input=bind(form, |b, v| b.notify_before = v)
                        />
                    </label>
                    <FieldMessage errors=errors field=FormField::NotifyBefore />

                    <label class="form-row">
                        <span>"Description"</span>
                        <input
                            type="text"
                            prop:value=move || buffer(|b| b.description.clone())
                            on:input=bind(form, |b, v| b.description = v)
                        />
                    </label>

                    <label class="form-row checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|c| c.buffer.is_active)
                            on:change=move |ev| {
                                let active = event_target_checked(&ev);
                                form.update(|c| c.buffer.is_active = active);
                            }
                        />
                        <span>"Active"</span>
                    </label>

                    <div class="modal-actions">
                        <button
                            type="button"
                            class="secondary"
                            disabled=submitting
                            on:click=move |_| form.update(|c| c.close())
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="primary" disabled=submitting>
                            {move || if submitting() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
