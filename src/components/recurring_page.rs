//! Recurring Page Component
//!
//! Lists recurring rules and hosts the create/edit modal.

use leptos::prelude::*;

use crate::api::FinanceApi;
use crate::components::{DeleteConfirmButton, RecurringFormModal};
use crate::context::use_app_context;
use crate::models::{category_name, RecurringRule};
use crate::notifications::Notify;
use crate::recurrence::{delete_rule, RecurrenceFormController};
use crate::schedule::{remind_upcoming, today};
use crate::store::{
    store_remove_rule, store_request_reload, store_set_rules, use_finance_store, FinanceStateStoreFields,
};
use crate::tasks::{TaskId, TaskScope};

#[component]
pub fn RecurringPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_finance_store();
    let scope = TaskScope::for_component();

    let form = RwSignal::new(RecurrenceFormController::new());
    let active_only = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let in_flight = StoredValue::new(None::<TaskId>);

    // Reload when the filter changes or a write asks for it; the newest request wins
    Effect::new(move |_| {
        let _ = store.reload_version().get();
        let active = active_only.get();
        if let Some(previous) = in_flight.get_value() {
            scope.cancel(previous);
        }

        let api = ctx.api();
        let notifier = ctx.notifier;
        loading.set(true);
        let task = scope.spawn(async move {
            match api.list_recurring(active).await {
                Ok(rules) => {
                    log::debug!("loaded {} recurring rule(s)", rules.len());
                    if ctx.claim_reminders() {
                        remind_upcoming(&rules, today(), &notifier);
                    }
                    store_set_rules(&store, rules);
                }
                Err(e) => {
                    log::error!("loading recurring rules failed: {}", e);
                    notifier.error("Could not load recurring transactions");
                }
            }
            loading.try_set(false);
        });
        in_flight.set_value(task);
    });

    view! {
        <section class="recurring-page">
            <header class="page-header">
                <h2>"Recurring transactions"</h2>
                <label class="filter-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || active_only.get()
                        on:change=move |ev| active_only.set(event_target_checked(&ev))
                    />
                    <span>"Active only"</span>
                </label>
                <button
                    type="button"
                    class="primary"
                    on:click=move |_| form.update(|c| c.open_create(today()))
                >
                    "+ New"
                </button>
            </header>

            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>

            <Show
                when=move || !store.rules().with(|rules| rules.is_empty())
                fallback=move || view! {
                    <p class="empty">"No recurring transactions yet"</p>
                }
            >
                <ul class="rule-list">
                    {move || store.rules().get().into_iter().map(|rule| {
                        view! { <RuleRow rule=rule form=form scope=scope /> }
                    }).collect_view()}
                </ul>
            </Show>

            <RecurringFormModal form=form scope=scope />
        </section>
    }
}

#[component]
fn RuleRow(rule: RecurringRule, form: RwSignal<RecurrenceFormController>, scope: TaskScope) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_finance_store();

    let id = rule.id;
    let title = rule
        .description
        .clone()
        .unwrap_or_else(|| rule.kind.label().to_string());
    let category = store.categories().with(|cats| category_name(cats, rule.category_id));
    let next = match rule.effective_next_date(today()) {
        Some(date) => format!("next {}", date.format("%Y-%m-%d")),
        None if rule.is_active => "finished".to_string(),
        None => "paused".to_string(),
    };
    let summary = format!(
        "{} {} · {} · {}",
        rule.frequency.label(),
        rule.amount.normalize(),
        category,
        next
    );
    let row_class = if rule.is_active { "rule-row" } else { "rule-row inactive" };
    let rule = StoredValue::new(rule);

    let on_delete = Callback::new(move |_: ()| {
        let api = ctx.api();
        let notifier = ctx.notifier;
        scope.spawn(async move {
            if delete_rule(&api, id, &notifier).await {
                store_remove_rule(&store, id);
                store_request_reload(&store);
            }
        });
    });

    view! {
        <li class=row_class data-frequency=rule.with_value(|r| r.frequency.as_str())>
            <div class="rule-main" on:click=move |_| rule.with_value(|r| form.update(|c| c.open_edit(r)))>
                <span class="rule-title">{title}</span>
                <span class="rule-summary">{summary}</span>
            </div>
            <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
        </li>
    }
}
