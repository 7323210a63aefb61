//! Transactions Page Component
//!
//! Quick-add form, budget overview and the latest transactions.

use leptos::prelude::*;

use crate::alerts::AlertLevel;
use crate::components::{FieldMessage, TypeSelector};
use crate::context::use_app_context;
use crate::error::{FieldError, FormField};
use crate::models::{category_name, TransactionType};
use crate::schedule::today;
use crate::store::{store_apply_refresh, use_finance_store, FinanceStateStoreFields};
use crate::tasks::TaskScope;
use crate::transactions::{create_with_budget_check, refresh_after_write, TransactionForm};

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_finance_store();
    let scope = TaskScope::for_component();

    Effect::new(move |_| {
        let _ = store.reload_version().get();
        let api = ctx.api();
        scope.spawn(async move {
            let refreshed = refresh_after_write(&api).await;
            store_apply_refresh(&store, refreshed);
        });
    });

    view! {
        <section class="transactions-page">
            <QuickTransactionForm scope=scope />
            <BudgetOverview />
            <TransactionList />
        </section>
    }
}

#[component]
fn QuickTransactionForm(scope: TaskScope) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_finance_store();

    let draft = RwSignal::new(TransactionForm::blank(today()));
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let categories = store.categories().get_untracked();
        let wallets = store.wallets().get_untracked();
        let txn = match draft.with_untracked(|d| d.validate(&categories, &wallets)) {
            Ok(txn) => txn,
            Err(found) => {
                log::debug!("transaction form rejected: {:?}", found);
                errors.set(found);
                return;
            }
        };
        errors.set(Vec::new());
        submitting.set(true);

        let api = ctx.api();
        let notifier = ctx.notifier;
        scope.spawn(async move {
            let created = create_with_budget_check(&api, &txn, &categories, &notifier).await;
            submitting.try_set(false);
            if created.is_ok() {
                draft.try_set(TransactionForm::blank(today()));
                let refreshed = refresh_after_write(&api).await;
                store_apply_refresh(&store, refreshed);
            }
        });
    };

    let is_transfer = move || draft.with(|d| d.kind == TransactionType::Transfer);

    view! {
        <form class="quick-transaction" on:submit=on_submit>
            <h2>"Add transaction"</h2>
            <TypeSelector
                current=Signal::derive(move || draft.with(|d| d.kind))
                on_change=move |kind| draft.update(|d| {
                    d.kind = kind;
                    if kind == TransactionType::Transfer {
                        d.category_id = None;
                    } else {
                        d.to_wallet_id = None;
                    }
                })
            />

            <div class="new-transaction-row">
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount"
                    prop:value=move || draft.with(|d| d.amount.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.amount = value);
                    }
                />
                <input
                    type="date"
                    prop:value=move || draft.with(|d| d.date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.date = value);
                    }
                />
            </div>
            <FieldMessage errors=errors field=FormField::Amount />
            <FieldMessage errors=errors field=FormField::Date />

            <div class="new-transaction-row">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.wallet_id = value.parse().ok());
                }>
                    <option value="" prop:selected=move || draft.with(|d| d.wallet_id.is_none())>"Wallet"</option>
                    {move || store.wallets().get().into_iter().map(|wallet| {
                        let id = wallet.id;
                        view! {
                            <option value=id.to_string() prop:selected=move || draft.with(|d| d.wallet_id == Some(id))>
                                {wallet.name}
                            </option>
                        }
                    }).collect_view()}
                </select>

                <Show
                    when=is_transfer
                    fallback=move || view! {
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.category_id = value.parse().ok());
                        }>
                            <option value="" prop:selected=move || draft.with(|d| d.category_id.is_none())>
                                "No category"
                            </option>
                            {move || store.categories().get().into_iter().map(|category| {
                                let id = category.id;
                                view! {
                                    <option value=id.to_string() prop:selected=move || draft.with(|d| d.category_id == Some(id))>
                                        {category.name}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    }
                >
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.to_wallet_id = value.parse().ok());
                    }>
                        <option value="" prop:selected=move || draft.with(|d| d.to_wallet_id.is_none())>"To wallet"</option>
                        {move || store.wallets().get().into_iter().map(|wallet| {
                            let id = wallet.id;
                            view! {
                                <option value=id.to_string() prop:selected=move || draft.with(|d| d.to_wallet_id == Some(id))>
                                    {wallet.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </Show>
            </div>
            <FieldMessage errors=errors field=FormField::Wallet />
            <FieldMessage errors=errors field=FormField::Category />
            <FieldMessage errors=errors field=FormField::TargetWallet />

            <div class="new-transaction-row">
                <input
                    type="text"
                    placeholder="Note"
                    prop:value=move || draft.with(|d| d.note.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.note = value);
                    }
                />
                <button type="submit" class="primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Add" }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn BudgetOverview() -> impl IntoView {
    let store = use_finance_store();

    view! {
        <Show when=move || !store.budgets().with(|b| b.is_empty())>
            <div class="budget-overview">
                <h3>"Budgets"</h3>
                {move || {
                    let categories = store.categories().get();
                    store.budgets().get().into_iter().map(|budget| {
                        let name = budget
                            .category_name
                            .clone()
                            .unwrap_or_else(|| category_name(&categories, budget.category_id));
                        let class = match AlertLevel::classify(&budget) {
                            Some(AlertLevel::Exceeded) => "budget-row exceeded",
                            Some(AlertLevel::NearLimit) => "budget-row near-limit",
                            None => "budget-row",
                        };
                        let width = format!("width: {:.0}%", budget.usage_percentage.clamp(0.0, 100.0));
                        view! {
                            <div class=class>
                                <span class="budget-name">{name}</span>
                                <div class="budget-bar"><div class="budget-fill" style=width></div></div>
                                <span class="budget-usage">{format!("{:.0}%", budget.usage_percentage)}</span>
                            </div>
                        }
                    }).collect_view()
                }}
            </div>
        </Show>
    }
}

#[component]
fn TransactionList() -> impl IntoView {
    let store = use_finance_store();

    view! {
        <ul class="transaction-list">
            {move || {
                let categories = store.categories().get();
                store.transactions().get().into_iter().map(|txn| {
                    let label = match txn.category_id {
                        Some(id) => category_name(&categories, id),
                        None => txn.kind.label().to_string(),
                    };
                    let sign = match txn.kind {
                        TransactionType::Income => "+",
                        TransactionType::Expense => "-",
                        TransactionType::Transfer => "",
                    };
                    view! {
                        <li class=format!("transaction-row {}", txn.kind.as_str().to_lowercase())>
                            <span class="transaction-date">{txn.date.format("%Y-%m-%d").to_string()}</span>
                            <span class="transaction-label">{label}</span>
                            <span class="transaction-note">{txn.note.unwrap_or_default()}</span>
                            <span class="transaction-amount">{format!("{}{}", sign, txn.amount.normalize())}</span>
                        </li>
                    }
                }).collect_view()
            }}
        </ul>
    }
}
