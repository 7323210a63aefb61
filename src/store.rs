//! Client Cache
//!
//! Read-through copy of server state. Uses Leptos reactive_stores for
//! fine-grained reactivity; nothing here is ever the source of truth.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{BudgetSummary, Category, RecurringRule, RuleId, Transaction, Wallet};
use crate::transactions::Refreshed;

#[derive(Clone, Debug, Default, Store)]
pub struct FinanceState {
    /// Recurring rules as last fetched
    pub rules: Vec<RecurringRule>,
    pub categories: Vec<Category>,
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetSummary>,
    /// Bumped to make pages re-fetch their lists
    pub reload_version: u32,
}

/// Type alias for the store
pub type FinanceStore = Store<FinanceState>;

/// Get the finance store from context
pub fn use_finance_store() -> FinanceStore {
    expect_context::<FinanceStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_rules(store: &FinanceStore, rules: Vec<RecurringRule>) {
    *store.rules().write() = rules;
}

/// Replace or append a saved rule
pub fn store_upsert_rule(store: &FinanceStore, rule: RecurringRule) {
    let rules_field = store.rules();
    let mut rules = rules_field.write();
    match rules.iter_mut().find(|r| r.id == rule.id) {
        Some(slot) => *slot = rule,
        None => rules.push(rule),
    }
}

pub fn store_remove_rule(store: &FinanceStore, rule_id: RuleId) {
    store.rules().write().retain(|r| r.id != rule_id);
}

pub fn store_set_reference(store: &FinanceStore, categories: Vec<Category>, wallets: Vec<Wallet>) {
    *store.categories().write() = categories;
    *store.wallets().write() = wallets;
}

/// Apply whatever lists loaded after a write
pub fn store_apply_refresh(store: &FinanceStore, refreshed: Refreshed) {
    if let Some(transactions) = refreshed.transactions {
        *store.transactions().write() = transactions;
    }
    if let Some(wallets) = refreshed.wallets {
        *store.wallets().write() = wallets;
    }
    if let Some(budgets) = refreshed.budgets {
        *store.budgets().write() = budgets;
    }
}

/// Ask pages to re-fetch
pub fn store_request_reload(store: &FinanceStore) {
    *store.reload_version().write() += 1;
}
