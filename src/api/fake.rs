//! In-memory `FinanceApi` for workflow tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::FinanceApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    BudgetSummary, Category, NewTransaction, RecurringPayload, RecurringRule, RuleId, Transaction,
    Wallet,
};

#[derive(Default)]
pub struct FakeApi {
    pub rules: RefCell<Vec<RecurringRule>>,
    pub categories: Vec<Category>,
    pub wallets: Vec<Wallet>,
    pub budgets: Vec<BudgetSummary>,
    pub transactions: RefCell<Vec<Transaction>>,
    /// Every call, in order, by endpoint name
    pub calls: RefCell<Vec<&'static str>>,
    pub fail_writes: Cell<bool>,
    pub fail_budgets: Cell<bool>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budgets(mut self, budgets: Vec<BudgetSummary>) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_wallets(mut self, wallets: Vec<Wallet>) -> Self {
        self.wallets = wallets;
        self
    }

    pub fn called(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn check_write(&self) -> ApiResult<()> {
        if self.fail_writes.get() {
            return Err(ApiError::Status { status: 500, message: "boom".into() });
        }
        Ok(())
    }

    fn rule_from(id: RuleId, payload: &RecurringPayload) -> RecurringRule {
        RecurringRule {
            id,
            amount: payload.amount,
            kind: payload.kind,
            frequency: payload.frequency,
            start_date: payload.start_date,
            end_date: payload.end_date,
            category_id: payload.category_id,
            wallet_id: payload.wallet_id,
            notify_before: payload.notify_before,
            is_active: payload.is_active,
            next_date: None,
            description: payload.description.clone(),
        }
    }
}

#[async_trait(?Send)]
impl FinanceApi for FakeApi {
    async fn list_recurring(&self, active_only: bool) -> ApiResult<Vec<RecurringRule>> {
        self.record("list_recurring");
        Ok(self
            .rules
            .borrow()
            .iter()
            .filter(|r| !active_only || r.is_active)
            .cloned()
            .collect())
    }

    async fn create_recurring(&self, payload: &RecurringPayload) -> ApiResult<RecurringRule> {
        self.record("create_recurring");
        self.check_write()?;
        let rule = Self::rule_from(self.id(), payload);
        self.rules.borrow_mut().push(rule.clone());
        Ok(rule)
    }

    async fn update_recurring(&self, id: RuleId, payload: &RecurringPayload) -> ApiResult<RecurringRule> {
        self.record("update_recurring");
        self.check_write()?;
        let mut rules = self.rules.borrow_mut();
        let slot = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::Status { status: 404, message: "not found".into() })?;
        *slot = Self::rule_from(id, payload);
        Ok(slot.clone())
    }

    async fn delete_recurring(&self, id: RuleId) -> ApiResult<()> {
        self.record("delete_recurring");
        self.check_write()?;
        self.rules.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.record("list_categories");
        Ok(self.categories.clone())
    }

    async fn list_wallets(&self) -> ApiResult<Vec<Wallet>> {
        self.record("list_wallets");
        Ok(self.wallets.clone())
    }

    async fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        self.record("list_transactions");
        Ok(self.transactions.borrow().clone())
    }

    async fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<Transaction> {
        self.record("create_transaction");
        self.check_write()?;
        let created = Transaction {
            id: self.id(),
            amount: txn.amount,
            kind: txn.kind,
            wallet_id: txn.wallet_id,
            category_id: txn.category_id,
            to_wallet_id: txn.to_wallet_id,
            date: txn.date,
            note: txn.note.clone(),
        };
        self.transactions.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn list_budgets(&self) -> ApiResult<Vec<BudgetSummary>> {
        self.record("list_budgets");
        if self.fail_budgets.get() {
            return Err(ApiError::Status { status: 503, message: "unavailable".into() });
        }
        Ok(self.budgets.clone())
    }
}
