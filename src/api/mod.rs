//! Finance API
//!
//! `FinanceApi` is the seam between workflows and the server. Components use
//! `HttpApi`; tests use the in-memory fake.

mod http;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{
    BudgetSummary, Category, NewTransaction, RecurringPayload, RecurringRule, RuleId, Transaction,
    Wallet,
};

pub use http::HttpApi;

/// Remote operations used by the pages.
///
/// Futures are `?Send` because in the browser they wrap JS promises.
#[async_trait(?Send)]
pub trait FinanceApi {
    /// GET /recurring-transactions[?active=true]
    async fn list_recurring(&self, active_only: bool) -> ApiResult<Vec<RecurringRule>>;

    /// POST /recurring-transactions
    async fn create_recurring(&self, payload: &RecurringPayload) -> ApiResult<RecurringRule>;

    /// PATCH /recurring-transactions/{id}
    async fn update_recurring(&self, id: RuleId, payload: &RecurringPayload) -> ApiResult<RecurringRule>;

    /// DELETE /recurring-transactions/{id}
    async fn delete_recurring(&self, id: RuleId) -> ApiResult<()>;

    async fn list_categories(&self) -> ApiResult<Vec<Category>>;

    async fn list_wallets(&self) -> ApiResult<Vec<Wallet>>;

    async fn list_transactions(&self) -> ApiResult<Vec<Transaction>>;

    async fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<Transaction>;

    async fn list_budgets(&self) -> ApiResult<Vec<BudgetSummary>>;
}
