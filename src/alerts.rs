//! Budget Alert Trigger
//!
//! Runs after a transaction was created: re-reads the budget summaries and
//! warns when the transaction's category is close to or over its limit. The
//! check is best effort; a failed read is logged and otherwise ignored.

use crate::api::FinanceApi;
use crate::models::{category_name, BudgetSummary, Category, CategoryId, Transaction};
use crate::notifications::{Notify, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    NearLimit,
    Exceeded,
}

impl AlertLevel {
    /// Exceeded wins when both flags are set
    pub fn classify(budget: &BudgetSummary) -> Option<Self> {
        if budget.is_exceeded {
            Some(AlertLevel::Exceeded)
        } else if budget.is_near_limit {
            Some(AlertLevel::NearLimit)
        } else {
            None
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AlertLevel::Exceeded => Severity::Error,
            AlertLevel::NearLimit => Severity::Warning,
        }
    }
}

/// Where a single submission's budget check ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Idle,
    AwaitingBudgetData { category_id: CategoryId },
    Notified(AlertLevel),
}

/// Toast text for a budget alert
pub fn alert_message(level: AlertLevel, category: &str, usage_percentage: f64) -> String {
    let percent = usage_percentage.round() as i64;
    match level {
        AlertLevel::Exceeded => format!("Budget exceeded for {}: {}% used", category, percent),
        AlertLevel::NearLimit => format!("Budget for {} is nearly used up: {}% used", category, percent),
    }
}

/// Check the budget of `txn`'s category and raise at most one notification
pub async fn check_budget<A, N>(api: &A, txn: &Transaction, categories: &[Category], notify: &N) -> AlertState
where
    A: FinanceApi + ?Sized,
    N: Notify,
{
    let Some(category_id) = txn.category_id else {
        return AlertState::Idle;
    };
    let state = AlertState::AwaitingBudgetData { category_id };
    log::debug!("transaction {}: {:?}", txn.id, state);

    let budgets = match api.list_budgets().await {
        Ok(budgets) => budgets,
        Err(e) => {
            log::warn!("budget check after transaction {} skipped: {}", txn.id, e);
            return AlertState::Idle;
        }
    };

    let Some(budget) = budgets.iter().find(|b| b.category_id == category_id) else {
        return AlertState::Idle;
    };
    let Some(level) = AlertLevel::classify(budget) else {
        return AlertState::Idle;
    };

    let name = budget
        .category_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| category_name(categories, category_id));
    log::info!(
        "budget alert {:?} for category {} at {:.1}%",
        level,
        category_id,
        budget.usage_percentage
    );
    notify.notify(level.severity(), alert_message(level, &name, budget.usage_percentage));
    AlertState::Notified(level)
}
