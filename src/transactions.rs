//! Transaction Entry
//!
//! Quick-add form for transactions plus the create → budget check → refresh
//! sequence that follows every successful write.

use chrono::NaiveDate;

use crate::alerts::{check_budget, AlertState};
use crate::api::FinanceApi;
use crate::error::{ApiResult, FieldError};
use crate::models::{
    BudgetSummary, Category, NewTransaction, Transaction, TransactionType, Wallet,
};
use crate::notifications::Notify;
use crate::recurrence::{parse_amount, parse_form_date, wire_iso};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionForm {
    pub amount: String,
    pub kind: TransactionType,
    pub wallet_id: Option<u32>,
    pub category_id: Option<u32>,
    pub to_wallet_id: Option<u32>,
    pub date: String,
    pub note: String,
}

impl TransactionForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: wire_iso(today),
            ..Default::default()
        }
    }

    pub fn validate(&self, categories: &[Category], wallets: &[Wallet]) -> Result<NewTransaction, Vec<FieldError>> {
        let mut errors = Vec::new();

        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.push(FieldError::AmountNotPositive);
        }

        match self.wallet_id {
            None => errors.push(FieldError::WalletMissing),
            Some(id) if !wallets.iter().any(|w| w.id == id) => errors.push(FieldError::UnknownWallet),
            Some(_) => {}
        }

        // Transfers never carry a category, even if one was picked before switching type
        let category_id = self.category_id.filter(|_| self.kind != TransactionType::Transfer);
        if let Some(id) = category_id {
            if !categories.iter().any(|c| c.id == id) {
                errors.push(FieldError::UnknownCategory);
            }
        }

        let to_wallet_id = if self.kind == TransactionType::Transfer {
            match self.to_wallet_id {
                Some(to) if Some(to) != self.wallet_id && wallets.iter().any(|w| w.id == to) => Some(to),
                _ => {
                    errors.push(FieldError::TransferTargetInvalid);
                    None
                }
            }
        } else {
            None
        };

        let date = parse_form_date(&self.date);
        if date.is_none() {
            errors.push(FieldError::DateInvalid);
        }

        match (amount, self.wallet_id, date) {
            (Some(amount), Some(wallet_id), Some(date)) if errors.is_empty() => {
                let note = self.note.trim();
                Ok(NewTransaction {
                    amount,
                    kind: self.kind,
                    wallet_id,
                    category_id,
                    to_wallet_id,
                    date,
                    note: (!note.is_empty()).then(|| note.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub transaction: Transaction,
    pub alert: AlertState,
}

/// Create the transaction, then run the budget check.
///
/// Only the create itself can fail; the budget check never turns a saved
/// transaction into an error.
pub async fn create_with_budget_check<A, N>(
    api: &A,
    txn: &NewTransaction,
    categories: &[Category],
    notify: &N,
) -> ApiResult<Created>
where
    A: FinanceApi + ?Sized,
    N: Notify,
{
    let transaction = match api.create_transaction(txn).await {
        Ok(t) => t,
        Err(e) => {
            log::error!("creating transaction failed: {}", e);
            notify.error("Could not save the transaction. Please try again.");
            return Err(e);
        }
    };
    log::info!("transaction {} created", transaction.id);
    notify.success("Transaction added");

    let alert = check_budget(api, &transaction, categories, notify).await;
    Ok(Created { transaction, alert })
}

/// Lists re-read after a write. A list that failed to load is `None` and the
/// cached copy stays as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refreshed {
    pub transactions: Option<Vec<Transaction>>,
    pub wallets: Option<Vec<Wallet>>,
    pub budgets: Option<Vec<BudgetSummary>>,
}

pub async fn refresh_after_write<A: FinanceApi + ?Sized>(api: &A) -> Refreshed {
    fn keep<T>(what: &str, result: ApiResult<T>) -> Option<T> {
        result
            .map_err(|e| log::warn!("refreshing {} failed: {}", what, e))
            .ok()
    }

    Refreshed {
        transactions: keep("transactions", api.list_transactions().await),
        wallets: keep("wallets", api.list_wallets().await),
        budgets: keep("budgets", api.list_budgets().await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertLevel;
    use crate::api::fake::FakeApi;
    use crate::notifications::testing::RecordingNotify;
    use crate::notifications::Severity;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn wallets() -> Vec<Wallet> {
        vec![
            Wallet { id: 1, name: "Main".into(), balance: Decimal::new(2_000_000, 0), currency: Some("VND".into()) },
            Wallet { id: 2, name: "Savings".into(), balance: Decimal::ZERO, currency: None },
        ]
    }

    fn categories() -> Vec<Category> {
        vec![Category { id: 7, name: "Dining".into(), kind: Some(TransactionType::Expense) }]
    }

    fn near_limit_budget() -> BudgetSummary {
        BudgetSummary {
            category_id: 7,
            category_name: None,
            usage_percentage: 96.0,
            is_near_limit: true,
            is_exceeded: false,
            limit_amount: None,
            spent_amount: None,
        }
    }

    fn expense(category_id: Option<u32>) -> NewTransaction {
        NewTransaction {
            amount: Decimal::new(500_000, 0),
            kind: TransactionType::Expense,
            wallet_id: 1,
            category_id,
            to_wallet_id: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            note: None,
        }
    }

    fn api() -> FakeApi {
        FakeApi::new()
            .with_wallets(wallets())
            .with_categories(categories())
            .with_budgets(vec![near_limit_budget()])
    }

    #[test]
    fn test_form_maps_to_payload() {
        let form = TransactionForm {
            amount: "500000".into(),
            kind: TransactionType::Expense,
            wallet_id: Some(1),
            category_id: Some(7),
            to_wallet_id: Some(2),
            date: "2026-10-19".into(),
            note: " lunch ".into(),
        };
        let payload = form.validate(&categories(), &wallets()).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "amount": 500000.0,
                "type": "EXPENSE",
                "wallet_id": 1,
                "category_id": 7,
                "date": "2026-10-19",
                "note": "lunch"
            })
        );
    }

    #[test]
    fn test_transfer_needs_other_wallet() {
        let mut form = TransactionForm {
            amount: "10".into(),
            kind: TransactionType::Transfer,
            wallet_id: Some(1),
            to_wallet_id: Some(1),
            ..TransactionForm::blank(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        };
        assert_eq!(
            form.validate(&categories(), &wallets()).unwrap_err(),
            vec![FieldError::TransferTargetInvalid]
        );

        form.to_wallet_id = Some(2);
        assert_eq!(form.validate(&categories(), &wallets()).unwrap().to_wallet_id, Some(2));
    }

    #[tokio::test]
    async fn test_transfer_drops_hidden_category() {
        let form = TransactionForm {
            amount: "50".into(),
            kind: TransactionType::Transfer,
            wallet_id: Some(1),
            category_id: Some(7),
            to_wallet_id: Some(2),
            ..TransactionForm::blank(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        };
        let payload = form.validate(&categories(), &wallets()).unwrap();
        assert_eq!(payload.category_id, None);
        assert_eq!(serde_json::to_value(&payload).unwrap()["category_id"], json!(null));

        let over = BudgetSummary { usage_percentage: 120.0, is_exceeded: true, ..near_limit_budget() };
        let api = FakeApi::new().with_wallets(wallets()).with_budgets(vec![over]);
        let notify = RecordingNotify::default();
        let created = create_with_budget_check(&api, &payload, &categories(), &notify).await.unwrap();

        assert_eq!(created.alert, AlertState::Idle);
        assert_eq!(api.called("list_budgets"), 0);
        assert!(notify.of(Severity::Error).is_empty());
    }

    #[test]
    fn test_form_errors() {
        let form = TransactionForm {
            amount: "0".into(),
            category_id: Some(3),
            date: "19.10.2026".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(&categories(), &wallets()).unwrap_err(),
            vec![
                FieldError::AmountNotPositive,
                FieldError::WalletMissing,
                FieldError::UnknownCategory,
                FieldError::DateInvalid,
            ]
        );
    }

    #[tokio::test]
    async fn test_near_limit_example() {
        let api = api();
        let notify = RecordingNotify::default();

        let created = create_with_budget_check(&api, &expense(Some(7)), &categories(), &notify)
            .await
            .unwrap();

        assert_eq!(created.alert, AlertState::Notified(AlertLevel::NearLimit));
        let warnings = notify.of(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Dining") && warnings[0].contains("96%"));
        assert!(notify.of(Severity::Error).is_empty());
        assert_eq!(*api.calls.borrow(), vec!["create_transaction", "list_budgets"]);
    }

    #[tokio::test]
    async fn test_no_category_no_budget_check() {
        let api = api();
        let notify = RecordingNotify::default();

        let created = create_with_budget_check(&api, &expense(None), &categories(), &notify)
            .await
            .unwrap();

        assert_eq!(created.alert, AlertState::Idle);
        assert_eq!(api.called("list_budgets"), 0);
        assert_eq!(notify.of(Severity::Success).len(), 1);
        assert_eq!(notify.count(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_skips_budget_check() {
        let api = api();
        api.fail_writes.set(true);
        let notify = RecordingNotify::default();

        let result = create_with_budget_check(&api, &expense(Some(7)), &categories(), &notify).await;

        assert!(result.is_err());
        assert_eq!(api.called("list_budgets"), 0);
        assert_eq!(notify.of(Severity::Error).len(), 1);
        assert!(notify.of(Severity::Warning).is_empty());
    }

    #[tokio::test]
    async fn test_budget_outage_still_refreshes_transactions() {
        let api = api();
        api.fail_budgets.set(true);
        let notify = RecordingNotify::default();

        let created = create_with_budget_check(&api, &expense(Some(7)), &categories(), &notify)
            .await
            .unwrap();
        let refreshed = refresh_after_write(&api).await;

        assert_eq!(created.alert, AlertState::Idle);
        assert!(notify.of(Severity::Error).is_empty());
        assert_eq!(refreshed.transactions, Some(vec![created.transaction]));
        assert_eq!(refreshed.wallets.map(|w| w.len()), Some(2));
        assert_eq!(refreshed.budgets, None);
    }
}
