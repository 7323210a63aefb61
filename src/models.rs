//! Frontend Models
//!
//! Wire structures for the finance API. Every response is decoded into one of
//! these, so a malformed payload fails at the boundary instead of deep in a view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type RuleId = u32;
pub type CategoryId = u32;
pub type WalletId = u32;
pub type TransactionId = u32;

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [Self::Income, Self::Expense, Self::Transfer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Transfer => "TRANSFER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Transfer => "Transfer",
        }
    }
}

/// How often a recurring rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

/// Recurring transaction rule (server owned)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: RuleId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub frequency: Frequency,
    #[serde(deserialize_with = "wire_date::deserialize")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "wire_date::deserialize_option")]
    pub end_date: Option<NaiveDate>,
    pub category_id: CategoryId,
    pub wallet_id: WalletId,
    /// Days before the next occurrence to start reminding
    #[serde(default)]
    pub notify_before: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Computed by the server
    #[serde(default, deserialize_with = "wire_date::deserialize_option")]
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of POST/PATCH /recurring-transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category_id: CategoryId,
    pub wallet_id: WalletId,
    pub notify_before: Option<u32>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Budget utilization snapshot, recomputed server-side after every write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub category_id: CategoryId,
    #[serde(default)]
    pub category_name: Option<String>,
    pub usage_percentage: f64,
    pub is_near_limit: bool,
    pub is_exceeded: bool,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub limit_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub spent_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub wallet_id: WalletId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub to_wallet_id: Option<WalletId>,
    #[serde(deserialize_with = "wire_date::deserialize")]
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

/// Body of POST /transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub wallet_id: WalletId,
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_wallet_id: Option<WalletId>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Name for a category id, falling back to a placeholder for unknown ids
pub fn category_name(categories: &[Category], id: CategoryId) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("category #{}", id))
}

/// Dates arrive either as `YYYY-MM-DD` or as a full ISO-8601 timestamp.
pub(crate) mod wire_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(s: &str) -> Result<NaiveDate, chrono::ParseError> {
        let s = s.trim();
        let head = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(head, "%Y-%m-%d")
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid date {:?}: {}", raw, e)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid date {:?}: {}", raw, e))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_decodes_timestamps_and_defaults() {
        let rule: RecurringRule = serde_json::from_value(json!({
            "id": 3,
            "amount": 1200.5,
            "type": "EXPENSE",
            "frequency": "MONTHLY",
            "start_date": "2026-01-31T00:00:00Z",
            "end_date": null,
            "category_id": 7,
            "wallet_id": 2,
            "next_date": "2026-11-30"
        }))
        .unwrap();

        assert_eq!(rule.start_date, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(rule.end_date, None);
        assert_eq!(rule.next_date, NaiveDate::from_ymd_opt(2026, 11, 30));
        assert_eq!(rule.amount, Decimal::new(12005, 1));
        assert!(rule.is_active);
        assert_eq!(rule.notify_before, None);
    }

    #[test]
    fn test_rule_rejects_bad_date() {
        let result: Result<RecurringRule, _> = serde_json::from_value(json!({
            "id": 1,
            "amount": 10,
            "type": "INCOME",
            "frequency": "DAILY",
            "start_date": "31/01/2026",
            "category_id": 1,
            "wallet_id": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_budget_requires_flags() {
        let missing: Result<BudgetSummary, _> = serde_json::from_value(json!({
            "category_id": 7,
            "usage_percentage": 96.0
        }));
        assert!(missing.is_err());

        let budget: BudgetSummary = serde_json::from_value(json!({
            "category_id": 7,
            "usage_percentage": 96.2,
            "is_near_limit": true,
            "is_exceeded": false,
            "limit_amount": 1000000
        }))
        .unwrap();
        assert!(budget.is_near_limit);
        assert_eq!(budget.limit_amount, Some(Decimal::new(1_000_000, 0)));
        assert_eq!(budget.spent_amount, None);
    }

    #[test]
    fn test_category_name_fallback() {
        let cats = vec![Category { id: 1, name: "Food".into(), kind: None }];
        assert_eq!(category_name(&cats, 1), "Food");
        assert_eq!(category_name(&cats, 9), "category #9");
    }
}
