//! Recurrence Form Controller
//!
//! Edit buffer, validation and submission for recurring rules. The controller
//! is plain data so the modal component can keep it in a signal and the whole
//! flow can be exercised without a browser.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::FinanceApi;
use crate::error::{ApiResult, FieldError};
use crate::models::{
    wire_date, Category, Frequency, RecurringPayload, RecurringRule, RuleId, TransactionType, Wallet,
};
use crate::notifications::Notify;

/// Raw form input, kept exactly as typed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecurrenceForm {
    pub amount: String,
    pub kind: TransactionType,
    pub frequency: Frequency,
    pub start_date: String,
    pub end_date: String,
    pub category_id: Option<u32>,
    pub wallet_id: Option<u32>,
    pub notify_before: String,
    pub is_active: bool,
    pub description: String,
}

impl RecurrenceForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            start_date: wire_iso(today),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn from_rule(rule: &RecurringRule) -> Self {
        Self {
            amount: rule.amount.normalize().to_string(),
            kind: rule.kind,
            frequency: rule.frequency,
            start_date: wire_iso(rule.start_date),
            end_date: rule.end_date.map(wire_iso).unwrap_or_default(),
            category_id: Some(rule.category_id),
            wallet_id: Some(rule.wallet_id),
            notify_before: rule.notify_before.map(|d| d.to_string()).unwrap_or_default(),
            is_active: rule.is_active,
            description: rule.description.clone().unwrap_or_default(),
        }
    }

    /// Check every field and build the wire payload, or return all problems found
    pub fn validate(&self, categories: &[Category], wallets: &[Wallet]) -> Result<RecurringPayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.push(FieldError::AmountNotPositive);
        }

        let category_id = match self.category_id {
            None => {
                errors.push(FieldError::CategoryMissing);
                None
            }
            Some(id) if !categories.iter().any(|c| c.id == id) => {
                errors.push(FieldError::UnknownCategory);
                None
            }
            Some(id) => Some(id),
        };

        let wallet_id = match self.wallet_id {
            None => {
                errors.push(FieldError::WalletMissing);
                None
            }
            Some(id) if !wallets.iter().any(|w| w.id == id) => {
                errors.push(FieldError::UnknownWallet);
                None
            }
            Some(id) => Some(id),
        };

        let start_date = if self.start_date.trim().is_empty() {
            errors.push(FieldError::StartDateMissing);
            None
        } else {
            match parse_form_date(&self.start_date) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::StartDateInvalid);
                    None
                }
            }
        };

        let end_date = if self.end_date.trim().is_empty() {
            None
        } else {
            match parse_form_date(&self.end_date) {
                Some(end) => {
                    if start_date.is_some_and(|start| end < start) {
                        errors.push(FieldError::EndBeforeStart);
                    }
                    Some(end)
                }
                None => {
                    errors.push(FieldError::EndDateInvalid);
                    None
                }
            }
        };

        let notify_before = match self.notify_before.trim() {
            "" => None,
            raw => match raw.parse::<u32>() {
                Ok(days) => Some(days),
                Err(_) => {
                    errors.push(FieldError::NotifyBeforeInvalid);
                    None
                }
            },
        };

        match (amount, category_id, wallet_id, start_date) {
            (Some(amount), Some(category_id), Some(wallet_id), Some(start_date)) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(RecurringPayload {
                    amount,
                    kind: self.kind,
                    frequency: self.frequency,
                    start_date,
                    end_date,
                    category_id,
                    wallet_id,
                    notify_before,
                    is_active: self.is_active,
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

pub(crate) fn wire_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Strictly positive decimal
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok().filter(|amount| *amount > Decimal::ZERO)
}

pub(crate) fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Form dates must be a bare date; timestamps are only accepted off the wire
    if raw.len() != 10 {
        return None;
    }
    wire_date::parse(raw).ok()
}

/// A validated request ready to send
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(RecurringPayload),
    Update(RuleId, RecurringPayload),
}

impl SubmitRequest {
    pub async fn send<A: FinanceApi + ?Sized>(&self, api: &A) -> ApiResult<RecurringRule> {
        match self {
            SubmitRequest::Create(payload) => api.create_recurring(payload).await,
            SubmitRequest::Update(id, payload) => api.update_recurring(*id, payload).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed or a submit is already running; nothing was sent
    Blocked,
    /// Saved; the rule list should be refreshed
    Saved(RecurringRule),
    /// The server rejected the request; the form is still open
    Failed,
}

/// State of the create/edit modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecurrenceFormController {
    pub open: bool,
    pub editing: Option<RuleId>,
    pub buffer: RecurrenceForm,
    pub errors: Vec<FieldError>,
    pub submitting: bool,
}

impl RecurrenceFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        *self = Self {
            open: true,
            buffer: RecurrenceForm::blank(today),
            ..Self::default()
        };
    }

    pub fn open_edit(&mut self, rule: &RecurringRule) {
        *self = Self {
            open: true,
            editing: Some(rule.id),
            buffer: RecurrenceForm::from_rule(rule),
            ..Self::default()
        };
    }

    /// Close and drop the edit buffer
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Validate the buffer. On success marks the form as submitting.
    pub fn prepare(&mut self, categories: &[Category], wallets: &[Wallet]) -> Option<SubmitRequest> {
        if self.submitting {
            return None;
        }
        match self.buffer.validate(categories, wallets) {
            Ok(payload) => {
                self.errors.clear();
                self.submitting = true;
                Some(match self.editing {
                    Some(id) => SubmitRequest::Update(id, payload),
                    None => SubmitRequest::Create(payload),
                })
            }
            Err(errors) => {
                log::debug!("recurring form rejected: {:?}", errors);
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the server's answer to a prepared request
    pub fn finish<N: Notify>(&mut self, result: ApiResult<RecurringRule>, notify: &N) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(rule) => {
                let verb = if self.editing.is_some() { "updated" } else { "created" };
                log::info!("recurring rule {} {}", rule.id, verb);
                notify.success(format!("Recurring transaction {}", verb));
                self.close();
                SubmitOutcome::Saved(rule)
            }
            Err(e) => {
                log::error!("saving recurring rule failed: {}", e);
                notify.error("Could not save the recurring transaction. Please try again.");
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, send and apply the result in one go
    pub async fn submit<A, N>(
        &mut self,
        api: &A,
        categories: &[Category],
        wallets: &[Wallet],
        notify: &N,
    ) -> SubmitOutcome
    where
        A: FinanceApi + ?Sized,
        N: Notify,
    {
        let Some(request) = self.prepare(categories, wallets) else {
            return SubmitOutcome::Blocked;
        };
        let result = request.send(api).await;
        self.finish(result, notify)
    }
}

/// Delete a rule and report the result. Returns true when the list should be refreshed.
pub async fn delete_rule<A, N>(api: &A, id: RuleId, notify: &N) -> bool
where
    A: FinanceApi + ?Sized,
    N: Notify,
{
    match api.delete_recurring(id).await {
        Ok(()) => {
            log::info!("recurring rule {} deleted", id);
            notify.success("Recurring transaction deleted");
            true
        }
        Err(e) => {
            log::error!("deleting recurring rule {} failed: {}", id, e);
            notify.error("Could not delete the recurring transaction. Please try again.");
            false
        }
    }
}
