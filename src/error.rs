//! Error Types
//!
//! `ApiError` covers everything that can go wrong talking to the server,
//! `FieldError` covers form validation. Neither is ever fatal.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request url: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Amount,
    Category,
    Wallet,
    StartDate,
    EndDate,
    NotifyBefore,
    Date,
    TargetWallet,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Amount must be a positive number")]
    AmountNotPositive,

    #[error("Choose a category")]
    CategoryMissing,

    #[error("Category no longer exists")]
    UnknownCategory,

    #[error("Choose a wallet")]
    WalletMissing,

    #[error("Wallet no longer exists")]
    UnknownWallet,

    #[error("Start date is required")]
    StartDateMissing,

    #[error("Start date must be YYYY-MM-DD")]
    StartDateInvalid,

    #[error("End date must be YYYY-MM-DD")]
    EndDateInvalid,

    #[error("End date cannot be before the start date")]
    EndBeforeStart,

    #[error("Notify-before must be a whole number of days")]
    NotifyBeforeInvalid,

    #[error("Date must be YYYY-MM-DD")]
    DateInvalid,

    #[error("Choose a different wallet to transfer to")]
    TransferTargetInvalid,
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::AmountNotPositive => FormField::Amount,
            FieldError::CategoryMissing | FieldError::UnknownCategory => FormField::Category,
            FieldError::WalletMissing | FieldError::UnknownWallet => FormField::Wallet,
            FieldError::StartDateMissing | FieldError::StartDateInvalid => FormField::StartDate,
            FieldError::EndDateInvalid | FieldError::EndBeforeStart => FormField::EndDate,
            FieldError::NotifyBeforeInvalid => FormField::NotifyBefore,
            FieldError::DateInvalid => FormField::Date,
            FieldError::TransferTargetInvalid => FormField::TargetWallet,
        }
    }
}

/// First message for `field`, if any
pub fn message_for(errors: &[FieldError], field: FormField) -> Option<String> {
    errors.iter().find(|e| e.field() == field).map(|e| e.to_string())
}
