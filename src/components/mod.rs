//! UI Components
//!
//! Leptos components for the recurring and transaction pages.

mod delete_confirm_button;
mod field_message;
mod log_panel;
mod recurring_form;
mod recurring_page;
mod toast_stack;
mod transactions_page;
mod type_selector;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field_message::FieldMessage;
pub use log_panel::LogPanel;
pub use recurring_form::RecurringFormModal;
pub use recurring_page::RecurringPage;
pub use toast_stack::ToastStack;
pub use transactions_page::TransactionsPage;
pub use type_selector::{FrequencySelector, TypeSelector};
