//! Ledger module - immutable income/expense records.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

pub use ledger_model::{LedgerDirection, LedgerEntry, LedgerFilter, NewLedgerEntry};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
