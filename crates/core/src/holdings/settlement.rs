//! Debt/receivable settlement: payment planning and its outcome types.
//!
//! A settlement action moves through `AwaitingInput → Computed → Applied`.
//! [`plan_settlement`] is the pure `Computed` step; the service applies the
//! resulting plan atomically together with the optional ledger entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::holdings_model::{round_value, Holding};
use crate::constants::QUANTITY_PRECISION;
use crate::ledger::{LedgerDirection, LedgerEntry};

/// Errors specific to the settlement workflow.
#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("Holding '{0}' is not a debt or receivable")]
    NotSettleable(String),

    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    #[error("Unit-based payment requires a unit-denominated holding with a known price")]
    UnitsUnavailable,

    #[error("A category is required when recording the settlement as a transaction")]
    CategoryRequired,

    #[error("Category '{0}' cannot record {1} entries")]
    CategoryKindMismatch(String, LedgerDirection),
}

/// How the payment amount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentInput {
    /// Amount in the base currency.
    Currency(Decimal),
    /// Amount in holding units; only valid for unit-denominated holdings
    /// with a known positive price.
    Units(Decimal),
}

/// Settlement mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettlementMode {
    /// Pay off the entire remaining balance.
    Full,
    /// Pay part of the balance.
    Partial(PaymentInput),
}

impl SettlementMode {
    fn scope_label(&self) -> &'static str {
        match self {
            SettlementMode::Full => "Full",
            SettlementMode::Partial(_) => "Partial",
        }
    }
}

/// A settlement action as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    pub mode: SettlementMode,
    /// When true, a ledger entry is created for the payment and
    /// `category_id` becomes mandatory.
    pub record_transaction: bool,
    pub category_id: Option<String>,
}

/// The computed state of a settlement: what will be paid and what the
/// holding will look like afterwards. Nothing is persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPlan {
    pub pay_amount: Decimal,
    pub new_value: Decimal,
    /// `None` for holdings without unit economics; the stored quantity
    /// column is nulled in that case.
    pub new_quantity: Option<Decimal>,
}

/// The holding-side write of an applied settlement.
#[derive(Debug, Clone)]
pub struct SettlementWrite {
    pub holding_id: String,
    pub new_value: Decimal,
    pub new_quantity: Option<Decimal>,
}

/// Result of an applied settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementOutcome {
    pub holding: Holding,
    pub pay_amount: Decimal,
    pub ledger_entry: Option<LedgerEntry>,
}

/// Computes the payment amount and the holding's post-settlement state.
///
/// Overpayment is not clamped against the remaining balance: the payment
/// stands as entered, and the resulting value/quantity clamp at zero.
pub fn plan_settlement(
    holding: &Holding,
    mode: &SettlementMode,
) -> std::result::Result<SettlementPlan, SettlementError> {
    if !holding.kind.is_settleable() {
        return Err(SettlementError::NotSettleable(holding.id.clone()));
    }

    let unit_mode = holding.uses_unit_economics();
    let price = holding.current_price.unwrap_or(Decimal::ZERO);

    match mode {
        SettlementMode::Full => Ok(SettlementPlan {
            pay_amount: holding.value,
            new_value: Decimal::ZERO,
            new_quantity: unit_mode.then_some(Decimal::ZERO),
        }),
        SettlementMode::Partial(PaymentInput::Currency(amount)) => {
            if *amount <= Decimal::ZERO {
                return Err(SettlementError::NonPositiveAmount);
            }
            let new_value = (holding.value - amount).max(Decimal::ZERO);
            let new_quantity = if unit_mode {
                if price > Decimal::ZERO {
                    Some((new_value / price).round_dp(QUANTITY_PRECISION))
                } else {
                    holding.quantity
                }
            } else {
                None
            };
            Ok(SettlementPlan {
                pay_amount: round_value(*amount),
                new_value,
                new_quantity,
            })
        }
        SettlementMode::Partial(PaymentInput::Units(units)) => {
            if *units <= Decimal::ZERO {
                return Err(SettlementError::NonPositiveAmount);
            }
            if !unit_mode || price <= Decimal::ZERO {
                return Err(SettlementError::UnitsUnavailable);
            }
            let current_quantity = holding.quantity.unwrap_or(Decimal::ZERO);
            let new_quantity = (current_quantity - units).max(Decimal::ZERO);
            Ok(SettlementPlan {
                pay_amount: round_value(units * price),
                new_value: round_value(new_quantity * price),
                new_quantity: Some(new_quantity),
            })
        }
    }
}

/// Direction of the ledger entry recorded for a settlement: paying a debt
/// is an expense, collecting a receivable is income.
pub fn settlement_direction(holding: &Holding) -> LedgerDirection {
    if holding.kind.is_liability() {
        LedgerDirection::Expense
    } else {
        LedgerDirection::Income
    }
}

/// Auto-composed ledger description, e.g. "Pay Aave loan (Partial)".
pub fn settlement_description(holding: &Holding, mode: &SettlementMode) -> String {
    let verb = match settlement_direction(holding) {
        LedgerDirection::Expense => "Pay",
        LedgerDirection::Income => "Receive",
    };
    format!("{} {} ({})", verb, holding.name, mode.scope_label())
}
