//! Holding domain models and valuation derivation.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::VALUE_PRECISION;
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Kind of holding - determines aggregation sign and unit-economics policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingKind {
    SpendingAccount,
    Cash,
    Investment,
    Crypto,
    Property,
    Receivable,
    Debt,
    Other,
}

impl HoldingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingKind::SpendingAccount => "spending_account",
            HoldingKind::Cash => "cash",
            HoldingKind::Investment => "investment",
            HoldingKind::Crypto => "crypto",
            HoldingKind::Property => "property",
            HoldingKind::Receivable => "receivable",
            HoldingKind::Debt => "debt",
            HoldingKind::Other => "other",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "spending_account" => Ok(HoldingKind::SpendingAccount),
            "cash" => Ok(HoldingKind::Cash),
            "investment" => Ok(HoldingKind::Investment),
            "crypto" => Ok(HoldingKind::Crypto),
            "property" => Ok(HoldingKind::Property),
            "receivable" => Ok(HoldingKind::Receivable),
            "debt" => Ok(HoldingKind::Debt),
            "other" => Ok(HoldingKind::Other),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown holding kind '{}'",
                other
            )))),
        }
    }

    /// Kinds whose value is always derived from quantity × price.
    pub fn is_market_tracked(&self) -> bool {
        matches!(self, HoldingKind::Crypto | HoldingKind::Investment)
    }

    /// Kinds that can be reduced through a settlement payment.
    pub fn is_settleable(&self) -> bool {
        matches!(self, HoldingKind::Debt | HoldingKind::Receivable)
    }

    /// Debt is stored as a positive magnitude and subtracted at
    /// aggregation time. Every other kind adds to net worth.
    pub fn is_liability(&self) -> bool {
        matches!(self, HoldingKind::Debt)
    }
}

impl std::fmt::Display for HoldingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing an asset or liability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub kind: HoldingKind,
    /// Current contribution to net worth, stored as a non-negative
    /// magnitude. Debt receives its sign only during aggregation.
    pub value: Decimal,
    pub quantity: Option<Decimal>,
    pub buy_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    /// External price-feed identifier (e.g. "ethereum").
    pub coin_ref: Option<String>,
    /// Explicit unit-denominated flag for debt/receivable holdings
    /// (a DeFi-style loan measured in coin units).
    pub unit_denominated: bool,
    pub currency: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Holding {
    /// Whether quantity/price fields apply to this holding.
    ///
    /// Unit economics apply to crypto/investment holdings always, and to
    /// debt/receivable holdings only when explicitly flagged.
    pub fn uses_unit_economics(&self) -> bool {
        uses_unit_economics(self.kind, self.unit_denominated)
    }

    /// Derived profit/loss view. Display-only; nothing here is persisted.
    pub fn valuation(&self) -> HoldingValuation {
        let initial_value = initial_value(self.quantity, self.buy_price);
        let current_value = derived_value(self.quantity, self.current_price)
            .unwrap_or(self.value);
        HoldingValuation {
            initial_value,
            current_value,
            profit_loss: current_value - initial_value,
        }
    }
}

pub fn uses_unit_economics(kind: HoldingKind, unit_denominated: bool) -> bool {
    kind.is_market_tracked() || (kind.is_settleable() && unit_denominated)
}

/// Rounds a monetary amount to the base currency's precision,
/// half away from zero.
pub fn round_value(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(VALUE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// `round(quantity × current_price)` when both are present and positive.
pub fn derived_value(quantity: Option<Decimal>, current_price: Option<Decimal>) -> Option<Decimal> {
    match (quantity, current_price) {
        (Some(q), Some(p)) if q > Decimal::ZERO && p > Decimal::ZERO => Some(round_value(q * p)),
        _ => None,
    }
}

/// `round(quantity × buy_price)` when both are present, else zero.
/// Used only for profit/loss display.
pub fn initial_value(quantity: Option<Decimal>, buy_price: Option<Decimal>) -> Decimal {
    match (quantity, buy_price) {
        (Some(q), Some(p)) if q > Decimal::ZERO && p > Decimal::ZERO => round_value(q * p),
        _ => Decimal::ZERO,
    }
}

/// Derived profit/loss figures for a unit-denominated holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub initial_value: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
}

/// Input model for creating a new holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub kind: HoldingKind,
    pub value: Decimal,
    pub quantity: Option<Decimal>,
    pub buy_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub coin_ref: Option<String>,
    #[serde(default)]
    pub unit_denominated: bool,
    pub description: Option<String>,
}

impl NewHolding {
    /// Validates the new holding data.
    pub fn validate(&self) -> Result<()> {
        validate_common(&self.name, self.quantity, self.buy_price, self.current_price)
    }

    /// Applies the unit-economics policy: clears unit fields when they do
    /// not apply, stores the value magnitude positive, and derives the
    /// value from quantity × price when a price is known.
    pub fn normalized(mut self) -> Self {
        let flag = self.kind.is_settleable() && self.unit_denominated;
        self.unit_denominated = flag;
        if uses_unit_economics(self.kind, flag) {
            self.value = derived_value(self.quantity, self.current_price)
                .unwrap_or_else(|| self.value.abs());
        } else {
            self.quantity = None;
            self.buy_price = None;
            self.current_price = None;
            self.coin_ref = None;
            self.value = self.value.abs();
        }
        self
    }
}

/// Input model for updating an existing holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub id: Option<String>,
    pub name: String,
    pub kind: HoldingKind,
    pub value: Decimal,
    pub quantity: Option<Decimal>,
    pub buy_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub coin_ref: Option<String>,
    #[serde(default)]
    pub unit_denominated: bool,
    pub description: Option<String>,
}

impl HoldingUpdate {
    /// Validates the holding update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Holding ID is required for updates".to_string(),
            )));
        }
        validate_common(&self.name, self.quantity, self.buy_price, self.current_price)
    }

    /// Same normalization as [`NewHolding::normalized`].
    pub fn normalized(mut self) -> Self {
        let flag = self.kind.is_settleable() && self.unit_denominated;
        self.unit_denominated = flag;
        if uses_unit_economics(self.kind, flag) {
            self.value = derived_value(self.quantity, self.current_price)
                .unwrap_or_else(|| self.value.abs());
        } else {
            self.quantity = None;
            self.buy_price = None;
            self.current_price = None;
            self.coin_ref = None;
            self.value = self.value.abs();
        }
        self
    }
}

fn validate_common(
    name: &str,
    quantity: Option<Decimal>,
    buy_price: Option<Decimal>,
    current_price: Option<Decimal>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Holding name cannot be empty".to_string(),
        )));
    }
    for (field, amount) in [
        ("quantity", quantity),
        ("buyPrice", buy_price),
        ("currentPrice", current_price),
    ] {
        if let Some(v) = amount {
            if v < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Field '{}' cannot be negative",
                    field
                ))));
            }
        }
    }
    Ok(())
}
