//! Holdings module - assets and liabilities, valuation, and settlement.

mod holdings_model;
mod holdings_service;
mod holdings_traits;
mod settlement;

#[cfg(test)]
mod settlement_tests;

pub use holdings_model::{
    derived_value, initial_value, round_value, uses_unit_economics, Holding, HoldingKind,
    HoldingUpdate, HoldingValuation, NewHolding,
};
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
pub use settlement::{
    plan_settlement, settlement_description, settlement_direction, PaymentInput, SettlementError,
    SettlementMode, SettlementOutcome, SettlementPlan, SettlementRequest, SettlementWrite,
};
