//! Unit tests for settlement planning and the settle/refresh service paths.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::holdings_model::{Holding, HoldingKind, HoldingUpdate, NewHolding};
use super::holdings_model_tests::holding_fixture;
use super::holdings_service::HoldingService;
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use super::settlement::*;
use crate::categories::{Category, CategoryKind, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use crate::errors::{DatabaseError, Result};
use crate::ledger::{LedgerDirection, LedgerEntry, NewLedgerEntry};
use crate::pricing::{PriceFeedError, PriceProviderTrait};
use crate::Error;

fn debt_fixture(value: Decimal) -> Holding {
    holding_fixture(HoldingKind::Debt, value)
}

fn unit_debt_fixture(quantity: Decimal, price: Decimal) -> Holding {
    let mut holding = holding_fixture(HoldingKind::Debt, quantity * price);
    holding.quantity = Some(quantity);
    holding.current_price = Some(price);
    holding.coin_ref = Some("ethereum".to_string());
    holding.unit_denominated = true;
    holding
}

// ============================================================================
// plan_settlement (pure Computed step)
// ============================================================================

#[test]
fn full_settlement_zeroes_value_and_quantity() {
    let holding = unit_debt_fixture(dec!(2), dec!(30_000_000));
    let plan = plan_settlement(&holding, &SettlementMode::Full).unwrap();
    assert_eq!(plan.pay_amount, dec!(60_000_000));
    assert_eq!(plan.new_value, Decimal::ZERO);
    assert_eq!(plan.new_quantity, Some(Decimal::ZERO));
}

#[test]
fn full_settlement_of_manual_debt() {
    let holding = debt_fixture(dec!(1_000_000));
    let plan = plan_settlement(&holding, &SettlementMode::Full).unwrap();
    assert_eq!(plan.pay_amount, dec!(1_000_000));
    assert_eq!(plan.new_value, Decimal::ZERO);
    assert_eq!(plan.new_quantity, None);
}

#[test]
fn partial_currency_settlement_reduces_value() {
    let holding = holding_fixture(HoldingKind::Receivable, dec!(200_000));
    let mode = SettlementMode::Partial(PaymentInput::Currency(dec!(50_000)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.pay_amount, dec!(50_000));
    assert_eq!(plan.new_value, dec!(150_000));
    assert_eq!(plan.new_quantity, None);
}

#[test]
fn partial_unit_settlement_scenario() {
    // 2 ETH debt at 30,000,000/unit, pay 0.5 ETH
    let holding = unit_debt_fixture(dec!(2), dec!(30_000_000));
    let mode = SettlementMode::Partial(PaymentInput::Units(dec!(0.5)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.pay_amount, dec!(15_000_000));
    assert_eq!(plan.new_quantity, Some(dec!(1.5)));
    assert_eq!(plan.new_value, dec!(45_000_000));
}

#[test]
fn partial_currency_on_unit_debt_rederives_quantity() {
    let holding = unit_debt_fixture(dec!(2), dec!(30_000_000));
    let mode = SettlementMode::Partial(PaymentInput::Currency(dec!(15_000_000)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.new_value, dec!(45_000_000));
    assert_eq!(plan.new_quantity, Some(dec!(1.5)));
}

#[test]
fn unit_and_currency_inputs_agree_for_equal_payment() {
    let holding = unit_debt_fixture(dec!(3), dec!(12_345_678));
    let units = dec!(0.75);
    let by_units = plan_settlement(
        &holding,
        &SettlementMode::Partial(PaymentInput::Units(units)),
    )
    .unwrap();
    let by_currency = plan_settlement(
        &holding,
        &SettlementMode::Partial(PaymentInput::Currency(units * dec!(12_345_678))),
    )
    .unwrap();
    // Same economic payment must land on the same value, within rounding.
    let diff = (by_units.new_value - by_currency.new_value).abs();
    assert!(diff <= Decimal::ONE, "diff {} too large", diff);
}

#[test]
fn overpayment_clamps_at_zero_without_capping_payment() {
    let holding = debt_fixture(dec!(100_000));
    let mode = SettlementMode::Partial(PaymentInput::Currency(dec!(150_000)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.pay_amount, dec!(150_000));
    assert_eq!(plan.new_value, Decimal::ZERO);
}

#[test]
fn unit_overpayment_clamps_quantity_at_zero() {
    let holding = unit_debt_fixture(dec!(1), dec!(10_000));
    let mode = SettlementMode::Partial(PaymentInput::Units(dec!(4)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.new_quantity, Some(Decimal::ZERO));
    assert_eq!(plan.new_value, Decimal::ZERO);
    assert_eq!(plan.pay_amount, dec!(40_000));
}

#[test]
fn partial_currency_without_price_keeps_quantity() {
    let mut holding = unit_debt_fixture(dec!(2), dec!(30_000_000));
    holding.current_price = None;
    holding.value = dec!(60_000_000);
    let mode = SettlementMode::Partial(PaymentInput::Currency(dec!(10_000_000)));
    let plan = plan_settlement(&holding, &mode).unwrap();
    assert_eq!(plan.new_value, dec!(50_000_000));
    assert_eq!(plan.new_quantity, Some(dec!(2)));
}

#[test]
fn non_settleable_kinds_are_rejected() {
    let holding = holding_fixture(HoldingKind::Cash, dec!(100));
    let err = plan_settlement(&holding, &SettlementMode::Full).unwrap_err();
    assert!(matches!(err, SettlementError::NotSettleable(_)));
}

#[test]
fn non_positive_inputs_are_rejected() {
    let holding = debt_fixture(dec!(100_000));
    for input in [
        PaymentInput::Currency(Decimal::ZERO),
        PaymentInput::Currency(dec!(-5)),
    ] {
        let err = plan_settlement(&holding, &SettlementMode::Partial(input)).unwrap_err();
        assert!(matches!(err, SettlementError::NonPositiveAmount));
    }
}

#[test]
fn unit_input_requires_unit_denomination_and_price() {
    let manual = debt_fixture(dec!(100_000));
    let err = plan_settlement(
        &manual,
        &SettlementMode::Partial(PaymentInput::Units(dec!(1))),
    )
    .unwrap_err();
    assert!(matches!(err, SettlementError::UnitsUnavailable));

    let mut priceless = unit_debt_fixture(dec!(1), dec!(10));
    priceless.current_price = None;
    let err = plan_settlement(
        &priceless,
        &SettlementMode::Partial(PaymentInput::Units(dec!(1))),
    )
    .unwrap_err();
    assert!(matches!(err, SettlementError::UnitsUnavailable));
}

#[test]
fn settlement_description_and_direction() {
    let debt = debt_fixture(dec!(100));
    assert_eq!(settlement_direction(&debt), LedgerDirection::Expense);
    assert_eq!(
        settlement_description(&debt, &SettlementMode::Full),
        "Pay Fixture (Full)"
    );

    let receivable = holding_fixture(HoldingKind::Receivable, dec!(100));
    assert_eq!(settlement_direction(&receivable), LedgerDirection::Income);
    assert_eq!(
        settlement_description(
            &receivable,
            &SettlementMode::Partial(PaymentInput::Currency(dec!(1)))
        ),
        "Receive Fixture (Partial)"
    );
}

// ============================================================================
// Mock implementations for the service-level (Applied) tests
// ============================================================================

#[derive(Default)]
struct MockHoldingRepository {
    holdings: Mutex<HashMap<String, Holding>>,
    applied: Mutex<Vec<(SettlementWrite, Option<NewLedgerEntry>)>>,
    fail_apply: bool,
}

impl MockHoldingRepository {
    fn with_holding(holding: Holding) -> Self {
        let mut holdings = HashMap::new();
        holdings.insert(holding.id.clone(), holding);
        Self {
            holdings: Mutex::new(holdings),
            ..Self::default()
        }
    }

    fn applied_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }
}

#[async_trait]
impl HoldingRepositoryTrait for MockHoldingRepository {
    async fn create(&self, _new_holding: NewHolding) -> Result<Holding> {
        unimplemented!()
    }

    async fn update(&self, holding_update: HoldingUpdate) -> Result<Holding> {
        let mut holdings = self.holdings.lock().unwrap();
        let id = holding_update.id.clone().unwrap();
        let existing = holdings
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(id.clone())))?;
        let updated = Holding {
            name: holding_update.name,
            kind: holding_update.kind,
            value: holding_update.value,
            quantity: holding_update.quantity,
            buy_price: holding_update.buy_price,
            current_price: holding_update.current_price,
            coin_ref: holding_update.coin_ref,
            unit_denominated: holding_update.unit_denominated,
            description: holding_update.description,
            updated_at: Utc::now().naive_utc(),
            ..existing
        };
        holdings.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, _holding_id: &str) -> Result<usize> {
        unimplemented!()
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        self.holdings
            .lock()
            .unwrap()
            .get(holding_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(holding_id.to_string())))
    }

    fn list(&self, _kind_filter: Option<HoldingKind>) -> Result<Vec<Holding>> {
        Ok(self.holdings.lock().unwrap().values().cloned().collect())
    }

    async fn apply_settlement(
        &self,
        write: SettlementWrite,
        entry: Option<NewLedgerEntry>,
    ) -> Result<(Holding, Option<LedgerEntry>)> {
        if self.fail_apply {
            return Err(Error::Database(DatabaseError::TransactionFailed(
                "disk full".to_string(),
            )));
        }
        let mut holdings = self.holdings.lock().unwrap();
        let mut holding = holdings
            .get(&write.holding_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(write.holding_id.clone())))?;
        holding.value = write.new_value;
        holding.quantity = write.new_quantity;
        holding.updated_at = Utc::now().naive_utc();
        holdings.insert(holding.id.clone(), holding.clone());

        let ledger_entry = entry.as_ref().map(|e| LedgerEntry {
            id: "ledger-1".to_string(),
            direction: e.direction,
            amount: e.amount,
            category_id: e.category_id.clone(),
            holding_id: e.holding_id.clone(),
            description: e.description.clone(),
            date: e.date,
            created_at: Utc::now().naive_utc(),
        });

        self.applied.lock().unwrap().push((write, entry));
        Ok((holding, ledger_entry))
    }
}

struct MockCategoryRepository {
    categories: Vec<Category>,
}

impl MockCategoryRepository {
    fn with(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

fn category_fixture(id: &str, kind: CategoryKind) -> Category {
    Category {
        id: id.to_string(),
        name: format!("Category {}", id),
        kind,
        created_at: Utc::now().naive_utc(),
    }
}

#[async_trait]
impl CategoryRepositoryTrait for MockCategoryRepository {
    async fn create(&self, _new_category: NewCategory) -> Result<Category> {
        unimplemented!()
    }

    async fn update(&self, _category_update: CategoryUpdate) -> Result<Category> {
        unimplemented!()
    }

    async fn delete(&self, _category_id: &str) -> Result<usize> {
        unimplemented!()
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(category_id.to_string())))
    }

    fn list(&self, kind_filter: Option<CategoryKind>) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .iter()
            .filter(|c| kind_filter.map_or(true, |k| c.kind == k))
            .cloned()
            .collect())
    }
}

struct MockPriceProvider {
    price: Option<Decimal>,
}

#[async_trait]
impl PriceProviderTrait for MockPriceProvider {
    async fn fetch_price(&self, coin_ref: &str) -> std::result::Result<Decimal, PriceFeedError> {
        self.price
            .ok_or_else(|| PriceFeedError::MissingPrice(coin_ref.to_string()))
    }
}

fn service_with(
    repository: Arc<MockHoldingRepository>,
    categories: Vec<Category>,
    price: Option<Decimal>,
) -> HoldingService {
    HoldingService::new(
        repository,
        Arc::new(MockCategoryRepository::with(categories)),
        Arc::new(MockPriceProvider { price }),
    )
}

// ============================================================================
// Service-level settlement tests
// ============================================================================

#[tokio::test]
async fn full_settlement_records_expense_entry() {
    let repository = Arc::new(MockHoldingRepository::with_holding(debt_fixture(
        dec!(1_000_000),
    )));
    let service = service_with(
        repository.clone(),
        vec![category_fixture("cat-exp", CategoryKind::Expense)],
        None,
    );

    let outcome = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Full,
                record_transaction: true,
                category_id: Some("cat-exp".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.holding.value, Decimal::ZERO);
    assert_eq!(outcome.pay_amount, dec!(1_000_000));
    let entry = outcome.ledger_entry.expect("entry should be recorded");
    assert_eq!(entry.direction, LedgerDirection::Expense);
    assert_eq!(entry.amount, dec!(1_000_000));
    assert_eq!(entry.category_id.as_deref(), Some("cat-exp"));
    assert_eq!(entry.holding_id.as_deref(), Some("h-1"));
    assert_eq!(entry.description.as_deref(), Some("Pay Fixture (Full)"));
}

#[tokio::test]
async fn receivable_settlement_records_income_entry() {
    let holding = holding_fixture(HoldingKind::Receivable, dec!(200_000));
    let repository = Arc::new(MockHoldingRepository::with_holding(holding));
    let service = service_with(
        repository.clone(),
        vec![category_fixture("cat-inc", CategoryKind::Income)],
        None,
    );

    let outcome = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Partial(PaymentInput::Currency(dec!(50_000))),
                record_transaction: true,
                category_id: Some("cat-inc".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.holding.value, dec!(150_000));
    let entry = outcome.ledger_entry.unwrap();
    assert_eq!(entry.direction, LedgerDirection::Income);
    assert_eq!(entry.amount, dec!(50_000));
    assert_eq!(entry.category_id.as_deref(), Some("cat-inc"));
}

#[tokio::test]
async fn settlement_without_recording_skips_ledger() {
    let repository = Arc::new(MockHoldingRepository::with_holding(debt_fixture(
        dec!(500_000),
    )));
    let service = service_with(repository.clone(), vec![], None);

    let outcome = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Partial(PaymentInput::Currency(dec!(100_000))),
                record_transaction: false,
                category_id: None,
            },
        )
        .await
        .unwrap();

    assert!(outcome.ledger_entry.is_none());
    assert_eq!(outcome.holding.value, dec!(400_000));
    // The holding write still happened.
    assert_eq!(repository.applied_count(), 1);
    let (_, entry) = &repository.applied.lock().unwrap()[0];
    assert!(entry.is_none());
}

#[tokio::test]
async fn recording_without_category_is_rejected_before_any_write() {
    let repository = Arc::new(MockHoldingRepository::with_holding(debt_fixture(
        dec!(500_000),
    )));
    let service = service_with(repository.clone(), vec![], None);

    let err = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Full,
                record_transaction: true,
                category_id: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Settlement(SettlementError::CategoryRequired)
    ));
    assert_eq!(repository.applied_count(), 0);
    assert_eq!(repository.get_by_id("h-1").unwrap().value, dec!(500_000));
}

#[tokio::test]
async fn category_of_wrong_kind_is_rejected_before_any_write() {
    let repository = Arc::new(MockHoldingRepository::with_holding(debt_fixture(
        dec!(500_000),
    )));
    let service = service_with(
        repository.clone(),
        vec![category_fixture("cat-inc", CategoryKind::Income)],
        None,
    );

    let err = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Full,
                record_transaction: true,
                category_id: Some("cat-inc".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Settlement(SettlementError::CategoryKindMismatch(_, _))
    ));
    assert_eq!(repository.applied_count(), 0);
}

#[tokio::test]
async fn failed_apply_surfaces_error_and_leaves_holding_untouched() {
    let mut repository = MockHoldingRepository::with_holding(debt_fixture(dec!(500_000)));
    repository.fail_apply = true;
    let repository = Arc::new(repository);
    let service = service_with(repository.clone(), vec![], None);

    let err = service
        .settle_holding(
            "h-1",
            SettlementRequest {
                mode: SettlementMode::Full,
                record_transaction: false,
                category_id: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Database(_)));
    assert_eq!(repository.get_by_id("h-1").unwrap().value, dec!(500_000));
}

// ============================================================================
// Price refresh
// ============================================================================

#[tokio::test]
async fn refresh_price_recomputes_value() {
    let mut holding = holding_fixture(HoldingKind::Crypto, dec!(50_000_000));
    holding.quantity = Some(dec!(0.5));
    holding.current_price = Some(dec!(100_000_000));
    holding.coin_ref = Some("bitcoin".to_string());
    let repository = Arc::new(MockHoldingRepository::with_holding(holding));
    let service = service_with(repository.clone(), vec![], Some(dec!(120_000_000)));

    let updated = service.refresh_price("h-1").await.unwrap();
    assert_eq!(updated.current_price, Some(dec!(120_000_000)));
    assert_eq!(updated.value, dec!(60_000_000));
}

#[tokio::test]
async fn refresh_price_failure_leaves_holding_untouched() {
    let mut holding = holding_fixture(HoldingKind::Crypto, dec!(50_000_000));
    holding.quantity = Some(dec!(0.5));
    holding.current_price = Some(dec!(100_000_000));
    holding.coin_ref = Some("bitcoin".to_string());
    let repository = Arc::new(MockHoldingRepository::with_holding(holding));
    let service = service_with(repository.clone(), vec![], None);

    let err = service.refresh_price("h-1").await.unwrap_err();
    assert!(matches!(err, Error::PriceFeed(_)));

    let stored = repository.get_by_id("h-1").unwrap();
    assert_eq!(stored.current_price, Some(dec!(100_000_000)));
    assert_eq!(stored.value, dec!(50_000_000));
}

#[tokio::test]
async fn refresh_price_requires_coin_ref() {
    let repository = Arc::new(MockHoldingRepository::with_holding(holding_fixture(
        HoldingKind::Cash,
        dec!(100),
    )));
    let service = service_with(repository, vec![], Some(dec!(1)));

    let err = service.refresh_price("h-1").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
