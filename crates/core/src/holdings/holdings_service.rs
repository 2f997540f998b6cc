use chrono::Local;
use log::{debug, warn};
use std::sync::Arc;

use super::holdings_model::{Holding, HoldingKind, HoldingUpdate, NewHolding};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use super::settlement::{
    plan_settlement, settlement_description, settlement_direction, SettlementError,
    SettlementOutcome, SettlementRequest, SettlementWrite,
};
use crate::categories::{CategoryKind, CategoryRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::ledger::NewLedgerEntry;
use crate::pricing::PriceProviderTrait;
use crate::Error;

/// Service for managing holdings: CRUD, price refresh, and settlement.
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    price_provider: Arc<dyn PriceProviderTrait>,
}

impl HoldingService {
    pub fn new(
        repository: Arc<dyn HoldingRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        price_provider: Arc<dyn PriceProviderTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            price_provider,
        }
    }
}

#[async_trait::async_trait]
impl HoldingServiceTrait for HoldingService {
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        self.repository.create(new_holding.normalized()).await
    }

    async fn update_holding(&self, holding_update: HoldingUpdate) -> Result<Holding> {
        holding_update.validate()?;
        self.repository.update(holding_update.normalized()).await
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<()> {
        self.repository.delete(holding_id).await?;
        Ok(())
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.repository.get_by_id(holding_id)
    }

    fn list_holdings(&self, kind_filter: Option<HoldingKind>) -> Result<Vec<Holding>> {
        self.repository.list(kind_filter)
    }

    async fn refresh_price(&self, holding_id: &str) -> Result<Holding> {
        let holding = self.repository.get_by_id(holding_id)?;
        let coin_ref = holding
            .coin_ref
            .clone()
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("coinRef".into())))?;

        // Nothing is written until the feed has answered; a failure here
        // propagates without touching the stored holding.
        let price = self.price_provider.fetch_price(&coin_ref).await.map_err(|e| {
            warn!("Price refresh for {} ({}) failed: {}", holding.id, coin_ref, e);
            e
        })?;

        debug!("Refreshed price for {}: {} {}", coin_ref, price, holding.currency);

        let update = HoldingUpdate {
            id: Some(holding.id.clone()),
            name: holding.name,
            kind: holding.kind,
            value: holding.value,
            quantity: holding.quantity,
            buy_price: holding.buy_price,
            current_price: Some(price),
            coin_ref: Some(coin_ref),
            unit_denominated: holding.unit_denominated,
            description: holding.description,
        };
        self.repository.update(update.normalized()).await
    }

    async fn settle_holding(
        &self,
        holding_id: &str,
        request: SettlementRequest,
    ) -> Result<SettlementOutcome> {
        let holding = self.repository.get_by_id(holding_id)?;
        let plan = plan_settlement(&holding, &request.mode)?;

        // All validation happens before any write is attempted.
        let entry = if request.record_transaction {
            let category_id = request
                .category_id
                .clone()
                .ok_or(SettlementError::CategoryRequired)?;
            let direction = settlement_direction(&holding);
            let category = self.category_repository.get_by_id(&category_id)?;
            if category.kind != CategoryKind::from(direction) {
                return Err(SettlementError::CategoryKindMismatch(category_id, direction).into());
            }
            Some(NewLedgerEntry {
                id: None,
                direction,
                amount: plan.pay_amount,
                category_id: Some(category_id),
                holding_id: Some(holding.id.clone()),
                description: Some(settlement_description(&holding, &request.mode)),
                date: Local::now().date_naive(),
            })
        } else {
            None
        };

        debug!(
            "Settling {}: pay {} -> value {}, quantity {:?}",
            holding.id, plan.pay_amount, plan.new_value, plan.new_quantity
        );

        let write = SettlementWrite {
            holding_id: holding.id.clone(),
            new_value: plan.new_value,
            new_quantity: plan.new_quantity,
        };
        let (updated, ledger_entry) = self.repository.apply_settlement(write, entry).await?;

        Ok(SettlementOutcome {
            holding: updated,
            pay_amount: plan.pay_amount,
            ledger_entry,
        })
    }
}
