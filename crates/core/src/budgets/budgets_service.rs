use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::budgets_model::{Budget, BudgetProgress, BudgetUpdate, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::{CategoryKind, CategoryRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::ledger::{LedgerDirection, LedgerFilter, LedgerRepositoryTrait};
use crate::utils::month_bounds;
use crate::Error;

/// Service for managing budgets and their monthly progress.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            ledger_repository,
        }
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let category = self.category_repository.get_by_id(&new_budget.category_id)?;
        if category.kind != CategoryKind::Expense {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Budgets apply to expense categories; '{}' is an income category",
                category.name
            ))));
        }
        self.repository.create(new_budget).await
    }

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        budget_update.validate()?;
        self.repository.update(budget_update).await
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<()> {
        self.repository.delete(budget_id).await?;
        Ok(())
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.repository.list()
    }

    fn get_budget_progress(&self, today: NaiveDate) -> Result<Vec<BudgetProgress>> {
        let budgets = self.repository.list()?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let category_names: HashMap<String, String> = self
            .category_repository
            .list(Some(CategoryKind::Expense))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let (month_start, month_end) = month_bounds(today);
        let entries = self.ledger_repository.list(&LedgerFilter {
            direction: Some(LedgerDirection::Expense),
            ..LedgerFilter::range(month_start, month_end)
        })?;

        let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
        for entry in &entries {
            if let Some(category_id) = entry.category_id.as_deref() {
                *spent_by_category.entry(category_id).or_insert(Decimal::ZERO) += entry.amount;
            }
        }

        let progress = budgets
            .into_iter()
            .map(|budget| {
                let spent = spent_by_category
                    .get(budget.category_id.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let pct_used = if budget.amount > Decimal::ZERO {
                    (spent / budget.amount * Decimal::ONE_HUNDRED)
                        .to_f64()
                        .unwrap_or(0.0)
                } else {
                    0.0
                };
                let category_name = category_names
                    .get(&budget.category_id)
                    .cloned()
                    .unwrap_or_else(|| budget.category_id.clone());
                BudgetProgress {
                    remaining: budget.amount - spent,
                    category_name,
                    spent,
                    pct_used,
                    budget,
                }
            })
            .collect();

        Ok(progress)
    }
}
