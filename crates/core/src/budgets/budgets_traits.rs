//! Budget repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::budgets_model::{Budget, BudgetProgress, BudgetUpdate, NewBudget};
use crate::errors::Result;

/// Trait defining the contract for Budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Creates a new budget.
    async fn create(&self, new_budget: NewBudget) -> Result<Budget>;

    /// Updates an existing budget's amount and period.
    async fn update(&self, budget_update: BudgetUpdate) -> Result<Budget>;

    /// Deletes a budget by its ID. Returns the number of deleted records.
    async fn delete(&self, budget_id: &str) -> Result<usize>;

    /// Retrieves a budget by its ID.
    fn get_by_id(&self, budget_id: &str) -> Result<Budget>;

    /// Lists budgets, newest first.
    fn list(&self) -> Result<Vec<Budget>>;
}

/// Trait defining the contract for Budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Creates a new budget after checking the category exists and is an
    /// expense category.
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;

    /// Updates an existing budget.
    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget>;

    /// Deletes a budget by its ID.
    async fn delete_budget(&self, budget_id: &str) -> Result<()>;

    /// Lists budgets, newest first.
    fn list_budgets(&self) -> Result<Vec<Budget>>;

    /// Lists budgets joined with the current month's expense totals for
    /// their categories.
    fn get_budget_progress(&self, today: NaiveDate) -> Result<Vec<BudgetProgress>>;
}
