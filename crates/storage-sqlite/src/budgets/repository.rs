use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use moneta_core::errors::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;
use crate::schema::budgets::dsl::*;

use super::model::BudgetDB;

/// Repository for managing budget data in the database
pub struct BudgetRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn| {
                let mut budget_db: BudgetDB = new_budget.into();
                budget_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(budgets::table)
                    .values(&budget_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(budget_db.into())
            })
            .await
    }

    async fn update(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        let budget_id = budget_update.id.clone().unwrap_or_default();
        let new_amount = budget_update.amount.to_string();
        let new_period = budget_update.period.as_str().to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(budgets.find(&budget_id))
                    .set((amount.eq(&new_amount), period.eq(&new_period)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let updated = budgets
                    .select(BudgetDB::as_select())
                    .find(&budget_id)
                    .first::<BudgetDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(updated.into())
            })
            .await
    }

    async fn delete(&self, budget_id: &str) -> Result<usize> {
        let id_owned = budget_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(budgets.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        let budget = budgets
            .select(BudgetDB::as_select())
            .find(budget_id)
            .first::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(budget.into())
    }

    fn list(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let results = budgets
            .select(BudgetDB::as_select())
            .order(created_at.desc())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Budget::from).collect())
    }
}
