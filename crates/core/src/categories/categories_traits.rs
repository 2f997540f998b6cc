//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{Category, CategoryKind, CategoryUpdate, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Creates a new category.
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Renames an existing category.
    async fn update(&self, category_update: CategoryUpdate) -> Result<Category>;

    /// Deletes a category by its ID. Fails with a foreign-key violation
    /// when ledger entries or budgets still reference it.
    async fn delete(&self, category_id: &str) -> Result<usize>;

    /// Retrieves a category by its ID.
    fn get_by_id(&self, category_id: &str) -> Result<Category>;

    /// Lists categories, optionally filtered by kind, sorted by name.
    fn list(&self, kind_filter: Option<CategoryKind>) -> Result<Vec<Category>>;
}

/// Trait defining the contract for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category>;
    async fn delete_category(&self, category_id: &str) -> Result<()>;
    fn get_category(&self, category_id: &str) -> Result<Category>;
    fn list_categories(&self, kind_filter: Option<CategoryKind>) -> Result<Vec<Category>>;
}
