use std::sync::Arc;

use super::categories_model::{Category, CategoryKind, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

/// Service for managing transaction categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        self.repository.create(new_category).await
    }

    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category> {
        category_update.validate()?;
        self.repository.update(category_update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        self.repository.delete(category_id).await?;
        Ok(())
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id)
    }

    fn list_categories(&self, kind_filter: Option<CategoryKind>) -> Result<Vec<Category>> {
        self.repository.list(kind_filter)
    }
}
