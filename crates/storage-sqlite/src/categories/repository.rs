use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::categories::{
    Category, CategoryKind, CategoryRepositoryTrait, CategoryUpdate, NewCategory,
};
use moneta_core::errors::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;
use crate::schema::categories::dsl::*;

use super::model::CategoryDB;

/// Repository for managing category data in the database
pub struct CategoryRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn| {
                let mut category_db: CategoryDB = new_category.into();
                category_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(categories::table)
                    .values(&category_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(category_db.into())
            })
            .await
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        let category_id = category_update.id.clone().unwrap_or_default();
        let new_name = category_update.name;
        self.writer
            .exec(move |conn| {
                diesel::update(categories.find(&category_id))
                    .set(name.eq(&new_name))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let updated = categories
                    .select(CategoryDB::as_select())
                    .find(&category_id)
                    .first::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(updated.into())
            })
            .await
    }

    /// Fails with a foreign-key violation while ledger entries or budgets
    /// still reference the category.
    async fn delete(&self, category_id: &str) -> Result<usize> {
        let id_owned = category_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(categories.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;

        let category = categories
            .select(CategoryDB::as_select())
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(category.into())
    }

    fn list(&self, kind_filter: Option<CategoryKind>) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = categories::table.into_boxed();
        if let Some(k) = kind_filter {
            query = query.filter(kind.eq(k.as_str()));
        }

        let results = query
            .select(CategoryDB::as_select())
            .order(name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Category::from).collect())
    }
}
