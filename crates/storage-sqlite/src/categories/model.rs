//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use moneta_core::categories::{Category, CategoryKind, NewCategory};

/// Database model for categories
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub created_at: NaiveDateTime,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        let kind = CategoryKind::from_str(&db.kind).unwrap_or_else(|_| {
            log::error!("Unknown category kind '{}' for {}; reading as expense", db.kind, db.id);
            CategoryKind::Expense
        });
        Self {
            kind,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
