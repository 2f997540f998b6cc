//! Database model for tasks.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use moneta_core::tasks::{NewTask, Task, TaskPriority, TaskStatus, TaskUpdate};

/// Database model for tasks
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
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// An update that clears description or due_date must write NULL.
#[diesel(treat_none_as_null = true)]
pub struct TaskDB {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TaskDB> for Task {
    fn from(db: TaskDB) -> Self {
        let status = TaskStatus::from_str(&db.status).unwrap_or_else(|_| {
            log::error!("Unknown task status '{}' for {}; reading as todo", db.status, db.id);
            TaskStatus::Todo
        });
        let priority = TaskPriority::from_str(&db.priority).unwrap_or_else(|_| {
            log::error!(
                "Unknown task priority '{}' for {}; reading as medium",
                db.priority,
                db.id
            );
            TaskPriority::Medium
        });
        Self {
            status,
            priority,
            id: db.id,
            title: db.title,
            description: db.description,
            due_date: db.due_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewTask> for TaskDB {
    fn from(domain: NewTask) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            due_date: domain.due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<TaskUpdate> for TaskDB {
    fn from(domain: TaskUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            due_date: domain.due_date,
            created_at: NaiveDateTime::default(), // filled from the existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
