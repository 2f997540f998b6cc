use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::tasks::{NewTask, Task, TaskRepositoryTrait, TaskStatus, TaskUpdate};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tasks;
use crate::schema::tasks::dsl::*;

use super::model::TaskDB;

/// Repository for managing task data in the database
pub struct TaskRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    async fn create(&self, new_task: NewTask) -> Result<Task> {
        self.writer
            .exec(move |conn| {
                let mut task_db: TaskDB = new_task.into();
                task_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(tasks::table)
                    .values(&task_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(task_db.into())
            })
            .await
    }

    async fn update(&self, task_update: TaskUpdate) -> Result<Task> {
        self.writer
            .exec(move |conn| {
                let mut task_db: TaskDB = task_update.into();

                let existing = tasks
                    .select(TaskDB::as_select())
                    .find(&task_db.id)
                    .first::<TaskDB>(conn)
                    .map_err(StorageError::from)?;
                task_db.created_at = existing.created_at;

                diesel::update(tasks.find(&task_db.id))
                    .set(&task_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(task_db.into())
            })
            .await
    }

    async fn set_status(&self, task_id: &str, new_status: TaskStatus) -> Result<Task> {
        let id_owned = task_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(tasks.find(&id_owned))
                    .set((
                        status.eq(new_status.as_str()),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let updated = tasks
                    .select(TaskDB::as_select())
                    .find(&id_owned)
                    .first::<TaskDB>(conn)
                    .map_err(StorageError::from)?;

                Ok(updated.into())
            })
            .await
    }

    async fn delete(&self, task_id: &str) -> Result<usize> {
        let id_owned = task_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(tasks.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn get_by_id(&self, task_id: &str) -> Result<Task> {
        let mut conn = get_connection(&self.pool)?;

        let task = tasks
            .select(TaskDB::as_select())
            .find(task_id)
            .first::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(task.into())
    }

    fn list(&self) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;

        let results = tasks
            .select(TaskDB::as_select())
            .order(created_at.desc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Task::from).collect())
    }
}
