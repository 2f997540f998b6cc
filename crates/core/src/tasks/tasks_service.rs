use std::sync::Arc;

use super::tasks_model::{NewTask, Task, TaskStatus, TaskUpdate};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::errors::Result;

/// Service for managing the task board.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TaskServiceTrait for TaskService {
    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        new_task.validate()?;
        self.repository.create(new_task).await
    }

    async fn update_task(&self, task_update: TaskUpdate) -> Result<Task> {
        task_update.validate()?;
        self.repository.update(task_update).await
    }

    async fn move_task(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        self.repository.set_status(task_id, status).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.repository.delete(task_id).await?;
        Ok(())
    }

    fn get_task(&self, task_id: &str) -> Result<Task> {
        self.repository.get_by_id(task_id)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.repository.list()
    }
}
