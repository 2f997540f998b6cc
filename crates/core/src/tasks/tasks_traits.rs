//! Task repository and service traits.

use async_trait::async_trait;

use super::tasks_model::{NewTask, Task, TaskStatus, TaskUpdate};
use crate::errors::Result;

/// Trait defining the contract for Task repository operations.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    async fn create(&self, new_task: NewTask) -> Result<Task>;
    async fn update(&self, task_update: TaskUpdate) -> Result<Task>;
    /// Moves a task to another board column.
    async fn set_status(&self, task_id: &str, status: TaskStatus) -> Result<Task>;
    async fn delete(&self, task_id: &str) -> Result<usize>;
    fn get_by_id(&self, task_id: &str) -> Result<Task>;
    /// Lists tasks, newest first.
    fn list(&self) -> Result<Vec<Task>>;
}

/// Trait defining the contract for Task service operations.
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;
    async fn update_task(&self, task_update: TaskUpdate) -> Result<Task>;
    async fn move_task(&self, task_id: &str, status: TaskStatus) -> Result<Task>;
    async fn delete_task(&self, task_id: &str) -> Result<()>;
    fn get_task(&self, task_id: &str) -> Result<Task>;
    fn list_tasks(&self) -> Result<Vec<Task>>;
}
