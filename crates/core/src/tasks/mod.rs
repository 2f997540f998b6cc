//! Tasks module - the finance chore board.

mod tasks_model;
mod tasks_service;
mod tasks_traits;

pub use tasks_model::{NewTask, Task, TaskPriority, TaskStatus, TaskUpdate};
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
