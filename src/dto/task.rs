use crate::domain;
use serde::{Deserialize, Serialize};

/// DTO for a task returned by the API. Extra fields the server adds are ignored.
#[derive(Deserialize, Debug)]
pub struct TodoTask {
    pub task_id: i64,
    pub task_title: String,
    #[serde(default)]
    pub task_description: Option<String>,
    pub status: bool,
}

impl From<TodoTask> for domain::todo::TodoTask {
    fn from(value: TodoTask) -> Self {
        domain::todo::TodoTask {
            task_id: value.task_id,
            task_title: value.task_title,
            task_description: value.task_description.unwrap_or_default(),
            status: value.status,
        }
    }
}

/// DTO for creating a new task via the API
#[derive(Serialize, Debug)]
pub struct NewTask<'task> {
    pub task_title: &'task str,
    pub task_description: &'task str,
}

impl<'task> From<&'task domain::todo::NewTask> for NewTask<'task> {
    fn from(value: &'task domain::todo::NewTask) -> Self {
        NewTask {
            task_title: &value.task_title,
            task_description: &value.task_description,
        }
    }
}
