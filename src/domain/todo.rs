use crate::domain::banner::Banner;
use crate::domain::todo::driven_ports::{Confirmation, TaskApi};
use crate::domain::{ApiError, Error};
use crate::external_connections::ExternalConnectivity;
use tracing::{info, warn};
use validator::Validate;

pub const TASK_CREATED_MESSAGE: &str = "Task created successfully";
pub const TASK_COMPLETED_MESSAGE: &str = "Task marked as complete";
pub const TASK_DELETED_MESSAGE: &str = "Task deleted successfully";
pub const COMPLETED_TASK_LOCKED_MESSAGE: &str = "Completed tasks cannot be updated";
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this task?";

/// A task owned by the signed-in user. `status` only ever moves from false to true.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoTask {
    pub task_id: i64,
    pub task_title: String,
    pub task_description: String,
    pub status: bool,
}

#[derive(Debug, Clone, Validate)]
pub struct NewTask {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub task_title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub task_description: String,
}

pub mod driven_ports {
    use super::*;

    pub trait TaskApi {
        async fn all_tasks(
            &self,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<Vec<TodoTask>, ApiError>;
        async fn task_by_id(
            &self,
            task_id: i64,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<TodoTask, ApiError>;
        async fn create_task(
            &self,
            new_task: &NewTask,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<TodoTask, ApiError>;
        /// Marks a task complete and returns the server's copy of it
        async fn complete_task(
            &self,
            task_id: i64,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<TodoTask, ApiError>;
        async fn delete_task(
            &self,
            task_id: i64,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<serde_json::Value, ApiError>;
    }

    /// Blocking yes/no question put to the user before destructive actions
    #[cfg_attr(test, mockall::automock)]
    pub trait Confirmation {
        fn confirm(&self, question: &str) -> bool;
    }
}

/// Looks up a single task straight from the server
pub async fn task_by_id(
    task_id: i64,
    ext_cxn: &impl ExternalConnectivity,
    task_api: &impl TaskApi,
) -> Result<TodoTask, Error> {
    let task = task_api.task_by_id(task_id, ext_cxn).await?;
    Ok(task)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadState {
    Loading,
    Ready,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// The task list screen. Holds a transient copy of the user's tasks and keeps it consistent
/// with the server after each mutation:
///
/// | action   | local reconciliation                       |
/// |----------|--------------------------------------------|
/// | create   | re-fetch the whole list                    |
/// | complete | patch `status` of the one task in place    |
/// | delete   | remove the task whose `task_id` matches    |
///
/// Every failure except an expired session lands in the error banner and is also returned.
#[derive(Debug)]
pub struct TasksView {
    tasks: Vec<TodoTask>,
    load_state: LoadState,
    form_open: bool,
    error: Banner,
    success: Banner,
}

impl TasksView {
    pub fn new() -> Self {
        TasksView {
            tasks: Vec::new(),
            load_state: LoadState::Loading,
            form_open: false,
            error: Banner::default(),
            success: Banner::default(),
        }
    }

    /// Initial load of the list
    pub async fn mount(
        &mut self,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
    ) -> Result<(), Error> {
        self.refresh(ext_cxn, task_api).await
    }

    /// Replaces the local list with the server's. On failure the previous list is kept.
    pub async fn refresh(
        &mut self,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
    ) -> Result<(), Error> {
        self.load_state = LoadState::Loading;
        let fetch_result = task_api.all_tasks(ext_cxn).await;
        self.load_state = LoadState::Ready;

        match fetch_result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error.clear();
                Ok(())
            }
            Err(err) => Err(self.record_failure(err.into())),
        }
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn cancel_form(&mut self) {
        self.form_open = false;
    }

    /// Creates a task, then re-fetches the entire list before closing the form. Once the server
    /// has accepted the task, a failed re-fetch only shows up in the error banner; the create
    /// itself still counts as a success.
    pub async fn create(
        &mut self,
        new_task: &NewTask,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
    ) -> Result<(), Error> {
        if let Err(validation_errors) = new_task.validate() {
            return Err(self.record_failure(validation_errors.into()));
        }

        info!("Creating task \"{}\"", new_task.task_title);
        if let Err(err) = task_api.create_task(new_task, ext_cxn).await {
            return Err(self.record_failure(err.into()));
        }

        if let Err(Error::SessionExpired) = self.refresh(ext_cxn, task_api).await {
            return Err(Error::SessionExpired);
        }
        self.form_open = false;
        self.success.flash(TASK_CREATED_MESSAGE);

        Ok(())
    }

    /// Marks a task complete. Completed tasks are locked, so asking again never reaches the server.
    pub async fn complete(
        &mut self,
        task_id: i64,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
    ) -> Result<(), Error> {
        let current_status = self
            .tasks
            .iter()
            .find(|task| task.task_id == task_id)
            .map(|task| task.status);
        match current_status {
            None => {
                return Err(self.record_failure(Error::LocalValidation(format!(
                    "Task {task_id} was not found"
                ))));
            }
            Some(true) => {
                warn!("Refusing to update completed task {task_id}");
                self.error.flash(COMPLETED_TASK_LOCKED_MESSAGE);
                return Err(Error::LocalValidation(
                    COMPLETED_TASK_LOCKED_MESSAGE.to_owned(),
                ));
            }
            Some(false) => {}
        }

        info!("Completing task {task_id}");
        if let Err(err) = task_api.complete_task(task_id, ext_cxn).await {
            return Err(self.record_failure(err.into()));
        }

        for task in self.tasks.iter_mut().filter(|task| task.task_id == task_id) {
            task.status = true;
        }
        self.success.flash(TASK_COMPLETED_MESSAGE);

        Ok(())
    }

    /// Deletes a task once the user confirms. Declining leaves everything untouched.
    pub async fn delete(
        &mut self,
        task_id: i64,
        confirmation: &impl Confirmation,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
    ) -> Result<DeleteOutcome, Error> {
        if !confirmation.confirm(DELETE_CONFIRMATION_PROMPT) {
            info!("Deletion of task {task_id} cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        info!("Deleting task {task_id}");
        if let Err(err) = task_api.delete_task(task_id, ext_cxn).await {
            return Err(self.record_failure(err.into()));
        }

        self.tasks.retain(|task| task.task_id != task_id);
        self.success.flash(TASK_DELETED_MESSAGE);

        Ok(DeleteOutcome::Deleted)
    }

    pub fn dismiss_error(&mut self) {
        self.error.clear();
    }

    pub fn tasks(&self) -> &[TodoTask] {
        &self.tasks
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.visible()
    }

    pub fn success_banner(&self) -> Option<&str> {
        self.success.visible()
    }

    /// Puts a failure in the error banner. Expired sessions are never shown there; they
    /// interrupt the whole flow instead.
    fn record_failure(&mut self, err: Error) -> Error {
        if !matches!(err, Error::SessionExpired) {
            self.error.show(err.to_string());
        }
        err
    }
}

impl Default for TasksView {
    fn default() -> Self {
        Self::new()
    }
}
