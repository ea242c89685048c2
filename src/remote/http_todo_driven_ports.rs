use crate::domain::ApiError;
use crate::domain::todo::driven_ports::TaskApi;
use crate::domain::todo::{NewTask, TodoTask};
use crate::dto;
use crate::external_connections::ExternalConnectivity;
use crate::remote::{call_api, call_api_with_json};
use reqwest::Method;

/// Reads and writes the signed-in user's tasks through the REST API
pub struct HttpTaskApi;

impl TaskApi for HttpTaskApi {
    async fn all_tasks(
        &self,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<Vec<TodoTask>, ApiError> {
        let tasks: Vec<dto::task::TodoTask> =
            call_api(ext_cxn, Method::GET, "/tasks/get_all_my_tasks").await?;

        Ok(tasks.into_iter().map(TodoTask::from).collect())
    }

    async fn task_by_id(
        &self,
        task_id: i64,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<TodoTask, ApiError> {
        let task: dto::task::TodoTask = call_api(
            ext_cxn,
            Method::GET,
            &format!("/tasks/get_task/{task_id}"),
        )
        .await?;

        Ok(task.into())
    }

    async fn create_task(
        &self,
        new_task: &NewTask,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<TodoTask, ApiError> {
        let task: dto::task::TodoTask = call_api_with_json(
            ext_cxn,
            Method::POST,
            "/tasks/create",
            &dto::task::NewTask::from(new_task),
        )
        .await?;

        Ok(task.into())
    }

    async fn complete_task(
        &self,
        task_id: i64,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<TodoTask, ApiError> {
        let task: dto::task::TodoTask = call_api(
            ext_cxn,
            Method::PUT,
            &format!("/tasks/update_status/{task_id}"),
        )
        .await?;

        Ok(task.into())
    }

    async fn delete_task(
        &self,
        task_id: i64,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<serde_json::Value, ApiError> {
        call_api(
            ext_cxn,
            Method::DELETE,
            &format!("/tasks/delete/{task_id}"),
        )
        .await
    }
}
