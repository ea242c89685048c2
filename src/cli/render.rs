//! Plain-text rendering of each screen

use crate::domain::todo::{LoadState, TasksView, TodoTask};
use crate::domain::user::{DashboardState, DashboardView};
use std::fmt::Write;

pub fn login_hint() -> &'static str {
    "Sign in with `taskdeck login <username>`."
}

pub fn registered(username: &str) -> String {
    format!("Account created for {username}.\n{}\n", login_hint())
}

pub fn signed_in(username: &str) -> String {
    format!("Signed in as {username}.\n")
}

pub fn signed_out() -> String {
    "Signed out.\n".to_owned()
}

pub fn cancelled() -> String {
    "Deletion cancelled.\n".to_owned()
}

pub fn dashboard(view: &DashboardView) -> String {
    match view.state() {
        DashboardState::Loading => "Loading...\n".to_owned(),
        DashboardState::Ready { user: None } => "Welcome!\n".to_owned(),
        DashboardState::Ready { user: Some(user) } => format!(
            "Welcome, {}!\n\nUsername: {}\nEmail:    {}\nRole:     {}\n",
            user.full_name, user.username, user.email, user.role
        ),
    }
}

/// One line per task, followed by its indented description
pub fn task(task: &TodoTask) -> String {
    let check = if task.status { "x" } else { " " };
    let mut rendered = format!("[{check}] #{} {}\n", task.task_id, task.task_title);
    if !task.task_description.is_empty() {
        let _ = writeln!(rendered, "    {}", task.task_description);
    }
    rendered
}

pub fn tasks(view: &TasksView) -> String {
    let mut rendered = String::new();
    if let Some(error) = view.error_banner() {
        let _ = writeln!(rendered, "Error: {error}");
    }
    if let Some(success) = view.success_banner() {
        let _ = writeln!(rendered, "{success}");
    }
    if view.load_state() == LoadState::Loading {
        rendered.push_str("Loading tasks...\n");
        return rendered;
    }

    if !rendered.is_empty() {
        rendered.push('\n');
    }
    if view.tasks().is_empty() {
        rendered.push_str("No tasks yet.\n");
    }
    for listed_task in view.tasks() {
        rendered.push_str(&task(listed_task));
    }

    rendered
}
