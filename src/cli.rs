//! Driving adapter: the `taskdeck` command line. Each command runs one flow against the views,
//! passes the outcome through the central session handler and renders the result as text.

pub mod render;
pub mod terminal;

use crate::app_env;
use crate::domain::Error;
use crate::domain::session::driven_ports::Navigator;
use crate::domain::session::{Route, handle_session_expiry, logout};
use crate::domain::todo::{DeleteOutcome, NewTask, TasksView, task_by_id};
use crate::domain::user::{DEFAULT_ROLE, DashboardView, Registration, login, register};
use crate::external_connections::ExternalConnectivity;
use crate::remote::http_todo_driven_ports::HttpTaskApi;
use crate::remote::http_user_driven_ports::HttpAccountApi;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::{StdinConfirmation, TerminalNavigator};
use tracing::info;

/// Exit status used when the user interrupts a running command
pub const INTERRUPTED_EXIT_CODE: u8 = 130;
const SESSION_EXPIRED_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Manage your tasks from the terminal")]
pub struct Cli {
    /// Base URL of the task API
    #[arg(long, global = true, env = app_env::API_URL)]
    pub api_url: Option<String>,
    /// Where the session credential is kept between runs
    #[arg(long, global = true, env = app_env::CREDENTIAL_FILE)]
    pub credential_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Register {
        username: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = DEFAULT_ROLE)]
        role: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in and show the dashboard
    Login {
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Show the signed-in user's profile
    Dashboard,
    /// Work with your tasks
    #[command(subcommand)]
    Tasks(TaskCommands),
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List every task
    List,
    /// Show a single task
    Show { id: i64 },
    /// Create a task
    Create { title: String, description: String },
    /// Mark a task as complete
    Complete { id: i64 },
    /// Delete a task after confirmation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Runs [command] and returns everything that should be printed on stdout. Expired sessions
/// are routed to the login screen exactly once before the error is handed back.
pub async fn run(
    command: Commands,
    ext_cxn: &impl ExternalConnectivity,
    navigator: &TerminalNavigator,
) -> Result<String, Error> {
    let command_result = run_command(command, ext_cxn, navigator).await;
    let mut output = handle_session_expiry(command_result, navigator)?;

    if navigator.pending() == Some(Route::Dashboard) {
        navigator.take_pending();
        let dashboard = handle_session_expiry(show_dashboard(ext_cxn).await, navigator)?;
        output.push('\n');
        output.push_str(&dashboard);
    }

    Ok(output)
}

async fn run_command(
    command: Commands,
    ext_cxn: &impl ExternalConnectivity,
    navigator: &TerminalNavigator,
) -> Result<String, Error> {
    let accounts = HttpAccountApi;

    match command {
        Commands::Register {
            username,
            full_name,
            email,
            role,
            password,
        } => {
            let registration = Registration {
                username,
                full_name,
                email,
                password: terminal::password_or_prompt(password)?,
                role,
            };
            register(&registration, ext_cxn, &accounts).await?;

            Ok(render::registered(&registration.username))
        }
        Commands::Login { username, password } => {
            let password = terminal::password_or_prompt(password)?;
            login(&username, &password, ext_cxn, &accounts).await?;
            navigator.navigate(Route::Dashboard);

            Ok(render::signed_in(&username))
        }
        Commands::Logout => {
            logout(ext_cxn);
            navigator.navigate(Route::Login);

            Ok(render::signed_out())
        }
        Commands::Dashboard => show_dashboard(ext_cxn).await,
        Commands::Tasks(task_command) => run_task_command(task_command, ext_cxn).await,
    }
}

async fn show_dashboard(ext_cxn: &impl ExternalConnectivity) -> Result<String, Error> {
    let mut view = DashboardView::new();
    view.mount(ext_cxn, &HttpAccountApi).await?;

    Ok(render::dashboard(&view))
}

async fn run_task_command(
    task_command: TaskCommands,
    ext_cxn: &impl ExternalConnectivity,
) -> Result<String, Error> {
    let task_api = HttpTaskApi;

    if let TaskCommands::Show { id } = task_command {
        let task = task_by_id(id, ext_cxn, &task_api).await?;
        return Ok(render::task(&task));
    }

    let mut view = TasksView::new();
    view.mount(ext_cxn, &task_api).await?;

    match task_command {
        TaskCommands::List | TaskCommands::Show { .. } => {}
        TaskCommands::Create { title, description } => {
            view.open_form();
            let new_task = NewTask {
                task_title: title,
                task_description: description,
            };
            view.create(&new_task, ext_cxn, &task_api).await?;
        }
        TaskCommands::Complete { id } => view.complete(id, ext_cxn, &task_api).await?,
        TaskCommands::Delete { id, yes } => {
            let confirmation = StdinConfirmation::new(yes);
            if view.delete(id, &confirmation, ext_cxn, &task_api).await? == DeleteOutcome::Cancelled
            {
                info!("Task {id} kept");
                return Ok(render::cancelled());
            }
        }
    }

    Ok(render::tasks(&view))
}

/// Maps the outcome of a flow onto the process exit status
pub fn exit_code<T>(result: &Result<T, Error>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(Error::SessionExpired) => ExitCode::from(SESSION_EXPIRED_EXIT_CODE),
        Err(_) => ExitCode::FAILURE,
    }
}
