//! Task command handlers
//!
//! Checks server-side tasks once, or follows them with a poller until the
//! server reports a terminal status.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use optima_client::OptimaClient;
use optima_core::domain::task::{STARTED, TaskStatus, task_key};
use optima_core::dto::status::StatusRequest;
use optima_poller::{HttpStatusRepository, PollResult, TaskPoller};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Check a task once
    Check {
        /// Task ID
        task_id: String,
    },
    /// Poll a task until it finishes
    Watch {
        /// Task ID
        task_id: String,

        /// Project the task belongs to
        #[arg(long)]
        project: Option<Uuid>,

        /// Poll this GET path instead of the check_task procedure
        #[arg(long)]
        get: Option<String>,
    },
}

pub async fn handle_task_command(command: TaskCommands, config: &Config) -> Result<()> {
    let client = Arc::new(OptimaClient::new(config.api_url.as_str()));

    match command {
        TaskCommands::Check { task_id } => check_task(&client, &task_id).await,
        TaskCommands::Watch {
            task_id,
            project,
            get,
        } => {
            let key = watch_key(&task_id, project);
            let request = watch_request(&task_id, get);
            watch_task(client, config, key, request).await
        }
    }
}

/// Check a task once and print the full response
async fn check_task(client: &OptimaClient, task_id: &str) -> Result<()> {
    let status = client
        .check_task(task_id)
        .await
        .with_context(|| format!("Failed to check task {}", task_id))?;

    println!("{}", "Task Status:".bold());
    println!("  ID:     {}", task_id.cyan());
    println!("  Status: {}", colorize_status(&status.status));
    print_body(&status)?;

    Ok(())
}

/// Follow a task until it reaches a terminal status or Ctrl-C is pressed
///
/// Any terminal status is a successful watch; only a failed check is an error.
async fn watch_task(
    client: Arc<OptimaClient>,
    config: &Config,
    key: String,
    request: StatusRequest,
) -> Result<()> {
    let repository = Arc::new(HttpStatusRepository::new(client));
    let poller = TaskPoller::new(repository, &config.poller_config());

    let (tx, mut rx) = mpsc::unbounded_channel();
    poller.start_poll(key.clone(), request.clone(), move |result| {
        let _ = tx.send(result);
    })?;
    debug!("Watching {} via {}", key, request);

    println!(
        "{} {} ({}, every {:?})",
        "Watching".bold(),
        key.cyan(),
        request.to_string().dimmed(),
        config.poll_interval
    );

    tokio::select! {
        outcome = follow_until_terminal(&mut rx, &key) => {
            let status = outcome?;
            debug!("Watch of {} ended with status {}", key, status.status);
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted, stopping poll {}", key);
            poller.stop_all_polls();
            println!("{}", "Stopped watching.".yellow());
            Ok(())
        }
    }
}

/// Print every response for `key` and return the first terminal status
async fn follow_until_terminal(
    rx: &mut mpsc::UnboundedReceiver<PollResult>,
    key: &str,
) -> Result<TaskStatus> {
    while let Some(result) = rx.recv().await {
        let status = result.with_context(|| format!("Status check for {} failed", key))?;
        println!(
            "{} {}",
            chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
            colorize_status(&status.status)
        );

        if status.is_terminal() {
            print_body(&status)?;
            return Ok(status);
        }
    }

    anyhow::bail!("Poll for {} ended without a terminal status", key)
}

/// Registry key for a watched task
fn watch_key(task_id: &str, project: Option<Uuid>) -> String {
    match project {
        Some(project) => task_key(project, task_id),
        None => task_id.to_string(),
    }
}

fn watch_request(task_id: &str, get: Option<String>) -> StatusRequest {
    match get {
        Some(path) => StatusRequest::get(path),
        None => StatusRequest::check_task(task_id),
    }
}

/// Print the fields of a response other than `status`
fn print_body(status: &TaskStatus) -> Result<()> {
    if status.extra.is_empty() {
        return Ok(());
    }

    println!("\n{}", "Response:".bold());
    println!("{}", serde_json::to_string_pretty(&status.extra)?);
    Ok(())
}

/// Colorize task status for display
fn colorize_status(status: &str) -> ColoredString {
    match status {
        STARTED => status.cyan(),
        "completed" => status.green(),
        "error" => status.red(),
        _ => status.yellow(),
    }
}
