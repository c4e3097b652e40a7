//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod rpc;
mod task;

pub use rpc::RpcCommands;
pub use task::TaskCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Server-side task status
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Raw remote procedure calls
    Rpc {
        #[command(subcommand)]
        command: RpcCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Task { command } => task::handle_task_command(command, config).await,
        Commands::Rpc { command } => rpc::handle_rpc_command(command, config).await,
    }
}
