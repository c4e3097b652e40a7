//! RPC command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use optima_client::OptimaClient;
use optima_core::dto::procedure::ProcedureCall;
use serde_json::Value;

use crate::config::Config;
use crate::types::{parse_args, parse_kwargs};

/// RPC subcommands
#[derive(Subcommand)]
pub enum RpcCommands {
    /// Call a remote procedure and print its result
    Call {
        /// Procedure name
        name: String,

        /// Positional arguments as a JSON array
        #[arg(long)]
        args: Option<String>,

        /// Keyword arguments as a JSON object
        #[arg(long)]
        kwargs: Option<String>,
    },
}

pub async fn handle_rpc_command(command: RpcCommands, config: &Config) -> Result<()> {
    let client = OptimaClient::new(config.api_url.as_str());

    match command {
        RpcCommands::Call { name, args, kwargs } => {
            let call = ProcedureCall {
                name,
                args: parse_args(args.as_deref())?,
                kwargs: parse_kwargs(kwargs.as_deref())?,
            };
            call_procedure(&client, &call).await
        }
    }
}

async fn call_procedure(client: &OptimaClient, call: &ProcedureCall) -> Result<()> {
    let result: Value = client
        .call_procedure(call)
        .await
        .with_context(|| format!("Procedure {} failed", call.name))?;

    println!("{}", format!("{} returned:", call.name).bold());
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
