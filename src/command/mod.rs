// SPDX-License-Identifier: PMPL-1.0-or-later
//! Console commands
//!
//! Applications hand their schema to [`run_console`] from `main`:
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() -> std::process::ExitCode {
//!     let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish();
//!     graphql_axum_bundle::run_console(schema).await
//! }
//! ```

pub mod dump_schema;

use std::{ffi::OsString, io::Write, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use async_graphql::Executor;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use dump_schema::{DumpOutcome, DumpSchemaCommand};

use crate::{config::BundleConfig, error::Result, sdl::SchemaSource, server};

#[derive(Debug, Parser)]
#[command(name = "graphql-bundle", about = "GraphQL schema tooling and server", version)]
pub struct Console {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: BundleCommand,
}

#[derive(Debug, Subcommand)]
pub enum BundleCommand {
    /// Export the GraphQL schema in Schema Definition Language (SDL)
    #[command(name = "dump-schema")]
    DumpSchema(DumpSchemaCommand),

    /// Serve the GraphQL endpoint over HTTP
    Serve(ServeCommand),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeCommand {
    /// Listen address, overrides the configured one
    #[arg(long)]
    pub bind: Option<String>,
}

impl Console {
    pub async fn execute<E, W>(self, schema: E, config: &BundleConfig, stdout: &mut W) -> Result<()>
    where
        E: Executor + SchemaSource,
        W: Write,
    {
        match self.command {
            BundleCommand::DumpSchema(command) => {
                command.execute(&schema, &config.dump.print_options(), stdout)?;
            }
            BundleCommand::Serve(command) => {
                let mut server_config = config.server.clone();
                if let Some(bind) = command.bind {
                    server_config.bind_addr = bind;
                }
                server::serve(schema, &server_config).await?;
            }
        }

        Ok(())
    }
}

/// Parse the process arguments and run the selected command against `schema`.
///
/// Failures are logged and reported as [`ExitCode::FAILURE`].
pub async fn run_console<E>(schema: E) -> ExitCode
where
    E: Executor + SchemaSource,
{
    init_tracing();
    dotenvy::dotenv().ok();

    run_console_from(std::env::args_os(), schema, &mut std::io::stdout()).await
}

/// [`run_console`] over explicit arguments and output, without touching the
/// process environment beyond configuration loading.
pub async fn run_console_from<I, T, E, W>(args: I, schema: E, stdout: &mut W) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    E: Executor + SchemaSource,
    W: Write,
{
    let console = match Console::try_parse_from(args) {
        Ok(console) => console,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    match run(console, schema, stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run<E, W>(console: Console, schema: E, stdout: &mut W) -> anyhow::Result<()>
where
    E: Executor + SchemaSource,
    W: Write,
{
    let config = BundleConfig::load(console.config.as_deref()).context("Failed to load configuration")?;
    info!(command = ?console.command, "Running console command");

    console.execute(schema, &config, stdout).await?;
    Ok(())
}

/// Logs go to stderr so that stdout only carries command output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_schema_without_output() {
        let console = Console::try_parse_from(["graphql-bundle", "dump-schema"]).unwrap();
        match console.command {
            BundleCommand::DumpSchema(command) => assert!(command.output.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_dump_schema_output_forms() {
        for args in [
            vec!["graphql-bundle", "dump-schema", "--output=schema.graphql"],
            vec!["graphql-bundle", "dump-schema", "--output", "schema.graphql"],
            vec!["graphql-bundle", "dump-schema", "-o", "schema.graphql"],
        ] {
            let console = Console::try_parse_from(&args).unwrap();
            match console.command {
                BundleCommand::DumpSchema(command) => {
                    assert_eq!(command.output, Some(PathBuf::from("schema.graphql")))
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_serve_with_bind_and_config() {
        let console = Console::try_parse_from([
            "graphql-bundle",
            "serve",
            "--bind",
            "127.0.0.1:4000",
            "--config",
            "bundle.toml",
        ])
        .unwrap();

        assert_eq!(console.config, Some(PathBuf::from("bundle.toml")));
        match console.command {
            BundleCommand::Serve(command) => assert_eq!(command.bind.as_deref(), Some("127.0.0.1:4000")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_requires_a_value() {
        assert!(Console::try_parse_from(["graphql-bundle", "dump-schema", "--output"]).is_err());
    }
}
