//! cloudrelay
//!
//! MCP server that exposes the Cloudflare v4 API to an AI host as read-only tools over
//! stdio. Standard output carries the protocol; logs and audit lines go to stderr.

mod config;
mod error;
mod server;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use futures::stream::StreamExt;
use rmcp::ServiceExt;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::{error, info};

use cloudrelay_client::{GRAPHQL_OPERATION, Gateway, catalog};
use cloudrelay_guard::{AuditSink, CredentialVault, RateLimiter};
use cloudrelay_tools::ToolExecutor;

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::server::RelayServer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable formatted logs
    Pretty,
    /// Machine-readable JSON logs
    Json,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ~/.config/cloudrelay/config.toml if present)
    #[arg(long, env = "CLOUDRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, env = "CLOUDRELAY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Print the available tools and exit
    #[arg(long)]
    list_tools: bool,
}

/// Initializes structured logging on stderr.
///
/// Log level is controlled via `RUST_LOG`. Records from the library crates arrive
/// through the `log` bridge.
fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("cloudrelay=info,cloudrelay_client=info,cloudrelay_tools=info,cloudrelay_guard=info")
    });

    match format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .init();
        }
    }
}

fn print_tools() {
    for op in catalog::operations() {
        println!("{:<36} {}", op.name, op.description);
    }
    println!(
        "{GRAPHQL_OPERATION:<36} Run a read-only query against the GraphQL Analytics API"
    );
}

/// Builds the process-wide guards and the tool executor.
fn build_executor(config: &ServerConfig) -> Result<ToolExecutor> {
    let limiter = Arc::new(RateLimiter::new(config.rate_limit)?);
    let vault = Arc::new(CredentialVault::new(config.credential()?)?);
    let audit = Arc::new(match &config.audit.path {
        Some(path) => {
            info!("Writing audit records to {}", path.display());
            AuditSink::append_to_file(path)?
        }
        None => AuditSink::stderr(),
    });

    let gateway = Arc::new(Gateway::new(
        &config.gateway_config(),
        limiter,
        vault,
        audit,
    )?);
    info!("Upstream API: {}", gateway.base_url());

    Ok(ToolExecutor::with_catalog(&gateway))
}

async fn run(args: Args) -> Result<()> {
    let config = ServerConfig::load(args.config.as_deref())?;
    let executor = Arc::new(build_executor(&config)?);
    info!("Registered {} tools", executor.get_all_tools().len());

    let service = RelayServer::new(executor)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Mcp(e.to_string()))?;

    let token = service.cancellation_token();
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();
    tokio::spawn(async move {
        if let Some(signal) = signals.next().await {
            match signal {
                SIGTERM => info!("Received SIGTERM, shutting down"),
                _ => info!("Received SIGINT, shutting down"),
            }
            token.cancel();
        }
    });

    info!("Serving MCP over stdio");
    let reason = service
        .waiting()
        .await
        .map_err(|e| ServerError::Mcp(e.to_string()))?;
    handle.close();

    info!("Server stopped: {reason:?}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_tools {
        print_tools();
        return ExitCode::SUCCESS;
    }

    init_tracing(args.log_format);
    info!("Starting cloudrelay {}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "cloudrelay",
            "--config",
            "/etc/cloudrelay.toml",
            "--log-format",
            "json",
            "--list-tools",
        ])
        .unwrap();

        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("/etc/cloudrelay.toml")));
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(args.list_tools);
    }

    #[test]
    fn test_missing_credential_fails_startup() {
        let config = ServerConfig {
            credential_env: "CLOUDRELAY_TEST_UNSET_CREDENTIAL_VARIABLE".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            build_executor(&config),
            Err(ServerError::MissingCredential(_))
        ));
    }
}
