use std::sync::Arc;

use alertmanager_mcp::{
    client::{AlertmanagerApi, AlertmanagerClient},
    config::Config,
    mcp::{stdio, McpServer},
    server::Server,
    tools::ToolRegistry,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// JSON-RPC over `POST /mcp`
    Http,
}

#[derive(Parser)]
#[command(author, version, about = "Alertmanager alerts and silences as MCP tools", long_about = None)]
struct Cli {
    /// How clients reach the server
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Listen address for the HTTP transport (defaults to MCP_HTTP_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON-RPC
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alertmanager_mcp={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(filter)
        .init();

    let config = Config::load().context("failed to load configuration")?;

    // One client for the life of the process, shared by every tool
    let client: Arc<dyn AlertmanagerApi> = Arc::new(
        AlertmanagerClient::new(config.alertmanager.clone())
            .context("failed to build Alertmanager client")?,
    );
    let tools = ToolRegistry::alertmanager(client, config.alertmanager.created_by.clone());
    let mcp = Arc::new(McpServer::new(tools));

    match cli.transport {
        Transport::Stdio => {
            info!("Serving MCP over stdio");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            stdio::serve(&mcp, stdin, tokio::io::stdout()).await?;
        }
        Transport::Http => {
            let addr = cli.addr.unwrap_or(config.server.addr);
            Server::new(mcp).start(&addr).await?;
        }
    }

    Ok(())
}
