//! Soccer Graph Analytics - Main Server
//!
//! Runs the graph analytics service over one of two transports:
//! - `stdio` — MCP JSON-RPC for interactive tool calls
//! - `http` — batch service-function endpoints
//!
//! # Usage
//!
//! ```bash
//! # MCP over stdio (default)
//! ./soccer-graph-server
//!
//! # Batch HTTP surface on port 5000, data preloaded at startup
//! MCP_TRANSPORT=http PRELOAD_ON_STARTUP=true ./soccer-graph-server
//!
//! # With debug logging
//! RUST_LOG=debug ./soccer-graph-server --transport http --port 8080
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use soccer_graph_analytics::analytics::AnalyticsService;
use soccer_graph_analytics::mcp::McpServer;
use soccer_graph_analytics::{serve_http, Config, Transport};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Graph analytics server for the soccer knowledge graph
#[derive(Parser, Debug)]
#[command(name = "soccer-graph-server")]
#[command(about = "Graph analytics over the soccer knowledge graph (MCP stdio or batch HTTP)")]
#[command(version)]
struct Args {
    /// Serving transport: stdio (MCP) or http (service functions)
    #[arg(long)]
    transport: Option<String>,

    /// Port for the HTTP transport
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the JSON table exports
    #[arg(long)]
    data_dir: Option<String>,

    /// Load the record store and build the graphs before accepting requests
    #[arg(long)]
    preload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Log to stderr: stdout must stay clean for JSON-RPC in stdio mode.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,soccer_graph_analytics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // env > YAML > default, then CLI flags on top.
    let mut config = Config::from_env()?;
    if let Some(transport) = args.transport {
        config.transport = Transport::parse(&transport)?;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if args.preload {
        config.preload = true;
    }

    let analytics = Arc::new(AnalyticsService::new(&config.data_dir));

    if config.preload {
        info!("Preloading graph data at startup...");
        match analytics.preload().await {
            Ok(()) => info!("Graph data preloaded successfully"),
            Err(e) => warn!(
                "Failed to preload graph data: {}. Data will be loaded on first request.",
                e
            ),
        }
    }

    match config.transport {
        Transport::Http => {
            info!("Starting HTTP server on 0.0.0.0:{}", config.server_port);
            serve_http(analytics, config.server_port).await
        }
        Transport::Stdio => {
            info!("Starting stdio server for MCP protocol");
            let mut server = McpServer::new(analytics);
            server.run().await
        }
    }
}
