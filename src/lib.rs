//! Soccer Graph Analytics
//!
//! Answers analytical queries over a relational soccer dataset (players,
//! clubs, matches, contracts) by projecting it into two derived graphs and
//! running graph algorithms against them:
//! - Record store loaded from static JSON table exports
//! - Player graph (teammate / match co-participation edges) and club graph
//!   (match / transfer edges), built lazily and cached per process
//! - Five analytics operations: shortest path, centrality, community
//!   detection, transfer network, temporal aggregation
//! - Two serving surfaces over the same operations: an MCP stdio server and
//!   a batch HTTP service-function API

pub mod analytics;
pub mod api;
pub mod graph;
pub mod mcp;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;

use analytics::AnalyticsService;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
    pub data_dir: String,
    pub transport: String,
    pub preload: bool,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            data_dir: "graph_data".into(),
            transport: "stdio".into(),
            preload: false,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Which serving surface the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// MCP over stdio (interactive tool calls)
    Stdio,
    /// Batch HTTP service-function endpoints
    Http,
}

impl Transport {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => anyhow::bail!("unknown transport '{other}' (expected 'stdio' or 'http')"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: String,
    pub server_port: u16,
    pub transport: Transport,
    /// Force the load-and-build transition before accepting requests.
    /// A preload failure logs a warning and falls back to lazy loading.
    pub preload: bool,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env
    /// vars. Priority: env var > YAML > default.
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file
    /// doesn't exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let transport_raw =
            std::env::var("MCP_TRANSPORT").unwrap_or(yaml.server.transport);
        let preload = std::env::var("PRELOAD_ON_STARTUP")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(yaml.server.preload);

        Ok(Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or(yaml.server.data_dir),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            transport: Transport::parse(&transport_raw)?,
            preload,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// HTTP server entry point
// ============================================================================

/// Bind the batch HTTP surface and serve until shutdown.
pub async fn serve_http(analytics: Arc<AnalyticsService>, port: u16) -> Result<()> {
    let state = Arc::new(api::ServerState { analytics });
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_parse() {
        assert_eq!(Transport::parse("stdio").unwrap(), Transport::Stdio);
        assert_eq!(Transport::parse("http").unwrap(), Transport::Http);
        assert!(Transport::parse("grpc").is_err());
    }

    #[test]
    fn test_server_yaml_defaults() {
        let yaml = ServerYamlConfig::default();
        assert_eq!(yaml.port, 5000);
        assert_eq!(yaml.data_dir, "graph_data");
        assert_eq!(yaml.transport, "stdio");
        assert!(!yaml.preload);
    }

    #[test]
    fn test_yaml_config_parses_server_section() {
        let raw = "server:\n  port: 8080\n  data_dir: /data\n  transport: http\n  preload: true\n";
        let yaml: YamlConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(yaml.server.port, 8080);
        assert_eq!(yaml.server.data_dir, "/data");
        assert_eq!(yaml.server.transport, "http");
        assert!(yaml.server.preload);
    }

    #[test]
    fn test_yaml_config_partial_section_uses_defaults() {
        let raw = "server:\n  port: 9999\n";
        let yaml: YamlConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(yaml.server.port, 9999);
        assert_eq!(yaml.server.data_dir, "graph_data");
    }
}
