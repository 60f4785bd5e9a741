//! MCP tool handlers.
//!
//! Maps tool calls onto the analytics service. Every tool returns a single
//! string: raw text for `graph_shortest_path`, a JSON-encoded object for the
//! other four. Operation failures are rendered into the same shape and
//! returned as content, so a bad request never takes down the server loop.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::analytics::error::AnalyticsError;
use crate::analytics::results::{render_outcome, Operation};
use crate::analytics::AnalyticsService;

/// Handles MCP tool calls.
pub struct ToolHandler {
    analytics: Arc<AnalyticsService>,
}

impl ToolHandler {
    pub fn new(analytics: Arc<AnalyticsService>) -> Self {
        Self { analytics }
    }

    /// Dispatch a tool call and return its wire string. `Err` only for an
    /// unknown tool name; operation failures come back as rendered content.
    pub async fn handle(&self, name: &str, args: Option<Value>) -> Result<String> {
        let args = args.unwrap_or_else(|| json!({}));

        match name {
            "graph_shortest_path" => Ok(self.shortest_path(&args).await),
            "graph_centrality_analysis" => Ok(self.centrality(&args).await),
            "graph_community_detection" => Ok(self.community_detection(&args).await),
            "graph_transfer_network_analysis" => Ok(self.transfer_network(&args).await),
            "graph_temporal_analysis" => Ok(self.temporal(&args).await),
            _ => Err(anyhow!("Unknown tool: {}", name)),
        }
    }

    async fn shortest_path(&self, args: &Value) -> String {
        let outcome = async {
            let source_id = require_i64(args, "source_id")?;
            let target_id = require_i64(args, "target_id")?;
            let graph_type = opt_str(args, "graph_type").unwrap_or("player");
            self.analytics
                .shortest_path(source_id, target_id, graph_type)
                .await
        }
        .await;
        render_outcome(Operation::ShortestPath, &outcome)
    }

    async fn centrality(&self, args: &Value) -> String {
        let graph_type = opt_str(args, "graph_type").unwrap_or("player");
        let analysis_type = opt_str(args, "analysis_type").unwrap_or("betweenness");
        let top_n = args
            .get("top_n")
            .and_then(|v| v.as_u64())
            .unwrap_or(10) as usize;
        let outcome = self
            .analytics
            .centrality(graph_type, analysis_type, top_n)
            .await;
        render_outcome(Operation::Centrality, &outcome)
    }

    async fn community_detection(&self, args: &Value) -> String {
        let graph_type = opt_str(args, "graph_type").unwrap_or("player");
        let outcome = self.analytics.community_detection(graph_type).await;
        render_outcome(Operation::CommunityDetection, &outcome)
    }

    async fn transfer_network(&self, args: &Value) -> String {
        // 0 is the "absent" sentinel the batch callers send; treat it the
        // same here so both surfaces agree.
        let club_id = opt_i64(args, "club_id").filter(|id| *id != 0);
        let player_id = opt_i64(args, "player_id").filter(|id| *id != 0);
        let start_date = opt_str(args, "start_date");
        let end_date = opt_str(args, "end_date");
        let outcome = self
            .analytics
            .transfer_network(club_id, player_id, start_date, end_date)
            .await;
        render_outcome(Operation::TransferNetwork, &outcome)
    }

    async fn temporal(&self, args: &Value) -> String {
        let outcome = async {
            let time_range = opt_str(args, "time_range")
                .ok_or_else(|| AnalyticsError::invalid_input("time_range is required"))?;
            let analysis_type = opt_str(args, "analysis_type").unwrap_or("evolution");
            self.analytics.temporal(time_range, analysis_type).await
        }
        .await;
        render_outcome(Operation::Temporal, &outcome)
    }
}

fn require_i64(args: &Value, key: &str) -> Result<i64, AnalyticsError> {
    opt_i64(args, key)
        .ok_or_else(|| AnalyticsError::invalid_input(format!("{key} is required")))
}

fn opt_i64(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(|v| v.as_i64())
}

fn opt_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

// ============================================================================
// Tests
// ============================================================================
