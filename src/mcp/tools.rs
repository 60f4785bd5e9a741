//! MCP tool definitions.
//!
//! The five graph analytics tools exposed to MCP clients.

use serde_json::json;

use super::protocol::{InputSchema, ToolDefinition};

/// Generate all tool definitions
pub fn all_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "graph_shortest_path".to_string(),
            description: "Find the shortest path between two entities in the soccer knowledge graph"
                .to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "source_id": {"type": "integer", "description": "Source entity ID"},
                    "target_id": {"type": "integer", "description": "Target entity ID"},
                    "graph_type": {"type": "string", "description": "Graph to analyze (player or club)"}
                })),
                required: Some(vec!["source_id".to_string(), "target_id".to_string()]),
            },
        },
        ToolDefinition {
            name: "graph_centrality_analysis".to_string(),
            description: "Rank entities by a centrality measure (betweenness, closeness, degree, eigenvector)"
                .to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "graph_type": {"type": "string", "description": "Graph to analyze (player or club)"},
                    "analysis_type": {"type": "string", "description": "Centrality measure (betweenness, closeness, degree, eigenvector)"},
                    "top_n": {"type": "integer", "description": "Number of top results to return (default 10)"}
                })),
                required: None,
            },
        },
        ToolDefinition {
            name: "graph_community_detection".to_string(),
            description: "Detect communities in the soccer knowledge graph (Louvain)".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "graph_type": {"type": "string", "description": "Graph to analyze (player or club)"}
                })),
                required: None,
            },
        },
        ToolDefinition {
            name: "graph_transfer_network_analysis".to_string(),
            description: "List contracts at a club, or a player's club history, optionally bounded by a date range"
                .to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "club_id": {"type": "integer", "description": "Club ID for analysis"},
                    "player_id": {"type": "integer", "description": "Player ID for analysis"},
                    "start_date": {"type": "string", "description": "Range start (YYYY-MM-DD)"},
                    "end_date": {"type": "string", "description": "Range end (YYYY-MM-DD)"}
                })),
                required: None,
            },
        },
        ToolDefinition {
            name: "graph_temporal_analysis".to_string(),
            description: "Aggregate contract activity over time (evolution by year, or transfer trends per club)"
                .to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "time_range": {"type": "string", "description": "Year filter: 'all', 'YYYY' or 'YYYY-YYYY'"},
                    "analysis_type": {"type": "string", "description": "Analysis kind (evolution or trends)"}
                })),
                required: Some(vec!["time_range".to_string()]),
            },
        },
    ]
}
