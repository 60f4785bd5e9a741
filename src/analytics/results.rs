//! Analytics result types and their two renderings.
//!
//! Every operation produces one structured result type. Each type renders
//! two ways:
//! - [`AnalyticsResult::to_value`] — the serializable key/value form
//! - [`AnalyticsResult::to_text`] — the human-readable numbered summary
//!
//! [`AnalyticsResult::render`] picks the single-string wire form shared by
//! both serving surfaces: raw text for shortest path, compact JSON for the
//! other four operations. Business logic never branches on the call site.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

use crate::graph::GraphKind;

use super::dispatcher::CentralityKind;
use super::error::AnalyticsError;

// ============================================================================
// Shared pieces
// ============================================================================

/// Minimal entity summary used in paths and community member lists.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: GraphKind,
}

/// Which operation produced (or failed to produce) a result. Drives the
/// error rendering: path errors are plain text, everything else is JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ShortestPath,
    Centrality,
    CommunityDetection,
    TransferNetwork,
    Temporal,
}

// ============================================================================
// Per-operation results
// ============================================================================

/// Result of a shortest-path query: the full node sequence, endpoints
/// included.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathResult {
    pub graph: GraphKind,
    pub steps: Vec<EntitySummary>,
}

impl ShortestPathResult {
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CentralityEntry {
    pub id: i64,
    pub name: String,
    pub centrality_score: f64,
    #[serde(rename = "type")]
    pub entity_type: GraphKind,
}

/// Top-N centrality scores, sorted non-increasing.
#[derive(Debug, Clone, Serialize)]
pub struct CentralityResult {
    pub analysis: CentralityKind,
    pub graph: GraphKind,
    pub top: Vec<CentralityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Community {
    pub community_id: usize,
    pub size: usize,
    pub members: Vec<EntitySummary>,
}

/// Louvain partition of the selected graph.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityResult {
    pub graph: GraphKind,
    pub communities: Vec<Community>,
}

/// One contract line in a transfer-network answer. Dates render in the
/// canonical `YYYY-MM-DD` form; an absent contract value renders as 0.0.
#[derive(Debug, Clone, Serialize)]
pub struct ContractLine {
    /// The counterparty: player id for a club query, club id for a player query
    pub counterparty_id: i64,
    pub counterparty_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub contract_value: f64,
}

/// Transfer-network answer: contracts at a club, or one player's club
/// history, depending on which id the caller supplied.
#[derive(Debug, Clone, Serialize)]
pub enum TransferNetworkResult {
    Club { club_id: i64, transfers: Vec<ContractLine> },
    Player { player_id: i64, history: Vec<ContractLine> },
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionRow {
    pub year: i32,
    pub unique_players: usize,
    pub unique_clubs: usize,
    pub total_contract_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendRow {
    pub club_id: i64,
    pub club_name: String,
    pub transfer_count: usize,
}

/// Temporal aggregation answer. The echoed `time_range` is the raw argument
/// the caller supplied.
#[derive(Debug, Clone, Serialize)]
pub enum TemporalResult {
    Evolution {
        time_range: String,
        rows: Vec<EvolutionRow>,
    },
    Trends {
        time_range: String,
        rows: Vec<TrendRow>,
    },
}

// ============================================================================
// The unified result
// ============================================================================

#[derive(Debug, Clone)]
pub enum AnalyticsResult {
    ShortestPath(ShortestPathResult),
    Centrality(CentralityResult),
    Communities(CommunityResult),
    TransferNetwork(TransferNetworkResult),
    Temporal(TemporalResult),
}

impl AnalyticsResult {
    pub fn operation(&self) -> Operation {
        match self {
            Self::ShortestPath(_) => Operation::ShortestPath,
            Self::Centrality(_) => Operation::Centrality,
            Self::Communities(_) => Operation::CommunityDetection,
            Self::TransferNetwork(_) => Operation::TransferNetwork,
            Self::Temporal(_) => Operation::Temporal,
        }
    }

    /// The structured key/value form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::ShortestPath(r) => json!({
                "graph_type": r.graph,
                "path": r.steps,
                "distance": r.hops(),
            }),
            Self::Centrality(r) => json!({
                "analysis_type": r.analysis,
                "graph_type": r.graph,
                "top_results": r.top,
            }),
            Self::Communities(r) => json!({
                "graph_type": r.graph,
                "communities": r.communities,
                "total_communities": r.communities.len(),
            }),
            Self::TransferNetwork(TransferNetworkResult::Club { club_id, transfers }) => {
                let rows: Vec<Value> = transfers
                    .iter()
                    .map(|t| {
                        json!({
                            "player_id": t.counterparty_id,
                            "player_name": t.counterparty_name,
                            "start_date": t.start_date,
                            "end_date": t.end_date,
                            "contract_value": t.contract_value,
                        })
                    })
                    .collect();
                json!({
                    "club_id": club_id,
                    "transfers": rows,
                    "total_transfers": transfers.len(),
                })
            }
            Self::TransferNetwork(TransferNetworkResult::Player { player_id, history }) => {
                let rows: Vec<Value> = history
                    .iter()
                    .map(|t| {
                        json!({
                            "club_id": t.counterparty_id,
                            "club_name": t.counterparty_name,
                            "start_date": t.start_date,
                            "end_date": t.end_date,
                            "contract_value": t.contract_value,
                        })
                    })
                    .collect();
                json!({
                    "player_id": player_id,
                    "transfer_history": rows,
                    "total_clubs": history.len(),
                })
            }
            Self::Temporal(TemporalResult::Evolution { time_range, rows }) => json!({
                "analysis_type": "evolution",
                "time_range": time_range,
                "evolution_data": rows,
            }),
            Self::Temporal(TemporalResult::Trends { time_range, rows }) => json!({
                "analysis_type": "trends",
                "time_range": time_range,
                "trends_data": rows,
            }),
        }
    }

    /// The human-readable numbered summary.
    pub fn to_text(&self) -> String {
        match self {
            Self::ShortestPath(r) => {
                let names: Vec<&str> = r.steps.iter().map(|s| s.name.as_str()).collect();
                let mut out = format!(
                    "Shortest path from {} to {}:\n",
                    names.first().copied().unwrap_or_default(),
                    names.last().copied().unwrap_or_default(),
                );
                out += &format!("Path: {}\n", names.join(" -> "));
                out += &format!("Distance: {} steps\n", r.hops());
                out += &format!("Graph Type: {}", r.graph.title());
                out
            }
            Self::Centrality(r) => {
                let mut out = format!(
                    "Top {} entities by {} centrality:\n\n",
                    r.top.len(),
                    r.analysis
                );
                for (i, entry) in r.top.iter().enumerate() {
                    out += &format!(
                        "{}. {} (Score: {:.4})\n",
                        i + 1,
                        entry.name,
                        entry.centrality_score
                    );
                }
                out
            }
            Self::Communities(r) => {
                let mut out = format!(
                    "Found {} communities in {} network:\n\n",
                    r.communities.len(),
                    r.graph
                );
                for (i, community) in r.communities.iter().enumerate() {
                    out += &format!("Community {} ({} members):\n", i + 1, community.size);
                    for member in community.members.iter().take(5) {
                        out += &format!("  - {}\n", member.name);
                    }
                    if community.size > 5 {
                        out += &format!("  ... and {} more\n", community.size - 5);
                    }
                    out += "\n";
                }
                out
            }
            Self::TransferNetwork(TransferNetworkResult::Club { club_id, transfers }) => {
                let mut out = format!(
                    "Transfer activity at club {} ({} contracts):\n\n",
                    club_id,
                    transfers.len()
                );
                for (i, t) in transfers.iter().enumerate() {
                    out += &format!("{}. {}{}\n", i + 1, t.counterparty_name, date_span(t));
                }
                out
            }
            Self::TransferNetwork(TransferNetworkResult::Player { player_id, history }) => {
                let mut out = format!(
                    "Transfer history for player {} ({} clubs):\n\n",
                    player_id,
                    history.len()
                );
                for (i, t) in history.iter().enumerate() {
                    out += &format!("{}. {}{}\n", i + 1, t.counterparty_name, date_span(t));
                }
                out
            }
            Self::Temporal(TemporalResult::Evolution { rows, .. }) => {
                let mut out = String::from("Network evolution by contract start year:\n\n");
                for (i, row) in rows.iter().enumerate() {
                    out += &format!(
                        "{}. {}: {} players, {} clubs, total value {:.2}\n",
                        i + 1,
                        row.year,
                        row.unique_players,
                        row.unique_clubs,
                        row.total_contract_value
                    );
                }
                out
            }
            Self::Temporal(TemporalResult::Trends { rows, .. }) => {
                let mut out = format!("Top {} clubs by transfer count:\n\n", rows.len());
                for (i, row) in rows.iter().enumerate() {
                    out += &format!(
                        "{}. {} ({} transfers)\n",
                        i + 1,
                        row.club_name,
                        row.transfer_count
                    );
                }
                out
            }
        }
    }

    /// The single-string wire form shared by both serving surfaces.
    pub fn render(&self) -> String {
        match self.operation() {
            Operation::ShortestPath => self.to_text(),
            _ => self.to_value().to_string(),
        }
    }
}

fn date_span(t: &ContractLine) -> String {
    match (t.start_date, t.end_date) {
        (Some(s), Some(e)) => format!(" ({s} to {e})"),
        (Some(s), None) => format!(" (from {s})"),
        (None, Some(e)) => format!(" (until {e})"),
        (None, None) => String::new(),
    }
}

/// Render an operation outcome to the wire string: results via
/// [`AnalyticsResult::render`], errors in the matching shape (plain text for
/// shortest path, `{"error": ...}` for the JSON operations).
pub fn render_outcome(
    operation: Operation,
    outcome: &Result<AnalyticsResult, AnalyticsError>,
) -> String {
    match outcome {
        Ok(result) => result.render(),
        Err(err) => match operation {
            Operation::ShortestPath => err.to_string(),
            _ => json!({ "error": err.to_string() }).to_string(),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, name: &str) -> EntitySummary {
        EntitySummary {
            id,
            name: name.to_string(),
            entity_type: GraphKind::Player,
        }
    }

    fn path_result() -> AnalyticsResult {
        AnalyticsResult::ShortestPath(ShortestPathResult {
            graph: GraphKind::Player,
            steps: vec![summary(1, "P1"), summary(2, "P2")],
        })
    }

    #[test]
    fn test_shortest_path_text_layout() {
        let text = path_result().to_text();
        assert_eq!(
            text,
            "Shortest path from P1 to P2:\nPath: P1 -> P2\nDistance: 1 steps\nGraph Type: Player"
        );
    }

    #[test]
    fn test_shortest_path_renders_as_text() {
        assert!(path_result().render().starts_with("Shortest path from"));
    }

    #[test]
    fn test_centrality_text_four_decimals() {
        let result = AnalyticsResult::Centrality(CentralityResult {
            analysis: CentralityKind::Betweenness,
            graph: GraphKind::Club,
            top: vec![CentralityEntry {
                id: 10,
                name: "C10".to_string(),
                centrality_score: 0.123456,
                entity_type: GraphKind::Club,
            }],
        });
        assert_eq!(
            result.to_text(),
            "Top 1 entities by betweenness centrality:\n\n1. C10 (Score: 0.1235)\n"
        );
    }

    #[test]
    fn test_centrality_value_shape() {
        let result = AnalyticsResult::Centrality(CentralityResult {
            analysis: CentralityKind::Degree,
            graph: GraphKind::Player,
            top: vec![],
        });
        let value = result.to_value();
        assert_eq!(value["analysis_type"], "degree");
        assert_eq!(value["graph_type"], "player");
        assert!(value["top_results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_community_text_truncates_to_five_members() {
        let members: Vec<EntitySummary> =
            (1..=8).map(|i| summary(i, &format!("P{i}"))).collect();
        let result = AnalyticsResult::Communities(CommunityResult {
            graph: GraphKind::Player,
            communities: vec![Community {
                community_id: 0,
                size: members.len(),
                members,
            }],
        });
        let text = result.to_text();
        assert!(text.starts_with("Found 1 communities in player network:\n\n"));
        assert!(text.contains("Community 1 (8 members):\n"));
        assert!(text.contains("  - P5\n"));
        assert!(!text.contains("  - P6\n"));
        assert!(text.contains("  ... and 3 more\n"));
    }

    #[test]
    fn test_transfer_club_value_shape() {
        let result = AnalyticsResult::TransferNetwork(TransferNetworkResult::Club {
            club_id: 7,
            transfers: vec![ContractLine {
                counterparty_id: 1,
                counterparty_name: "P1".to_string(),
                start_date: NaiveDate::from_ymd_opt(2021, 1, 1),
                end_date: None,
                contract_value: 100.0,
            }],
        });
        let value = result.to_value();
        assert_eq!(value["club_id"], 7);
        assert_eq!(value["total_transfers"], 1);
        assert_eq!(value["transfers"][0]["player_name"], "P1");
        assert_eq!(value["transfers"][0]["start_date"], "2021-01-01");
        assert!(value["transfers"][0]["end_date"].is_null());
    }

    #[test]
    fn test_temporal_value_shape() {
        let result = AnalyticsResult::Temporal(TemporalResult::Evolution {
            time_range: "all".to_string(),
            rows: vec![EvolutionRow {
                year: 2021,
                unique_players: 3,
                unique_clubs: 2,
                total_contract_value: 500.0,
            }],
        });
        let value = result.to_value();
        assert_eq!(value["analysis_type"], "evolution");
        assert_eq!(value["time_range"], "all");
        assert_eq!(value["evolution_data"][0]["year"], 2021);
    }

    #[test]
    fn test_render_outcome_error_shapes() {
        let err: Result<AnalyticsResult, AnalyticsError> = Err(AnalyticsError::NoPath);
        assert_eq!(
            render_outcome(Operation::ShortestPath, &err),
            "No path found between the specified entities."
        );

        let err: Result<AnalyticsResult, AnalyticsError> =
            Err(AnalyticsError::invalid_input("bad analysis_type"));
        let rendered = render_outcome(Operation::Centrality, &err);
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["error"], "Invalid input: bad analysis_type");
    }
}
