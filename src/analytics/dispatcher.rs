//! Analytics operations.
//!
//! Five operations over the cached graphs and tables: shortest path,
//! centrality, community detection, transfer network, temporal aggregation.
//! Each operation validates its arguments into closed enums (unknown values
//! are [`AnalyticsError::InvalidInput`], never a silent default), selects
//! the player or club graph, runs the algorithm, and assembles a structured
//! result.
//!
//! [`AnalyticsService`] is the async entry point shared by both serving
//! surfaces; it guarantees the cache is loaded before dispatching to the
//! synchronous operation functions, which are pure over a [`LoadedData`]
//! snapshot and independently testable.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::graph::{GraphCache, GraphKind, LoadedData, SoccerGraph};
use crate::store::models::PlayerContractRecord;

use super::algorithms;
use super::error::AnalyticsError;
use super::results::{
    AnalyticsResult, Community, CommunityResult, CentralityEntry, CentralityResult, ContractLine,
    EntitySummary, EvolutionRow, ShortestPathResult, TemporalResult, TransferNetworkResult,
    TrendRow,
};

/// How many clubs the trends analysis reports.
const TRENDS_TOP_CLUBS: usize = 10;

// ============================================================================
// Argument enums
// ============================================================================

/// Centrality measure selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityKind {
    Betweenness,
    Closeness,
    Degree,
    Eigenvector,
}

impl CentralityKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "betweenness" => Some(Self::Betweenness),
            "closeness" => Some(Self::Closeness),
            "degree" => Some(Self::Degree),
            "eigenvector" => Some(Self::Eigenvector),
            _ => None,
        }
    }
}

impl std::fmt::Display for CentralityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Betweenness => write!(f, "betweenness"),
            Self::Closeness => write!(f, "closeness"),
            Self::Degree => write!(f, "degree"),
            Self::Eigenvector => write!(f, "eigenvector"),
        }
    }
}

/// Temporal analysis selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Evolution,
    Trends,
}

impl TemporalKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "evolution" => Some(Self::Evolution),
            "trends" => Some(Self::Trends),
            _ => None,
        }
    }
}

/// Parsed `time_range` argument: `"all"` (or empty), a single year, or an
/// inclusive year range like `"2018-2022"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    All,
    Years(i32, i32),
}

impl TimeRange {
    pub fn parse(raw: &str) -> Result<Self, AnalyticsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Ok(year) = trimmed.parse::<i32>() {
            return Ok(Self::Years(year, year));
        }
        if let Some((from, to)) = trimmed.split_once('-') {
            if let (Ok(from), Ok(to)) = (from.trim().parse::<i32>(), to.trim().parse::<i32>()) {
                if from <= to {
                    return Ok(Self::Years(from, to));
                }
            }
        }
        Err(AnalyticsError::invalid_input(format!(
            "unknown time_range '{trimmed}' (expected 'all', 'YYYY' or 'YYYY-YYYY')"
        )))
    }

    /// Whether a contract with this start date falls inside the range.
    /// Outside `All`, a contract without a start date never matches.
    pub fn matches(&self, start_date: Option<NaiveDate>) -> bool {
        match self {
            Self::All => true,
            Self::Years(from, to) => start_date
                .map(|d| (*from..=*to).contains(&d.year()))
                .unwrap_or(false),
        }
    }
}

fn parse_graph_kind(raw: &str) -> Result<GraphKind, AnalyticsError> {
    GraphKind::parse(raw).ok_or_else(|| {
        AnalyticsError::invalid_input(format!(
            "unknown graph_type '{raw}' (expected 'player' or 'club')"
        ))
    })
}

fn parse_iso_date(label: &str, raw: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AnalyticsError::invalid_input(format!("{label} '{raw}' is not a YYYY-MM-DD date"))
    })
}

fn summarize(graph: &SoccerGraph, kind: GraphKind, id: i64) -> EntitySummary {
    let name = graph
        .node(id)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| format!("Node {id}"));
    EntitySummary {
        id,
        name,
        entity_type: kind,
    }
}

// ============================================================================
// Operations (pure over a snapshot)
// ============================================================================

/// Unweighted shortest path between two entities of the selected graph.
pub fn shortest_path(
    data: &LoadedData,
    source_id: i64,
    target_id: i64,
    graph_type: &str,
) -> Result<AnalyticsResult, AnalyticsError> {
    let kind = parse_graph_kind(graph_type)?;
    let graph = data.graphs.select(kind);

    if !graph.contains(source_id) || !graph.contains(target_id) {
        return Err(AnalyticsError::NotFound);
    }

    let path =
        algorithms::bfs_shortest_path(graph, source_id, target_id).ok_or(AnalyticsError::NoPath)?;

    let steps = path.into_iter().map(|id| summarize(graph, kind, id)).collect();
    Ok(AnalyticsResult::ShortestPath(ShortestPathResult {
        graph: kind,
        steps,
    }))
}

/// Top-N nodes of the selected graph by the requested centrality measure.
pub fn centrality(
    data: &LoadedData,
    graph_type: &str,
    analysis_type: &str,
    top_n: usize,
) -> Result<AnalyticsResult, AnalyticsError> {
    let kind = parse_graph_kind(graph_type)?;
    let analysis = CentralityKind::parse(analysis_type).ok_or_else(|| {
        AnalyticsError::invalid_input(format!("unknown analysis_type '{analysis_type}'"))
    })?;
    let graph = data.graphs.select(kind);

    let mut scores = match analysis {
        CentralityKind::Betweenness => algorithms::betweenness_centrality(graph),
        CentralityKind::Closeness => algorithms::closeness_centrality(graph),
        CentralityKind::Degree => algorithms::degree_centrality(graph),
        CentralityKind::Eigenvector => algorithms::eigenvector_centrality(graph)?,
    };

    // Stable sort: ties keep node-insertion order.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores.truncate(top_n);

    let top = scores
        .into_iter()
        .map(|(id, score)| {
            let summary = summarize(graph, kind, id);
            CentralityEntry {
                id,
                name: summary.name,
                centrality_score: score,
                entity_type: kind,
            }
        })
        .collect();

    Ok(AnalyticsResult::Centrality(CentralityResult {
        analysis,
        graph: kind,
        top,
    }))
}

/// Louvain partition of the selected graph, largest community first.
pub fn community_detection(
    data: &LoadedData,
    graph_type: &str,
) -> Result<AnalyticsResult, AnalyticsError> {
    let kind = parse_graph_kind(graph_type)?;
    let graph = data.graphs.select(kind);

    let communities = algorithms::louvain_communities(graph)
        .into_iter()
        .enumerate()
        .map(|(community_id, member_ids)| {
            let members: Vec<EntitySummary> = member_ids
                .into_iter()
                .map(|id| summarize(graph, kind, id))
                .collect();
            Community {
                community_id,
                size: members.len(),
                members,
            }
        })
        .collect();

    Ok(AnalyticsResult::Communities(CommunityResult {
        graph: kind,
        communities,
    }))
}

/// Contracts at a club, or one player's club history. Exactly one of
/// `club_id` / `player_id` is required; when both are present the club
/// branch wins. A date range (both bounds, inclusive) pre-filters contracts
/// by start date.
pub fn transfer_network(
    data: &LoadedData,
    club_id: Option<i64>,
    player_id: Option<i64>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<AnalyticsResult, AnalyticsError> {
    if club_id.is_none() && player_id.is_none() {
        return Err(AnalyticsError::invalid_input(
            "either club_id or player_id must be provided",
        ));
    }

    let range = match (start_date, end_date) {
        (Some(start), Some(end)) => Some((
            parse_iso_date("start_date", start)?,
            parse_iso_date("end_date", end)?,
        )),
        _ => None,
    };

    let contracts: Vec<&PlayerContractRecord> = data
        .store
        .player_contracts
        .iter()
        .filter(|c| match range {
            Some((from, to)) => c.start_date.map(|d| d >= from && d <= to).unwrap_or(false),
            None => true,
        })
        .collect();

    if let Some(club_id) = club_id {
        let person_names: HashMap<i64, &str> = data
            .store
            .persons
            .iter()
            .map(|p| (p.person_id, p.name.as_str()))
            .collect();
        let transfers = contracts
            .iter()
            .filter(|c| c.club_id == club_id)
            .filter_map(|c| {
                // Dangling person reference: skip the row.
                let name = person_names.get(&c.person_id)?;
                Some(ContractLine {
                    counterparty_id: c.person_id,
                    counterparty_name: name.to_string(),
                    start_date: c.start_date,
                    end_date: c.end_date,
                    contract_value: c.contract_value.unwrap_or(0.0),
                })
            })
            .collect();
        return Ok(AnalyticsResult::TransferNetwork(
            TransferNetworkResult::Club { club_id, transfers },
        ));
    }

    let Some(player_id) = player_id else {
        // Both-None was rejected above; this arm is unreachable in practice.
        return Err(AnalyticsError::invalid_input(
            "either club_id or player_id must be provided",
        ));
    };
    let club_names: HashMap<i64, &str> = data
        .store
        .clubs
        .iter()
        .map(|c| (c.club_id, c.club_name.as_str()))
        .collect();
    let history = contracts
        .iter()
        .filter(|c| c.person_id == player_id)
        .filter_map(|c| {
            let name = club_names.get(&c.club_id)?;
            Some(ContractLine {
                counterparty_id: c.club_id,
                counterparty_name: name.to_string(),
                start_date: c.start_date,
                end_date: c.end_date,
                contract_value: c.contract_value.unwrap_or(0.0),
            })
        })
        .collect();
    Ok(AnalyticsResult::TransferNetwork(
        TransferNetworkResult::Player { player_id, history },
    ))
}

/// Temporal aggregation over the contract table, filtered by the parsed
/// `time_range` (which is also echoed back in the result).
pub fn temporal(
    data: &LoadedData,
    time_range: &str,
    analysis_type: &str,
) -> Result<AnalyticsResult, AnalyticsError> {
    let kind = TemporalKind::parse(analysis_type).ok_or_else(|| {
        AnalyticsError::invalid_input(format!("unknown analysis_type '{analysis_type}'"))
    })?;
    let range = TimeRange::parse(time_range)?;

    let contracts: Vec<&PlayerContractRecord> = data
        .store
        .player_contracts
        .iter()
        .filter(|c| range.matches(c.start_date))
        .collect();

    match kind {
        TemporalKind::Evolution => {
            // Per start year: distinct players, distinct clubs, summed value.
            let mut years: BTreeMap<i32, (HashSet<i64>, HashSet<i64>, f64)> = BTreeMap::new();
            for contract in &contracts {
                let Some(start) = contract.start_date else {
                    continue;
                };
                let entry = years.entry(start.year()).or_default();
                entry.0.insert(contract.person_id);
                entry.1.insert(contract.club_id);
                entry.2 += contract.contract_value.unwrap_or(0.0);
            }
            let rows = years
                .into_iter()
                .map(|(year, (players, clubs, total))| EvolutionRow {
                    year,
                    unique_players: players.len(),
                    unique_clubs: clubs.len(),
                    total_contract_value: total,
                })
                .collect();
            Ok(AnalyticsResult::Temporal(TemporalResult::Evolution {
                time_range: time_range.to_string(),
                rows,
            }))
        }
        TemporalKind::Trends => {
            let mut counts: HashMap<i64, usize> = HashMap::new();
            for contract in &contracts {
                *counts.entry(contract.club_id).or_default() += 1;
            }
            let club_names: HashMap<i64, &str> = data
                .store
                .clubs
                .iter()
                .map(|c| (c.club_id, c.club_name.as_str()))
                .collect();
            let mut rows: Vec<TrendRow> = counts
                .into_iter()
                .filter_map(|(club_id, transfer_count)| {
                    let name = club_names.get(&club_id)?;
                    Some(TrendRow {
                        club_id,
                        club_name: name.to_string(),
                        transfer_count,
                    })
                })
                .collect();
            rows.sort_by(|a, b| {
                b.transfer_count
                    .cmp(&a.transfer_count)
                    .then(a.club_id.cmp(&b.club_id))
            });
            rows.truncate(TRENDS_TOP_CLUBS);
            Ok(AnalyticsResult::Temporal(TemporalResult::Trends {
                time_range: time_range.to_string(),
                rows,
            }))
        }
    }
}

// ============================================================================
// AnalyticsService — async entry point over the cache
// ============================================================================

/// Shared entry point for both serving surfaces. Owns the graph cache and
/// guarantees the loaded state before every operation.
pub struct AnalyticsService {
    cache: GraphCache,
}

impl AnalyticsService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache: GraphCache::new(data_dir),
        }
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// Force the loaded transition now instead of on first request.
    pub async fn preload(&self) -> Result<(), AnalyticsError> {
        self.cache.ensure_loaded().await.map(|_| ())
    }

    pub async fn shortest_path(
        &self,
        source_id: i64,
        target_id: i64,
        graph_type: &str,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let data = self.cache.ensure_loaded().await?;
        shortest_path(&data, source_id, target_id, graph_type)
    }

    pub async fn centrality(
        &self,
        graph_type: &str,
        analysis_type: &str,
        top_n: usize,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let data = self.cache.ensure_loaded().await?;
        centrality(&data, graph_type, analysis_type, top_n)
    }

    pub async fn community_detection(
        &self,
        graph_type: &str,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let data = self.cache.ensure_loaded().await?;
        community_detection(&data, graph_type)
    }

    pub async fn transfer_network(
        &self,
        club_id: Option<i64>,
        player_id: Option<i64>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let data = self.cache.ensure_loaded().await?;
        transfer_network(&data, club_id, player_id, start_date, end_date)
    }

    pub async fn temporal(
        &self,
        time_range: &str,
        analysis_type: &str,
    ) -> Result<AnalyticsResult, AnalyticsError> {
        let data = self.cache.ensure_loaded().await?;
        temporal(&data, time_range, analysis_type)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graphs;
    use crate::store::models::*;
    use crate::store::RecordStore;

    fn person(id: i64, name: &str) -> PersonRecord {
        PersonRecord {
            person_id: id,
            name: name.to_string(),
            role: "PLAYER".to_string(),
            nationality: None,
            position: None,
            date_of_birth: None,
        }
    }

    fn club(id: i64, name: &str) -> ClubRecord {
        ClubRecord {
            club_id: id,
            club_name: name.to_string(),
            country: None,
            founded_year: None,
        }
    }

    fn contract(person_id: i64, club_id: i64, start: &str, value: f64) -> PlayerContractRecord {
        PlayerContractRecord {
            person_id,
            club_id,
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").ok(),
            end_date: None,
            contract_value: Some(value),
        }
    }

    /// Dataset used across the operation tests:
    /// - players P1, P2 share club C10 (contracts starting 2021)
    /// - P3 contracted at C12 in 2020, and at C11 in 2021
    /// - one match between C10 and C11
    /// - C13 is isolated (no matches, no shared players)
    fn snapshot() -> LoadedData {
        let store = RecordStore {
            persons: vec![
                person(1, "P1"),
                person(2, "P2"),
                person(3, "P3"),
                PersonRecord {
                    role: "COACH".to_string(),
                    ..person(4, "Coach")
                },
            ],
            clubs: vec![
                club(10, "C10"),
                club(11, "C11"),
                club(12, "C12"),
                club(13, "C13"),
            ],
            matches: vec![MatchRecord {
                match_id: 100,
                home_club_id: 10,
                away_club_id: 11,
                match_date: NaiveDate::from_ymd_opt(2021, 5, 1),
            }],
            player_contracts: vec![
                contract(1, 10, "2021-01-01", 100.0),
                contract(2, 10, "2021-01-01", 200.0),
                contract(3, 12, "2020-06-01", 300.0),
                contract(3, 11, "2021-07-01", 400.0),
            ],
            coach_contracts: vec![],
            match_appearances: vec![],
        };
        let graphs = build_graphs(&store).unwrap();
        LoadedData { store, graphs }
    }

    // --- shortest path ---

    #[test]
    fn test_shortest_path_teammates_one_hop() {
        let data = snapshot();
        let result = shortest_path(&data, 1, 2, "player").unwrap();
        let AnalyticsResult::ShortestPath(path) = &result else {
            panic!("wrong variant");
        };
        assert_eq!(path.hops(), 1);
        assert_eq!(path.steps[0].name, "P1");
        assert_eq!(path.steps[1].name, "P2");
        assert_eq!(
            data.graphs.player.edge_between(1, 2).unwrap().provenance(),
            10
        );
    }

    #[test]
    fn test_shortest_path_symmetry() {
        let data = snapshot();
        let AnalyticsResult::ShortestPath(forward) = shortest_path(&data, 1, 2, "player").unwrap()
        else {
            panic!()
        };
        let AnalyticsResult::ShortestPath(backward) = shortest_path(&data, 2, 1, "player").unwrap()
        else {
            panic!()
        };
        assert_eq!(forward.hops(), backward.hops());
        let reversed: Vec<i64> = backward.steps.iter().rev().map(|s| s.id).collect();
        let ids: Vec<i64> = forward.steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, reversed);
    }

    #[test]
    fn test_shortest_path_unknown_id_is_not_found() {
        let data = snapshot();
        assert!(matches!(
            shortest_path(&data, 1, 999, "player"),
            Err(AnalyticsError::NotFound)
        ));
    }

    #[test]
    fn test_shortest_path_isolated_club_is_no_path() {
        let data = snapshot();
        assert!(matches!(
            shortest_path(&data, 10, 13, "club"),
            Err(AnalyticsError::NoPath)
        ));
    }

    #[test]
    fn test_shortest_path_club_route_through_transfers() {
        let data = snapshot();
        // C10 - C11 (match), C11 - C12 (transfer via P3)
        let AnalyticsResult::ShortestPath(path) = shortest_path(&data, 10, 12, "club").unwrap()
        else {
            panic!()
        };
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_unknown_graph_type_is_invalid_input() {
        let data = snapshot();
        assert!(matches!(
            shortest_path(&data, 1, 2, "team"),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    // --- centrality ---

    #[test]
    fn test_centrality_sorted_non_increasing() {
        let data = snapshot();
        let AnalyticsResult::Centrality(result) =
            centrality(&data, "club", "degree", 10).unwrap()
        else {
            panic!()
        };
        for pair in result.top.windows(2) {
            assert!(pair[0].centrality_score >= pair[1].centrality_score);
        }
    }

    #[test]
    fn test_centrality_top_n_clamps_to_node_count() {
        let data = snapshot();
        let AnalyticsResult::Centrality(result) =
            centrality(&data, "player", "degree", 50).unwrap()
        else {
            panic!()
        };
        assert_eq!(result.top.len(), data.graphs.player.node_count());
    }

    #[test]
    fn test_centrality_unknown_analysis_is_invalid_input() {
        let data = snapshot();
        assert!(matches!(
            centrality(&data, "player", "pagerank", 5),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_centrality_betweenness_runs() {
        let data = snapshot();
        let AnalyticsResult::Centrality(result) =
            centrality(&data, "club", "betweenness", 2).unwrap()
        else {
            panic!()
        };
        assert_eq!(result.top.len(), 2);
        // C11 bridges C10 and C12.
        assert_eq!(result.top[0].name, "C11");
    }

    // --- community detection ---

    #[test]
    fn test_communities_partition_nodes() {
        let data = snapshot();
        let AnalyticsResult::Communities(result) =
            community_detection(&data, "player").unwrap()
        else {
            panic!()
        };
        let mut all: Vec<i64> = result
            .communities
            .iter()
            .flat_map(|c| c.members.iter().map(|m| m.id))
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3]);
        let total: usize = result.communities.iter().map(|c| c.size).sum();
        assert_eq!(total, data.graphs.player.node_count());
    }

    // --- transfer network ---

    #[test]
    fn test_transfer_requires_one_id() {
        let data = snapshot();
        assert!(matches!(
            transfer_network(&data, None, None, None, None),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transfer_club_id_takes_precedence() {
        let data = snapshot();
        let both = transfer_network(&data, Some(10), Some(99), None, None).unwrap();
        let club_only = transfer_network(&data, Some(10), None, None, None).unwrap();
        assert_eq!(both.to_value(), club_only.to_value());
    }

    #[test]
    fn test_transfer_club_branch_lists_contracts() {
        let data = snapshot();
        let AnalyticsResult::TransferNetwork(TransferNetworkResult::Club { transfers, .. }) =
            transfer_network(&data, Some(10), None, None, None).unwrap()
        else {
            panic!()
        };
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].counterparty_name, "P1");
        assert_eq!(transfers[0].contract_value, 100.0);
    }

    #[test]
    fn test_transfer_player_branch_lists_clubs() {
        let data = snapshot();
        let AnalyticsResult::TransferNetwork(TransferNetworkResult::Player { history, .. }) =
            transfer_network(&data, None, Some(3), None, None).unwrap()
        else {
            panic!()
        };
        let clubs: Vec<&str> = history.iter().map(|h| h.counterparty_name.as_str()).collect();
        assert_eq!(clubs, vec!["C12", "C11"]);
    }

    #[test]
    fn test_transfer_date_range_filters_contracts() {
        let data = snapshot();
        let AnalyticsResult::TransferNetwork(TransferNetworkResult::Player { history, .. }) =
            transfer_network(&data, None, Some(3), Some("2021-01-01"), Some("2021-12-31"))
                .unwrap()
        else {
            panic!()
        };
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].counterparty_name, "C11");
    }

    #[test]
    fn test_transfer_bad_date_is_invalid_input() {
        let data = snapshot();
        assert!(matches!(
            transfer_network(&data, Some(10), None, Some("not-a-date"), Some("2021-12-31")),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transfer_dangling_person_skipped() {
        let mut data = snapshot();
        data.store
            .player_contracts
            .push(contract(999, 10, "2021-02-01", 50.0));
        let AnalyticsResult::TransferNetwork(TransferNetworkResult::Club { transfers, .. }) =
            transfer_network(&data, Some(10), None, None, None).unwrap()
        else {
            panic!()
        };
        assert!(transfers.iter().all(|t| t.counterparty_id != 999));
    }

    // --- temporal ---

    #[test]
    fn test_temporal_evolution_rows_per_year() {
        let data = snapshot();
        let AnalyticsResult::Temporal(TemporalResult::Evolution { rows, .. }) =
            temporal(&data, "all", "evolution").unwrap()
        else {
            panic!()
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].unique_players, 1);
        assert_eq!(rows[0].unique_clubs, 1);
        assert_eq!(rows[0].total_contract_value, 300.0);
        assert_eq!(rows[1].year, 2021);
        assert_eq!(rows[1].unique_players, 3);
        assert_eq!(rows[1].unique_clubs, 2);
        assert_eq!(rows[1].total_contract_value, 700.0);
    }

    #[test]
    fn test_temporal_time_range_filters_years() {
        let data = snapshot();
        let AnalyticsResult::Temporal(TemporalResult::Evolution { rows, .. }) =
            temporal(&data, "2021", "evolution").unwrap()
        else {
            panic!()
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2021);
    }

    #[test]
    fn test_temporal_trends_counts_per_club() {
        let data = snapshot();
        let AnalyticsResult::Temporal(TemporalResult::Trends { rows, .. }) =
            temporal(&data, "all", "trends").unwrap()
        else {
            panic!()
        };
        assert_eq!(rows[0].club_name, "C10");
        assert_eq!(rows[0].transfer_count, 2);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_temporal_unknown_kind_is_invalid_input() {
        let data = snapshot();
        assert!(matches!(
            temporal(&data, "all", "patterns"),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_temporal_bad_time_range_is_invalid_input() {
        let data = snapshot();
        assert!(matches!(
            temporal(&data, "last 5 years", "evolution"),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_time_range_parsing() {
        assert_eq!(TimeRange::parse("all").unwrap(), TimeRange::All);
        assert_eq!(TimeRange::parse("").unwrap(), TimeRange::All);
        assert_eq!(TimeRange::parse("2021").unwrap(), TimeRange::Years(2021, 2021));
        assert_eq!(
            TimeRange::parse("2018-2022").unwrap(),
            TimeRange::Years(2018, 2022)
        );
        assert!(TimeRange::parse("2022-2018").is_err());
        assert!(TimeRange::parse("recent").is_err());
    }
}
