//! Graph algorithms for the analytics operations.
//!
//! - **Shortest path** — breadth-first search (unweighted graphs)
//! - **Degree / betweenness / closeness / eigenvector centrality** —
//!   betweenness, closeness and eigenvector via `rustworkx_core::centrality`;
//!   degree centrality is degree / (n − 1)
//! - **Community detection (Louvain)** — greedy modularity optimization
//!
//! All functions take a [`SoccerGraph`] and return results keyed by entity id
//! in node-insertion order, so downstream sorting is stable run-to-run.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::SoccerGraph;

use super::error::AnalyticsError;

// ============================================================================
// Shortest path (BFS)
// ============================================================================

/// Unweighted shortest path between two entity ids, as the ordered id
/// sequence including both endpoints. `None` when no path exists. Callers
/// are expected to have validated that both ids are nodes of the graph.
pub fn bfs_shortest_path(g: &SoccerGraph, source: i64, target: i64) -> Option<Vec<i64>> {
    let start = g.index_of(source)?;
    let goal = g.index_of(target)?;
    if start == goal {
        return Some(vec![source]);
    }

    let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in g.graph.neighbors(current) {
            if neighbor == start || predecessor.contains_key(&neighbor) {
                continue;
            }
            predecessor.insert(neighbor, current);
            if neighbor == goal {
                return Some(reconstruct_path(g, &predecessor, start, goal));
            }
            queue.push_back(neighbor);
        }
    }
    None
}

fn reconstruct_path(
    g: &SoccerGraph,
    predecessor: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<i64> {
    let mut path = vec![g.graph[goal].id];
    let mut current = goal;
    while current != start {
        current = predecessor[&current];
        path.push(g.graph[current].id);
    }
    path.reverse();
    path
}

// ============================================================================
// Centrality
// ============================================================================

/// Degree centrality: degree / (n − 1), the fraction of other nodes each
/// node touches. Zero for a single-node graph.
pub fn degree_centrality(g: &SoccerGraph) -> Vec<(i64, f64)> {
    let n = g.node_count();
    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
    g.graph
        .node_indices()
        .map(|idx| {
            let degree = g.graph.neighbors(idx).count();
            (g.graph[idx].id, degree as f64 / denom)
        })
        .collect()
}

/// Betweenness centrality, normalized, endpoints excluded.
pub fn betweenness_centrality(g: &SoccerGraph) -> Vec<(i64, f64)> {
    if g.node_count() == 0 {
        return Vec::new();
    }
    let scores = rustworkx_core::centrality::betweenness_centrality(
        &g.graph, false, // include_endpoints
        true,  // normalized
        200,   // parallel_threshold (sequential for small graphs)
    );
    g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].id, scores[idx.index()].unwrap_or(0.0)))
        .collect()
}

/// Closeness centrality with the Wasserman-Faust improvement, so scores on
/// disconnected graphs stay comparable.
pub fn closeness_centrality(g: &SoccerGraph) -> Vec<(i64, f64)> {
    if g.node_count() == 0 {
        return Vec::new();
    }
    let scores = rustworkx_core::centrality::closeness_centrality(&g.graph, true);
    g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].id, scores[idx.index()].unwrap_or(0.0)))
        .collect()
}

/// Eigenvector centrality by power iteration (unit edge weights, 100
/// iterations, tolerance 1e-6). Graphs without a dominant eigenvalue
/// structure may not converge; that surfaces as [`AnalyticsError::AlgorithmFailure`].
pub fn eigenvector_centrality(g: &SoccerGraph) -> Result<Vec<(i64, f64)>, AnalyticsError> {
    if g.node_count() == 0 {
        return Ok(Vec::new());
    }
    let scores = rustworkx_core::centrality::eigenvector_centrality(
        &g.graph,
        |_| Ok::<f64, AnalyticsError>(1.0),
        Some(100),
        Some(1e-6),
    )?;
    let scores = scores.ok_or_else(|| {
        AnalyticsError::AlgorithmFailure(
            "Centrality analysis",
            "eigenvector centrality did not converge".to_string(),
        )
    })?;
    Ok(g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].id, scores[idx.index()]))
        .collect())
}

// ============================================================================
// Community detection — Louvain
// ============================================================================

const LOUVAIN_MAX_ITERATIONS: usize = 100;

/// Detect communities with the Louvain method (greedy local moves that
/// maximize modularity, unit edge weights).
///
/// Returns member-id lists, largest community first; members in
/// node-insertion order. Not seeded: the partition may differ between
/// datasets with symmetric structure, which the contract allows.
pub fn louvain_communities(g: &SoccerGraph) -> Vec<Vec<i64>> {
    let n = g.node_count();
    if n == 0 {
        return Vec::new();
    }

    // Undirected adjacency lists with weighted degree per node.
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut strengths: Vec<f64> = vec![0.0; n];
    for edge in g.graph.edge_references() {
        let s = edge.source().index();
        let t = edge.target().index();
        adj[s].push(t);
        adj[t].push(s);
        strengths[s] += 1.0;
        strengths[t] += 1.0;
    }

    let total_weight: f64 = strengths.iter().sum::<f64>() / 2.0;
    let mut community: Vec<u32> = (0..n as u32).collect();

    if total_weight > 0.0 {
        let m2 = 2.0 * total_weight;

        // Community total strength, maintained incrementally.
        let mut comm_strength: HashMap<u32, f64> = HashMap::with_capacity(n);
        for (i, &ki) in strengths.iter().enumerate() {
            *comm_strength.entry(community[i]).or_default() += ki;
        }

        let mut improved = true;
        let mut iterations = 0;
        while improved && iterations < LOUVAIN_MAX_ITERATIONS {
            improved = false;
            iterations += 1;

            for node in 0..n {
                let current = community[node];
                let ki = strengths[node];

                // Edge weight from this node to each neighboring community.
                let mut comm_weights: HashMap<u32, f64> = HashMap::new();
                for &neighbor in &adj[node] {
                    *comm_weights.entry(community[neighbor]).or_default() += 1.0;
                }

                let w_current = comm_weights.get(&current).copied().unwrap_or(0.0);
                let sigma_current = comm_strength.get(&current).copied().unwrap_or(0.0);
                let remove_cost = w_current / m2 - ki * (sigma_current - ki) / (m2 * m2);

                let mut best_comm = current;
                let mut best_gain = 0.0;
                for (&target, &w_target) in &comm_weights {
                    if target == current {
                        continue;
                    }
                    let sigma_target = comm_strength.get(&target).copied().unwrap_or(0.0);
                    let gain = (w_target / m2 - ki * sigma_target / (m2 * m2)) - remove_cost;
                    if gain > best_gain {
                        best_gain = gain;
                        best_comm = target;
                    }
                }

                if best_comm != current {
                    *comm_strength.entry(current).or_default() -= ki;
                    *comm_strength.entry(best_comm).or_default() += ki;
                    community[node] = best_comm;
                    improved = true;
                }
            }
        }
    }

    // Group members per community, community ids in first-seen order so the
    // output is deterministic for a given assignment.
    let mut members: Vec<Vec<i64>> = Vec::new();
    let mut comm_slot: HashMap<u32, usize> = HashMap::new();
    for idx in g.graph.node_indices() {
        let comm = community[idx.index()];
        let slot = *comm_slot.entry(comm).or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[slot].push(g.graph[idx].id);
    }
    members.sort_by_key(|m| std::cmp::Reverse(m.len()));
    members
}

// ============================================================================
// Tests
// ============================================================================
