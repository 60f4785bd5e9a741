//! Derived graph data models.
//!
//! ## Types
//! - [`GraphKind`] — which derived graph an operation targets (player or club)
//! - [`EntityNode`] / [`NodeDetail`] — node payload shared by both graphs
//! - [`EdgeKind`] — relationship tag plus the provenance fact that justified the edge
//! - [`SoccerGraph`] — petgraph wrapper with entity-id ↔ NodeIndex mapping
//! - [`GraphSet`] — the player/club graph pair published by one build

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Graph selection
// ============================================================================

/// The derived graph an analytics operation runs against.
///
/// Closed enum on purpose: an unrecognized `graph_type` string is an input
/// error, never a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Player,
    Club,
}

impl GraphKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "player" => Some(Self::Player),
            "club" => Some(Self::Club),
            _ => None,
        }
    }

    /// Title-case label used in the human-readable path summary.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Club => "Club",
        }
    }
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Club => write!(f, "club"),
        }
    }
}

// ============================================================================
// Nodes and edges
// ============================================================================

/// Graph-specific node attributes, copied verbatim from the source record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeDetail {
    Player {
        nationality: Option<String>,
        position: Option<String>,
    },
    Club {
        country: Option<String>,
        founded_year: Option<i64>,
    },
}

/// A node of either derived graph: a player person or a club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityNode {
    /// PERSON_ID or CLUB_ID from the source table
    pub id: i64,
    pub name: String,
    pub detail: NodeDetail,
}

/// A derived relationship between two entities, tagged with the fact that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Two players under contract at the same club (provenance: club id)
    Teammate { club_id: i64 },
    /// Two players who appeared in the same match (provenance: match id)
    MatchCoParticipation { match_id: i64 },
    /// Two clubs that played each other (provenance: match id)
    Match { match_id: i64 },
    /// Two clubs a single player was contracted to (provenance: player id)
    Transfer { player_id: i64 },
}

impl EdgeKind {
    /// The `relationship` tag as exposed in results.
    pub fn relationship(&self) -> &'static str {
        match self {
            Self::Teammate { .. } => "teammate",
            Self::MatchCoParticipation { .. } => "match_co_participation",
            Self::Match { .. } => "match",
            Self::Transfer { .. } => "transfer",
        }
    }

    /// The id of the originating fact.
    pub fn provenance(&self) -> i64 {
        match self {
            Self::Teammate { club_id } => *club_id,
            Self::MatchCoParticipation { match_id } | Self::Match { match_id } => *match_id,
            Self::Transfer { player_id } => *player_id,
        }
    }
}

// ============================================================================
// SoccerGraph — petgraph wrapper with ID mapping
// ============================================================================

/// Wrapper around an undirected `petgraph` graph with bidirectional
/// entity-id ↔ NodeIndex mapping, so lookups by PERSON_ID / CLUB_ID are O(1).
///
/// Invariants enforced at insertion time: no self-edges, and at most one
/// edge per unordered node pair (first writer wins).
#[derive(Debug, Clone, Default)]
pub struct SoccerGraph {
    pub graph: UnGraph<EntityNode, EdgeKind>,
    id_to_index: HashMap<i64, NodeIndex>,
}

impl SoccerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Add a node. If a node with the same entity id already exists, the
    /// existing index is returned and the new payload is dropped.
    pub fn add_node(&mut self, node: EntityNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&node.id) {
            return idx;
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.id_to_index.insert(id, idx);
        idx
    }

    /// Add an edge between two entity ids. Returns `false` without touching
    /// the graph when either endpoint is unknown (dangling foreign key), the
    /// endpoints are equal, or the pair is already connected.
    pub fn add_edge(&mut self, a: i64, b: i64, kind: EdgeKind) -> bool {
        if a == b {
            return false;
        }
        let (Some(&ia), Some(&ib)) = (self.id_to_index.get(&a), self.id_to_index.get(&b)) else {
            return false;
        };
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, kind);
        true
    }

    pub fn contains(&self, id: i64) -> bool {
        self.id_to_index.contains_key(&id)
    }

    pub fn index_of(&self, id: i64) -> Option<NodeIndex> {
        self.id_to_index.get(&id).copied()
    }

    pub fn node(&self, id: i64) -> Option<&EntityNode> {
        let idx = self.index_of(id)?;
        self.graph.node_weight(idx)
    }

    /// Edge tag between two entity ids, if the pair is connected.
    pub fn edge_between(&self, a: i64, b: i64) -> Option<EdgeKind> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order (derivation order, so stable run-to-run).
    pub fn nodes(&self) -> impl Iterator<Item = &EntityNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }
}

// ============================================================================
// GraphSet — the published pair
// ============================================================================

/// The player/club graph pair produced by one build. Published atomically by
/// the cache; read-only afterwards.
#[derive(Debug, Clone)]
pub struct GraphSet {
    pub player: SoccerGraph,
    pub club: SoccerGraph,
}

impl GraphSet {
    pub fn select(&self, kind: GraphKind) -> &SoccerGraph {
        match kind {
            GraphKind::Player => &self.player,
            GraphKind::Club => &self.club,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
