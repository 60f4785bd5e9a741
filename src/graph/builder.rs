//! Graph derivation from the record store.
//!
//! Produces the player and club graphs in a single pass over the tables.
//! Pairwise edges are derived from grouped-by-key indices (club id → players,
//! match id → players, player id → clubs) built once up front, instead of
//! re-scanning the whole table for every row. Groups are visited in ascending
//! key order and members in source-row order, so repeated builds of the same
//! snapshot produce identical graphs.
//!
//! Pairwise derivation is still quadratic in group size; fine for squad- and
//! fixture-sized groups, a scaling limit for anything much larger.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use tracing::info;

use crate::store::RecordStore;

use super::models::{EdgeKind, EntityNode, GraphSet, NodeDetail, SoccerGraph};

/// Build both derived graphs from a loaded store.
///
/// Fails on an empty snapshot; dangling foreign keys in fact tables are
/// skipped (the edge insertion is a no-op when an endpoint is unknown).
pub fn build_graphs(store: &RecordStore) -> Result<GraphSet> {
    if store.is_empty() {
        bail!("record store is empty; refusing to build graphs");
    }

    let player = build_player_graph(store);
    let club = build_club_graph(store);

    info!(
        "Built player graph ({} nodes, {} edges) and club graph ({} nodes, {} edges)",
        player.node_count(),
        player.edge_count(),
        club.node_count(),
        club.edge_count(),
    );

    Ok(GraphSet { player, club })
}

fn build_player_graph(store: &RecordStore) -> SoccerGraph {
    let mut graph = SoccerGraph::with_capacity(store.persons.len(), 0);

    for person in store.persons.iter().filter(|p| p.is_player()) {
        graph.add_node(EntityNode {
            id: person.person_id,
            name: person.name.clone(),
            detail: NodeDetail::Player {
                nationality: person.nationality.clone(),
                position: person.position.clone(),
            },
        });
    }

    // Teammate edges: players sharing a club.
    let by_club = group_by(
        store.player_contracts.iter(),
        |c| c.club_id,
        |c| c.person_id,
    );
    for (club_id, players) in &by_club {
        for_each_pair(players, |a, b| {
            graph.add_edge(a, b, EdgeKind::Teammate { club_id: *club_id });
        });
    }

    // Co-participation edges: players appearing in the same match. A pair
    // already joined as teammates keeps its teammate edge.
    let by_match = group_by(
        store.match_appearances.iter(),
        |a| a.match_id,
        |a| a.person_id,
    );
    for (match_id, players) in &by_match {
        for_each_pair(players, |a, b| {
            graph.add_edge(
                a,
                b,
                EdgeKind::MatchCoParticipation {
                    match_id: *match_id,
                },
            );
        });
    }

    graph
}

fn build_club_graph(store: &RecordStore) -> SoccerGraph {
    let mut graph = SoccerGraph::with_capacity(store.clubs.len(), store.matches.len());

    for club in &store.clubs {
        graph.add_node(EntityNode {
            id: club.club_id,
            name: club.club_name.clone(),
            detail: NodeDetail::Club {
                country: club.country.clone(),
                founded_year: club.founded_year,
            },
        });
    }

    // Match edges: one edge per fixture, first fixture between a pair wins.
    for m in &store.matches {
        graph.add_edge(
            m.home_club_id,
            m.away_club_id,
            EdgeKind::Match {
                match_id: m.match_id,
            },
        );
    }

    // Transfer edges: clubs connected through a shared player's contracts.
    let by_player = group_by(
        store.player_contracts.iter(),
        |c| c.person_id,
        |c| c.club_id,
    );
    for (player_id, clubs) in &by_player {
        for_each_pair(clubs, |a, b| {
            graph.add_edge(
                a,
                b,
                EdgeKind::Transfer {
                    player_id: *player_id,
                },
            );
        });
    }

    graph
}

/// Index rows by group key, keeping member order equal to source-row order.
/// BTreeMap so group iteration order is deterministic.
fn group_by<T>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> i64,
    member: impl Fn(&T) -> i64,
) -> BTreeMap<i64, Vec<i64>> {
    let mut groups: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(member(&row));
    }
    groups
}

/// Visit every unordered pair of distinct positions in `members`.
fn for_each_pair(members: &[i64], mut visit: impl FnMut(i64, i64)) {
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            visit(a, b);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
