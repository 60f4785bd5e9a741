//! Derived graphs: construction, caching, lifecycle.
//!
//! ```text
//! JSON table exports ──► RecordStore ──► builder ──► GraphSet
//!                                                      │
//!                                  GraphCache (single-flight, atomic swap)
//!                                                      │
//!                                           analytics operations (read-only)
//! ```
//!
//! - [`models`] — node/edge types and the [`SoccerGraph`] petgraph wrapper
//! - [`builder`] — deterministic edge derivation from the record store
//! - [`cache`] — lazy single-flight load, explicit reload

pub mod builder;
pub mod cache;
pub mod models;

pub use builder::build_graphs;
pub use cache::{GraphCache, LoadedData};
pub use models::{EdgeKind, EntityNode, GraphKind, GraphSet, NodeDetail, SoccerGraph};
