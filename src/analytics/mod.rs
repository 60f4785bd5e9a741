//! Analytics operations over the derived graphs.
//!
//! - [`error`] — the failure taxonomy every operation reports through
//! - [`algorithms`] — BFS, centralities, Louvain
//! - [`dispatcher`] — the five operations and the [`AnalyticsService`] entry point
//! - [`results`] — structured results with text / JSON renderings

pub mod algorithms;
pub mod dispatcher;
pub mod error;
pub mod results;

pub use dispatcher::{AnalyticsService, CentralityKind, TemporalKind, TimeRange};
pub use error::AnalyticsError;
pub use results::{AnalyticsResult, Operation};
