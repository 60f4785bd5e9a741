//! In-memory record store for the six source tables.
//!
//! - [`models`] — typed row structs with lenient date coercion
//! - [`loader`] — all-or-nothing load of the table exports into a [`RecordStore`]

pub mod loader;
pub mod models;

pub use loader::{LoadError, RecordStore};
pub use models::{
    ClubRecord, CoachContractRecord, MatchAppearanceRecord, MatchRecord, PersonRecord,
    PlayerContractRecord,
};
