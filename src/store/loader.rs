//! Record store loading.
//!
//! Reads the six table exports from a data directory into a fully typed
//! [`RecordStore`]. Loading is all-or-nothing: a missing or unreadable table
//! fails the whole load and leaves no partial state behind.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::models::{
    ClubRecord, CoachContractRecord, MatchAppearanceRecord, MatchRecord, PersonRecord,
    PlayerContractRecord,
};

/// Fallback directory checked when the configured data dir does not exist.
const DEFAULT_DATA_DIR: &str = "graph_data";

/// Errors raised while loading the record store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("data directory not found: {0}")]
    DataDirNotFound(String),
    #[error("missing table file: {0}")]
    MissingTable(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable in-memory snapshot of the six source tables. Populated once
/// per load cycle; rebuilt wholesale on explicit reload.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub persons: Vec<PersonRecord>,
    pub clubs: Vec<ClubRecord>,
    pub matches: Vec<MatchRecord>,
    pub player_contracts: Vec<PlayerContractRecord>,
    pub coach_contracts: Vec<CoachContractRecord>,
    pub match_appearances: Vec<MatchAppearanceRecord>,
}

impl RecordStore {
    /// Load every table from `data_dir`, falling back to `./graph_data` when
    /// the configured directory does not exist.
    pub fn load(data_dir: &Path) -> Result<Self, LoadError> {
        let dir = Self::resolve_data_dir(data_dir)?;
        info!("Loading record store from {}", dir.display());

        let store = Self {
            persons: load_table(&dir, "persons.json")?,
            clubs: load_table(&dir, "clubs.json")?,
            matches: load_table(&dir, "matches.json")?,
            player_contracts: load_table(&dir, "player_contracts.json")?,
            coach_contracts: load_table(&dir, "coach_contracts.json")?,
            match_appearances: load_table(&dir, "match_appearances.json")?,
        };

        info!(
            "Loaded {} persons, {} clubs, {} matches, {} player contracts, {} coach contracts, {} appearances",
            store.persons.len(),
            store.clubs.len(),
            store.matches.len(),
            store.player_contracts.len(),
            store.coach_contracts.len(),
            store.match_appearances.len(),
        );
        Ok(store)
    }

    fn resolve_data_dir(preferred: &Path) -> Result<PathBuf, LoadError> {
        if preferred.is_dir() {
            return Ok(preferred.to_path_buf());
        }
        let fallback = Path::new(DEFAULT_DATA_DIR);
        if fallback.is_dir() {
            debug!(
                "Data dir {} not found, using {}",
                preferred.display(),
                fallback.display()
            );
            return Ok(fallback.to_path_buf());
        }
        Err(LoadError::DataDirNotFound(
            preferred.display().to_string(),
        ))
    }

    /// True when every table is empty. An empty snapshot cannot produce
    /// meaningful graphs and is rejected by the builder.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.clubs.is_empty()
            && self.matches.is_empty()
            && self.player_contracts.is_empty()
            && self.coach_contracts.is_empty()
            && self.match_appearances.is_empty()
    }
}

/// Read and parse one table file. Missing file and parse errors are
/// distinct failures so the operator can tell them apart in logs.
fn load_table<T: DeserializeOwned>(dir: &Path, filename: &str) -> Result<Vec<T>, LoadError> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Err(LoadError::MissingTable(path));
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let rows: Vec<T> =
        serde_json::from_str(&contents).map_err(|source| LoadError::Parse { path, source })?;
    debug!("Loaded {} rows from {}", rows.len(), filename);
    Ok(rows)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_table(dir: &Path, name: &str, json: &str) {
        fs::write(dir.join(name), json).unwrap();
    }

    /// Write a minimal but complete dataset into `dir`.
    fn write_fixture(dir: &Path) {
        write_table(
            dir,
            "persons.json",
            r#"[
                {"PERSON_ID": 1, "NAME": "P1", "ROLE": "PLAYER"},
                {"PERSON_ID": 2, "NAME": "P2", "ROLE": "PLAYER"},
                {"PERSON_ID": 3, "NAME": "C1", "ROLE": "COACH"}
            ]"#,
        );
        write_table(
            dir,
            "clubs.json",
            r#"[{"CLUB_ID": 10, "CLUB_NAME": "Club Ten", "COUNTRY": "ES"}]"#,
        );
        write_table(
            dir,
            "matches.json",
            r#"[{"MATCH_ID": 100, "HOME_CLUB_ID": 10, "AWAY_CLUB_ID": 11, "MATCH_DATE": "2021-05-01"}]"#,
        );
        write_table(
            dir,
            "player_contracts.json",
            r#"[
                {"PERSON_ID": 1, "CLUB_ID": 10, "START_DATE": "2021-01-01", "CONTRACT_VALUE": 100.0},
                {"PERSON_ID": 2, "CLUB_ID": 10, "START_DATE": "2021-01-01", "CONTRACT_VALUE": 200.0}
            ]"#,
        );
        write_table(
            dir,
            "coach_contracts.json",
            r#"[{"PERSON_ID": 3, "CLUB_ID": 10, "START_DATE": "2020-07-01"}]"#,
        );
        write_table(
            dir,
            "match_appearances.json",
            r#"[{"MATCH_ID": 100, "PERSON_ID": 1}, {"MATCH_ID": 100, "PERSON_ID": 2}]"#,
        );
    }

    #[test]
    fn test_load_complete_dataset() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());

        let store = RecordStore::load(tmp.path()).unwrap();
        assert_eq!(store.persons.len(), 3);
        assert_eq!(store.clubs.len(), 1);
        assert_eq!(store.matches.len(), 1);
        assert_eq!(store.player_contracts.len(), 2);
        assert_eq!(store.coach_contracts.len(), 1);
        assert_eq!(store.match_appearances.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_load_missing_table_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());
        fs::remove_file(tmp.path().join("matches.json")).unwrap();

        let err = RecordStore::load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingTable(_)), "got {err:?}");
    }

    #[test]
    fn test_load_malformed_table_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());
        write_table(tmp.path(), "clubs.json", "{ not json");

        let err = RecordStore::load(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let err = RecordStore::load(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, LoadError::DataDirNotFound(_)));
    }

    #[test]
    fn test_empty_store_detection() {
        assert!(RecordStore::default().is_empty());
    }
}
