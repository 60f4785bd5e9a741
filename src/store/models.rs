//! Record store data models.
//!
//! One record type per source table. The source files are Snowflake table
//! exports, so column names arrive in SCREAMING_SNAKE_CASE and date columns
//! arrive as strings in whatever format the export produced. Every optional
//! column is an `Option<T>`; date columns go through [`lenient_date`], which
//! coerces unparseable values to `None` instead of failing the load.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Lenient date coercion
// ============================================================================

/// Date formats accepted from the table exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a date-like string, returning `None` when no known format matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in DATE_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d);
        }
    }
    None
}

/// Serde deserializer for optional date columns: absent, null, or
/// unparseable values all become `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

// ============================================================================
// Table records
// ============================================================================

/// Role value that marks a person as a player (persons table carries both
/// players and coaching staff).
pub const ROLE_PLAYER: &str = "PLAYER";

/// A row of the persons table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PersonRecord {
    pub person_id: i64,
    pub name: String,
    /// "PLAYER", "COACH", ...
    pub role: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
}

impl PersonRecord {
    /// True if this person participates in the player graph.
    pub fn is_player(&self) -> bool {
        self.role == ROLE_PLAYER
    }
}

/// A row of the clubs table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClubRecord {
    pub club_id: i64,
    pub club_name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i64>,
}

/// A row of the matches table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MatchRecord {
    pub match_id: i64,
    pub home_club_id: i64,
    pub away_club_id: i64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub match_date: Option<NaiveDate>,
}

/// A row of the player_contracts table. `club_id` and `person_id` are
/// foreign keys with no enforced referential integrity — consumers must
/// tolerate dangling references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PlayerContractRecord {
    pub person_id: i64,
    pub club_id: i64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_value: Option<f64>,
}

/// A row of the coach_contracts table. Loaded for completeness of the
/// snapshot; no graph derivation rule consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CoachContractRecord {
    pub person_id: i64,
    pub club_id: i64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
}

/// A row of the match_appearances table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MatchAppearanceRecord {
    pub match_id: i64,
    pub person_id: i64,
}

// ============================================================================
// Tests
// ============================================================================
