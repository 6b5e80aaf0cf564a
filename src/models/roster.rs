//! Roster model and league scoring formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy point system for a league.
///
/// The local trade heuristic doesn't consume this; it is carried as roster
/// context and would feed a performance-based scoring backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringFormat {
    Standard,
    #[serde(rename = "PPR")]
    Ppr,
    #[serde(rename = "Half-PPR")]
    HalfPpr,
}

impl ScoringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringFormat::Standard => "Standard",
            ScoringFormat::Ppr => "PPR",
            ScoringFormat::HalfPpr => "Half-PPR",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ppr" => ScoringFormat::Ppr,
            "half-ppr" | "half_ppr" | "halfppr" => ScoringFormat::HalfPpr,
            _ => ScoringFormat::Standard,
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ScoringFormat {
    fn default() -> Self {
        ScoringFormat::Standard
    }
}

/// A user's fantasy roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Unique numeric roster identifier
    pub id: i64,

    /// Roster display name
    pub name: String,

    /// League scoring format
    #[serde(default)]
    pub format: ScoringFormat,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(ScoringFormat::parse("PPR"), ScoringFormat::Ppr);
        assert_eq!(ScoringFormat::parse("half-ppr"), ScoringFormat::HalfPpr);
        assert_eq!(ScoringFormat::parse("standard"), ScoringFormat::Standard);
        assert_eq!(ScoringFormat::parse("whatever"), ScoringFormat::Standard);
    }
}
