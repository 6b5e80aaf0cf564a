//! Player model and fantasy positions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    K,
    Def,
    /// Catch-all for positions the API introduces that we don't know about.
    #[serde(other)]
    Unknown,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::K => "K",
            Position::Def => "DEF",
            Position::Unknown => "UNK",
        }
    }

    /// Parse a position code as the API sends it. Unrecognized codes map to
    /// `Unknown` rather than failing, matching the wire deserializer.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "QB" => Position::Qb,
            "RB" => Position::Rb,
            "WR" => Position::Wr,
            "TE" => Position::Te,
            "K" => Position::K,
            "DEF" => Position::Def,
            _ => Position::Unknown,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical player record.
///
/// The API serializes the same fields under two naming conventions; wire
/// types in `api::types` absorb both and are normalized to this single shape
/// before anything else sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique numeric player identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// NFL team name
    #[serde(default)]
    pub team: String,

    /// Roster position
    pub position: Position,

    /// Rank within position, when the source provides one
    pub rank: Option<u32>,

    /// Projected fantasy points for the upcoming week
    pub projected_points: Option<Decimal>,

    /// Actual fantasy points scored
    pub actual_points: Option<Decimal>,

    /// When the player was added (to a roster or trade side)
    pub added_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Short one-line label for table output.
    pub fn label(&self) -> String {
        if self.team.is_empty() {
            format!("{} ({})", self.name, self.position)
        } else {
            format!("{} ({}, {})", self.name, self.position, self.team)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse_roundtrip() {
        for code in ["QB", "RB", "WR", "TE", "K", "DEF"] {
            assert_eq!(Position::parse(code).as_str(), code);
        }
    }

    #[test]
    fn test_position_parse_unknown() {
        assert_eq!(Position::parse("FLEX"), Position::Unknown);
        assert_eq!(Position::parse(""), Position::Unknown);
    }

    #[test]
    fn test_position_parse_case_insensitive() {
        assert_eq!(Position::parse("qb"), Position::Qb);
        assert_eq!(Position::parse("Def"), Position::Def);
    }

    #[test]
    fn test_label_without_team() {
        let player = Player {
            id: 1,
            name: "Test Kicker".to_string(),
            team: String::new(),
            position: Position::K,
            rank: None,
            projected_points: None,
            actual_points: None,
            added_at: None,
        };
        assert_eq!(player.label(), "Test Kicker (K)");
    }
}
