//! Wire types for the fantasy league API.
//!
//! The upstream serializes the same fields under both camelCase and
//! snake_case depending on the endpoint. These DTOs absorb both spellings
//! via serde aliases and convert into the canonical `models` shapes at the
//! client boundary; the dual naming never leaks past this module.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Player, Position, Roster, ScoringFormat, User};

/// Player record as endpoints return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(alias = "player_id")]
    pub player_id: i64,

    #[serde(alias = "player_name")]
    pub player_name: String,

    #[serde(default, alias = "team_name")]
    pub team_name: String,

    pub position: Position,

    #[serde(default, alias = "rank_position")]
    pub rank_position: Option<u32>,

    #[serde(default, alias = "projected_points")]
    pub projected_points: Option<Decimal>,

    #[serde(default, alias = "actual_points")]
    pub actual_points: Option<Decimal>,

    #[serde(default, alias = "added_at")]
    pub added_at: Option<DateTime<Utc>>,
}

impl From<PlayerRecord> for Player {
    fn from(r: PlayerRecord) -> Self {
        Player {
            id: r.player_id,
            name: r.player_name,
            team: r.team_name,
            position: r.position,
            rank: r.rank_position,
            projected_points: r.projected_points,
            actual_points: r.actual_points,
            added_at: r.added_at,
        }
    }
}

/// Roster record as endpoints return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRecord {
    #[serde(alias = "roster_id")]
    pub roster_id: i64,

    #[serde(alias = "roster_name")]
    pub roster_name: String,

    #[serde(default, alias = "league_format")]
    pub league_format: Option<String>,

    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RosterRecord> for Roster {
    fn from(r: RosterRecord) -> Self {
        Roster {
            id: r.roster_id,
            name: r.roster_name,
            format: r
                .league_format
                .as_deref()
                .map(ScoringFormat::parse)
                .unwrap_or_default(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// User record as auth endpoints return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "user_id")]
    pub id: i64,

    pub email: String,

    #[serde(default, alias = "first_name")]
    pub first_name: String,

    #[serde(default, alias = "last_name")]
    pub last_name: String,

    #[serde(default, alias = "profile_icon")]
    pub profile_icon: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: r.id,
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            profile_icon: r.profile_icon,
        }
    }
}

/// Successful login/register response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(alias = "session_id")]
    pub session_id: String,
    pub user: UserRecord,
}

/// Session verification response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// Profile endpoint payload: the user plus their rosters.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user: UserRecord,
    #[serde(default)]
    pub rosters: Vec<RosterRecord>,
}

// Envelope shapes around list payloads.

#[derive(Debug, Clone, Deserialize)]
pub struct PlayersEnvelope {
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingsEnvelope {
    #[serde(default)]
    pub rankings: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformersEnvelope {
    #[serde(default, alias = "best_performers")]
    pub best_performers: Vec<PlayerRecord>,
    #[serde(default, alias = "worst_performers")]
    pub worst_performers: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RostersEnvelope {
    #[serde(default)]
    pub rosters: Vec<RosterRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEnvelope {
    pub roster: RosterRecord,
}

// Request bodies.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRosterRequest {
    pub roster_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league_format: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRosterPlayerRequest {
    pub player_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub week: u8,
    pub season_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub subject: String,
    pub message: String,
    pub category: String,
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_record_accepts_both_namings() {
        let camel = r#"{"playerId": 12, "playerName": "A. Back", "teamName": "Bears", "position": "RB"}"#;
        let snake = r#"{"player_id": 12, "player_name": "A. Back", "team_name": "Bears", "position": "RB"}"#;

        let a: PlayerRecord = serde_json::from_str(camel).unwrap();
        let b: PlayerRecord = serde_json::from_str(snake).unwrap();

        assert_eq!(a.player_id, b.player_id);
        assert_eq!(a.player_name, b.player_name);
        assert_eq!(a.team_name, b.team_name);
        assert_eq!(a.position, Position::Rb);
    }

    #[test]
    fn test_unknown_position_deserializes_to_fallback_variant() {
        let raw = r#"{"playerId": 1, "playerName": "X", "position": "FLEX"}"#;
        let record: PlayerRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.position, Position::Unknown);
    }

    #[test]
    fn test_roster_record_normalizes_format() {
        let raw = r#"{"roster_id": 3, "roster_name": "My Team", "league_format": "PPR"}"#;
        let record: RosterRecord = serde_json::from_str(raw).unwrap();
        let roster: Roster = record.into();
        assert_eq!(roster.format, ScoringFormat::Ppr);
    }
}
