//! Local state persistence for the companion CLI.
//!
//! The browser client kept its session in localStorage and the in-progress
//! trade in component state; the CLI keeps both in SQLite so a trade can be
//! built up across invocations:
//! - The authenticated session (token + user)
//! - The selected roster context
//! - The in-progress trade sides
//! - Evaluation history, with a pointer to the one still-valid result

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::models::{Grade, Player, Position, SideKind, TradeResult};

/// Database connection pool with companion state management.
pub struct Database {
    pool: SqlitePool,
}

/// Stored session row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredSession {
    pub token: String,
    pub session_id: String,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

/// Selected roster context.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SelectedRoster {
    pub roster_id: i64,
    pub roster_name: String,
    pub league_format: String,
}

/// One player snapshot inside the in-progress trade.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredTradePlayer {
    pub player_id: i64,
    pub side: String,
    pub player_name: String,
    pub team_name: String,
    pub position: String,
}

impl StoredTradePlayer {
    pub fn side_kind(&self) -> SideKind {
        if self.side == "receiving" {
            SideKind::Receiving
        } else {
            SideKind::Giving
        }
    }

    pub fn to_player(&self) -> Player {
        Player {
            id: self.player_id,
            name: self.player_name.clone(),
            team: self.team_name.clone(),
            position: Position::parse(&self.position),
            rank: None,
            projected_points: None,
            actual_points: None,
            added_at: None,
        }
    }
}

/// Stored evaluation record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredEvaluation {
    pub id: String,
    pub roster_id: i64,
    pub giving_value: f64,
    pub receiving_value: f64,
    pub percent_diff: f64,
    pub grade: String,
    pub analysis: String,
    pub created_at: String,
}

impl StoredEvaluation {
    /// Rebuild the domain result. None if the row predates the current
    /// grade set or holds non-finite numbers.
    pub fn to_result(&self) -> Option<TradeResult> {
        Some(TradeResult {
            grade: Grade::parse(&self.grade)?,
            percent_diff: Decimal::try_from(self.percent_diff).ok()?,
            giving_value: Decimal::try_from(self.giving_value).ok()?,
            receiving_value: Decimal::try_from(self.receiving_value).ok()?,
            analysis: self.analysis.clone(),
        })
    }
}

impl Database {
    /// Create a new database connection.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run all database migrations.
    async fn run_migrations(&self) -> Result<()> {
        // Session (singleton row, the localStorage analog)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                session_id TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                email TEXT NOT NULL,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // App state: roster context and the still-valid evaluation pointer
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS app_state (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                roster_id INTEGER,
                roster_name TEXT,
                league_format TEXT,
                valid_evaluation_id TEXT,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // In-progress trade; primary key on player_id keeps the sides
        // disjoint and makes duplicate adds a no-op
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trade_players (
                player_id INTEGER PRIMARY KEY,
                side TEXT NOT NULL CHECK (side IN ('giving', 'receiving')),
                player_name TEXT NOT NULL,
                team_name TEXT NOT NULL DEFAULT '',
                position TEXT NOT NULL,
                added_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Evaluation history
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS evaluations (
                id TEXT PRIMARY KEY,
                roster_id INTEGER NOT NULL,
                giving_value REAL NOT NULL,
                receiving_value REAL NOT NULL,
                percent_diff REAL NOT NULL,
                grade TEXT NOT NULL,
                analysis TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_evaluations_time ON evaluations(created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ==================== Session ====================

    /// Store the session granted at login/register, replacing any prior one.
    pub async fn save_session(
        &self,
        token: &str,
        session_id: &str,
        user_id: i64,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session (id, token, session_id, user_id, email, first_name, last_name, created_at)
            VALUES (1, ?, ?, ?, ?, ?, ?, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                session_id = excluded.session_id,
                user_id = excluded.user_id,
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                created_at = datetime('now')
            "#,
        )
        .bind(token)
        .bind(session_id)
        .bind(user_id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The stored session, if any.
    pub async fn get_session(&self) -> Result<Option<StoredSession>> {
        sqlx::query_as::<_, StoredSession>(
            "SELECT token, session_id, user_id, email, first_name, last_name, created_at FROM session WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read session")
    }

    /// Drop the stored session.
    pub async fn clear_session(&self) -> Result<()> {
        sqlx::query("DELETE FROM session")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== Roster context ====================

    /// Select a roster as the trade context. Changing context invalidates
    /// any previously computed evaluation.
    pub async fn set_selected_roster(
        &self,
        roster_id: i64,
        roster_name: &str,
        league_format: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO app_state (id, roster_id, roster_name, league_format, valid_evaluation_id, updated_at)
            VALUES (1, ?, ?, ?, NULL, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                roster_id = excluded.roster_id,
                roster_name = excluded.roster_name,
                league_format = excluded.league_format,
                valid_evaluation_id = NULL,
                updated_at = datetime('now')
            "#,
        )
        .bind(roster_id)
        .bind(roster_name)
        .bind(league_format)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Drop the roster context (e.g. after the roster itself was deleted).
    pub async fn clear_selected_roster(&self) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE app_state SET
                roster_id = NULL,
                roster_name = NULL,
                league_format = NULL,
                valid_evaluation_id = NULL,
                updated_at = datetime('now')
            WHERE id = 1
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The selected roster context, if one has been chosen.
    pub async fn get_selected_roster(&self) -> Result<Option<SelectedRoster>> {
        sqlx::query_as::<_, SelectedRoster>(
            "SELECT roster_id, roster_name, league_format FROM app_state WHERE id = 1 AND roster_id IS NOT NULL",
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read selected roster")
    }

    // ==================== Trade state ====================

    /// Add a player snapshot to one trade side. Returns false when the
    /// player is already somewhere in the trade (idempotent add).
    pub async fn add_trade_player(&self, side: SideKind, player: &Player) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO trade_players (player_id, side, player_name, team_name, position)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(player_id) DO NOTHING
            "#,
        )
        .bind(player.id)
        .bind(side.as_str())
        .bind(&player.name)
        .bind(&player.team)
        .bind(player.position.as_str())
        .execute(&self.pool)
        .await?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            self.invalidate_evaluation().await?;
        }

        Ok(inserted)
    }

    /// Remove a player from the trade. Returns the removed row, if any.
    pub async fn remove_trade_player(&self, player_id: i64) -> Result<Option<StoredTradePlayer>> {
        let existing = sqlx::query_as::<_, StoredTradePlayer>(
            "SELECT player_id, side, player_name, team_name, position FROM trade_players WHERE player_id = ?",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            sqlx::query("DELETE FROM trade_players WHERE player_id = ?")
                .bind(player_id)
                .execute(&self.pool)
                .await?;
            self.invalidate_evaluation().await?;
        }

        Ok(existing)
    }

    /// All trade players in insertion order.
    pub async fn get_trade_players(&self) -> Result<Vec<StoredTradePlayer>> {
        sqlx::query_as::<_, StoredTradePlayer>(
            "SELECT player_id, side, player_name, team_name, position FROM trade_players ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch trade players")
    }

    /// Empty both trade sides and discard the current result.
    pub async fn clear_trade(&self) -> Result<()> {
        sqlx::query("DELETE FROM trade_players")
            .execute(&self.pool)
            .await?;
        self.invalidate_evaluation().await?;
        Ok(())
    }

    /// Drop the valid-evaluation pointer; history rows stay.
    async fn invalidate_evaluation(&self) -> Result<()> {
        sqlx::query(
            "UPDATE app_state SET valid_evaluation_id = NULL, updated_at = datetime('now') WHERE id = 1",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ==================== Evaluations ====================

    /// Record a fresh evaluation and mark it as the current valid result.
    pub async fn record_evaluation(
        &self,
        id: &str,
        roster_id: i64,
        result: &TradeResult,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO evaluations (id, roster_id, giving_value, receiving_value, percent_diff, grade, analysis)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(roster_id)
        .bind(result.giving_value.to_f64().unwrap_or(0.0))
        .bind(result.receiving_value.to_f64().unwrap_or(0.0))
        .bind(result.percent_diff.to_f64().unwrap_or(0.0))
        .bind(result.grade.as_str())
        .bind(&result.analysis)
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "UPDATE app_state SET valid_evaluation_id = ?, updated_at = datetime('now') WHERE id = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The evaluation still matching the current trade, if no mutation has
    /// happened since it was computed.
    pub async fn get_valid_evaluation(&self) -> Result<Option<StoredEvaluation>> {
        sqlx::query_as::<_, StoredEvaluation>(
            r#"
            SELECT e.id, e.roster_id, e.giving_value, e.receiving_value,
                   e.percent_diff, e.grade, e.analysis, e.created_at
            FROM evaluations e
            JOIN app_state s ON s.valid_evaluation_id = e.id
            WHERE s.id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read current evaluation")
    }

    /// Most recent evaluations, newest first.
    pub async fn get_evaluation_history(&self, limit: i64) -> Result<Vec<StoredEvaluation>> {
        sqlx::query_as::<_, StoredEvaluation>(
            "SELECT id, roster_id, giving_value, receiving_value, percent_diff, grade, analysis, created_at
             FROM evaluations ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch evaluation history")
    }
}
