//! League API client: rankings, player search, rosters, and feedback.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::models::{Player, Roster, ScoringFormat, User};

use super::types::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters for the rankings listing.
#[derive(Debug, Clone)]
pub struct RankingsQuery {
    pub week: u8,
    pub season: u16,
    pub scoring_type: ScoringFormat,
    pub sort_by: String,
    pub sort_order: String,
    pub team: Option<String>,
}

impl Default for RankingsQuery {
    fn default() -> Self {
        Self {
            week: 1,
            season: 2025,
            scoring_type: ScoringFormat::Standard,
            sort_by: "points".to_string(),
            sort_order: "desc".to_string(),
            team: None,
        }
    }
}

/// Client for league data endpoints (bearer-token authenticated).
pub struct LeagueClient {
    client: Client,
    base_url: String,
    token: String,
}

impl LeagueClient {
    /// Create a client with the session token used for every request.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        what: &'static str,
    ) -> Result<T> {
        debug!(url = %url, "Fetching {}", what);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} request failed: {} - {}", what, status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        url: String,
        body: &B,
        what: &'static str,
    ) -> Result<()> {
        debug!(url = %url, "Posting {}", what);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to post {}", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} request failed: {} - {}", what, status, body);
        }

        Ok(())
    }

    async fn delete(&self, url: String, what: &'static str) -> Result<()> {
        debug!(url = %url, "Deleting {}", what);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to delete {}", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} request failed: {} - {}", what, status, body);
        }

        Ok(())
    }

    // ==================== Rankings & players ====================

    /// Weekly player rankings.
    pub async fn get_rankings(&self, query: &RankingsQuery) -> Result<Vec<Player>> {
        let mut url = format!(
            "{}/rankings?week={}&season={}&scoringType={}&sortBy={}&sortOrder={}",
            self.base_url,
            query.week,
            query.season,
            query.scoring_type.as_str().to_lowercase(),
            query.sort_by,
            query.sort_order,
        );
        if let Some(team) = &query.team {
            url = format!("{}&team={}", url, team);
        }

        let envelope: RankingsEnvelope = self.get_json(url, "rankings").await?;
        Ok(envelope.rankings.into_iter().map(Into::into).collect())
    }

    /// Trigger a server-side rankings sync for a week.
    pub async fn sync_rankings(&self, week: u8, season_type: &str) -> Result<()> {
        let url = format!("{}/rankings/sync", self.base_url);
        let body = SyncRequest {
            week,
            season_type: season_type.to_string(),
        };
        self.post_json(url, &body, "rankings sync").await
    }

    /// Trigger a server-side projections sync for an upcoming week.
    pub async fn sync_projections(&self, week: u8, season_type: &str) -> Result<()> {
        let url = format!("{}/rankings/sync-future-week", self.base_url);
        let body = SyncRequest {
            week,
            season_type: season_type.to_string(),
        };
        self.post_json(url, &body, "projections sync").await
    }

    /// Free-text player search, optionally narrowed to a position.
    pub async fn search_players(
        &self,
        query: &str,
        position: Option<&str>,
    ) -> Result<Vec<Player>> {
        let mut url = format!(
            "{}/players/search?query={}",
            self.base_url,
            urlencode(query)
        );
        if let Some(p) = position {
            url = format!("{}&position={}", url, p);
        }

        let envelope: PlayersEnvelope = self.get_json(url, "player search").await?;
        Ok(envelope.players.into_iter().map(Into::into).collect())
    }

    /// Top scorers for a week.
    pub async fn get_best_performers(&self, limit: u32, week: Option<u8>) -> Result<Vec<Player>> {
        let mut url = format!("{}/players/best-performers?limit={}", self.base_url, limit);
        if let Some(w) = week {
            url = format!("{}&week={}", url, w);
        }

        let envelope: PerformersEnvelope = self.get_json(url, "best performers").await?;
        Ok(envelope.best_performers.into_iter().map(Into::into).collect())
    }

    /// Bottom scorers for a week.
    pub async fn get_worst_performers(&self, limit: u32, week: Option<u8>) -> Result<Vec<Player>> {
        let mut url = format!("{}/players/worst-performers?limit={}", self.base_url, limit);
        if let Some(w) = week {
            url = format!("{}&week={}", url, w);
        }

        let envelope: PerformersEnvelope = self.get_json(url, "worst performers").await?;
        Ok(envelope
            .worst_performers
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // ==================== Rosters ====================

    /// All of the user's rosters.
    pub async fn get_rosters(&self) -> Result<Vec<Roster>> {
        let url = format!("{}/rosters", self.base_url);
        let envelope: RostersEnvelope = self.get_json(url, "rosters").await?;
        Ok(envelope.rosters.into_iter().map(Into::into).collect())
    }

    /// One roster by id.
    pub async fn get_roster(&self, id: i64) -> Result<Roster> {
        let url = format!("{}/rosters/{}", self.base_url, id);
        let envelope: RosterEnvelope = self.get_json(url, "roster").await?;
        Ok(envelope.roster.into())
    }

    /// Create a roster.
    pub async fn create_roster(&self, name: &str, format: Option<ScoringFormat>) -> Result<()> {
        let url = format!("{}/rosters", self.base_url);
        let body = CreateRosterRequest {
            roster_name: name.to_string(),
            league_format: format.map(|f| f.as_str().to_string()),
        };
        self.post_json(url, &body, "roster create").await
    }

    /// Delete a roster.
    pub async fn delete_roster(&self, id: i64) -> Result<()> {
        let url = format!("{}/rosters/{}", self.base_url, id);
        self.delete(url, "roster").await
    }

    /// Players currently on a roster.
    pub async fn get_roster_players(&self, roster_id: i64) -> Result<Vec<Player>> {
        let url = format!("{}/rosters/{}/players", self.base_url, roster_id);
        let envelope: PlayersEnvelope = self.get_json(url, "roster players").await?;
        Ok(envelope.players.into_iter().map(Into::into).collect())
    }

    /// Add a player to a roster.
    pub async fn add_roster_player(&self, roster_id: i64, player_id: i64) -> Result<()> {
        let url = format!("{}/rosters/{}/players", self.base_url, roster_id);
        let body = AddRosterPlayerRequest { player_id };
        self.post_json(url, &body, "roster player add").await
    }

    /// Remove a player from a roster.
    pub async fn remove_roster_player(&self, roster_id: i64, player_id: i64) -> Result<()> {
        let url = format!(
            "{}/rosters/{}/players/{}",
            self.base_url, roster_id, player_id
        );
        self.delete(url, "roster player").await
    }

    // ==================== Profile & feedback ====================

    /// The authenticated user's profile with their rosters.
    pub async fn get_profile(&self) -> Result<(User, Vec<Roster>)> {
        let url = format!("{}/users/profile", self.base_url);
        let profile: ProfileResponse = self.get_json(url, "profile").await?;
        Ok((
            profile.user.into(),
            profile.rosters.into_iter().map(Into::into).collect(),
        ))
    }

    /// Submit user feedback.
    pub async fn submit_feedback(
        &self,
        subject: &str,
        message: &str,
        category: &str,
        rating: u8,
    ) -> Result<()> {
        let url = format!("{}/feedback", self.base_url);
        let body = FeedbackRequest {
            subject: subject.to_string(),
            message: message.to_string(),
            category: category.to_string(),
            rating,
        };
        self.post_json(url, &body, "feedback").await
    }
}

/// Minimal query-string escaping for the handful of characters a player
/// search can realistically contain.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            '+' => out.push_str("%2B"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_spaces_and_reserved() {
        assert_eq!(urlencode("patrick mahomes"), "patrick%20mahomes");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("plain"), "plain");
    }
}
