//! Trade proposal model: the two player sides and the evaluation result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::Player;

/// Which side of the trade a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideKind {
    /// Players the user surrenders
    Giving,
    /// Players the user acquires
    Receiving,
}

impl SideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SideKind::Giving => "giving",
            SideKind::Receiving => "receiving",
        }
    }
}

impl fmt::Display for SideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a proposed trade.
///
/// Players keep insertion order. A player id appears at most once; adding a
/// duplicate is a silent no-op (enforced here, on insertion).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeSide {
    players: Vec<Player>,
}

impl TradeSide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player. Returns false if a player with the same id is already
    /// present, leaving the side unchanged.
    pub fn add(&mut self, player: Player) -> bool {
        if self.players.iter().any(|p| p.id == player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Remove a player by id, returning it if present.
    pub fn remove(&mut self, player_id: i64) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == player_id)?;
        Some(self.players.remove(idx))
    }

    pub fn contains(&self, player_id: i64) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}

/// Letter grade summarizing the relative value change of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A+" => Some(Grade::APlus),
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one trade evaluation. Produced fresh on every call and never
/// partially computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub grade: Grade,

    /// Percentage change in aggregate value from the giving side to the
    /// receiving side (signed)
    pub percent_diff: Decimal,

    /// Total base value surrendered
    pub giving_value: Decimal,

    /// Total base value acquired
    pub receiving_value: Decimal,

    /// Human-readable recommendation
    pub analysis: String,
}

/// A proposed trade: two disjoint player sides plus the roster context the
/// evaluation runs under.
///
/// Client-side mutable state. Any mutation discards a previously attached
/// result; it must be re-evaluated before display.
#[derive(Debug, Clone, Default)]
pub struct TradeProposal {
    pub roster_id: Option<i64>,
    pub giving: TradeSide,
    pub receiving: TradeSide,
    result: Option<TradeResult>,
}

impl TradeProposal {
    pub fn new(roster_id: Option<i64>) -> Self {
        Self {
            roster_id,
            ..Default::default()
        }
    }

    /// Add a player to one side. No-op (returning false) if the player is
    /// already anywhere in the trade; the two sides stay disjoint.
    pub fn add(&mut self, side: SideKind, player: Player) -> bool {
        if self.giving.contains(player.id) || self.receiving.contains(player.id) {
            return false;
        }
        let added = match side {
            SideKind::Giving => self.giving.add(player),
            SideKind::Receiving => self.receiving.add(player),
        };
        if added {
            self.result = None;
        }
        added
    }

    /// Remove a player from whichever side holds it.
    pub fn remove(&mut self, player_id: i64) -> Option<(SideKind, Player)> {
        if let Some(p) = self.giving.remove(player_id) {
            self.result = None;
            return Some((SideKind::Giving, p));
        }
        if let Some(p) = self.receiving.remove(player_id) {
            self.result = None;
            return Some((SideKind::Receiving, p));
        }
        None
    }

    /// Empty both sides and discard any result.
    pub fn clear(&mut self) {
        self.giving.clear();
        self.receiving.clear();
        self.result = None;
    }

    /// Attach a freshly computed result.
    pub fn set_result(&mut self, result: TradeResult) {
        self.result = Some(result);
    }

    /// The current result, if no mutation has happened since it was computed.
    pub fn result(&self) -> Option<&TradeResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn player(id: i64, position: Position) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            team: "Testers".to_string(),
            position,
            rank: None,
            projected_points: None,
            actual_points: None,
            added_at: None,
        }
    }

    fn dummy_result() -> TradeResult {
        TradeResult {
            grade: Grade::B,
            percent_diff: Decimal::ZERO,
            giving_value: Decimal::ZERO,
            receiving_value: Decimal::ZERO,
            analysis: String::new(),
        }
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut side = TradeSide::new();
        assert!(side.add(player(7, Position::Rb)));
        assert!(!side.add(player(7, Position::Rb)));
        assert_eq!(side.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut side = TradeSide::new();
        side.add(player(3, Position::Wr));
        side.add(player(1, Position::Qb));
        side.add(player(2, Position::Te));
        let ids: Vec<i64> = side.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_sides_stay_disjoint() {
        let mut trade = TradeProposal::new(Some(1));
        assert!(trade.add(SideKind::Giving, player(5, Position::Qb)));
        assert!(!trade.add(SideKind::Receiving, player(5, Position::Qb)));
        assert_eq!(trade.giving.len(), 1);
        assert!(trade.receiving.is_empty());
    }

    #[test]
    fn test_mutation_invalidates_result() {
        let mut trade = TradeProposal::new(Some(1));
        trade.add(SideKind::Giving, player(1, Position::Qb));
        trade.add(SideKind::Receiving, player(2, Position::Rb));

        trade.set_result(dummy_result());
        assert!(trade.result().is_some());

        trade.add(SideKind::Receiving, player(3, Position::Wr));
        assert!(trade.result().is_none());
    }

    #[test]
    fn test_failed_add_keeps_result() {
        let mut trade = TradeProposal::new(Some(1));
        trade.add(SideKind::Giving, player(1, Position::Qb));
        trade.add(SideKind::Receiving, player(2, Position::Rb));
        trade.set_result(dummy_result());

        // Duplicate add doesn't change the sides, so the result stands
        assert!(!trade.add(SideKind::Giving, player(1, Position::Qb)));
        assert!(trade.result().is_some());
    }

    #[test]
    fn test_remove_invalidates_result() {
        let mut trade = TradeProposal::new(Some(1));
        trade.add(SideKind::Giving, player(1, Position::Qb));
        trade.add(SideKind::Receiving, player(2, Position::Rb));
        trade.set_result(dummy_result());

        let (side, p) = trade.remove(2).unwrap();
        assert_eq!(side, SideKind::Receiving);
        assert_eq!(p.id, 2);
        assert!(trade.result().is_none());
        assert!(trade.remove(2).is_none());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut trade = TradeProposal::new(Some(1));
        trade.add(SideKind::Giving, player(1, Position::Qb));
        trade.add(SideKind::Receiving, player(2, Position::Rb));
        trade.set_result(dummy_result());

        trade.clear();
        assert!(trade.giving.is_empty());
        assert!(trade.receiving.is_empty());
        assert!(trade.result().is_none());
    }

    #[test]
    fn test_grade_parse_display_roundtrip() {
        for g in [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D] {
            assert_eq!(Grade::parse(g.as_str()), Some(g));
        }
        assert_eq!(Grade::parse("F"), None);
    }
}
