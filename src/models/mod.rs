//! Data models for players, rosters, trades, and users.

mod player;
mod roster;
mod trade;
mod user;

pub use player::{Player, Position};
pub use roster::{Roster, ScoringFormat};
pub use trade::{Grade, SideKind, TradeProposal, TradeResult, TradeSide};
pub use user::User;
