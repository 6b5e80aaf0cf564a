//! Fantasy league API clients for authentication and league data.

mod auth_client;
mod league_client;
mod types;

pub use auth_client::{AuthClient, Session};
pub use league_client::{LeagueClient, RankingsQuery};
pub use types::*;
