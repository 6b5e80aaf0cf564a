//! Fantasy Football Companion CLI
//!
//! Roster management, player rankings, and a trade-value evaluator on top
//! of the remote league API.

mod analyzer;
mod api;
mod db;
mod models;
mod season;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::analyzer::{AnalyzerConfig, TradeEvaluator};
use crate::api::{AuthClient, LeagueClient, RankingsQuery};
use crate::db::{Database, StoredSession};
use crate::models::{Player, ScoringFormat, SideKind, TradeProposal};

/// Fantasy football companion CLI.
#[derive(Parser)]
#[command(name = "ffcompanion")]
#[command(about = "Manage rosters, browse rankings, and evaluate trades", long_about = None)]
struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "sqlite:./ffcompanion.db?mode=rwc")]
    database: String,

    /// League API base URL
    #[arg(long, env = "FANTASY_API_URL", default_value = "http://localhost:3000/api")]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },

    /// Log in and store the session locally
    Login {
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the logged-in user and their rosters
    Profile,

    /// Browse weekly player rankings
    Rankings {
        /// Fantasy week (defaults to the current week)
        #[arg(short, long)]
        week: Option<u8>,

        /// Season year (defaults to the current season)
        #[arg(short, long)]
        season: Option<u16>,

        /// Scoring format (standard, ppr, half-ppr); defaults to the
        /// selected roster's format
        #[arg(long)]
        scoring: Option<String>,

        /// Sort column
        #[arg(long, default_value = "points")]
        sort_by: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        sort_order: String,

        /// Filter by NFL team name
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Search players by name
    Search {
        query: String,

        /// Filter by position (QB, RB, WR, TE, K, DEF)
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Show best and worst performers for a week
    Performers {
        /// Maximum players per list
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Fantasy week (defaults to the last completed week)
        #[arg(short, long)]
        week: Option<u8>,
    },

    /// Trigger a server-side rankings or projections sync
    Sync {
        /// Fantasy week (defaults to the current week)
        #[arg(short, long)]
        week: Option<u8>,

        /// Season type (REG, POST)
        #[arg(long, default_value = "REG")]
        season_type: String,

        /// Sync upcoming-week projections instead of finished rankings
        #[arg(long)]
        projections: bool,
    },

    /// Manage rosters
    #[command(subcommand)]
    Roster(RosterCommands),

    /// Build and evaluate a trade
    #[command(subcommand)]
    Trade(TradeCommands),

    /// Submit feedback about the app
    Feedback {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        message: String,

        #[arg(short, long, default_value = "general")]
        category: String,

        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: u8,
    },

    /// Show where we are in the NFL season
    Week,
}

#[derive(Subcommand)]
enum RosterCommands {
    /// List your rosters
    List,

    /// Create a roster
    Create {
        name: String,

        /// League scoring format (standard, ppr, half-ppr)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show a roster and its players
    Show { id: i64 },

    /// Delete a roster
    Delete { id: i64 },

    /// Select a roster as the trade context
    Select { id: i64 },

    /// Add a player to a roster
    AddPlayer {
        roster_id: i64,
        player_id: i64,
    },

    /// Remove a player from a roster
    RemovePlayer {
        roster_id: i64,
        player_id: i64,
    },
}

#[derive(Subcommand)]
enum TradeCommands {
    /// Add a player to the side you're giving away (first search match)
    Give {
        query: String,

        /// Narrow the search by position
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Add a player to the side you're receiving (first search match)
    Receive {
        query: String,

        /// Narrow the search by position
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Remove a player from the trade
    Drop { player_id: i64 },

    /// Show the current trade and its result, if still valid
    Show,

    /// Empty both sides of the trade
    Clear,

    /// Grade the current trade
    Evaluate,

    /// Show past evaluations
    History {
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Initialize local state
    let db = Database::new(&cli.database).await?;

    match cli.command {
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let auth = AuthClient::new(&cli.api_url)?;
            let session = auth
                .register(&email, &password, &first_name, &last_name)
                .await?;

            db.save_session(
                &session.token,
                &session.session_id,
                session.user.id,
                &session.user.email,
                &session.user.first_name,
                &session.user.last_name,
            )
            .await?;

            info!(email = %email, "Registered and logged in");
            println!("Welcome, {}! You are now logged in.", session.user.display_name());
        }

        Commands::Login { email, password } => {
            let auth = AuthClient::new(&cli.api_url)?;
            let session = auth.login(&email, &password).await?;

            db.save_session(
                &session.token,
                &session.session_id,
                session.user.id,
                &session.user.email,
                &session.user.first_name,
                &session.user.last_name,
            )
            .await?;

            info!(email = %email, "Logged in");
            println!("Logged in as {}.", session.user.display_name());
        }

        Commands::Logout => {
            let Some(session) = db.get_session().await? else {
                println!("Not logged in.");
                return Ok(());
            };

            let auth = AuthClient::new(&cli.api_url)?;
            if let Err(e) = auth.logout(&session.token, &session.session_id).await {
                tracing::warn!(error = %e, "Server-side logout failed; clearing local session anyway");
            }
            db.clear_session().await?;

            println!("Logged out.");
        }

        Commands::Profile => {
            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            let (user, rosters) = client.get_profile().await?;

            println!("\n=== {} ===", user.display_name());
            println!("Email: {}", user.email);

            println!("\n--- Rosters ({}) ---", rosters.len());
            for roster in &rosters {
                println!("  [{}] {} ({})", roster.id, roster.name, roster.format);
            }

            if let Some(selected) = db.get_selected_roster().await? {
                println!("\nSelected roster: [{}] {}", selected.roster_id, selected.roster_name);
            } else {
                println!("\nNo roster selected. Use 'ffcompanion roster select <id>'.");
            }
        }

        Commands::Rankings {
            week,
            season,
            scoring,
            sort_by,
            sort_order,
            team,
        } => {
            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            let scoring_type = match scoring {
                Some(s) => ScoringFormat::parse(&s),
                None => db
                    .get_selected_roster()
                    .await?
                    .map(|r| ScoringFormat::parse(&r.league_format))
                    .unwrap_or_default(),
            };

            let query = RankingsQuery {
                week: week.unwrap_or_else(season::current_week),
                season: season.unwrap_or_else(season::current_season),
                scoring_type,
                sort_by,
                sort_order,
                team,
            };

            let players = client.get_rankings(&query).await?;

            println!(
                "\n=== Week {} Rankings ({}, {}) ===",
                query.week, query.season, query.scoring_type
            );
            print_player_table(&players);
        }

        Commands::Search { query, position } => {
            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            let players = client.search_players(&query, position.as_deref()).await?;

            if players.is_empty() {
                println!("No players matched '{}'.", query);
                return Ok(());
            }

            print_player_table(&players);
        }

        Commands::Performers { limit, week } => {
            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            let week = week.or_else(|| {
                let last = season::last_completed_week();
                (last > 0).then_some(last)
            });

            let (best, worst) = futures::try_join!(
                client.get_best_performers(limit, week),
                client.get_worst_performers(limit, week),
            )?;

            match week {
                Some(w) => println!("\n=== Week {} Performers ===", w),
                None => println!("\n=== Performers ==="),
            }

            println!("\n--- Best ---");
            print_player_table(&best);

            println!("\n--- Worst ---");
            print_player_table(&worst);
        }

        Commands::Sync {
            week,
            season_type,
            projections,
        } => {
            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            let week = week.unwrap_or_else(season::current_week);

            if projections {
                client.sync_projections(week, &season_type).await?;
                println!("Projections sync requested for week {}.", week);
            } else {
                client.sync_rankings(week, &season_type).await?;
                println!("Rankings sync requested for week {}.", week);
            }
        }

        Commands::Roster(command) => {
            run_roster_command(&cli.api_url, &db, command).await?;
        }

        Commands::Trade(command) => {
            run_trade_command(&cli.api_url, &db, command).await?;
        }

        Commands::Feedback {
            subject,
            message,
            category,
            rating,
        } => {
            if !(1..=5).contains(&rating) {
                println!("Rating must be between 1 and 5.");
                return Ok(());
            }

            let session = require_session(&db).await?;
            let client = LeagueClient::new(&cli.api_url, &session.token)?;

            client
                .submit_feedback(&subject, &message, &category, rating)
                .await?;

            println!("Thanks for the feedback!");
        }

        Commands::Week => {
            let week = season::current_week();
            let season_year = season::current_season();

            println!("\n=== {} Season ===", season_year);
            println!("Current week:        {}", week);

            if let Some(window) = season::week_dates(week) {
                println!(
                    "Week {} window:       {} {} - {} {}",
                    week,
                    season::weekday_name(window.start),
                    window.start,
                    season::weekday_name(window.end),
                    window.end
                );
            }

            let last = season::last_completed_week();
            if last > 0 {
                println!("Last completed week: {}", last);
            } else {
                println!("Last completed week: none yet");
            }
        }
    }

    Ok(())
}

async fn run_roster_command(api_url: &str, db: &Database, command: RosterCommands) -> Result<()> {
    let session = require_session(db).await?;
    let client = LeagueClient::new(api_url, &session.token)?;

    match command {
        RosterCommands::List => {
            let rosters = client.get_rosters().await?;

            if rosters.is_empty() {
                println!("No rosters yet. Use 'ffcompanion roster create <name>'.");
                return Ok(());
            }

            let selected = db.get_selected_roster().await?.map(|r| r.roster_id);

            println!("\n{:<6} {:<24} {:<10} {:>8}", "ID", "NAME", "FORMAT", "");
            println!("{}", "-".repeat(50));
            for roster in rosters {
                let marker = if selected == Some(roster.id) { "selected" } else { "" };
                println!(
                    "{:<6} {:<24} {:<10} {:>8}",
                    roster.id,
                    truncate(&roster.name, 22),
                    roster.format.as_str(),
                    marker
                );
            }
        }

        RosterCommands::Create { name, format } => {
            let format = format.map(|f| ScoringFormat::parse(&f));
            client.create_roster(&name, format).await?;
            println!("Created roster '{}'.", name);
        }

        RosterCommands::Show { id } => {
            let roster = client.get_roster(id).await?;
            let players = client.get_roster_players(id).await?;

            println!("\n=== {} ({}) ===", roster.name, roster.format);
            if players.is_empty() {
                println!("No players on this roster.");
            } else {
                print_player_table(&players);
            }
        }

        RosterCommands::Delete { id } => {
            client.delete_roster(id).await?;

            // Deleting the selected roster leaves no trade context
            if let Some(selected) = db.get_selected_roster().await? {
                if selected.roster_id == id {
                    db.clear_trade().await?;
                    db.clear_selected_roster().await?;
                }
            }

            println!("Deleted roster {}.", id);
        }

        RosterCommands::Select { id } => {
            let roster = client.get_roster(id).await?;
            db.set_selected_roster(roster.id, &roster.name, roster.format.as_str())
                .await?;

            info!(roster_id = roster.id, "Selected roster");
            println!("Selected roster [{}] {} ({}).", roster.id, roster.name, roster.format);
        }

        RosterCommands::AddPlayer { roster_id, player_id } => {
            client.add_roster_player(roster_id, player_id).await?;
            println!("Added player {} to roster {}.", player_id, roster_id);
        }

        RosterCommands::RemovePlayer { roster_id, player_id } => {
            client.remove_roster_player(roster_id, player_id).await?;
            println!("Removed player {} from roster {}.", player_id, roster_id);
        }
    }

    Ok(())
}

async fn run_trade_command(api_url: &str, db: &Database, command: TradeCommands) -> Result<()> {
    match command {
        TradeCommands::Give { query, position } => {
            add_trade_player(api_url, db, SideKind::Giving, &query, position.as_deref()).await?;
        }

        TradeCommands::Receive { query, position } => {
            add_trade_player(api_url, db, SideKind::Receiving, &query, position.as_deref()).await?;
        }

        TradeCommands::Drop { player_id } => {
            match db.remove_trade_player(player_id).await? {
                Some(stored) => println!(
                    "Removed {} from the {} side.",
                    stored.player_name,
                    stored.side_kind()
                ),
                None => println!("Player {} is not in the trade.", player_id),
            }
        }

        TradeCommands::Show => {
            let proposal = load_proposal(db).await?;

            println!("\n=== Current Trade ===");
            match db.get_selected_roster().await? {
                Some(r) => println!("Roster: [{}] {}", r.roster_id, r.roster_name),
                None => println!("Roster: none selected"),
            }

            print_trade_side("Giving", proposal.giving.players());
            print_trade_side("Receiving", proposal.receiving.players());

            match proposal.result() {
                Some(result) => {
                    let sign = if result.percent_diff.is_sign_positive() { "+" } else { "" };
                    println!("\n--- Result ---");
                    println!("Grade:        {}", result.grade);
                    println!("Value change: {}{:.1}%", sign, result.percent_diff);
                    println!("{}", result.analysis);
                }
                None => {
                    println!("\nNo current result. Run 'ffcompanion trade evaluate'.");
                }
            }
        }

        TradeCommands::Clear => {
            db.clear_trade().await?;
            println!("Trade cleared.");
        }

        TradeCommands::Evaluate => {
            let proposal = load_proposal(db).await?;
            let evaluator = TradeEvaluator::new(AnalyzerConfig::default());

            let result = match evaluator.evaluate(&proposal) {
                Ok(result) => result,
                Err(e) => {
                    println!("{}", e);
                    return Ok(());
                }
            };

            let evaluation_id = uuid::Uuid::new_v4().to_string();
            let roster_id = proposal.roster_id.unwrap_or_default();
            db.record_evaluation(&evaluation_id, roster_id, &result)
                .await?;

            info!(
                grade = %result.grade,
                percent_diff = %result.percent_diff,
                "Trade evaluated"
            );

            let sign = if result.percent_diff.is_sign_positive() { "+" } else { "" };
            println!("\n=== Trade Grade: {} ===", result.grade);
            println!("Giving value:    {}", result.giving_value);
            println!("Receiving value: {}", result.receiving_value);
            println!("Value change:    {}{:.1}%", sign, result.percent_diff);
            println!("\n{}", result.analysis);
        }

        TradeCommands::History { limit } => {
            let evaluations = db.get_evaluation_history(limit).await?;

            if evaluations.is_empty() {
                println!("No evaluations yet.");
                return Ok(());
            }

            println!(
                "\n{:<20} {:<6} {:>10} {:>10} {:>9}",
                "WHEN", "GRADE", "GIVING", "RECEIVING", "CHANGE"
            );
            println!("{}", "-".repeat(60));
            for eval in evaluations {
                println!(
                    "{:<20} {:<6} {:>10.1} {:>10.1} {:>8.1}%",
                    eval.created_at,
                    eval.grade,
                    eval.giving_value,
                    eval.receiving_value,
                    eval.percent_diff
                );
            }
        }
    }

    Ok(())
}

/// Search the directory and snapshot the first match into one trade side.
async fn add_trade_player(
    api_url: &str,
    db: &Database,
    side: SideKind,
    query: &str,
    position: Option<&str>,
) -> Result<()> {
    let session = require_session(db).await?;
    let client = LeagueClient::new(api_url, &session.token)?;

    let matches = client.search_players(query, position).await?;
    let Some(player) = matches.into_iter().next() else {
        println!("No players matched '{}'.", query);
        return Ok(());
    };

    if db.add_trade_player(side, &player).await? {
        println!("Added {} to the {} side.", player.label(), side);
    } else {
        println!("{} is already in the trade.", player.label());
    }

    Ok(())
}

/// Rebuild the in-memory proposal from stored trade state, carrying over
/// the evaluation that is still valid for it, if any.
async fn load_proposal(db: &Database) -> Result<TradeProposal> {
    let roster_id = db.get_selected_roster().await?.map(|r| r.roster_id);
    let mut proposal = TradeProposal::new(roster_id);

    for stored in db.get_trade_players().await? {
        proposal.add(stored.side_kind(), stored.to_player());
    }

    // Attach after the adds: every add clears the attached result
    if let Some(eval) = db.get_valid_evaluation().await? {
        if let Some(result) = eval.to_result() {
            proposal.set_result(result);
        }
    }

    Ok(proposal)
}

/// Require a stored session, with a pointer at the login command otherwise.
async fn require_session(db: &Database) -> Result<StoredSession> {
    db.get_session()
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Use 'ffcompanion login <email>' first."))
}

fn print_trade_side(label: &str, players: &[Player]) {
    println!("\n--- {} ({}) ---", label, players.len());
    for player in players {
        println!("  [{}] {}", player.id, player.label());
    }
    if players.is_empty() {
        println!("  (empty)");
    }
}

fn print_player_table(players: &[Player]) {
    println!(
        "\n{:<6} {:<24} {:<6} {:<16} {:>6} {:>8} {:>8}",
        "ID", "NAME", "POS", "TEAM", "RANK", "PROJ", "ACTUAL"
    );
    println!("{}", "-".repeat(80));

    for player in players {
        println!(
            "{:<6} {:<24} {:<6} {:<16} {:>6} {:>8} {:>8}",
            player.id,
            truncate(&player.name, 22),
            player.position.as_str(),
            truncate(&player.team, 14),
            player.rank.map(|r| r.to_string()).unwrap_or_default(),
            player
                .projected_points
                .map(|p| p.to_string())
                .unwrap_or_default(),
            player
                .actual_points
                .map(|p| p.to_string())
                .unwrap_or_default(),
        );
    }
}

/// Truncate a string with ellipsis if too long.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
