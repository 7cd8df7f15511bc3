use anyhow::{Context, Result};
use cfb_picks::config::Config;
use cfb_picks::data::{load_games, load_picks, load_teams, save_standings_to_csv};
use cfb_picks::lock::lock_time;
use cfb_picks::standings::{compute_standings, locked_picks_by_team};
use cfb_picks::{GameProvider, GradedPick, InMemoryGameProvider, Pick, Team};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cfb-picks", about = "College football pick'em grading and standings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank teams by winnings over completed games
    Standings {
        /// Also write the standings to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Grade every pick for one team
    Grade {
        #[arg(long)]
        team: i32,
        #[arg(long)]
        week: Option<u8>,
    },
    /// Show when each pick locks
    Locks {
        #[arg(long)]
        week: Option<u8>,
    },
    /// Show the picks other teams can already see
    Visible,
}

struct Snapshot {
    teams: Vec<Team>,
    picks: Vec<Pick>,
    games: InMemoryGameProvider,
}

fn load_snapshot(config: &Config) -> Result<Snapshot> {
    let games = load_games(&config.games_file).context("Failed to load games")?;
    let picks = load_picks(&config.picks_file, config.season).context("Failed to load picks")?;
    let teams = load_teams(&config.teams_file).context("Failed to load teams")?;

    tracing::info!(
        "Loaded {} games, {} picks, {} teams for {}",
        games.len(),
        picks.len(),
        teams.len(),
        config.season
    );

    Ok(Snapshot {
        teams,
        picks,
        games: InMemoryGameProvider::new(games),
    })
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;
    let snapshot = load_snapshot(&config)?;
    let now = Utc::now();

    match cli.command {
        Command::Standings { csv } => print_standings(&config, &snapshot, csv.as_deref()),
        Command::Grade { team, week } => print_grades(&snapshot, team, week),
        Command::Locks { week } => match config.local_timezone {
            Some(tz) => print_locks(&snapshot, week, &tz, now),
            None => print_locks(&snapshot, week, &Local, now),
        },
        Command::Visible => match config.local_timezone {
            Some(tz) => print_visible(&config, &snapshot, &tz, now),
            None => print_visible(&config, &snapshot, &Local, now),
        },
    }
}

fn print_standings(config: &Config, snapshot: &Snapshot, csv: Option<&str>) -> Result<()> {
    let standings = compute_standings(
        &snapshot.teams,
        &snapshot.picks,
        &snapshot.games,
        &config.hidden_team_ids,
    );

    println!("STANDINGS {}\n", config.season);
    if standings.is_empty() {
        println!("No teams found.");
    }
    for (i, standing) in standings.iter().enumerate() {
        println!("{}. {}", i + 1, standing.format());
    }

    if let Some(csv) = csv {
        save_standings_to_csv(&standings, csv)?;
        println!("\nSaved standings to {}", csv);
    }

    Ok(())
}

fn print_grades(snapshot: &Snapshot, team_id: i32, week: Option<u8>) -> Result<()> {
    let picks: Vec<&Pick> = snapshot
        .picks
        .iter()
        .filter(|p| p.team_id == team_id && week.map_or(true, |w| p.week == w))
        .collect();

    if picks.is_empty() {
        println!("No picks found for team {}.", team_id);
        return Ok(());
    }

    for pick in picks {
        let Some(game) = snapshot.games.get_by_id(pick.game_id) else {
            println!("Week {} | pick {} | game {} not found", pick.week, pick.id, pick.game_id);
            continue;
        };

        let graded = GradedPick::new(pick, &game);
        let outcome = match (graded.result, graded.score, graded.score_by_wager_amount) {
            (Some(result), Some(score), Some(by_wager)) => {
                format!("{} | {:+.2} | by wager {:+.2}", result, score, by_wager)
            }
            _ => "PENDING".to_string(),
        };

        println!(
            "Week {} | {} | implied {:.1}% | {} | potential {:.2}",
            pick.week,
            pick.format(&game),
            graded.implied_probability * 100.0,
            outcome,
            graded.potential
        );
    }

    Ok(())
}

fn print_locks<Tz: TimeZone>(
    snapshot: &Snapshot,
    week: Option<u8>,
    local: &Tz,
    now: DateTime<Utc>,
) -> Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    for pick in snapshot
        .picks
        .iter()
        .filter(|p| week.map_or(true, |w| p.week == w))
    {
        let Some(game) = snapshot.games.get_by_id(pick.game_id) else {
            continue;
        };

        let locks_at = lock_time(game.start_date, local);
        println!(
            "{} | {} | locks {} {}",
            pick.id,
            pick.format(&game),
            locks_at.with_timezone(local).format("%a %b %-d %-I:%M %p"),
            if locks_at <= now { "(locked)" } else { "" }
        );
    }

    Ok(())
}

fn print_visible<Tz: TimeZone>(
    config: &Config,
    snapshot: &Snapshot,
    local: &Tz,
    now: DateTime<Utc>,
) -> Result<()> {
    let visible = locked_picks_by_team(
        &snapshot.teams,
        &snapshot.picks,
        &snapshot.games,
        &config.hidden_team_ids,
        local,
        now,
    );

    for team in visible {
        println!("\n{}\n", team.team_name);
        if team.picks.is_empty() {
            println!("No locked picks yet.");
        }
        for pick in &team.picks {
            if let Some(game) = snapshot.games.get_by_id(pick.game_id) {
                println!("  {}", pick.format(&game));
            }
        }
    }

    Ok(())
}
