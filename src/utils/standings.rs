use crate::api::GameProvider;
use crate::models::{Game, Pick, Team};
use crate::utils::lock::is_locked_at;
use crate::utils::scoring::GradedPick;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A team's record over its decided picks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: i32,
    pub team_name: String,
    pub picks: Vec<GradedPick>,
    pub total_picks: usize,
    pub wins: usize,
    pub losses: usize,
    pub potential: f64,
    pub winnings: f64,
    pub winnings_by_wager_amount: f64,
}

impl TeamStanding {
    fn from_graded(team: &Team, picks: Vec<GradedPick>) -> Self {
        let score = |p: &GradedPick| p.score.unwrap_or(0.0);

        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            total_picks: picks.len(),
            wins: picks.iter().filter(|p| score(p) > 0.0).count(),
            losses: picks.iter().filter(|p| score(p) < 0.0).count(),
            potential: picks.iter().map(|p| p.potential).sum(),
            winnings: picks.iter().map(score).sum(),
            winnings_by_wager_amount: picks
                .iter()
                .map(|p| p.score_by_wager_amount.unwrap_or(0.0))
                .sum(),
            picks,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{} | {}-{} ({} picks) | Winnings: {:+.2} | By wager: {:+.2} | Potential: {:.2}",
            self.team_name,
            self.wins,
            self.losses,
            self.total_picks,
            self.winnings,
            self.winnings_by_wager_amount,
            self.potential
        )
    }
}

/// Grade every decided pick and rank teams by winnings, best first.
/// Picks on games that are missing or not yet completed are left out.
pub fn compute_standings(
    teams: &[Team],
    picks: &[Pick],
    provider: &impl GameProvider,
    hidden_team_ids: &[i32],
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .filter(|team| !hidden_team_ids.contains(&team.id))
        .map(|team| {
            let graded = picks
                .iter()
                .filter(|p| p.team_id == team.id)
                .filter_map(|p| {
                    let game = lookup_game(provider, p)?;
                    game.completed.then(|| GradedPick::new(p, &game))
                })
                .collect();
            TeamStanding::from_graded(team, graded)
        })
        .collect();

    standings.sort_by(|a, b| b.winnings.total_cmp(&a.winnings));
    standings
}

/// Picks that other teams may see: those whose game has locked, in kickoff order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedPicks {
    pub team_id: i32,
    pub team_name: String,
    pub picks: Vec<Pick>,
}

pub fn locked_picks_by_team<Tz: TimeZone>(
    teams: &[Team],
    picks: &[Pick],
    provider: &impl GameProvider,
    hidden_team_ids: &[i32],
    local: &Tz,
    now: DateTime<Utc>,
) -> Vec<LockedPicks> {
    teams
        .iter()
        .filter(|team| !hidden_team_ids.contains(&team.id))
        .map(|team| {
            let mut locked: Vec<(DateTime<Utc>, &Pick)> = picks
                .iter()
                .filter(|p| p.team_id == team.id)
                .filter_map(|p| {
                    let game = lookup_game(provider, p)?;
                    is_locked_at(game.start_date, local, now).then_some((game.start_date, p))
                })
                .collect();
            locked.sort_by_key(|(start, _)| *start);

            LockedPicks {
                team_id: team.id,
                team_name: team.name.clone(),
                picks: locked.into_iter().map(|(_, p)| p.clone()).collect(),
            }
        })
        .collect()
}

fn lookup_game(provider: &impl GameProvider, pick: &Pick) -> Option<Game> {
    let game = provider.get_by_id(pick.game_id);
    if game.is_none() {
        warn!("Pick {} references unknown game {}", pick.id, pick.game_id);
    }
    game
}
