use crate::models::{Game, Pick, PickResult};
use crate::utils::grading::grade_pick;
use crate::utils::odds::{american_odds_to_probability, to_fractional_odds};
use serde::{Deserialize, Serialize};

fn multiplier(pick: &Pick) -> f64 {
    if pick.double {
        2.0
    } else {
        1.0
    }
}

/// Units won or lost when every pick risks one unit.
/// Win pays the fractional odds, loss costs the stake, push is zero.
pub fn score_pick(pick: &Pick, game: &Game) -> Option<f64> {
    let result = grade_pick(pick, game)?;
    let multiplier = multiplier(pick);

    Some(match result {
        PickResult::Win => to_fractional_odds(pick.odds) * multiplier,
        PickResult::Loss => -multiplier,
        PickResult::Push => 0.0,
    })
}

/// Units won or lost when every pick is sized to win one unit.
///
/// Favorites risk one unit either way. Underdogs only stake `odds / 100`
/// to win one unit, so that is all a losing underdog costs.
pub fn score_pick_by_wager_amount(pick: &Pick, game: &Game) -> Option<f64> {
    let result = grade_pick(pick, game)?;
    let multiplier = multiplier(pick);

    Some(match result {
        PickResult::Win => multiplier,
        PickResult::Loss if pick.odds > 0 => -(pick.odds as f64 / 100.0) * multiplier,
        PickResult::Loss => -multiplier,
        PickResult::Push => 0.0,
    })
}

/// Best-case payout of a pick, regardless of outcome
pub fn potential(pick: &Pick) -> f64 {
    to_fractional_odds(pick.odds) * multiplier(pick)
}

/// Result and payouts for one pick against one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedPick {
    pub pick: Pick,
    pub result: Option<PickResult>,
    pub score: Option<f64>,
    pub score_by_wager_amount: Option<f64>,
    pub potential: f64,
    /// Win probability implied by the odds taken
    pub implied_probability: f64,
}

impl GradedPick {
    pub fn new(pick: &Pick, game: &Game) -> Self {
        Self {
            pick: pick.clone(),
            result: grade_pick(pick, game),
            score: score_pick(pick, game),
            score_by_wager_amount: score_pick_by_wager_amount(pick, game),
            potential: potential(pick),
            implied_probability: american_odds_to_probability(pick.odds),
        }
    }
}
