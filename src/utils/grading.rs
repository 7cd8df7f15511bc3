use crate::models::{Duration, Game, Pick, PickKind, PickResult};
use tracing::debug;

/// A result that overrides score math for one game and duration
#[derive(Debug, Clone, Copy)]
pub struct ForcedResult {
    pub game_id: i32,
    pub duration: Duration,
    pub result: PickResult,
}

/// Games whose upstream data is known to be wrong
pub const FORCED_RESULTS: &[ForcedResult] = &[ForcedResult {
    game_id: 401767135,
    duration: Duration::Full,
    result: PickResult::Push,
}];

fn forced_result(game_id: i32, duration: Duration) -> Option<PickResult> {
    FORCED_RESULTS
        .iter()
        .find(|f| f.game_id == game_id && f.duration == duration)
        .map(|f| f.result)
}

/// Home and away score for the portion of the game the pick covers.
/// Missing line scores or points count as zero.
pub fn scores_for_duration(game: &Game, duration: Duration) -> (f64, f64) {
    let periods = |line_scores: &Option<Vec<i32>>, n: usize| -> f64 {
        line_scores
            .as_deref()
            .unwrap_or_default()
            .iter()
            .take(n)
            .map(|&p| p as f64)
            .sum()
    };

    match duration {
        Duration::FirstQuarter => (
            periods(&game.home_line_scores, 1),
            periods(&game.away_line_scores, 1),
        ),
        Duration::FirstHalf => (
            periods(&game.home_line_scores, 2),
            periods(&game.away_line_scores, 2),
        ),
        Duration::Full => (
            game.home_points.unwrap_or(0) as f64,
            game.away_points.unwrap_or(0) as f64,
        ),
    }
}

/// Grade a pick against a game.
///
/// Returns `None` until the game is completed.
pub fn grade_pick(pick: &Pick, game: &Game) -> Option<PickResult> {
    if !game.completed {
        return None;
    }

    if let Some(result) = forced_result(game.id, pick.duration) {
        debug!(
            "Pick {} on game {} ({}) forced to {}",
            pick.id, game.id, pick.duration, result
        );
        return Some(result);
    }

    let (home_score, away_score) = scores_for_duration(game, pick.duration);

    // (team, opponent) from the perspective of the picked team
    let sides = |cfb_team_id: i32| {
        if cfb_team_id == game.home_id {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        }
    };

    let result = match pick.kind {
        PickKind::Spread {
            cfb_team_id,
            spread,
        } => {
            let (team_score, opponent_score) = sides(cfb_team_id);
            compare(team_score + spread, opponent_score)
        }
        // A tie is not a push on the moneyline
        PickKind::Moneyline { cfb_team_id } => {
            let (team_score, opponent_score) = sides(cfb_team_id);
            if team_score > opponent_score {
                PickResult::Win
            } else {
                PickResult::Loss
            }
        }
        PickKind::Over { total }
        | PickKind::Under { total }
        | PickKind::TtOver { total, .. }
        | PickKind::TtUnder { total, .. } => {
            let pick_type = pick.pick_type();
            let score = match pick.kind.cfb_team_id() {
                Some(cfb_team_id) if pick_type.is_team_total() => sides(cfb_team_id).0,
                _ => home_score + away_score,
            };

            if pick_type.is_over() {
                compare(score, total)
            } else {
                compare(total, score)
            }
        }
    };

    Some(result)
}

/// Win when `ours` beats `theirs`, push when equal
fn compare(ours: f64, theirs: f64) -> PickResult {
    if ours == theirs {
        PickResult::Push
    } else if ours > theirs {
        PickResult::Win
    } else {
        PickResult::Loss
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::PickType;

    pub(crate) const HOME: i32 = 61;
    pub(crate) const AWAY: i32 = 2;

    pub(crate) fn game(home_points: i32, away_points: i32) -> Game {
        Game {
            id: 1000,
            season: 2025,
            week: 2,
            start_date: "2025-09-06T17:00:00Z".parse().unwrap(),
            start_time_TBD: false,
            completed: true,
            home_id: HOME,
            home_team: "Georgia".to_string(),
            home_points: Some(home_points),
            home_line_scores: None,
            away_id: AWAY,
            away_team: "Auburn".to_string(),
            away_points: Some(away_points),
            away_line_scores: None,
        }
    }

    pub(crate) fn pick(kind: PickKind, odds: i32, double: bool) -> Pick {
        Pick {
            id: 1,
            team_id: 10,
            season: 2025,
            week: 2,
            game_id: 1000,
            duration: Duration::Full,
            odds,
            double,
            kind,
        }
    }

    #[test]
    fn test_incomplete_game_is_ungraded() {
        let mut g = game(0, 0);
        g.completed = false;
        let p = pick(PickKind::Over { total: 0.5 }, -110, false);
        assert_eq!(grade_pick(&p, &g), None);
    }

    #[test]
    fn test_spread_push_on_exact_margin() {
        let p = pick(
            PickKind::Spread {
                cfb_team_id: HOME,
                spread: -3.0,
            },
            -110,
            false,
        );
        assert_eq!(grade_pick(&p, &game(24, 21)), Some(PickResult::Push));
        assert_eq!(grade_pick(&p, &game(24, 20)), Some(PickResult::Win));
        assert_eq!(grade_pick(&p, &game(24, 22)), Some(PickResult::Loss));
    }

    #[test]
    fn test_underdog_covers_spread() {
        let p = pick(
            PickKind::Spread {
                cfb_team_id: AWAY,
                spread: 7.0,
            },
            150,
            true,
        );
        assert_eq!(grade_pick(&p, &game(20, 17)), Some(PickResult::Win));
    }

    #[test]
    fn test_moneyline() {
        let p = pick(PickKind::Moneyline { cfb_team_id: HOME }, -200, false);
        assert_eq!(grade_pick(&p, &game(10, 14)), Some(PickResult::Loss));
        assert_eq!(grade_pick(&p, &game(14, 10)), Some(PickResult::Win));
        // Ties fall through to a loss
        assert_eq!(grade_pick(&p, &game(14, 14)), Some(PickResult::Loss));
    }

    #[test]
    fn test_game_totals() {
        let over = pick(PickKind::Over { total: 45.5 }, -110, false);
        let under = pick(PickKind::Under { total: 45.5 }, -110, false);
        assert_eq!(grade_pick(&over, &game(24, 21)), Some(PickResult::Loss));
        assert_eq!(grade_pick(&under, &game(24, 21)), Some(PickResult::Win));
        assert_eq!(grade_pick(&over, &game(28, 21)), Some(PickResult::Win));

        let even = pick(PickKind::Under { total: 45.0 }, -110, false);
        assert_eq!(grade_pick(&even, &game(24, 21)), Some(PickResult::Push));
    }

    #[test]
    fn test_team_total_under_first_half() {
        let mut g = game(14, 17);
        g.home_line_scores = Some(vec![7, 0, 7, 0]);
        g.away_line_scores = Some(vec![3, 7, 0, 7]);

        let mut p = pick(
            PickKind::TtUnder {
                cfb_team_id: AWAY,
                total: 13.0,
            },
            -110,
            false,
        );
        p.duration = Duration::FirstHalf;
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Win));

        p.kind = PickKind::TtOver {
            cfb_team_id: HOME,
            total: 7.0,
        };
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Push));
        assert_eq!(p.pick_type(), PickType::TtOver);
    }

    #[test]
    fn test_team_total_uses_only_the_picked_team() {
        let g = game(24, 21);
        let team_under = pick(
            PickKind::TtUnder {
                cfb_team_id: HOME,
                total: 30.5,
            },
            -110,
            false,
        );
        let game_under = pick(PickKind::Under { total: 30.5 }, -110, false);
        assert_eq!(grade_pick(&team_under, &g), Some(PickResult::Win));
        assert_eq!(grade_pick(&game_under, &g), Some(PickResult::Loss));

        let away_over = pick(
            PickKind::TtOver {
                cfb_team_id: AWAY,
                total: 21.5,
            },
            -110,
            false,
        );
        assert_eq!(grade_pick(&away_over, &g), Some(PickResult::Loss));
    }

    #[test]
    fn test_first_quarter_uses_first_period() {
        let mut g = game(30, 3);
        g.home_line_scores = Some(vec![0, 14, 7, 9]);
        g.away_line_scores = Some(vec![3, 0, 0, 0]);

        let mut p = pick(PickKind::Moneyline { cfb_team_id: HOME }, -300, false);
        p.duration = Duration::FirstQuarter;
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Loss));
    }

    #[test]
    fn test_missing_line_scores_count_as_zero() {
        let g = game(35, 28);
        assert_eq!(scores_for_duration(&g, Duration::FirstHalf), (0.0, 0.0));
        assert_eq!(scores_for_duration(&g, Duration::Full), (35.0, 28.0));

        let mut short = game(35, 28);
        short.home_line_scores = Some(vec![7]);
        assert_eq!(scores_for_duration(&short, Duration::FirstHalf), (7.0, 0.0));

        let mut p = pick(PickKind::Over { total: 0.0 }, -110, false);
        p.duration = Duration::FirstHalf;
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Push));
    }

    #[test]
    fn test_forced_push_for_known_bad_game() {
        let mut g = game(42, 0);
        g.id = 401767135;

        let mut p = pick(PickKind::Moneyline { cfb_team_id: HOME }, -500, false);
        p.game_id = g.id;
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Push));

        // Only the full game is overridden
        g.home_line_scores = Some(vec![14, 14, 7, 7]);
        g.away_line_scores = Some(vec![0, 0, 0, 0]);
        p.duration = Duration::FirstHalf;
        assert_eq!(grade_pick(&p, &g), Some(PickResult::Win));
    }

    #[test]
    fn test_grading_is_idempotent() {
        let p = pick(PickKind::Over { total: 44.5 }, -110, true);
        let g = game(24, 21);
        assert_eq!(grade_pick(&p, &g), grade_pick(&p, &g));
    }
}
