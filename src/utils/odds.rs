/// Convert American odds to fractional odds (profit per unit staked)
/// +150 -> 1.5, -150 -> 0.667, +/-100 -> 1.0
pub fn to_fractional_odds(odds: i32) -> f64 {
    if odds > 0 {
        odds as f64 / 100.0
    } else {
        100.0 / odds.abs() as f64
    }
}

/// Convert American odds to implied probability
pub fn american_odds_to_probability(odds: i32) -> f64 {
    if odds > 0 {
        100.0 / (odds as f64 + 100.0)
    } else {
        odds.abs() as f64 / (odds.abs() as f64 + 100.0)
    }
}
