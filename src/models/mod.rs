use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PickError;

/// A college football game as served by the CollegeFootballData API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i32,
    #[serde(default)]
    pub season: i32,
    #[serde(default)]
    pub week: i32,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub start_time_TBD: bool,
    pub completed: bool,
    pub home_id: i32,
    pub home_team: String,
    pub home_points: Option<i32>,
    pub home_line_scores: Option<Vec<i32>>,
    pub away_id: i32,
    pub away_team: String,
    pub away_points: Option<i32>,
    pub away_line_scores: Option<Vec<i32>>,
}

impl Game {
    /// Name of the team with the given id, if it plays in this game
    pub fn team_name(&self, cfb_team_id: i32) -> Option<&str> {
        if cfb_team_id == self.home_id {
            Some(&self.home_team)
        } else if cfb_team_id == self.away_id {
            Some(&self.away_team)
        } else {
            None
        }
    }
}

/// Portion of the game a pick applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    #[serde(rename = "1Q")]
    FirstQuarter,
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "FULL")]
    Full,
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Duration::FirstQuarter => "1Q",
            Duration::FirstHalf => "1H",
            Duration::Full => "FULL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickType {
    Spread,
    Moneyline,
    Over,
    Under,
    TtOver,
    TtUnder,
}

impl PickType {
    pub fn is_team_total(self) -> bool {
        matches!(self, PickType::TtOver | PickType::TtUnder)
    }

    pub fn is_over(self) -> bool {
        matches!(self, PickType::Over | PickType::TtOver)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PickType::Spread => "SPREAD",
            PickType::Moneyline => "MONEYLINE",
            PickType::Over => "OVER",
            PickType::Under => "UNDER",
            PickType::TtOver => "TT_OVER",
            PickType::TtUnder => "TT_UNDER",
        }
    }
}

impl fmt::Display for PickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickType {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPREAD" => Ok(PickType::Spread),
            "MONEYLINE" => Ok(PickType::Moneyline),
            "OVER" => Ok(PickType::Over),
            "UNDER" => Ok(PickType::Under),
            "TT_OVER" => Ok(PickType::TtOver),
            "TT_UNDER" => Ok(PickType::TtUnder),
            other => Err(PickError::UnknownPickType(other.to_string())),
        }
    }
}

/// The type-dependent part of a pick. Each variant carries only the
/// fields that bet type needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PickKind {
    Spread { cfb_team_id: i32, spread: f64 },
    Moneyline { cfb_team_id: i32 },
    Over { total: f64 },
    Under { total: f64 },
    TtOver { cfb_team_id: i32, total: f64 },
    TtUnder { cfb_team_id: i32, total: f64 },
}

impl PickKind {
    pub fn pick_type(&self) -> PickType {
        match self {
            PickKind::Spread { .. } => PickType::Spread,
            PickKind::Moneyline { .. } => PickType::Moneyline,
            PickKind::Over { .. } => PickType::Over,
            PickKind::Under { .. } => PickType::Under,
            PickKind::TtOver { .. } => PickType::TtOver,
            PickKind::TtUnder { .. } => PickType::TtUnder,
        }
    }

    /// The college team the pick is on, for bet types that name one
    pub fn cfb_team_id(&self) -> Option<i32> {
        match self {
            PickKind::Spread { cfb_team_id, .. }
            | PickKind::Moneyline { cfb_team_id }
            | PickKind::TtOver { cfb_team_id, .. }
            | PickKind::TtUnder { cfb_team_id, .. } => Some(*cfb_team_id),
            PickKind::Over { .. } | PickKind::Under { .. } => None,
        }
    }
}

/// A team's wager against a betting line for one game.
///
/// (De)serialized through [`PickRecord`], so every pick read from JSON
/// passes the same checks as a stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PickRecord", into = "PickRecord")]
pub struct Pick {
    pub id: i32,
    pub team_id: i32,
    pub season: i32,
    pub week: u8,
    pub game_id: i32,
    pub duration: Duration,
    pub odds: i32, // American odds format (e.g., -110, +150)
    pub double: bool,
    pub kind: PickKind,
}

impl Pick {
    pub fn pick_type(&self) -> PickType {
        self.kind.pick_type()
    }

    pub fn format(&self, game: &Game) -> String {
        let line = match &self.kind {
            PickKind::Spread { cfb_team_id, spread } => format!(
                "{} {:+.1}",
                game.team_name(*cfb_team_id).unwrap_or("?"),
                spread
            ),
            PickKind::Moneyline { cfb_team_id } => {
                format!("{} ML", game.team_name(*cfb_team_id).unwrap_or("?"))
            }
            PickKind::Over { total } => format!("Over {:.1}", total),
            PickKind::Under { total } => format!("Under {:.1}", total),
            PickKind::TtOver { cfb_team_id, total } => format!(
                "{} TT Over {:.1}",
                game.team_name(*cfb_team_id).unwrap_or("?"),
                total
            ),
            PickKind::TtUnder { cfb_team_id, total } => format!(
                "{} TT Under {:.1}",
                game.team_name(*cfb_team_id).unwrap_or("?"),
                total
            ),
        };

        format!(
            "{} @ {} | {} [{}] ({:+}){}",
            game.away_team,
            game.home_team,
            line,
            self.duration,
            self.odds,
            if self.double { " x2" } else { "" }
        )
    }
}

/// A pick as stored: one row, type-dependent columns nullable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRecord {
    pub id: i32,
    pub team_id: i32,
    pub season: i32,
    pub week: i32,
    pub game_id: i32,
    pub pick_type: String,
    pub duration: Duration,
    pub odds: i32,
    pub double: bool,
    pub total: Option<f64>,
    pub spread: Option<f64>,
    pub cfb_team_id: Option<i32>,
}

impl TryFrom<PickRecord> for Pick {
    type Error = PickError;

    fn try_from(record: PickRecord) -> Result<Self, Self::Error> {
        let pick_type: PickType = record.pick_type.parse()?;

        let week = u8::try_from(record.week)
            .ok()
            .filter(|w| (1..=52).contains(w))
            .ok_or(PickError::InvalidWeek(record.week))?;

        if record.odds == 0 {
            return Err(PickError::InvalidOdds(record.odds));
        }

        let missing = |field: &'static str| PickError::MissingField { pick_type, field };
        let team = || record.cfb_team_id.ok_or_else(|| missing("cfbTeamId"));
        let total = || record.total.ok_or_else(|| missing("total"));

        let kind = match pick_type {
            PickType::Spread => PickKind::Spread {
                cfb_team_id: team()?,
                spread: record.spread.ok_or_else(|| missing("spread"))?,
            },
            PickType::Moneyline => PickKind::Moneyline {
                cfb_team_id: team()?,
            },
            PickType::Over => PickKind::Over { total: total()? },
            PickType::Under => PickKind::Under { total: total()? },
            PickType::TtOver => PickKind::TtOver {
                cfb_team_id: team()?,
                total: total()?,
            },
            PickType::TtUnder => PickKind::TtUnder {
                cfb_team_id: team()?,
                total: total()?,
            },
        };

        Ok(Pick {
            id: record.id,
            team_id: record.team_id,
            season: record.season,
            week,
            game_id: record.game_id,
            duration: record.duration,
            odds: record.odds,
            double: record.double,
            kind,
        })
    }
}

impl From<Pick> for PickRecord {
    fn from(pick: Pick) -> Self {
        Self::from(&pick)
    }
}

impl From<&Pick> for PickRecord {
    fn from(pick: &Pick) -> Self {
        let (total, spread) = match pick.kind {
            PickKind::Spread { spread, .. } => (None, Some(spread)),
            PickKind::Moneyline { .. } => (None, None),
            PickKind::Over { total }
            | PickKind::Under { total }
            | PickKind::TtOver { total, .. }
            | PickKind::TtUnder { total, .. } => (Some(total), None),
        };

        Self {
            id: pick.id,
            team_id: pick.team_id,
            season: pick.season,
            week: i32::from(pick.week),
            game_id: pick.game_id,
            pick_type: pick.pick_type().as_str().to_string(),
            duration: pick.duration,
            odds: pick.odds,
            double: pick.double,
            total,
            spread,
            cfb_team_id: pick.kind.cfb_team_id(),
        }
    }
}

/// Outcome of a graded pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PickResult {
    Win,
    Loss,
    Push,
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PickResult::Win => "WIN",
            PickResult::Loss => "LOSS",
            PickResult::Push => "PUSH",
        };
        f.write_str(s)
    }
}

/// A pick'em team (a group of users sharing one slate of picks)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    pub name: String,
}
