use thiserror::Error;

use crate::models::PickType;

#[derive(Debug, Error, PartialEq)]
pub enum PickError {
    #[error("Unknown pick type: {0}")]
    UnknownPickType(String),
    #[error("{pick_type} pick is missing required field {field}")]
    MissingField {
        pick_type: PickType,
        field: &'static str,
    },
    #[error("Week must be between 1 and 52, got {0}")]
    InvalidWeek(i32),
    #[error("Odds must be non-zero American odds, got {0}")]
    InvalidOdds(i32),
    #[error("Already have {0} picks for this week")]
    WeeklyLimitReached(usize),
    #[error("Cannot have more than one double pick per week")]
    DoubleAlreadyUsed,
    #[error("Cannot {action} a pick for a game that has already started")]
    GameLocked { action: &'static str },
    #[error("Game {0} not found")]
    GameNotFound(i32),
    #[error("Pick {0} not found or not authorized to edit")]
    PickNotFound(i32),
}
