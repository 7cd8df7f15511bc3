use crate::api::GameProvider;
use crate::error::PickError;
use crate::models::Pick;
use crate::utils::lock::is_locked_at;
use chrono::{DateTime, TimeZone, Utc};

/// Most picks a team may hold in one week
pub const MAX_PICKS_PER_WEEK: usize = 5;

/// Rules for creating, editing and deleting picks, evaluated at one instant
pub struct PickRules<'a, P, Tz> {
    provider: &'a P,
    local: Tz,
    now: DateTime<Utc>,
}

impl<'a, P: GameProvider, Tz: TimeZone> PickRules<'a, P, Tz> {
    pub fn new(provider: &'a P, local: Tz, now: DateTime<Utc>) -> Self {
        Self {
            provider,
            local,
            now,
        }
    }

    /// `week_picks` are the team's existing picks for the candidate's week
    pub fn check_create(&self, candidate: &Pick, week_picks: &[Pick]) -> Result<(), PickError> {
        check_week(candidate)?;

        if week_picks.len() >= MAX_PICKS_PER_WEEK {
            return Err(PickError::WeeklyLimitReached(week_picks.len()));
        }

        check_double(candidate, week_picks)?;
        self.check_unlocked(candidate.game_id, "create")
    }

    pub fn check_edit(
        &self,
        existing: &Pick,
        candidate: &Pick,
        week_picks: &[Pick],
    ) -> Result<(), PickError> {
        if existing.id != candidate.id || existing.team_id != candidate.team_id {
            return Err(PickError::PickNotFound(existing.id));
        }

        check_week(candidate)?;
        check_double(candidate, week_picks)?;

        self.check_unlocked(existing.game_id, "edit")?;
        if candidate.game_id != existing.game_id {
            self.check_unlocked(candidate.game_id, "edit")?;
        }

        Ok(())
    }

    pub fn check_delete(&self, pick: &Pick) -> Result<(), PickError> {
        self.check_unlocked(pick.game_id, "delete")
    }

    fn check_unlocked(&self, game_id: i32, action: &'static str) -> Result<(), PickError> {
        let game = self
            .provider
            .get_by_id(game_id)
            .ok_or(PickError::GameNotFound(game_id))?;

        if is_locked_at(game.start_date, &self.local, self.now) {
            return Err(PickError::GameLocked { action });
        }

        Ok(())
    }
}

fn check_week(pick: &Pick) -> Result<(), PickError> {
    if !(1..=52).contains(&pick.week) {
        return Err(PickError::InvalidWeek(i32::from(pick.week)));
    }
    Ok(())
}

fn check_double(candidate: &Pick, week_picks: &[Pick]) -> Result<(), PickError> {
    if candidate.double
        && week_picks
            .iter()
            .any(|p| p.id != candidate.id && p.double)
    {
        return Err(PickError::DoubleAlreadyUsed);
    }
    Ok(())
}
