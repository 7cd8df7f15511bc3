use chrono::{
    DateTime, Datelike, Local, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::America::New_York;

/// Hour (Eastern) at which the Saturday afternoon slate locks
const SATURDAY_LOCK_HOUR: i64 = 12;

/// Whether picks against a game starting at `start_date` can no longer be
/// created, edited or deleted, evaluated in the process's local zone.
pub fn is_locked(start_date: DateTime<Utc>) -> bool {
    is_locked_at(start_date, &Local, Utc::now())
}

/// Same as [`is_locked`] with the local zone and the current instant supplied
/// by the caller. The boundary is inclusive: a pick is locked at the exact
/// lock instant.
pub fn is_locked_at<Tz: TimeZone>(
    start_date: DateTime<Utc>,
    local: &Tz,
    now: DateTime<Utc>,
) -> bool {
    lock_time(start_date, local) <= now
}

/// The instant at which picks for a game starting at `start_date` lock.
///
/// Games kicking off on a Saturday at or after noon Eastern all lock at noon
/// Eastern that Saturday. Every other game locks at kickoff.
pub fn lock_time<Tz: TimeZone>(start_date: DateTime<Utc>, local: &Tz) -> DateTime<Utc> {
    // Start dates are treated as wall-clock values in the evaluating process's
    // zone. Lock times move if that zone changes.
    let wall_clock = start_date.with_timezone(local).naive_local();
    let start_eastern = resolve_wall_clock(local, wall_clock).with_timezone(&New_York);

    if start_eastern.weekday() != Weekday::Sat
        || i64::from(start_eastern.hour()) < SATURDAY_LOCK_HOUR
    {
        return start_date;
    }

    let noon_eastern = start_eastern.date_naive().and_time(NaiveTime::default())
        + TimeDelta::hours(SATURDAY_LOCK_HOUR);

    resolve_wall_clock(&New_York, noon_eastern)
}

/// Map a wall-clock value in `tz` to an instant. Ambiguous times (DST fall
/// back) take the earlier mapping, skipped times (spring forward) move one
/// hour later.
fn resolve_wall_clock<Tz: TimeZone>(tz: &Tz, wall_clock: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&wall_clock)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(wall_clock + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&wall_clock))
}
