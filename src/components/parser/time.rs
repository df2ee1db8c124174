use chrono::{DateTime, Duration, Local, TimeZone, Timelike};

/// Resolve the next occurrence of a time of day, today or tomorrow
pub fn next_time_of_day(now: DateTime<Local>, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let mut next = now.date_naive().and_hms_opt(hour, minute, 0)?;

    // If the time has already passed today, move to tomorrow
    if now.naive_local() >= next {
        next = next.checked_add_signed(Duration::days(1))?;
    }

    Local.from_local_datetime(&next).single()
}

/// Default start when the query carries no date: the next full hour
pub fn default_start(now: DateTime<Local>) -> DateTime<Local> {
    let top_of_hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    top_of_hour + Duration::hours(1)
}

/// Default end relative to a resolved start
pub fn default_end(
    start: DateTime<Local>,
    is_all_day: bool,
    duration_minutes: i64,
) -> DateTime<Local> {
    if is_all_day {
        start + Duration::days(1)
    } else {
        start + Duration::minutes(duration_minutes)
    }
}
