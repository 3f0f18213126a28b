use crate::error::{Result, ScmStatsError};
use crate::model::DateRange;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DEFAULT_PERIOD_DAYS: i64 = 30;

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Resolves `--since` / `--until` inputs against `now`. Missing `until` is
/// `now`, missing `since` is [`DEFAULT_PERIOD_DAYS`] before `until`.
pub fn resolve_range(since: Option<&str>, until: Option<&str>, now: DateTime<Utc>) -> Result<DateRange> {
    let to = match until {
        Some(u) => parse_date_input(u, Bound::End, now)?,
        None => now,
    };
    let from = match since {
        Some(s) => parse_date_input(s, Bound::Start, now)?,
        None => to - Duration::days(DEFAULT_PERIOD_DAYS),
    };

    if from > to {
        return Err(ScmStatsError::InvalidDate(format!(
            "Invalid range: since ({}) is after until ({})",
            from, to
        )));
    }

    Ok(DateRange::new(from, to))
}

fn parse_date_input(input: &str, bound: Bound, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD, an until date covers the whole day
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
        };
        return Ok(Utc.from_utc_datetime(&date.and_time(time)));
    }

    // Relative duration: "90d", "2weeks", "3 months ago"
    let relative: String = input
        .strip_suffix("ago")
        .unwrap_or(input)
        .split_whitespace()
        .collect();
    let duration = humantime::parse_duration(&relative)
        .map_err(|e| ScmStatsError::InvalidDate(format!("Invalid date '{input}': {e}")))?;
    let duration = Duration::from_std(duration)
        .map_err(|_| ScmStatsError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    now.checked_sub_signed(duration)
        .ok_or_else(|| ScmStatsError::InvalidDate(format!("Duration overflow for '{input}'")))
}
