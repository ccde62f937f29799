use chrono::{DateTime, Utc};

const HOUR: i64 = 60 * 60;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Time since quitting, split into calendar-ish units (365-day years, 30-day months).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
}

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days, {} hours",
            self.years, self.months, self.days, self.hours
        )
    }
}

/// A `from` in the future counts as no time at all.
pub fn elapsed_since(from: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let mut remaining = (now - from).num_seconds().max(0);

    let years = remaining / YEAR;
    remaining -= years * YEAR;
    let months = remaining / MONTH;
    remaining -= months * MONTH;
    let days = remaining / DAY;
    remaining -= days * DAY;

    Elapsed {
        years,
        months,
        days,
        hours: remaining / HOUR,
    }
}
