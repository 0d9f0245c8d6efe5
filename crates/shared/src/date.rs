use time::{Duration, OffsetDateTime, Time, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Week {
    pub fn start_timestamp(&self) -> u64 {
        self.start.unix_timestamp().max(0) as u64
    }

    pub fn end_timestamp(&self) -> u64 {
        self.end.unix_timestamp().max(0) as u64
    }
}

/// Monday 00:00:00 to Sunday 23:59:59 of the week containing `date`.
pub fn week_of(date: OffsetDateTime) -> crate::Result<Week> {
    let days_since_monday = match date.weekday() {
        Weekday::Monday => 0,
        Weekday::Tuesday => 1,
        Weekday::Wednesday => 2,
        Weekday::Thursday => 3,
        Weekday::Friday => 4,
        Weekday::Saturday => 5,
        Weekday::Sunday => 6,
    };

    let monday = (date - Duration::days(days_since_monday)).replace_time(Time::MIDNIGHT);
    let sunday = monday + Duration::days(6);

    Ok(Week {
        start: monday,
        end: sunday.replace_time(Time::from_hms(23, 59, 59)?),
    })
}

/// The week following the one containing `from`.
pub fn next_week(from: OffsetDateTime) -> crate::Result<Week> {
    week_of(from + Duration::weeks(1))
}

pub fn next_week_from_now() -> crate::Result<Week> {
    next_week(OffsetDateTime::now_utc())
}
