//! Calendar-date reporting windows.
//!
//! Range queries take literal `YYYY-MM-DD` strings. A window is interpreted
//! against day boundaries in a fixed local timezone and converted to UTC
//! instants for storage comparisons; responses render stored instants back
//! in the local display form.

use crate::{TallyError, TallyResult};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Local offset applied when none is configured (UTC+8).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Display format for local timestamps in responses.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Rejects non-zero-padded components, trailing input, and dates that do
/// not exist on the calendar.
pub fn parse_calendar_date(s: &str) -> TallyResult<NaiveDate> {
    let bytes = s.as_bytes();
    let structurally_valid = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !structurally_valid {
        return Err(TallyError::validation(format!(
            "invalid date '{}': must match YYYY-MM-DD",
            s
        )));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        TallyError::validation(format!("invalid date '{}': not a calendar date", s))
    })
}

/// Builds the fixed local offset for a whole-hour UTC offset.
pub fn local_offset(utc_offset_hours: i32) -> TallyResult<FixedOffset> {
    FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
        TallyError::Configuration(format!("invalid UTC offset: {} hours", utc_offset_hours))
    })
}

/// Formats a stored UTC instant in the local display form.
#[must_use]
pub fn format_local(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format(LOCAL_DATETIME_FORMAT)
        .to_string()
}

/// A resolved date-range window.
///
/// The storage window is half-open: `[start_utc, end_utc_exclusive)`, where
/// the exclusive bound is local midnight of the day after the end date.
/// Display boundaries render the inclusive face of the same window, so the
/// end boundary shows as `23:59:59` of the end day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    start_local: DateTime<FixedOffset>,
    end_local_exclusive: DateTime<FixedOffset>,
}

impl ReportingWindow {
    /// Resolves a window from two inclusive calendar-date strings.
    pub fn resolve(start_at: &str, end_at: &str, offset: FixedOffset) -> TallyResult<Self> {
        let start = parse_calendar_date(start_at)?;
        let end = parse_calendar_date(end_at)?;
        Self::from_dates(start, end, offset)
    }

    /// Resolves a window from two inclusive calendar dates.
    pub fn from_dates(start: NaiveDate, end: NaiveDate, offset: FixedOffset) -> TallyResult<Self> {
        let day_after_end = end
            .succ_opt()
            .ok_or_else(|| TallyError::validation("end date out of calendar range"))?;
        Ok(Self {
            start_local: local_midnight(start, offset),
            end_local_exclusive: local_midnight(day_after_end, offset),
        })
    }

    /// Inclusive lower bound of the storage window.
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start_local.with_timezone(&Utc)
    }

    /// Exclusive upper bound of the storage window.
    #[must_use]
    pub fn end_utc_exclusive(&self) -> DateTime<Utc> {
        self.end_local_exclusive.with_timezone(&Utc)
    }

    /// Local window start rendered for responses (`YYYY-MM-DD 00:00:00`).
    #[must_use]
    pub fn display_start(&self) -> String {
        self.start_local.format(LOCAL_DATETIME_FORMAT).to_string()
    }

    /// Local window end rendered for responses (`YYYY-MM-DD 23:59:59`).
    #[must_use]
    pub fn display_end(&self) -> String {
        (self.end_local_exclusive - Duration::seconds(1))
            .format(LOCAL_DATETIME_FORMAT)
            .to_string()
    }

    /// The local offset this window was resolved against.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.start_local.offset()
    }

    /// Whether a stored UTC instant falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_utc() && instant < self.end_utc_exclusive()
    }
}

// A fixed offset maps every local datetime to exactly one instant.
fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let naive = date.and_time(NaiveTime::MIN);
    DateTime::from_naive_utc_and_offset(naive - offset, offset)
}
