//! Reporting window resolution
//!
//! Turns raw dashboard query parameters into a bounded UTC calendar window.
//! Malformed input never fails: it falls back to the trailing-days window.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

/// Longest window, in calendar days, a report may cover.
pub const MAX_DAYS: u32 = 365;

/// Trailing window length used when `days` is absent or not a number.
pub const DEFAULT_DAYS: u32 = 30;

/// Raw query parameters, kept as text so bad values reach the resolver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowParams {
    pub days: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Which path produced the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    /// Both dates parsed and `start <= end`
    Explicit { start: NaiveDate, end: NaiveDate },
    /// Trailing `days` ending today
    Trailing { days: u32 },
}

impl WindowParams {
    pub fn new(days: Option<&str>, start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            days: days.map(str::to_string),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    /// The `days` parameter, clamped to `[1, MAX_DAYS]`.
    pub fn days(&self) -> u32 {
        parse_days(self.days.as_deref())
    }

    pub fn classify(&self) -> WindowRequest {
        let start = self.start.as_deref().and_then(parse_date);
        let end = self.end.as_deref().and_then(parse_date);

        match (start, end) {
            (Some(start), Some(end)) if start <= end => WindowRequest::Explicit { start, end },
            _ => WindowRequest::Trailing { days: self.days() },
        }
    }
}

/// A resolved reporting window.
///
/// `start` is 00:00:00 of its day and `end` is 23:59:59 of its day, both UTC.
/// The window never spans more than [`MAX_DAYS`] calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn resolve(params: &WindowParams, now: DateTime<Utc>) -> Self {
        Self::from_request(params.classify(), now)
    }

    pub fn from_request(request: WindowRequest, now: DateTime<Utc>) -> Self {
        match request {
            WindowRequest::Explicit { start, end } => {
                // Over-long ranges lose their oldest days; the requested end stays.
                let earliest = days_before(end, MAX_DAYS - 1);
                Self::for_dates(start.max(earliest), end)
            }
            WindowRequest::Trailing { days } => {
                let end = now.date_naive();
                let start = days_before(end, days.clamp(1, MAX_DAYS) - 1);
                Self::for_dates(start, end)
            }
        }
    }

    fn for_dates(start: NaiveDate, end: NaiveDate) -> Self {
        let start_of = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        Self {
            start: start_of(start),
            end: start_of(end) + Duration::seconds(86_399),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Inclusive number of calendar days covered.
    pub fn days(&self) -> u32 {
        (self.end_date() - self.start_date()).num_days() as u32 + 1
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Every calendar day of the window, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date().iter_days().take(self.days() as usize)
    }
}

fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Reads an optional sign and the leading digits, ignoring whatever follows
/// (`7.5` is 7, `10days` is 10). No leading digits means the default.
fn parse_days(raw: Option<&str>) -> u32 {
    let raw = raw.unwrap_or_default().trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return DEFAULT_DAYS;
    }

    match rest[..digits].parse::<u64>() {
        Ok(_) if negative => 1,
        Ok(n) => n.clamp(1, u64::from(MAX_DAYS)) as u32,
        // only overflow is possible on a pure digit run
        Err(_) if negative => 1,
        Err(_) => MAX_DAYS,
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its UTC date is used).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}
