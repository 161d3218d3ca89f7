//! Download configuration: default index set and date range handling

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Offset, TimeZone};
use std::fmt;
use std::str::FromStr;

use super::DownloadError;

/// Indices downloaded when the caller does not name any
pub const DEFAULT_INDICES: [&str; 8] = ["AORD", "BTC-USD", "DAX", "DJI", "HSI", "N225", "NYA", "GSPC"];

/// Date format accepted for range endpoints
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timezone used to turn a calendar date into a Unix timestamp
///
/// `Utc` is the default so the requested range does not depend on the host.
/// `Local` interprets midnight in the host timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampZone {
    /// Midnight UTC
    #[default]
    Utc,
    /// Midnight in the host's local timezone
    Local,
}

impl TimestampZone {
    /// Unix timestamp (seconds) of midnight on `date`
    ///
    /// When local midnight falls in a DST gap, the offset in effect before the
    /// transition is applied, which lands on the first instant after the gap.
    ///
    /// # Errors
    /// Returns DownloadError::InvalidArgument if `date` has no midnight
    pub fn midnight_timestamp(&self, date: NaiveDate) -> Result<i64, DownloadError> {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            DownloadError::InvalidArgument(format!("Invalid date: {date}"))
        })?;

        match self {
            TimestampZone::Utc => Ok(midnight.and_utc().timestamp()),
            TimestampZone::Local => Ok(zoned_timestamp(&Local, midnight)),
        }
    }
}

/// Timestamp of a wall-clock time in `tz`, taking the earlier instant when it
/// is ambiguous and the pre-transition offset when it does not exist
fn zoned_timestamp<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> i64 {
    match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt.timestamp(),
        None => {
            let before = tz.offset_from_utc_datetime(&(local - Duration::days(1))).fix();
            local.and_utc().timestamp() - i64::from(before.local_minus_utc())
        }
    }
}

impl fmt::Display for TimestampZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimestampZone::Utc => "utc",
            TimestampZone::Local => "local",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TimestampZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utc" => Ok(TimestampZone::Utc),
            "local" => Ok(TimestampZone::Local),
            _ => Err(format!("Invalid timezone: {s}. Valid options: utc, local")),
        }
    }
}

/// Inclusive calendar date range of a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First calendar date
    pub start: NaiveDate,
    /// Last calendar date
    pub end: NaiveDate,
}

impl DateRange {
    /// Parse both endpoints from `YYYY-MM-DD` strings
    ///
    /// # Errors
    /// Returns DownloadError::InvalidArgument if either string is not a valid
    /// date or the end precedes the start
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, DownloadError> {
        let start = NaiveDate::parse_from_str(start_date.trim(), DATE_FORMAT).map_err(|e| {
            DownloadError::InvalidArgument(format!("Invalid start date '{start_date}': {e}"))
        })?;
        let end = NaiveDate::parse_from_str(end_date.trim(), DATE_FORMAT).map_err(|e| {
            DownloadError::InvalidArgument(format!("Invalid end date '{end_date}': {e}"))
        })?;

        if end < start {
            return Err(DownloadError::InvalidArgument(format!(
                "End date {end} is before start date {start}"
            )));
        }

        Ok(Self { start, end })
    }

    /// Both endpoints as Unix timestamps (seconds)
    pub fn timestamps(&self, zone: TimestampZone) -> Result<(i64, i64), DownloadError> {
        Ok((
            zone.midnight_timestamp(self.start)?,
            zone.midnight_timestamp(self.end)?,
        ))
    }
}
