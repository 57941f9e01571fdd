//! Windows FILETIME decoding.
//!
//! A FILETIME counts 100 nanosecond intervals since 1601-01-01 UTC. Chrono
//! keeps nanoseconds so no precision is lost in the conversion.

use chrono::{DateTime, TimeZone, Utc};
use log::warn;

use crate::error::NtfsError;

/// Seconds between 1601-01-01 and 1970-01-01.
pub const FILETIME_UNIX_EPOCH_DELTA : i64 = 11_644_473_600;
pub const FILETIME_TICKS_PER_SECOND : i64 = 10_000_000;
/// 9999-12-31 23:59:59.9999999 UTC, the last instant `TIMESTAMP_FORMAT` can show.
pub const MAX_FILETIME : i64 = 2_650_467_743_999_999_999;

/// Display format shared by every record, with 7 fractional digits appended.
pub const TIMESTAMP_FORMAT : &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowsTimestamp(pub i64);

impl WindowsTimestamp
{
  /// `Ok(None)` for zero and negative values, they never mark a real time.
  pub fn to_datetime(&self) -> std::result::Result<Option<DateTime<Utc>>, OutOfRange>
  {
    let ticks = self.0;
    if ticks <= 0
    {
      return Ok(None)
    }
    if ticks > MAX_FILETIME
    {
      return Err(OutOfRange)
    }

    let secs = ticks / FILETIME_TICKS_PER_SECOND - FILETIME_UNIX_EPOCH_DELTA;
    let nanos = (ticks % FILETIME_TICKS_PER_SECOND) as u32 * 100;

    Utc.timestamp_opt(secs, nanos).single().map(Some).ok_or(OutOfRange)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange;

/// Decode one timestamp field. A value that can't be represented is logged,
/// pushed to `warnings` and read as absent.
pub fn decode_timestamp(raw : i64, attribute : &'static str, field : &'static str, warnings : &mut Vec<NtfsError>) -> Option<DateTime<Utc>>
{
  match WindowsTimestamp(raw).to_datetime()
  {
    Ok(datetime) => datetime,
    Err(OutOfRange) =>
    {
      let err = NtfsError::InvalidTimestamp{ attribute, field, raw };
      warn!("{}", err);
      warnings.push(err);
      None
    }
  }
}

pub fn format_timestamp(datetime : &DateTime<Utc>) -> String
{
  format!("{}.{:07}", datetime.format(TIMESTAMP_FORMAT), datetime.timestamp_subsec_nanos() / 100)
}

/// Empty string when absent.
pub fn format_optional_timestamp(datetime : &Option<DateTime<Utc>>) -> String
{
  datetime.as_ref().map(format_timestamp).unwrap_or_default()
}
