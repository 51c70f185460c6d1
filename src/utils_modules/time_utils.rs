use crate::common::*;

use std::fmt::Display;

#[doc = "Formats unix seconds as an `HH:MM:SS` wall-clock label in `tz`."]
pub fn format_clock_in<Tz>(epoch_secs: i64, tz: &Tz) -> anyhow::Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time: DateTime<Tz> = tz
        .timestamp_opt(epoch_secs, 0)
        .single()
        .ok_or_else(|| anyhow!("[time_utils->format_clock_in] invalid timestamp: {}", epoch_secs))?;

    Ok(time.format("%H:%M:%S").to_string())
}

#[doc = "`format_clock_in` with the server's local time zone."]
pub fn format_clock(epoch_secs: i64) -> anyhow::Result<String> {
    format_clock_in(epoch_secs, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        /* 2024-01-02T03:04:05Z */
        assert_eq!(format_clock_in(1_704_164_645, &Utc).unwrap(), "03:04:05");
    }

    #[test]
    fn out_of_range_timestamp_is_an_error() {
        assert!(format_clock_in(i64::MAX, &Utc).is_err());
    }
}
