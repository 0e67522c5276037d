//! Time-of-day handling for the schedule.
//!
//! Departure and arrival times travel as "HH:MM" strings. This module
//! provides the validated type those strings parse into: a `ScheduleTime`
//! is always in canonical zero-padded 24-hour form, so the store never
//! holds or compares raw, possibly-inconsistent time strings.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day in canonical 24-hour "HH:MM" form.
///
/// Construction goes through [`ScheduleTime::parse`], so a value of this
/// type is already validated and normalized; displaying it always yields
/// the zero-padded form it was parsed from.
///
/// # Examples
///
/// ```
/// use schedule_store::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("09:05").unwrap();
/// assert_eq!(t.to_string(), "09:05");
///
/// // Unpadded, out-of-range, or malformed input is rejected
/// assert!(ScheduleTime::parse("9:05").is_err());
/// assert!(ScheduleTime::parse("24:00").is_err());
/// assert!(ScheduleTime::parse("12:60").is_err());
/// assert!(ScheduleTime::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleTime(NaiveTime);

impl ScheduleTime {
    /// Parse a time from "HH:MM" format.
    ///
    /// The input must be exactly five characters: two hour digits (00-23),
    /// a colon, two minute digits (00-59). Nothing else is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_store::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse("00:00").is_ok());
    /// assert!(ScheduleTime::parse("23:59").is_ok());
    ///
    /// assert!(ScheduleTime::parse("1430").is_err());
    /// assert!(ScheduleTime::parse("14:3").is_err());
    /// assert!(ScheduleTime::parse("25:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns true iff `s` parses as a canonical "HH:MM" time.
    ///
    /// Never panics, whatever the input.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any canonical HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(s in valid_time()) {
            prop_assert!(ScheduleTime::parse(&s).is_ok());
        }

        /// Parse then display roundtrips, so normalization is idempotent
        #[test]
        fn parse_display_roundtrip(s in valid_time()) {
            let t = ScheduleTime::parse(&s).unwrap();
            prop_assert_eq!(t.to_string(), s);
        }

        /// The displayed form is itself valid
        #[test]
        fn display_is_valid(s in valid_time()) {
            let t = ScheduleTime::parse(&s).unwrap();
            prop_assert!(ScheduleTime::is_valid(&t.to_string()));
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ScheduleTime::parse(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ScheduleTime::parse(&s).is_err());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in ".{0,4}|.{6,12}") {
            prop_assert!(ScheduleTime::parse(&s).is_err());
        }

        /// is_valid never panics and agrees with parse
        #[test]
        fn is_valid_total(s in ".*") {
            prop_assert_eq!(ScheduleTime::is_valid(&s), ScheduleTime::parse(&s).is_ok());
        }
    }
}
