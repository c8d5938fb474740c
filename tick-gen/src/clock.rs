use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::GenError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall clock of a simulation run. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    now: NaiveDateTime,
}

impl Default for SimClock {
    /// 2023-09-15 09:30:00, the opening bell.
    fn default() -> Self {
        let now = NaiveDate::from_ymd_opt(2023, 9, 15)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("2023-09-15 09:30:00 is a valid timestamp");
        SimClock { now }
    }
}

impl SimClock {
    #[must_use]
    pub fn starting_at(now: NaiveDateTime) -> Self {
        SimClock { now }
    }

    /// # Errors
    /// Errors when `timestamp` is not in the `YYYY-MM-DD HH:MM:SS` format
    pub fn parse(timestamp: &str) -> Result<Self, GenError> {
        let now = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT)?;
        Ok(SimClock { now })
    }

    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Moves the clock forward and returns the new time.
    ///
    /// # Errors
    /// Errors when the new time is outside of the range chrono can represent
    pub fn advance(&mut self, seconds: u32) -> Result<NaiveDateTime, GenError> {
        self.now = self
            .now
            .checked_add_signed(Duration::seconds(i64::from(seconds)))
            .ok_or(GenError::ClockOverflow)?;
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_start() {
        let clock = SimClock::default();
        assert_eq!(
            clock.now().format(TIMESTAMP_FORMAT).to_string(),
            "2023-09-15 09:30:00"
        );
        assert_eq!(SimClock::parse("2023-09-15 09:30:00").unwrap(), clock);
    }

    #[test]
    fn test_advance_rolls_over_midnight() {
        let mut clock = SimClock::parse("2023-12-31 23:59:58").unwrap();
        clock.advance(1).unwrap();
        assert_eq!(
            clock.now().format(TIMESTAMP_FORMAT).to_string(),
            "2023-12-31 23:59:59"
        );
        let now = clock.advance(3).unwrap();
        assert_eq!(now.format(TIMESTAMP_FORMAT).to_string(), "2024-01-01 00:00:02");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(matches!(
            SimClock::parse("2023-09-15T09:30:00"),
            Err(GenError::InvalidTimestamp(_))
        ));
        assert!(SimClock::parse("15/09/2023 09:30").is_err());
    }

    #[test]
    fn test_advance_overflow() {
        let mut clock = SimClock::starting_at(NaiveDateTime::MAX);
        assert!(matches!(clock.advance(1), Err(GenError::ClockOverflow)));
    }
}
