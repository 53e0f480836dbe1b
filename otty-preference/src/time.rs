//! Time-of-day values persisted in the ISO 8601 `HH:mm` form.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{PreferenceError, Result};

/// Canonical persisted pattern.
const PATTERN: &str = "%H:%M";
const PATTERN_12_HOUR: &str = "%-I:%M %p";

/// Clock style used when a time is shown to the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HourCycle {
    #[default]
    H24,
    H12,
}

impl HourCycle {
    pub fn is_24_hour(self) -> bool {
        self == Self::H24
    }
}

/// A possibly absent time of day.
///
/// The canonical string and the calendar fields are both derived from one
/// optional [`NaiveTime`], so either both are present or neither is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeValue {
    time: Option<NaiveTime>,
}

impl TimeValue {
    pub fn absent() -> Self {
        Self::default()
    }

    /// Build a value from calendar fields. Out-of-range fields are rejected.
    pub fn from_fields(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self {
            time: Some(time),
        })
    }

    pub fn is_absent(&self) -> bool {
        self.time.is_none()
    }

    /// Canonical `HH:mm` text.
    pub fn iso_string(&self) -> Option<String> {
        self.time.map(|time| time.format(PATTERN).to_string())
    }

    /// `(hour, minute)` in 24-hour form.
    pub fn fields(&self) -> Option<(u32, u32)> {
        self.time.map(|time| (time.hour(), time.minute()))
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }
}

/// Parse canonical `HH:mm` text: two zero-padded digits for a 24-hour hour,
/// a colon, two zero-padded digits for the minute.
pub fn parse(text: &str) -> Result<TimeValue> {
    let invalid = || PreferenceError::InvalidTime {
        value: text.to_string(),
    };

    if !has_canonical_shape(text) {
        return Err(invalid());
    }

    let time = NaiveTime::parse_from_str(text, PATTERN).map_err(|_| invalid())?;
    Ok(TimeValue { time: Some(time) })
}

/// Inverse of [`parse`]. An absent value has no text.
pub fn format(value: &TimeValue) -> Option<String> {
    value.iso_string()
}

/// Render a time for display. Not meant to be parsed back.
pub fn format_for_display(value: &TimeValue, cycle: HourCycle) -> Option<String> {
    let pattern = match cycle {
        HourCycle::H24 => PATTERN,
        HourCycle::H12 => PATTERN_12_HOUR,
    };
    value.time.map(|time| time.format(pattern).to_string())
}

fn has_canonical_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 2 || byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_every_valid_time_when_parsed_and_formatted_then_text_is_unchanged()
    {
        for hour in 0..24 {
            for minute in 0..60 {
                let text = format!("{hour:02}:{minute:02}");

                let value = parse(&text).expect("canonical time should parse");

                assert_eq!(format(&value).as_deref(), Some(text.as_str()));
                assert_eq!(value.fields(), Some((hour, minute)));
            }
        }
    }

    #[test]
    fn given_malformed_text_when_parsed_then_returns_invalid_time() {
        for text in ["25:00", "12:60", "abc", "", "7:05", "07:5", "07-05", "07:05 ", "+7:05"] {
            let err = parse(text).expect_err("malformed time should fail");

            match err {
                PreferenceError::InvalidTime { value } => assert_eq!(value, text),
                other => panic!("expected invalid time, got {other:?}"),
            }
        }
    }

    #[test]
    fn given_absent_value_when_formatted_then_has_no_text_or_fields() {
        let value = TimeValue::absent();

        assert!(value.is_absent());
        assert_eq!(format(&value), None);
        assert_eq!(value.fields(), None);
        assert_eq!(format_for_display(&value, HourCycle::H12), None);
    }

    #[test]
    fn given_afternoon_time_when_displayed_then_follows_hour_cycle() {
        let value = TimeValue::from_fields(13, 5).expect("fields in range");

        assert_eq!(
            format_for_display(&value, HourCycle::H24).as_deref(),
            Some("13:05")
        );
        assert_eq!(
            format_for_display(&value, HourCycle::H12).as_deref(),
            Some("1:05 PM")
        );
    }

    #[test]
    fn given_out_of_range_fields_when_built_then_rejected() {
        assert!(TimeValue::from_fields(24, 0).is_none());
        assert!(TimeValue::from_fields(0, 60).is_none());
    }
}
