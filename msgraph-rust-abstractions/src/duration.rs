/*!
ISO 8601 durations as used by `Edm.Duration` properties.

The wire form is `[-]PnYnMnWnDTnHnMnS` where every component is optional
but at least one has to be present. Seconds may carry a fraction of up to
nine digits.
*/

use std::{fmt, str::FromStr};

use chrono::TimeDelta;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const SECONDS_PER_DAY: i64 = 86_400;

/// A duration with calendar (years, months) and exact components.
///
/// Components are kept as written, so `PT90M` stays 90 minutes and is not
/// normalized to `PT1H30M`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Builder, Getters)]
#[builder(build_fn(error = "Error"), default)]
pub struct IsoDuration {
    negative: bool,
    years: u32,
    months: u32,
    weeks: u32,
    days: u32,
    hours: u32,
    minutes: u32,
    seconds: u32,
    nanoseconds: u32,
}

impl IsoDuration {
    /// Creates a builder for an [IsoDuration]
    pub fn builder() -> IsoDurationBuilder {
        IsoDurationBuilder::default()
    }

    /// Duration of the given number of days
    pub fn from_days(days: u32) -> Self {
        IsoDuration {
            days,
            ..Default::default()
        }
    }

    /// Returns true if every component is zero
    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.weeks == 0
            && self.days == 0
            && !self.has_time_part()
    }

    fn has_time_part(&self) -> bool {
        self.hours != 0 || self.minutes != 0 || self.seconds != 0 || self.nanoseconds != 0
    }

    /// Converts to an exact [TimeDelta]. Returns `None` if the duration has a
    /// year or month component, which has no fixed length.
    pub fn as_time_delta(&self) -> Option<TimeDelta> {
        if self.years != 0 || self.months != 0 {
            return None;
        }
        let seconds = (i64::from(self.weeks) * 7 + i64::from(self.days)) * SECONDS_PER_DAY
            + i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);
        let delta = TimeDelta::new(seconds, self.nanoseconds)?;
        Some(if self.negative { -delta } else { delta })
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "PT0S");
        }
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        for (value, designator) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if value != 0 {
                write!(f, "{value}{designator}")?;
            }
        }
        if !self.has_time_part() {
            return Ok(());
        }
        write!(f, "T")?;
        if self.hours != 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.nanoseconds != 0 {
            let fraction = format!("{:09}", self.nanoseconds);
            write!(f, "{}.{}S", self.seconds, fraction.trim_end_matches('0'))
        } else if self.seconds != 0 {
            write!(f, "{}S", self.seconds)
        } else {
            Ok(())
        }
    }
}

/// Splits a duration part into `(number, designator)` pairs, checking that
/// designators appear at most once and in the given order.
fn components<'a>(
    part: &'a str,
    designators: &[char],
    input: &str,
) -> Result<Vec<(&'a str, char)>, Error> {
    let mut result = Vec::new();
    let mut next_allowed = 0;
    let mut start = 0;
    for (index, c) in part.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        let position = designators[next_allowed..]
            .iter()
            .position(|d| *d == c)
            .ok_or_else(|| Error::InvalidFormat(format!("Duration {input}")))?;
        let number = &part[start..index];
        if number.is_empty() {
            return Err(Error::InvalidFormat(format!("Duration {input}")));
        }
        result.push((number, c));
        next_allowed += position + 1;
        start = index + c.len_utf8();
    }
    if start != part.len() {
        return Err(Error::InvalidFormat(format!("Duration {input}")));
    }
    Ok(result)
}

fn parse_fraction(fraction: &str, input: &str) -> Result<u32, Error> {
    if fraction.is_empty() || fraction.len() > 9 {
        return Err(Error::InvalidFormat(format!("Duration {input}")));
    }
    Ok(format!("{fraction:0<9}").parse()?)
}

impl FromStr for IsoDuration {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };
        let rest = rest
            .strip_prefix('P')
            .ok_or_else(|| Error::InvalidFormat(format!("Duration {input}")))?;
        let (date, time) = match rest.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (rest, None),
        };
        if time == Some("") || (date.is_empty() && time.is_none()) {
            return Err(Error::InvalidFormat(format!("Duration {input}")));
        }

        let mut duration = IsoDuration {
            negative,
            ..Default::default()
        };
        for (number, designator) in components(date, &['Y', 'M', 'W', 'D'], input)? {
            let value: u32 = number.parse()?;
            match designator {
                'Y' => duration.years = value,
                'M' => duration.months = value,
                'W' => duration.weeks = value,
                _ => duration.days = value,
            }
        }
        for (number, designator) in components(time.unwrap_or_default(), &['H', 'M', 'S'], input)? {
            match designator {
                'H' => duration.hours = number.parse()?,
                'M' => duration.minutes = number.parse()?,
                _ => match number.split_once('.') {
                    Some((seconds, fraction)) => {
                        duration.seconds = seconds.parse()?;
                        duration.nanoseconds = parse_fraction(fraction, input)?;
                    }
                    None => duration.seconds = number.parse()?,
                },
            }
        }
        Ok(duration)
    }
}

impl Serialize for IsoDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IsoDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days() {
        let duration: IsoDuration = "P90D".parse().unwrap();
        assert_eq!(duration, IsoDuration::from_days(90));
        assert_eq!(duration.to_string(), "P90D");
    }

    #[test]
    fn parse_all_components() {
        let duration: IsoDuration = "P1Y2M3W4DT5H6M7.25S".parse().unwrap();
        assert_eq!(*duration.years(), 1);
        assert_eq!(*duration.months(), 2);
        assert_eq!(*duration.weeks(), 3);
        assert_eq!(*duration.days(), 4);
        assert_eq!(*duration.hours(), 5);
        assert_eq!(*duration.minutes(), 6);
        assert_eq!(*duration.seconds(), 7);
        assert_eq!(*duration.nanoseconds(), 250_000_000);
        assert_eq!(duration.to_string(), "P1Y2M3W4DT5H6M7.25S");
    }

    #[test]
    fn time_only_components_are_kept_as_written() {
        let duration: IsoDuration = "PT90M".parse().unwrap();
        assert_eq!(*duration.minutes(), 90);
        assert_eq!(duration.to_string(), "PT90M");
    }

    #[test]
    fn negative_duration() {
        let duration: IsoDuration = "-PT30S".parse().unwrap();
        assert!(*duration.negative());
        assert_eq!(duration.to_string(), "-PT30S");
        assert_eq!(duration.as_time_delta(), Some(TimeDelta::seconds(-30)));
    }

    #[test]
    fn zero_duration() {
        let duration: IsoDuration = "P0D".parse().unwrap();
        assert!(duration.is_zero());
        assert_eq!(duration.to_string(), "PT0S");
        assert_eq!(IsoDuration::default().to_string(), "PT0S");
    }

    #[test]
    fn reject_malformed() {
        for input in ["", "90D", "P", "PT", "P1H", "PT1D", "P1D2Y", "P1.5D", "PTS", "P1DT1.S"] {
            assert!(
                input.parse::<IsoDuration>().is_err(),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn time_delta_needs_exact_components() {
        let duration: IsoDuration = "P1WT1H".parse().unwrap();
        assert_eq!(
            duration.as_time_delta(),
            Some(TimeDelta::days(7) + TimeDelta::hours(1))
        );
        assert_eq!("P1M".parse::<IsoDuration>().unwrap().as_time_delta(), None);
    }

    #[test]
    fn builder() {
        let duration = IsoDuration::builder()
            .hours(2)
            .minutes(30)
            .build()
            .unwrap();
        assert_eq!(duration.to_string(), "PT2H30M");
    }

    #[test]
    fn serde_string_form() {
        let duration: IsoDuration = serde_json::from_str("\"P2DT12H\"").unwrap();
        assert_eq!(duration.as_time_delta(), Some(TimeDelta::hours(60)));
        assert_eq!(serde_json::to_string(&duration).unwrap(), "\"P2DT12H\"");
    }
}
