// Copyright 2025 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Period boundaries (day, week, month) used to build sampling grids and to bucket events.
//!
//! All periods are calendar periods in UTC: midnight for days, Monday midnight for weeks
//! (ISO 8601) and the 1st of the month for months. Bucketed series (sums and counts) are
//! labelled by the start of their period. Sampled series are labelled by the instant they are
//! evaluated at, which is the close of the period (the start of the next one).

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling frequency of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Day,
    Week,
    Month,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported frequency '{0}', expected one of D, W, M")]
pub struct ParseFrequencyError(pub String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Frequency::Day),
            "w" | "week" | "weekly" => Ok(Frequency::Week),
            "m" | "month" | "monthly" => Ok(Frequency::Month),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Frequency::Day => "D",
            Frequency::Week => "W",
            Frequency::Month => "M",
        };
        f.write_str(code)
    }
}

impl Frequency {
    /// Returns the start of the period containing `timestamp`
    pub fn period_start(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Day => get_day_start(timestamp),
            Frequency::Week => get_week_start(timestamp),
            Frequency::Month => get_month_start(timestamp),
        }
    }

    /// Returns the start of the period following the one containing `timestamp`
    pub fn next_period_start(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Day => get_next_day(timestamp),
            Frequency::Week => get_next_week(timestamp),
            Frequency::Month => get_next_month(timestamp),
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn get_day_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    midnight(timestamp.date_naive())
}

/// Returns the start of the calendar week (Monday 00:00:00 UTC) for a given timestamp
pub fn get_week_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let date = timestamp.date_naive();
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    midnight(date - Days::new(days_from_monday))
}

/// Returns the start of the calendar month (1st day 00:00:00 UTC) for a given timestamp
pub fn get_month_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let date = timestamp.date_naive();
    midnight(date - Days::new(date.day0() as u64))
}

pub fn get_next_day(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    midnight(timestamp.date_naive() + Days::new(1))
}

pub fn get_next_week(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    midnight(get_week_start(timestamp).date_naive() + Days::new(7))
}

pub fn get_next_month(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    midnight(get_month_start(timestamp).date_naive() + Months::new(1))
}

/// Returns the periods from the one containing `start` to the one containing `end` (inclusive).
/// Each item is `(period_start, period_end)` where `period_end` is the start of the next period.
pub fn iter_periods(
    frequency: Frequency,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> impl Iterator<Item = (DateTime<Utc>, DateTime<Utc>)> {
    let last = frequency.period_start(end);

    // Months have variable lengths, so walk boundary to boundary
    let mut periods = Vec::new();
    let mut current = frequency.period_start(start);
    while current <= last {
        let next = frequency.next_period_start(current);
        periods.push((current, next));
        current = next;
    }

    periods.into_iter()
}

/// Period start instants from the period containing `start` to the one containing `end`
pub fn period_grid(
    frequency: Frequency,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    iter_periods(frequency, start, end).map(|(period_start, _)| period_start).collect()
}

/// Close instants (start of the following period) of the periods from the one containing
/// `start` to the one containing `end`. Every close is strictly after `start`.
pub fn period_close_grid(
    frequency: Frequency,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    iter_periods(frequency, start, end).map(|(_, close)| close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_get_day_start() {
        let midnight_utc = utc(2023, 11, 14, 0, 0, 0);

        assert_eq!(get_day_start(midnight_utc), midnight_utc);
        assert_eq!(get_day_start(utc(2023, 11, 14, 0, 0, 1)), midnight_utc);
        assert_eq!(get_day_start(utc(2023, 11, 14, 12, 0, 0)), midnight_utc);
        assert_eq!(get_day_start(utc(2023, 11, 14, 23, 59, 59)), midnight_utc);
        assert_eq!(get_day_start(utc(2023, 11, 15, 0, 0, 0)), utc(2023, 11, 15, 0, 0, 0));
    }

    #[test]
    fn test_get_week_start() {
        // 2023-11-15 is a Wednesday
        let wednesday = utc(2023, 11, 15, 10, 0, 0);
        let week_start = get_week_start(wednesday);

        assert_eq!(week_start.weekday(), Weekday::Mon);
        assert_eq!(week_start, utc(2023, 11, 13, 0, 0, 0));

        // Sunday is still in the same ISO week
        assert_eq!(get_week_start(utc(2023, 11, 19, 23, 59, 59)), week_start);
        assert_eq!(get_week_start(utc(2023, 11, 20, 0, 0, 0)), utc(2023, 11, 20, 0, 0, 0));
    }

    #[test]
    fn test_get_month_start() {
        let expected = utc(2023, 11, 1, 0, 0, 0);
        assert_eq!(get_month_start(utc(2023, 11, 15, 12, 30, 45)), expected);
        assert_eq!(get_month_start(utc(2023, 11, 30, 23, 59, 59)), expected);
        assert_eq!(get_month_start(expected), expected);
    }

    #[test]
    fn test_next_period_boundaries() {
        assert_eq!(get_next_day(utc(2023, 12, 31, 18, 0, 0)), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(get_next_week(utc(2023, 11, 15, 10, 0, 0)), utc(2023, 11, 20, 0, 0, 0));
        assert_eq!(get_next_month(utc(2023, 12, 15, 0, 0, 0)), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(get_next_month(utc(2024, 1, 31, 0, 0, 0)), utc(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_iter_periods_monthly() {
        let periods: Vec<_> =
            iter_periods(Frequency::Month, utc(2023, 11, 20, 0, 0, 0), utc(2024, 2, 3, 0, 0, 0))
                .collect();

        assert_eq!(periods.len(), 4);
        assert_eq!(periods[0], (utc(2023, 11, 1, 0, 0, 0), utc(2023, 12, 1, 0, 0, 0)));
        assert_eq!(periods[3], (utc(2024, 2, 1, 0, 0, 0), utc(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_iter_periods_single_and_empty() {
        let t = utc(2023, 11, 20, 15, 0, 0);
        assert_eq!(period_grid(Frequency::Day, t, t), vec![utc(2023, 11, 20, 0, 0, 0)]);
        assert!(period_grid(Frequency::Day, t, utc(2023, 11, 19, 0, 0, 0)).is_empty());
    }

    #[test]
    fn test_period_close_grid() {
        let first = utc(2019, 11, 15, 9, 0, 0);
        let closes = period_close_grid(Frequency::Month, first, utc(2020, 1, 10, 0, 0, 0));
        assert_eq!(
            closes,
            vec![utc(2019, 12, 1, 0, 0, 0), utc(2020, 1, 1, 0, 0, 0), utc(2020, 2, 1, 0, 0, 0)]
        );
        assert!(closes.iter().all(|close| *close > first));

        // A period that starts exactly at `start` closes one period later
        let monday = utc(2023, 11, 13, 0, 0, 0);
        assert_eq!(
            period_close_grid(Frequency::Week, monday, monday),
            vec![utc(2023, 11, 20, 0, 0, 0)]
        );
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!("D".parse::<Frequency>().unwrap(), Frequency::Day);
        assert_eq!("w".parse::<Frequency>().unwrap(), Frequency::Week);
        assert_eq!("month".parse::<Frequency>().unwrap(), Frequency::Month);
        assert!("Q".parse::<Frequency>().is_err());
        assert_eq!(Frequency::Month.to_string(), "M");
    }
}
