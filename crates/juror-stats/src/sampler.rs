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

//! Regularly sampled series over the stake-set log.

use std::collections::BTreeMap;

use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use crate::{
    error::StatisticsError,
    events::{SeriesPoint, StakeEvent},
    reconstruct::{AsOfState, StakeTimeline},
    time_boundaries::{period_close_grid, period_grid, Frequency},
};

/// Number of addresses with a nonzero stake
pub fn count_active(state: &AsOfState) -> u64 {
    state.values().filter(|stake| !stake.is_zero()).count() as u64
}

/// Sum of token amounts, failing instead of wrapping past 256 bits
pub fn checked_sum(amounts: impl IntoIterator<Item = U256>) -> Result<U256, StatisticsError> {
    amounts
        .into_iter()
        .try_fold(U256::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(StatisticsError::Overflow)
}

/// Sum of all stakes
pub fn sum_staked(state: &AsOfState) -> Result<U256, StatisticsError> {
    checked_sum(state.values().copied())
}

/// Samples `reducer` at the start of every period from the first to the last event.
///
/// Each value is computed from the state strictly before its period start, so the first point
/// never includes the first event. An empty timeline yields an empty series.
pub fn sample<T>(
    timeline: &StakeTimeline,
    frequency: Frequency,
    reducer: impl FnMut(&AsOfState) -> T,
) -> Vec<SeriesPoint<T>> {
    match (timeline.first_timestamp(), timeline.last_timestamp()) {
        (Some(first), Some(last)) => sample_range(timeline, frequency, first, last, reducer),
        _ => Vec::new(),
    }
}

/// Samples `reducer` over the period grid spanning `start` to `end`
pub fn sample_range<T>(
    timeline: &StakeTimeline,
    frequency: Frequency,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    reducer: impl FnMut(&AsOfState) -> T,
) -> Vec<SeriesPoint<T>> {
    let grid = period_grid(frequency, start, end);
    tracing::debug!(
        "Sampling {} events over {} grid points ({} frequency)",
        timeline.len(),
        grid.len(),
        frequency
    );
    timeline.sweep(&grid, reducer)
}

/// Samples `reducer` as every period from the first to the last event closes.
///
/// Points are labelled by the close instant they are evaluated at, and each one covers every
/// event of its period. No point precedes the first event.
pub fn sample_period_closes<T>(
    timeline: &StakeTimeline,
    frequency: Frequency,
    reducer: impl FnMut(&AsOfState) -> T,
) -> Vec<SeriesPoint<T>> {
    let (Some(first), Some(last)) = (timeline.first_timestamp(), timeline.last_timestamp()) else {
        return Vec::new();
    };

    let grid = period_close_grid(frequency, first, last);
    tracing::debug!(
        "Sampling {} events at {} period closes ({} frequency)",
        timeline.len(),
        grid.len(),
        frequency
    );
    timeline.sweep(&grid, reducer)
}

/// Daily count of active jurors, from the day of the first event to the day of the last one
pub fn active_jurors_series(events: &[StakeEvent]) -> Vec<SeriesPoint<u64>> {
    sample(&StakeTimeline::from_events(events), Frequency::Day, count_active)
}

/// Total staked as every period of `frequency` closes, labelled by the close instant
pub fn total_staked_series(
    events: &[StakeEvent],
    frequency: Frequency,
) -> Result<Vec<SeriesPoint<U256>>, StatisticsError> {
    sample_period_closes(&StakeTimeline::from_events(events), frequency, sum_staked)
        .into_iter()
        .map(|point| point.value.map(|total| SeriesPoint::new(point.timestamp, total)))
        .collect()
}

/// Change in active jurors per output period.
///
/// Day-over-day differences of the daily series are summed within each period of `frequency`,
/// so changes that happen inside a period are never lost. The first day has no predecessor and
/// contributes nothing.
pub fn active_jurors_growth(
    daily: &[SeriesPoint<u64>],
    frequency: Frequency,
) -> Vec<SeriesPoint<i64>> {
    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<DateTime<Utc>, i64> =
        period_grid(frequency, first.timestamp, last.timestamp)
            .into_iter()
            .map(|period_start| (period_start, 0))
            .collect();

    for pair in daily.windows(2) {
        let diff = pair[1].value as i64 - pair[0].value as i64;
        *buckets.entry(frequency.period_start(pair[1].timestamp)).or_insert(0) += diff;
    }

    buckets.into_iter().map(|(timestamp, growth)| SeriesPoint::new(timestamp, growth)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn stake(byte: u8, amount: u64, at: DateTime<Utc>) -> StakeEvent {
        StakeEvent {
            address: Address::with_last_byte(byte),
            new_total_stake: U256::from(amount),
            subcourt_id: 0,
            timestamp: at,
        }
    }

    #[test]
    fn test_empty_log_gives_empty_series() {
        assert!(active_jurors_series(&[]).is_empty());
        assert!(total_staked_series(&[], Frequency::Month).unwrap().is_empty());
        assert!(active_jurors_growth(&[], Frequency::Week).is_empty());
    }

    #[test]
    fn test_single_event_single_point() {
        let series = active_jurors_series(&[stake(1, 10, utc(2023, 5, 4, 13))]);
        assert_eq!(series, vec![SeriesPoint::new(utc(2023, 5, 4, 0), 0)]);
    }

    #[test]
    fn test_daily_active_jurors() {
        // A stakes, B stakes, A unstakes
        let events = vec![
            stake(0xa, 10, utc(2023, 5, 1, 10)),
            stake(0xb, 5, utc(2023, 5, 2, 10)),
            stake(0xa, 0, utc(2023, 5, 3, 10)),
            stake(0xc, 1, utc(2023, 5, 4, 10)),
        ];

        let series = active_jurors_series(&events);
        let values: Vec<u64> = series.iter().map(|p| p.value).collect();
        assert_eq!(series[0].timestamp, utc(2023, 5, 1, 0));
        assert_eq!(values, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_total_staked_end_to_end() {
        let events = vec![
            stake(0xa, 10, utc(2023, 5, 1, 10)),
            stake(0xb, 5, utc(2023, 5, 2, 10)),
            stake(0xa, 0, utc(2023, 5, 3, 10)),
        ];
        let timeline = StakeTimeline::from_events(&events);

        // Cutoff in (t2, t3]
        assert_eq!(sum_staked(&timeline.as_of(utc(2023, 5, 3, 10))).unwrap(), U256::from(15));
        // Cutoff after t3
        assert_eq!(sum_staked(&timeline.as_of(utc(2023, 5, 3, 11))).unwrap(), U256::from(5));
        assert_eq!(count_active(&timeline.as_of(utc(2023, 5, 3, 11))), 1);

        let daily = total_staked_series(&events, Frequency::Day).unwrap();
        assert_eq!(daily[0].timestamp, utc(2023, 5, 2, 0));
        let values: Vec<U256> = daily.into_iter().map(|p| p.value).collect();
        assert_eq!(values, vec![U256::from(10), U256::from(15), U256::from(5)]);
    }

    #[test]
    fn test_total_staked_monthly_grid() {
        let events = vec![stake(0xa, 10, utc(2023, 1, 15, 0)), stake(0xb, 5, utc(2023, 3, 2, 0))];
        let series = total_staked_series(&events, Frequency::Month).unwrap();

        assert_eq!(
            series,
            vec![
                SeriesPoint::new(utc(2023, 2, 1, 0), U256::from(10)),
                SeriesPoint::new(utc(2023, 3, 1, 0), U256::from(10)),
                SeriesPoint::new(utc(2023, 4, 1, 0), U256::from(15)),
            ]
        );
    }

    #[test]
    fn test_period_closes_never_precede_first_event() {
        let first = utc(2019, 11, 15, 0);
        let events = vec![stake(0xa, 100, first), stake(0xb, 20, utc(2020, 1, 10, 0))];

        for frequency in [Frequency::Day, Frequency::Week, Frequency::Month] {
            let series = total_staked_series(&events, frequency).unwrap();
            assert!(series[0].timestamp > first, "{frequency} grid starts before the first event");
            assert_eq!(series[0].value, U256::from(100));
            assert_eq!(series.last().unwrap().value, U256::from(120));
        }
    }

    #[test]
    fn test_single_event_single_close() {
        let series = total_staked_series(&[stake(1, 10, utc(2023, 5, 4, 13))], Frequency::Week)
            .unwrap();
        // 2023-05-04 is a Thursday, its week closes on Monday 2023-05-08
        assert_eq!(series, vec![SeriesPoint::new(utc(2023, 5, 8, 0), U256::from(10))]);
    }

    #[test]
    fn test_sum_staked_overflow() {
        let events = vec![
            StakeEvent { new_total_stake: U256::MAX, ..stake(0xa, 0, utc(2023, 5, 1, 0)) },
            stake(0xb, 1, utc(2023, 5, 1, 1)),
        ];
        assert_eq!(
            total_staked_series(&events, Frequency::Month),
            Err(StatisticsError::Overflow)
        );
        assert_eq!(checked_sum([U256::from(2), U256::from(3)]), Ok(U256::from(5)));
    }

    #[test]
    fn test_growth_sums_daily_differences_per_period() {
        // 2023-05-01 is a Monday
        let daily: Vec<_> = [0u64, 2, 5, 3, 3, 3, 3, 4, 1]
            .into_iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint::new(utc(2023, 5, 1 + i as u32, 0), v))
            .collect();

        let weekly = active_jurors_growth(&daily, Frequency::Week);
        assert_eq!(
            weekly,
            vec![
                SeriesPoint::new(utc(2023, 5, 1, 0), 3),
                SeriesPoint::new(utc(2023, 5, 8, 0), -2),
            ]
        );

        let monthly = active_jurors_growth(&daily, Frequency::Month);
        assert_eq!(monthly, vec![SeriesPoint::new(utc(2023, 5, 1, 0), 1)]);
    }
}
