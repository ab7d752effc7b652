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

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    events::{CourtTransaction, DisputeEvent, SeriesPoint},
    time_boundaries::{period_grid, Frequency},
};

/// Number of timestamps in each period, from the period of the earliest to that of the latest.
/// Periods in between without any timestamp count 0.
pub fn count_per_period(timestamps: &[DateTime<Utc>], frequency: Frequency) -> Vec<SeriesPoint<u64>> {
    let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) else {
        return Vec::new();
    };

    let mut counts: BTreeMap<DateTime<Utc>, u64> =
        period_grid(frequency, *first, *last).into_iter().map(|start| (start, 0)).collect();
    for timestamp in timestamps {
        *counts.entry(frequency.period_start(*timestamp)).or_insert(0) += 1;
    }

    counts.into_iter().map(|(start, count)| SeriesPoint::new(start, count)).collect()
}

/// Disputes created per period
pub fn cases_series(disputes: &[DisputeEvent], frequency: Frequency) -> Vec<SeriesPoint<u64>> {
    let timestamps: Vec<DateTime<Utc>> = disputes.iter().map(|dispute| dispute.start_time).collect();
    count_per_period(&timestamps, frequency)
}

/// Court transactions per period
pub fn transactions_series(
    transactions: &[CourtTransaction],
    frequency: Frequency,
) -> Vec<SeriesPoint<u64>> {
    let timestamps: Vec<DateTime<Utc>> =
        transactions.iter().map(|transaction| transaction.timestamp).collect();
    count_per_period(&timestamps, frequency)
}
