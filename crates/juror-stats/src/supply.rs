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

//! Total token supply over time.
//!
//! The supply is the running sum of mint and burn deltas. Known supply events that are not
//! part of the delta feed are expressed as corrections: a correction lowers the supply by its
//! amount for every instant strictly before its `before` date. Corrections are applied as step
//! changes at their true dates, ahead of any resampling, so the result does not depend on the
//! output frequency.
//!
//! The supply as of an instant includes every step at or before that instant. Resampled series
//! are labelled by the instant they are evaluated at, the close of each period, which lines them
//! up with the staked series.

use std::path::Path;

use alloy_primitives::I256;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    events::{SeriesPoint, SupplyDelta},
    time_boundaries::{period_close_grid, Frequency},
    units::signed_tokens,
};

/// Supply is lowered by `amount` at every instant strictly before `before`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyCorrection {
    /// Short description of the supply event
    #[serde(default)]
    pub label: String,
    pub before: DateTime<Utc>,
    /// Signed amount in wei, (de)serialized as whole tokens
    #[serde(with = "crate::units::token_amount")]
    pub amount: I256,
}

/// Supply deltas and corrections for the staking token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyConfig {
    #[serde(default)]
    pub deltas: Vec<SupplyDelta>,
    #[serde(default)]
    pub corrections: Vec<SupplyCorrection>,
}

fn utc_from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::default() + Duration::seconds(secs)
}

/// 2018-05-01T00:00:00Z, ahead of the first court stake
const BASELINE_TIMESTAMP: i64 = 1_525_132_800;
/// Current total supply, in whole tokens
const BASELINE_SUPPLY: u64 = 776_626_704;
/// 2019-12-30T00:00:00Z
const SECOND_SALE_TIMESTAMP: i64 = 1_577_664_000;
const SECOND_SALE_AMOUNT: u64 = 200_000_000;
/// 2024-01-20T00:00:00Z
const KIP66_MINT_TIMESTAMP: i64 = 1_705_708_800;
const KIP66_MINT_AMOUNT: u64 = 12_000_000;

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            deltas: vec![SupplyDelta {
                timestamp: utc_from_unix(BASELINE_TIMESTAMP),
                amount: signed_tokens(BASELINE_SUPPLY),
            }],
            corrections: vec![
                SupplyCorrection {
                    label: "second token sale".to_string(),
                    before: utc_from_unix(SECOND_SALE_TIMESTAMP),
                    amount: signed_tokens(SECOND_SALE_AMOUNT),
                },
                SupplyCorrection {
                    label: "KIP-66 mint".to_string(),
                    before: utc_from_unix(KIP66_MINT_TIMESTAMP),
                    amount: signed_tokens(KIP66_MINT_AMOUNT),
                },
            ],
        }
    }
}

impl SupplyConfig {
    /// Loads a supply configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse supply config")
    }

    /// Loads a supply configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read supply config {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid supply config {}", path.display()))
    }

    /// Supply as every period closes, from the period of the first delta through the period
    /// of `now`
    pub fn series(&self, frequency: Frequency, now: DateTime<Utc>) -> Vec<SeriesPoint<I256>> {
        supply_series(&self.deltas, &self.corrections, frequency, now)
    }

    /// Supply as of every instant of `grid`
    pub fn at(&self, grid: &[DateTime<Utc>]) -> Vec<SeriesPoint<I256>> {
        supply_at(&self.deltas, &self.corrections, grid)
    }
}

/// Supply as of every instant of `grid`, in grid order.
///
/// The value at an instant is the supply after every step at or before it. Every correction is
/// in effect until its date is reached.
pub fn supply_at(
    deltas: &[SupplyDelta],
    corrections: &[SupplyCorrection],
    grid: &[DateTime<Utc>],
) -> Vec<SeriesPoint<I256>> {
    let mut steps: Vec<(DateTime<Utc>, I256)> = deltas
        .iter()
        .map(|delta| (delta.timestamp, delta.amount))
        .chain(corrections.iter().map(|correction| (correction.before, correction.amount)))
        .collect();
    steps.sort_by_key(|(timestamp, _)| *timestamp);

    let initial = corrections.iter().fold(I256::ZERO, |total, correction| total - correction.amount);
    let cumulative: Vec<(DateTime<Utc>, I256)> = steps
        .into_iter()
        .scan(initial, |supply, (timestamp, amount)| {
            *supply += amount;
            Some((timestamp, *supply))
        })
        .collect();

    grid.iter()
        .map(|&instant| {
            let applied = cumulative.partition_point(|(timestamp, _)| *timestamp <= instant);
            let supply = applied.checked_sub(1).map_or(initial, |last| cumulative[last].1);
            SeriesPoint::new(instant, supply)
        })
        .collect()
}

/// Builds the supply series from deltas and corrections.
///
/// Each period from the one containing the first delta to the one containing `now` is
/// evaluated at its close and labelled by it. Periods without any step carry the previous value.
pub fn supply_series(
    deltas: &[SupplyDelta],
    corrections: &[SupplyCorrection],
    frequency: Frequency,
    now: DateTime<Utc>,
) -> Vec<SeriesPoint<I256>> {
    let Some(first) = deltas.iter().map(|delta| delta.timestamp).min() else {
        return Vec::new();
    };

    let grid = period_close_grid(frequency, first, now.max(first));
    supply_at(deltas, corrections, &grid)
}
