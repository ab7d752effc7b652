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

//! Share of the token supply that is staked.

use std::collections::BTreeMap;

use alloy_primitives::{I256, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::ComposerError, events::SeriesPoint, units::u256_to_f64};

/// Staked amount, supply and their ratio at one timestamp of the staked series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakedPercentage {
    pub timestamp: DateTime<Utc>,
    pub total_staked: U256,
    /// Supply aligned to `timestamp`
    pub total_supply: I256,
    /// `total_staked / total_supply`, a fraction in [0, 1] for consistent inputs
    pub percentage: f64,
}

/// Aligns `supply` onto the timestamps of `staked` and divides.
///
/// Each staked sample takes the latest supply sample at or before its timestamp. The output
/// keeps exactly the timestamps of `staked`.
pub fn staked_percentage(
    staked: &[SeriesPoint<U256>],
    supply: &[SeriesPoint<I256>],
) -> Result<Vec<StakedPercentage>, ComposerError> {
    let supply_index: BTreeMap<DateTime<Utc>, I256> =
        supply.iter().map(|point| (point.timestamp, point.value)).collect();

    staked
        .iter()
        .map(|point| {
            let total_supply = supply_index
                .range(..=point.timestamp)
                .next_back()
                .map(|(_, value)| *value)
                .ok_or(ComposerError::MissingSupply { timestamp: point.timestamp })?;

            if total_supply <= I256::ZERO {
                return Err(ComposerError::NonPositiveSupply {
                    timestamp: point.timestamp,
                    supply: total_supply.to_string(),
                });
            }

            Ok(StakedPercentage {
                timestamp: point.timestamp,
                total_staked: point.value,
                total_supply,
                percentage: u256_to_f64(point.value) / u256_to_f64(total_supply.unsigned_abs()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn supply(at: DateTime<Utc>, value: i64) -> SeriesPoint<I256> {
        SeriesPoint::new(at, I256::try_from(value).unwrap())
    }

    #[test]
    fn test_percentage() {
        let staked = vec![SeriesPoint::new(utc(2023, 2, 1), U256::from(50))];
        let result = staked_percentage(&staked, &[supply(utc(2023, 1, 1), 1000)]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].timestamp, utc(2023, 2, 1));
        assert_eq!(result[0].total_supply, I256::try_from(1000).unwrap());
        assert!((result[0].percentage - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_supply_is_forward_filled_onto_staked_timestamps() {
        let staked: Vec<_> = [utc(2023, 1, 1), utc(2023, 1, 15), utc(2023, 2, 1), utc(2023, 3, 1)]
            .into_iter()
            .map(|ts| SeriesPoint::new(ts, U256::from(100)))
            .collect();
        let supply = vec![supply(utc(2023, 1, 1), 1000), supply(utc(2023, 2, 1), 2000)];

        let result = staked_percentage(&staked, &supply).unwrap();
        let ratios: Vec<f64> = result.iter().map(|r| r.percentage).collect();
        assert_eq!(ratios, vec![0.1, 0.1, 0.05, 0.05]);
        assert_eq!(
            result.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            staked.iter().map(|p| p.timestamp).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_supply() {
        let staked = vec![SeriesPoint::new(utc(2022, 12, 1), U256::from(1))];
        let err = staked_percentage(&staked, &[supply(utc(2023, 1, 1), 1000)]).unwrap_err();
        assert_eq!(err, ComposerError::MissingSupply { timestamp: utc(2022, 12, 1) });
    }

    #[test]
    fn test_non_positive_supply() {
        let staked = vec![SeriesPoint::new(utc(2023, 1, 1), U256::from(1))];
        let err = staked_percentage(&staked, &[supply(utc(2023, 1, 1), 0)]).unwrap_err();
        assert!(matches!(err, ComposerError::NonPositiveSupply { .. }));

        let err = staked_percentage(&staked, &[supply(utc(2023, 1, 1), -5)]).unwrap_err();
        assert_eq!(
            err,
            ComposerError::NonPositiveSupply { timestamp: utc(2023, 1, 1), supply: "-5".to_string() }
        );
    }

    #[test]
    fn test_monthly_stake_matches_supply_as_of_the_same_instant() {
        use crate::{
            events::StakeEvent, sampler::total_staked_series, supply::SupplyConfig,
            time_boundaries::Frequency, units::{signed_tokens, tokens},
        };
        use alloy_primitives::Address;

        let juror = Address::with_last_byte(0xa);
        let events = vec![
            StakeEvent {
                address: juror,
                new_total_stake: tokens(100_000_000),
                subcourt_id: 0,
                timestamp: utc(2019, 11, 15),
            },
            StakeEvent {
                address: juror,
                new_total_stake: tokens(150_000_000),
                subcourt_id: 0,
                timestamp: utc(2020, 1, 10),
            },
        ];

        let staked = total_staked_series(&events, Frequency::Month).unwrap();
        let supply = SupplyConfig::default().series(Frequency::Month, utc(2020, 3, 1));
        let result = staked_percentage(&staked, &supply).unwrap();

        // Nothing is reported before the first stake
        assert_eq!(result[0].timestamp, utc(2019, 12, 1));
        assert_eq!(result[0].total_staked, tokens(100_000_000));
        // The second sale lifts on 2019-12-30, after the December 1st instant
        assert_eq!(result[0].total_supply, signed_tokens(564_626_704));
        assert!((result[0].percentage - 100.0 / 564.626704).abs() < 1e-9);

        assert_eq!(result[1].timestamp, utc(2020, 1, 1));
        assert_eq!(result[1].total_supply, signed_tokens(764_626_704));
        assert_eq!(result[2].timestamp, utc(2020, 2, 1));
        assert_eq!(result[2].total_staked, tokens(150_000_000));
    }

    #[test]
    fn test_empty_staked() {
        assert!(staked_percentage(&[], &[]).unwrap().is_empty());
    }
}
