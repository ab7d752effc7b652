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

//! Juror fee history in the native asset and in the quote currency.
//!
//! Transfers are always summed per day first. Each day is then matched to the first price
//! sample at or after the start of the day, provided that sample is no more than
//! [PRICE_MATCH_TOLERANCE_SECS] away. Days without a match keep their native amount and have no
//! quote amount.

use std::collections::BTreeMap;

use alloy_primitives::U256;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    error::StatisticsError,
    events::{PriceSample, SeriesPoint, TransferEvent},
    time_boundaries::{period_grid, Frequency},
    units::wei_to_tokens,
};

/// Maximum distance between a day and its matched price sample
pub const PRICE_MATCH_TOLERANCE_SECS: i64 = 23 * 60 * 60;

/// Fees of one day joined with the price of the native asset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyFee {
    /// Start of the day
    pub timestamp: DateTime<Utc>,
    /// Fees in whole native tokens
    pub amount_native: f64,
    /// Matched price, if any sample was within tolerance
    pub price: Option<f64>,
    /// `amount_native * price`
    pub amount_quote: Option<f64>,
}

/// Fees of one output period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeePoint {
    /// Start of the period
    pub timestamp: DateTime<Utc>,
    pub amount_native: f64,
    /// Sum of the priced days of the period, absent when no day was priced
    pub amount_quote: Option<f64>,
}

/// Sums transfers per UTC day, including zero days between the first and the last transfer
pub fn daily_totals(
    transfers: &[TransferEvent],
) -> Result<Vec<SeriesPoint<U256>>, StatisticsError> {
    let (Some(first), Some(last)) = (
        transfers.iter().map(|transfer| transfer.timestamp).min(),
        transfers.iter().map(|transfer| transfer.timestamp).max(),
    ) else {
        return Ok(Vec::new());
    };

    let mut days: BTreeMap<DateTime<Utc>, U256> =
        period_grid(Frequency::Day, first, last).into_iter().map(|day| (day, U256::ZERO)).collect();

    for transfer in transfers {
        let day = days.entry(Frequency::Day.period_start(transfer.timestamp)).or_insert(U256::ZERO);
        *day = day.checked_add(transfer.amount).ok_or(StatisticsError::Overflow)?;
    }

    Ok(days.into_iter().map(|(day, total)| SeriesPoint::new(day, total)).collect())
}

/// Joins daily totals with the first price at or after each day, within tolerance
pub fn merge_prices(daily: &[SeriesPoint<U256>], prices: &[PriceSample]) -> Vec<DailyFee> {
    let mut sorted = prices.to_vec();
    sorted.sort_by_key(|sample| sample.timestamp);
    let tolerance = Duration::seconds(PRICE_MATCH_TOLERANCE_SECS);

    let joined: Vec<DailyFee> = daily
        .iter()
        .map(|point| {
            let index = sorted.partition_point(|sample| sample.timestamp < point.timestamp);
            let price = sorted
                .get(index)
                .filter(|sample| sample.timestamp - point.timestamp <= tolerance)
                .map(|sample| sample.price);
            let amount_native = wei_to_tokens(point.value);

            DailyFee {
                timestamp: point.timestamp,
                amount_native,
                price,
                amount_quote: price.map(|price| amount_native * price),
            }
        })
        .collect();

    let unpriced = joined.iter().filter(|fee| fee.price.is_none()).count();
    if unpriced > 0 {
        tracing::warn!("{} of {} fee days have no price within tolerance", unpriced, joined.len());
    }

    joined
}

/// Fee series at `frequency`.
///
/// When the native asset is the quote currency, prices are ignored and the quote amount
/// equals the native amount.
pub fn fee_series(
    transfers: &[TransferEvent],
    prices: &[PriceSample],
    frequency: Frequency,
    native_is_quote: bool,
) -> Result<Vec<FeePoint>, StatisticsError> {
    let daily = daily_totals(transfers)?;
    let joined = if native_is_quote {
        daily
            .iter()
            .map(|point| {
                let amount_native = wei_to_tokens(point.value);
                DailyFee {
                    timestamp: point.timestamp,
                    amount_native,
                    price: Some(1.0),
                    amount_quote: Some(amount_native),
                }
            })
            .collect()
    } else {
        merge_prices(&daily, prices)
    };

    let mut periods: BTreeMap<DateTime<Utc>, FeePoint> = BTreeMap::new();
    for fee in joined {
        let period_start = frequency.period_start(fee.timestamp);
        let period = periods.entry(period_start).or_insert(FeePoint {
            timestamp: period_start,
            amount_native: 0.0,
            amount_quote: None,
        });
        period.amount_native += fee.amount_native;
        if let Some(quote) = fee.amount_quote {
            period.amount_quote = Some(period.amount_quote.unwrap_or(0.0) + quote);
        }
    }

    tracing::debug!(
        "Built {} fee points at {} frequency from {} transfers",
        periods.len(),
        frequency,
        transfers.len()
    );
    Ok(periods.into_values().collect())
}
