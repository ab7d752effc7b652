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

use chrono::{DateTime, Utc};
use juror_stats::{Frequency, Network};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Service status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub message: String,

    /// Chain ids served by this deployment
    pub chain_ids: Vec<u64>,
}

/// Query parameters of the history endpoints
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Sampling frequency: D (daily), W (weekly) or M (monthly). Defaults to M.
    pub freq: Option<String>,
}

/// Query parameters of the Gini endpoint
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GiniParams {
    /// Unix timestamp (seconds) of the snapshot. Defaults to now.
    pub at: Option<i64>,
}

/// A time series for one chain
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeriesResponse<T> {
    /// Chain id
    pub chain_id: u64,

    /// Network name
    pub network: String,

    /// Sampling frequency of the entries (D, W or M)
    pub frequency: String,

    /// Series entries, oldest first. Counts and sums are labelled by the start of their period;
    /// stake and supply samples by the instant they are evaluated at.
    pub entries: Vec<T>,
}

impl<T> SeriesResponse<T> {
    pub fn new(network: Network, frequency: Frequency, entries: Vec<T>) -> Self {
        Self {
            chain_id: network.chain_id(),
            network: network.to_string(),
            frequency: frequency.to_string(),
            entries,
        }
    }
}

/// Number of active jurors at a period start
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActiveJurorsEntry {
    pub timestamp: DateTime<Utc>,

    /// Addresses with a positive stake strictly before `timestamp`
    pub active_jurors: u64,
}

/// Net change of active jurors within a period
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GrowthEntry {
    pub timestamp: DateTime<Utc>,

    /// Sum of the day-over-day changes within the period
    pub growth: i64,
}

/// Total stake as a period closes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalStakedEntry {
    /// Close of the period; stakes set strictly before it count
    pub timestamp: DateTime<Utc>,

    /// Total staked in wei
    pub total_staked: String,

    /// Total staked (human-readable)
    pub total_staked_formatted: String,
}

/// Share of the token supply staked as a period closes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StakedPercentageEntry {
    /// Close of the period; stake and supply are both taken as of this instant
    pub timestamp: DateTime<Utc>,

    /// Total staked in wei
    pub total_staked: String,

    /// Total staked (human-readable)
    pub total_staked_formatted: String,

    /// Token supply in wei
    pub total_supply: String,

    /// Token supply (human-readable)
    pub total_supply_formatted: String,

    /// Staked fraction of the supply, between 0 and 1
    pub percentage: f64,
}

/// Juror fees of a period
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeesEntry {
    pub timestamp: DateTime<Utc>,

    /// Fees in whole units of the native asset
    pub amount_native: f64,

    /// Symbol of the native asset
    pub native_symbol: String,

    /// Fees in USD, absent when no day of the period could be priced
    pub amount_usd: Option<f64>,
}

/// Disputes created in a period
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CasesEntry {
    pub timestamp: DateTime<Utc>,
    pub cases: u64,
}

/// Court transactions sent in a period
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionsEntry {
    pub timestamp: DateTime<Utc>,
    pub transactions: u64,
}

/// Running totals of a court deployment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountersResponse {
    /// Chain id
    pub chain_id: u64,

    /// Network name
    pub network: String,

    pub courts: u64,
    pub disputes: u64,
    pub open_disputes: u64,
    pub closed_disputes: u64,
    pub active_jurors: u64,
    pub inactive_jurors: u64,
    pub drawn_jurors: u64,
    pub arbitrables: u64,

    /// Staked tokens in wei
    pub token_staked: String,

    /// Staked tokens (human-readable)
    pub token_staked_formatted: String,

    /// Fees paid to jurors in wei of the native asset
    pub total_fees: String,

    /// Fees paid to jurors (human-readable)
    pub total_fees_formatted: String,

    /// Tokens redistributed between jurors in wei
    pub token_redistributed: String,

    /// Tokens redistributed between jurors (human-readable)
    pub token_redistributed_formatted: String,
}

/// Stake inequality among active jurors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GiniResponse {
    /// Chain id
    pub chain_id: u64,

    /// Network name
    pub network: String,

    /// Snapshot instant; only stakes set strictly before it count
    pub at: DateTime<Utc>,

    /// Gini coefficient of the active stakes, between 0 and 1
    pub gini: f64,

    /// Number of jurors with a positive stake
    pub active_jurors: u64,

    /// Total staked by active jurors in wei
    pub total_staked: String,

    /// Total staked (human-readable)
    pub total_staked_formatted: String,
}
