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

//! Event log types consumed by the statistics pipeline.

use alloy_primitives::{Address, I256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A juror stake change.
///
/// `new_total_stake` is the absolute stake of `address` right after the event, not a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeEvent {
    /// Juror address
    pub address: Address,
    /// Total stake after the event, in wei
    pub new_total_stake: U256,
    /// Subcourt the stake was set in
    pub subcourt_id: u64,
    /// Block time of the event
    pub timestamp: DateTime<Utc>,
}

/// A reward payment to a juror, in the chain's native asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub timestamp: DateTime<Utc>,
    /// Amount in wei
    pub amount: U256,
}

/// A mint (positive) or burn (negative) of the staking token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyDelta {
    pub timestamp: DateTime<Utc>,
    /// Signed amount in wei, (de)serialized as whole tokens
    #[serde(with = "crate::units::token_amount")]
    pub amount: I256,
}

/// A quote-currency price of a base asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// A dispute created in the court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeEvent {
    pub id: String,
    pub start_time: DateTime<Utc>,
}

/// A transaction sent to the court contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtTransaction {
    /// Transaction hash
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

/// Running totals kept by the court subgraph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtCounters {
    pub courts_count: u64,
    pub disputes_count: u64,
    pub open_disputes: u64,
    pub closed_disputes: u64,
    pub active_jurors: u64,
    pub inactive_jurors: u64,
    pub drawn_jurors: u64,
    pub number_of_arbitrables: u64,
    /// Staked tokens, in wei
    pub token_staked: U256,
    /// Fees paid to jurors in the native asset, in wei
    pub total_eth_fees: U256,
    /// Tokens moved between jurors by penalties and rewards, in wei
    pub total_token_redistributed: U256,
}

/// One sample of a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint<T> {
    pub timestamp: DateTime<Utc>,
    pub value: T,
}

impl<T> SeriesPoint<T> {
    pub fn new(timestamp: DateTime<Utc>, value: T) -> Self {
        Self { timestamp, value }
    }
}
