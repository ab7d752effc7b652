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

//! Juror stake reconstruction from stake-set event logs, and the statistics derived from it:
//! active juror counts, total staked, share of token supply, Gini coefficient and fee history.

// Declare modules
pub mod cases;
pub mod composer;
pub mod error;
pub mod events;
pub mod fees;
pub mod gini;
pub mod network;
pub mod reconstruct;
pub mod sampler;
pub mod sources;
pub mod supply;
pub mod time_boundaries;
pub mod units;

// Re-export commonly used types
pub use cases::{cases_series, count_per_period, transactions_series};

pub use composer::{staked_percentage, StakedPercentage};

pub use error::{ComposerError, SourceError, StatisticsError, StatsError};

pub use events::{
    CourtCounters, CourtTransaction, DisputeEvent, PriceSample, SeriesPoint, StakeEvent,
    SupplyDelta, TransferEvent,
};

pub use fees::{
    daily_totals, fee_series, merge_prices, DailyFee, FeePoint, PRICE_MATCH_TOLERANCE_SECS,
};

pub use gini::{gini, stake_gini, weighted_gini};

pub use network::{Network, NetworkConfig, NetworksConfig, UnknownNetworkError};

pub use reconstruct::{active_jurors, reconstruct, ActiveJuror, AsOfState, StakeTimeline};

pub use sampler::{
    active_jurors_growth, active_jurors_series, checked_sum, count_active, sample,
    sample_period_closes, sample_range, sum_staked, total_staked_series,
};

pub use sources::{
    CoinGeckoPriceSource, EventSource, PriceSource, StaticEventSource, StaticPriceSource,
    SubgraphEventSource,
};

pub use supply::{supply_at, supply_series, SupplyConfig, SupplyCorrection};

pub use time_boundaries::{Frequency, ParseFrequencyError};
