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

//! Read-only feeds of court events and asset prices.
//!
//! Sources return complete histories; pagination, if any, stays inside the adapter.

use async_trait::async_trait;

use crate::{
    error::SourceError,
    events::{
        CourtCounters, CourtTransaction, DisputeEvent, PriceSample, StakeEvent, TransferEvent,
    },
    network::Network,
};

/// Event source backed by the court subgraph
pub mod subgraph;
/// Price source backed by CoinGecko market charts
pub mod coingecko;
/// In-memory sources
pub mod static_source;

pub use coingecko::CoinGeckoPriceSource;
pub use static_source::{StaticEventSource, StaticPriceSource};
pub use subgraph::SubgraphEventSource;

/// Complete event history of a court deployment
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Every stake-set event of the network
    async fn stake_sets(&self, network: Network) -> Result<Vec<StakeEvent>, SourceError>;

    /// Every fee payment to jurors of the network
    async fn transfers(&self, network: Network) -> Result<Vec<TransferEvent>, SourceError>;

    /// Every dispute of the network
    async fn disputes(&self, network: Network) -> Result<Vec<DisputeEvent>, SourceError>;

    /// Every transaction sent to the court contracts of the network
    async fn transactions(&self, network: Network) -> Result<Vec<CourtTransaction>, SourceError>;

    /// Current totals of the court
    async fn counters(&self, network: Network) -> Result<CourtCounters, SourceError>;
}

/// Historic prices of an asset in USD
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Price samples covering at least the last `days_before` days up to now
    async fn historic_prices(
        &self,
        asset: &str,
        days_before: u32,
    ) -> Result<Vec<PriceSample>, SourceError>;

    fn name(&self) -> String;
}
