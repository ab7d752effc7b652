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

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::SourceError,
    events::{
        CourtCounters, CourtTransaction, DisputeEvent, PriceSample, StakeEvent, TransferEvent,
    },
    network::Network,
    sources::{EventSource, PriceSource},
};

#[derive(Debug, Clone, Default)]
struct NetworkEvents {
    stake_sets: Vec<StakeEvent>,
    transfers: Vec<TransferEvent>,
    disputes: Vec<DisputeEvent>,
    transactions: Vec<CourtTransaction>,
    counters: Option<CourtCounters>,
}

/// An event source that serves fixed, in-memory event logs
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    networks: HashMap<Network, NetworkEvents>,
}

impl StaticEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stake_sets(mut self, network: Network, events: Vec<StakeEvent>) -> Self {
        self.networks.entry(network).or_default().stake_sets = events;
        self
    }

    pub fn with_transfers(mut self, network: Network, events: Vec<TransferEvent>) -> Self {
        self.networks.entry(network).or_default().transfers = events;
        self
    }

    pub fn with_disputes(mut self, network: Network, events: Vec<DisputeEvent>) -> Self {
        self.networks.entry(network).or_default().disputes = events;
        self
    }

    pub fn with_transactions(mut self, network: Network, events: Vec<CourtTransaction>) -> Self {
        self.networks.entry(network).or_default().transactions = events;
        self
    }

    pub fn with_counters(mut self, network: Network, counters: CourtCounters) -> Self {
        self.networks.entry(network).or_default().counters = Some(counters);
        self
    }

    fn network(&self, network: Network) -> Result<&NetworkEvents, SourceError> {
        self.networks.get(&network).ok_or(SourceError::UnsupportedNetwork(network))
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn stake_sets(&self, network: Network) -> Result<Vec<StakeEvent>, SourceError> {
        Ok(self.network(network)?.stake_sets.clone())
    }

    async fn transfers(&self, network: Network) -> Result<Vec<TransferEvent>, SourceError> {
        Ok(self.network(network)?.transfers.clone())
    }

    async fn disputes(&self, network: Network) -> Result<Vec<DisputeEvent>, SourceError> {
        Ok(self.network(network)?.disputes.clone())
    }

    async fn transactions(
        &self,
        network: Network,
    ) -> Result<Vec<CourtTransaction>, SourceError> {
        Ok(self.network(network)?.transactions.clone())
    }

    async fn counters(&self, network: Network) -> Result<CourtCounters, SourceError> {
        self.network(network)?.counters.clone().ok_or_else(|| SourceError::Unavailable {
            source_name: "static".to_string(),
            message: format!("no counters for {}", network),
        })
    }
}

/// A price source that serves fixed price samples per asset
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: HashMap<String, Vec<PriceSample>>,
}

impl StaticPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(mut self, asset: &str, prices: Vec<PriceSample>) -> Self {
        self.prices.insert(asset.to_string(), prices);
        self
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    /// Returns every configured sample of `asset`, regardless of `days_before`
    async fn historic_prices(
        &self,
        asset: &str,
        _days_before: u32,
    ) -> Result<Vec<PriceSample>, SourceError> {
        self.prices.get(asset).cloned().ok_or_else(|| SourceError::Unavailable {
            source_name: self.name(),
            message: format!("no prices for {}", asset),
        })
    }

    fn name(&self) -> String {
        "static".to_string()
    }
}
