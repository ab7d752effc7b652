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

use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use juror_stats::{
    CoinGeckoPriceSource, EventSource, NetworksConfig, PriceSource, SubgraphEventSource,
    SupplyConfig,
};

use crate::config::ApiConfig;

/// Shared state of all routes
pub struct AppState {
    pub events: Arc<dyn EventSource>,
    pub prices: Arc<dyn PriceSource>,
    pub networks: NetworksConfig,
    pub supply: SupplyConfig,
}

impl AppState {
    /// Builds the state with the subgraph and CoinGecko sources described by `config`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let networks = config.networks();
        if networks.is_empty() {
            bail!("At least one subgraph URL must be configured");
        }

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let events = SubgraphEventSource::new(networks.clone(), timeout)
            .context("Failed to create subgraph client")?;
        let prices = CoinGeckoPriceSource::new(timeout)
            .context("Failed to create CoinGecko client")?
            .with_api_url(config.coingecko_api_url.clone());

        let supply = match &config.supply_config {
            Some(path) => SupplyConfig::from_yaml_file(path)?,
            None => SupplyConfig::default(),
        };

        for network in networks.iter() {
            tracing::info!("Serving {} (chain {})", network.network, network.network.chain_id());
        }

        Ok(Self::with_sources(Arc::new(events), Arc::new(prices), networks, supply))
    }

    pub fn with_sources(
        events: Arc<dyn EventSource>,
        prices: Arc<dyn PriceSource>,
        networks: NetworksConfig,
        supply: SupplyConfig,
    ) -> Self {
        Self { events, prices, networks, supply }
    }
}
