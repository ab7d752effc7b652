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

//! Supported court deployments and their per-network settings.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Chain a court is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Gnosis,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown network '{0}'")]
pub struct UnknownNetworkError(pub String);

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Gnosis];

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Gnosis => 100,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|network| network.chain_id() == chain_id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Gnosis => "gnosis",
        }
    }

    /// Symbol of the asset juror fees are paid in
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Network::Mainnet => "ETH",
            Network::Gnosis => "xDAI",
        }
    }

    /// Whether the native asset is already denominated in the quote currency (USD)
    pub fn native_is_quote(&self) -> bool {
        matches!(self, Network::Gnosis)
    }

    /// CoinGecko id of the native asset, for networks that need a price conversion
    pub fn price_asset(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some("ethereum"),
            Network::Gnosis => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = UnknownNetworkError;

    /// Accepts a network name or a chain id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        if let Ok(chain_id) = value.parse::<u64>() {
            return Self::from_chain_id(chain_id).ok_or_else(|| UnknownNetworkError(s.to_string()));
        }
        match value.as_str() {
            "mainnet" | "ethereum" => Ok(Network::Mainnet),
            "gnosis" | "xdai" => Ok(Network::Gnosis),
            _ => Err(UnknownNetworkError(s.to_string())),
        }
    }
}

/// Settings of one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: Network,
    /// GraphQL endpoint of the court subgraph
    pub subgraph_url: Url,
    pub native_is_quote: bool,
    /// CoinGecko id used to price the native asset
    pub price_asset: Option<String>,
}

impl NetworkConfig {
    /// Config with the network's default fee settings
    pub fn new(network: Network, subgraph_url: Url) -> Self {
        Self {
            network,
            subgraph_url,
            native_is_quote: network.native_is_quote(),
            price_asset: network.price_asset().map(str::to_string),
        }
    }
}

/// Enabled networks, fixed at start-up
#[derive(Debug, Clone, Default)]
pub struct NetworksConfig {
    networks: BTreeMap<Network, NetworkConfig>,
}

impl NetworksConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the config of a network
    pub fn with(mut self, config: NetworkConfig) -> Self {
        self.networks.insert(config.network, config);
        self
    }

    pub fn get(&self, network: Network) -> Option<&NetworkConfig> {
        self.networks.get(&network)
    }

    pub fn by_chain_id(&self, chain_id: u64) -> Option<&NetworkConfig> {
        Network::from_chain_id(chain_id).and_then(|network| self.get(network))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkConfig> {
        self.networks.values()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
