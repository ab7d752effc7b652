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

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use juror_stats::{Network, NetworkConfig, NetworksConfig};
use url::Url;

/// Upstream endpoints and data settings shared by the Lambda and the local server.
#[derive(Args, Debug, Clone)]
pub struct ApiConfig {
    /// GraphQL endpoint of the mainnet court subgraph.
    #[clap(long, env)]
    pub mainnet_subgraph_url: Option<Url>,

    /// GraphQL endpoint of the Gnosis chain court subgraph.
    #[clap(long, env)]
    pub gnosis_subgraph_url: Option<Url>,

    /// Base URL of the CoinGecko API.
    #[clap(long, env, default_value = "https://api.coingecko.com")]
    pub coingecko_api_url: Url,

    /// Timeout in seconds of every upstream request.
    #[clap(long, env, default_value = "30")]
    pub request_timeout_secs: u64,

    /// YAML file overriding the built-in token supply deltas and corrections.
    #[clap(long, env)]
    pub supply_config: Option<PathBuf>,
}

impl ApiConfig {
    /// Reads the configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        #[derive(clap::Parser)]
        struct EnvOnly {
            #[clap(flatten)]
            config: ApiConfig,
        }

        let parsed = <EnvOnly as clap::Parser>::try_parse_from(["stats-api"])?;
        Ok(parsed.config)
    }

    /// Networks with a configured subgraph
    pub fn networks(&self) -> NetworksConfig {
        [
            (Network::Mainnet, &self.mainnet_subgraph_url),
            (Network::Gnosis, &self.gnosis_subgraph_url),
        ]
        .into_iter()
        .filter_map(|(network, url)| url.clone().map(|url| NetworkConfig::new(network, url)))
        .fold(NetworksConfig::new(), NetworksConfig::with)
    }
}
