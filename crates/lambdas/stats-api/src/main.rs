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

use lambda_http::{run, Error};
use stats_api::{config::ApiConfig, handler};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // One JSON object per line; the Lambda log stream adds its own timestamps
    tracing_subscriber::registry()
        .with(fmt::layer().json().without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env()?;
    let chain_ids: Vec<u64> =
        config.networks().iter().map(|network| network.network.chain_id()).collect();
    if chain_ids.is_empty() {
        tracing::warn!("No subgraph URL configured; every chain-specific route will answer 400");
    }
    tracing::info!(?chain_ids, "Serving juror statistics from the court subgraphs");

    run(handler::create_handler(&config)?).await
}
