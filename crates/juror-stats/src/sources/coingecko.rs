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

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{error::SourceError, events::PriceSample, sources::PriceSource};

const DEFAULT_API_URL: &str = "https://api.coingecko.com";

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[unix millis, price]` pairs
    prices: Vec<(f64, f64)>,
}

/// CoinGecko historic USD prices
pub struct CoinGeckoPriceSource {
    client: Client,
    api_url: Url,
}

impl CoinGeckoPriceSource {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let api_url = Url::parse(DEFAULT_API_URL)?;

        let client = Client::builder()
            .timeout(timeout)
            // CoinGecko requires a user-agent header for the free API
            .user_agent(concat!("juror-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, api_url })
    }

    /// Configure the API URL, e.g. for a pro endpoint or for testing
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceSource {
    async fn historic_prices(
        &self,
        asset: &str,
        days_before: u32,
    ) -> Result<Vec<PriceSample>, SourceError> {
        let mut url = self.api_url.clone();
        url.set_path(&format!("/api/v3/coins/{}/market_chart", asset));
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("days", &days_before.max(1).to_string());

        tracing::debug!("Fetching {} day(s) of {} prices from {}", days_before, asset, self.name());
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Unavailable {
                source_name: self.name(),
                message: format!("HTTP {} for {}", response.status(), asset),
            });
        }

        let chart: MarketChartResponse = response.json().await?;
        let samples = chart
            .prices
            .into_iter()
            .map(|(millis, price)| {
                DateTime::from_timestamp_millis(millis as i64)
                    .map(|timestamp| PriceSample { timestamp, price })
                    .ok_or_else(|| SourceError::Malformed(format!("invalid timestamp {}", millis)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Fetched {} price samples for {}", samples.len(), asset);
        Ok(samples)
    }

    fn name(&self) -> String {
        "CoinGeckoPriceSource".to_string()
    }
}
