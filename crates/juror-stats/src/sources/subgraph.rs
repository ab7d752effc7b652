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

//! Court subgraph client.
//!
//! Entities are fetched in pages of `first` items ordered by id, using the last id of each page
//! as the `id_gt` cursor of the next one, until a short page is returned.

use std::{collections::HashMap, str::FromStr, time::Duration};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::{
    error::SourceError,
    events::{CourtCounters, CourtTransaction, DisputeEvent, StakeEvent, TransferEvent},
    network::{Network, NetworksConfig},
    sources::EventSource,
};

/// Maximum page size accepted by the hosted graph nodes
pub const DEFAULT_PAGE_SIZE: usize = 1000;

const SOURCE_NAME: &str = "subgraph";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<HashMap<String, Vec<T>>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

trait Entity: DeserializeOwned {
    fn id(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStakeSet {
    id: String,
    address: String,
    new_total_stake: String,
    #[serde(rename = "subcourtID")]
    subcourt_id: String,
    timestamp: String,
}

#[derive(Deserialize)]
struct RawShift {
    id: String,
    #[serde(rename = "ETHAmount")]
    eth_amount: String,
    timestamp: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDispute {
    id: String,
    start_time: String,
}

#[derive(Deserialize)]
struct RawTransaction {
    id: String,
    timestamp: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCounters {
    id: String,
    courts_count: String,
    disputes_count: String,
    open_disputes: String,
    closed_disputes: String,
    active_jurors: String,
    inactive_jurors: String,
    drawn_jurors: String,
    number_of_arbitrables: String,
    token_staked: String,
    #[serde(rename = "totalETHFees")]
    total_eth_fees: String,
    total_token_redistributed: String,
}

const COUNTER_FIELDS: &str = "id courtsCount disputesCount openDisputes closedDisputes \
                              activeJurors inactiveJurors drawnJurors numberOfArbitrables \
                              tokenStaked totalETHFees totalTokenRedistributed";

impl Entity for RawStakeSet {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for RawShift {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for RawDispute {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for RawTransaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for RawCounters {
    fn id(&self) -> &str {
        &self.id
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SourceError> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| SourceError::Malformed(format!("invalid timestamp '{}'", value)))
}

fn parse_count(value: &str) -> Result<u64, SourceError> {
    value.parse().map_err(|_| SourceError::Malformed(format!("invalid count '{}'", value)))
}

fn parse_amount(value: &str) -> Result<U256, SourceError> {
    U256::from_str(value).map_err(|_| SourceError::Malformed(format!("invalid amount '{}'", value)))
}

impl TryFrom<RawStakeSet> for StakeEvent {
    type Error = SourceError;

    fn try_from(raw: RawStakeSet) -> Result<Self, Self::Error> {
        Ok(StakeEvent {
            address: Address::from_str(&raw.address)
                .map_err(|_| SourceError::Malformed(format!("invalid address '{}'", raw.address)))?,
            new_total_stake: parse_amount(&raw.new_total_stake)?,
            subcourt_id: raw
                .subcourt_id
                .parse()
                .map_err(|_| SourceError::Malformed(format!("invalid subcourt '{}'", raw.subcourt_id)))?,
            timestamp: parse_timestamp(&raw.timestamp)?,
        })
    }
}

impl TryFrom<RawShift> for TransferEvent {
    type Error = SourceError;

    fn try_from(raw: RawShift) -> Result<Self, Self::Error> {
        Ok(TransferEvent {
            timestamp: parse_timestamp(&raw.timestamp)?,
            amount: parse_amount(&raw.eth_amount)?,
        })
    }
}

impl TryFrom<RawDispute> for DisputeEvent {
    type Error = SourceError;

    fn try_from(raw: RawDispute) -> Result<Self, Self::Error> {
        Ok(DisputeEvent { start_time: parse_timestamp(&raw.start_time)?, id: raw.id })
    }
}

impl TryFrom<RawTransaction> for CourtTransaction {
    type Error = SourceError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        Ok(CourtTransaction { timestamp: parse_timestamp(&raw.timestamp)?, id: raw.id })
    }
}

impl TryFrom<RawCounters> for CourtCounters {
    type Error = SourceError;

    fn try_from(raw: RawCounters) -> Result<Self, Self::Error> {
        Ok(CourtCounters {
            courts_count: parse_count(&raw.courts_count)?,
            disputes_count: parse_count(&raw.disputes_count)?,
            open_disputes: parse_count(&raw.open_disputes)?,
            closed_disputes: parse_count(&raw.closed_disputes)?,
            active_jurors: parse_count(&raw.active_jurors)?,
            inactive_jurors: parse_count(&raw.inactive_jurors)?,
            drawn_jurors: parse_count(&raw.drawn_jurors)?,
            number_of_arbitrables: parse_count(&raw.number_of_arbitrables)?,
            token_staked: parse_amount(&raw.token_staked)?,
            total_eth_fees: parse_amount(&raw.total_eth_fees)?,
            total_token_redistributed: parse_amount(&raw.total_token_redistributed)?,
        })
    }
}

/// Event source reading the court subgraph of each configured network
pub struct SubgraphEventSource {
    client: Client,
    networks: NetworksConfig,
    page_size: usize,
}

impl SubgraphEventSource {
    pub fn new(networks: NetworksConfig, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, networks, page_size: DEFAULT_PAGE_SIZE })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetches every `entity` of `network`, page by page
    async fn fetch_all<T: Entity>(
        &self,
        network: Network,
        entity: &str,
        fields: &str,
    ) -> Result<Vec<T>, SourceError> {
        let config = self.networks.get(network).ok_or(SourceError::UnsupportedNetwork(network))?;
        let query = format!(
            "query($lastId: String!) {{ {entity}(first: {first}, orderBy: id, orderDirection: asc, \
             where: {{ id_gt: $lastId }}) {{ {fields} }} }}",
            first = self.page_size,
        );

        let mut items: Vec<T> = Vec::new();
        let mut last_id = String::new();
        loop {
            let body = json!({ "query": query, "variables": { "lastId": last_id } });
            let response = self
                .client
                .post(config.subgraph_url.clone())
                .json(&body)
                .send()
                .await?
                .error_for_status()?;

            let mut decoded: GraphQlResponse<T> = response.json().await?;
            if let Some(error) = decoded.errors.first() {
                return Err(SourceError::Unavailable {
                    source_name: SOURCE_NAME.to_string(),
                    message: error.message.clone(),
                });
            }

            let page = decoded
                .data
                .as_mut()
                .and_then(|data| data.remove(entity))
                .ok_or_else(|| SourceError::Malformed(format!("missing '{}' in response", entity)))?;

            let page_len = page.len();
            if let Some(last) = page.last() {
                last_id = last.id().to_string();
            }
            items.extend(page);
            tracing::debug!("Fetched {} {} from {} ({} total)", page_len, entity, network, items.len());

            if page_len < self.page_size {
                break;
            }
        }

        tracing::info!("Fetched {} {} from the {} subgraph", items.len(), entity, network);
        Ok(items)
    }
}

#[async_trait]
impl EventSource for SubgraphEventSource {
    async fn stake_sets(&self, network: Network) -> Result<Vec<StakeEvent>, SourceError> {
        self.fetch_all::<RawStakeSet>(
            network,
            "stakeSets",
            "id address newTotalStake subcourtID timestamp",
        )
        .await?
        .into_iter()
        .map(StakeEvent::try_from)
        .collect()
    }

    async fn transfers(&self, network: Network) -> Result<Vec<TransferEvent>, SourceError> {
        self.fetch_all::<RawShift>(network, "tokenAndETHShifts", "id ETHAmount timestamp")
            .await?
            .into_iter()
            .map(TransferEvent::try_from)
            .collect()
    }

    async fn disputes(&self, network: Network) -> Result<Vec<DisputeEvent>, SourceError> {
        self.fetch_all::<RawDispute>(network, "disputes", "id startTime")
            .await?
            .into_iter()
            .map(DisputeEvent::try_from)
            .collect()
    }

    async fn transactions(
        &self,
        network: Network,
    ) -> Result<Vec<CourtTransaction>, SourceError> {
        self.fetch_all::<RawTransaction>(network, "transactions", "id timestamp")
            .await?
            .into_iter()
            .map(CourtTransaction::try_from)
            .collect()
    }

    /// The subgraph keeps a single counters entity per deployment
    async fn counters(&self, network: Network) -> Result<CourtCounters, SourceError> {
        self.fetch_all::<RawCounters>(network, "klerosCounters", COUNTER_FIELDS)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Malformed("no klerosCounters entity".to_string()))
            .and_then(CourtCounters::try_from)
    }
}
