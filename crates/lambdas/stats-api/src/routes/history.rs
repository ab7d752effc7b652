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

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use chrono::Utc;
use juror_stats::{
    active_jurors_growth, active_jurors_series, cases_series, fee_series, staked_percentage,
    total_staked_series, transactions_series, units::TOKEN_SYMBOL, Frequency,
};
use std::sync::Arc;

use crate::{
    models::{
        ActiveJurorsEntry, CasesEntry, FeesEntry, GrowthEntry, HistoryParams, SeriesResponse,
        StakedPercentageEntry, TotalStakedEntry, TransactionsEntry,
    },
    routes::{json_response, parse_frequency, resolve_network},
    state::AppState,
    utils::{format_signed_token_amount, format_token_amount},
};

/// Create history routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/active-jurors/:chain_id", get(get_active_jurors))
        .route("/growth-active-jurors/:chain_id", get(get_growth_active_jurors))
        .route("/total-staked/:chain_id", get(get_total_staked))
        .route("/staked-percentage/:chain_id", get(get_staked_percentage))
        .route("/fees/:chain_id", get(get_fees))
        .route("/cases/:chain_id", get(get_cases))
        .route("/transactions/:chain_id", get(get_transactions))
}

/// GET /v1/history/active-jurors/{chain_id}
/// Returns the daily number of active jurors
#[utoipa::path(
    get,
    path = "/v1/history/active-jurors/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment")
    ),
    responses(
        (status = 200, description = "Daily active jurors", body = SeriesResponse<ActiveJurorsEntry>),
        (status = 400, description = "Unknown chain"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_active_jurors(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Response {
    json_response(get_active_jurors_impl(state, chain_id).await, 300)
}

async fn get_active_jurors_impl(
    state: Arc<AppState>,
    chain_id: u64,
) -> anyhow::Result<SeriesResponse<ActiveJurorsEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    tracing::debug!("Fetching active jurors history for {}", network);

    let events = state.events.stake_sets(network).await?;
    let entries = active_jurors_series(&events)
        .into_iter()
        .map(|point| ActiveJurorsEntry { timestamp: point.timestamp, active_jurors: point.value })
        .collect();

    Ok(SeriesResponse::new(network, Frequency::Day, entries))
}

/// GET /v1/history/growth-active-jurors/{chain_id}
/// Returns the net change of active jurors per period
#[utoipa::path(
    get,
    path = "/v1/history/growth-active-jurors/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Active juror growth", body = SeriesResponse<GrowthEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_growth_active_jurors(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_growth_active_jurors_impl(state, chain_id, params).await, 300)
}

async fn get_growth_active_jurors_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<GrowthEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching active juror growth for {} at {} frequency", network, frequency);

    let events = state.events.stake_sets(network).await?;
    let daily = active_jurors_series(&events);
    let entries = active_jurors_growth(&daily, frequency)
        .into_iter()
        .map(|point| GrowthEntry { timestamp: point.timestamp, growth: point.value })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}

/// GET /v1/history/total-staked/{chain_id}
/// Returns the total stake as every period closes
#[utoipa::path(
    get,
    path = "/v1/history/total-staked/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Total staked", body = SeriesResponse<TotalStakedEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 422, description = "Stakes overflow 256 bits"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_total_staked(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_total_staked_impl(state, chain_id, params).await, 300)
}

async fn get_total_staked_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<TotalStakedEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching total staked for {} at {} frequency", network, frequency);

    let events = state.events.stake_sets(network).await?;
    let entries = total_staked_series(&events, frequency)?
        .into_iter()
        .map(|point| TotalStakedEntry {
            timestamp: point.timestamp,
            total_staked: point.value.to_string(),
            total_staked_formatted: format_token_amount(point.value, TOKEN_SYMBOL),
        })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}

/// GET /v1/history/staked-percentage/{chain_id}
/// Returns the staked share of the token supply as every period closes
#[utoipa::path(
    get,
    path = "/v1/history/staked-percentage/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Staked share of supply", body = SeriesResponse<StakedPercentageEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 422, description = "Stake and supply data are inconsistent"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_staked_percentage(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_staked_percentage_impl(state, chain_id, params).await, 300)
}

async fn get_staked_percentage_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<StakedPercentageEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching staked percentage for {} at {} frequency", network, frequency);

    let events = state.events.stake_sets(network).await?;
    // Both series are evaluated at the same period closes
    let staked = total_staked_series(&events, frequency)?;
    let supply = state.supply.series(frequency, Utc::now());

    let entries = staked_percentage(&staked, &supply)?
        .into_iter()
        .map(|point| StakedPercentageEntry {
            timestamp: point.timestamp,
            total_staked: point.total_staked.to_string(),
            total_staked_formatted: format_token_amount(point.total_staked, TOKEN_SYMBOL),
            total_supply: point.total_supply.to_string(),
            total_supply_formatted: format_signed_token_amount(point.total_supply, TOKEN_SYMBOL),
            percentage: point.percentage,
        })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}

/// GET /v1/history/fees/{chain_id}
/// Returns juror fees per period in the native asset and in USD
#[utoipa::path(
    get,
    path = "/v1/history/fees/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Juror fees", body = SeriesResponse<FeesEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_fees(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_fees_impl(state, chain_id, params).await, 300)
}

async fn get_fees_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<FeesEntry>> {
    let config = resolve_network(&state, chain_id)?;
    let network = config.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching fees for {} at {} frequency", network, frequency);

    let transfers = state.events.transfers(network).await?;

    let prices = match (&config.price_asset, transfers.iter().map(|t| t.timestamp).min()) {
        (Some(asset), Some(first)) if !config.native_is_quote => {
            let days_before = (Utc::now() - first).num_days().max(0) + 1;
            let days_before = u32::try_from(days_before).unwrap_or(u32::MAX);
            state.prices.historic_prices(asset, days_before).await?
        }
        _ => Vec::new(),
    };

    let entries = fee_series(&transfers, &prices, frequency, config.native_is_quote)?
        .into_iter()
        .map(|point| FeesEntry {
            timestamp: point.timestamp,
            amount_native: point.amount_native,
            native_symbol: network.native_symbol().to_string(),
            amount_usd: point.amount_quote,
        })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}

/// GET /v1/history/cases/{chain_id}
/// Returns the number of disputes created per period
#[utoipa::path(
    get,
    path = "/v1/history/cases/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Disputes per period", body = SeriesResponse<CasesEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_cases(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_cases_impl(state, chain_id, params).await, 300)
}

async fn get_cases_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<CasesEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching cases for {} at {} frequency", network, frequency);

    let disputes = state.events.disputes(network).await?;
    let entries = cases_series(&disputes, frequency)
        .into_iter()
        .map(|point| CasesEntry { timestamp: point.timestamp, cases: point.value })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}

/// GET /v1/history/transactions/{chain_id}
/// Returns the number of court transactions per period
#[utoipa::path(
    get,
    path = "/v1/history/transactions/{chain_id}",
    tag = "History",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Transactions per period", body = SeriesResponse<TransactionsEntry>),
        (status = 400, description = "Unknown chain or invalid frequency"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Response {
    json_response(get_transactions_impl(state, chain_id, params).await, 300)
}

async fn get_transactions_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: HistoryParams,
) -> anyhow::Result<SeriesResponse<TransactionsEntry>> {
    let network = resolve_network(&state, chain_id)?.network;
    let frequency = parse_frequency(params.freq.as_deref())?;
    tracing::debug!("Fetching transactions for {} at {} frequency", network, frequency);

    let transactions = state.events.transactions(network).await?;
    let entries = transactions_series(&transactions, frequency)
        .into_iter()
        .map(|point| TransactionsEntry { timestamp: point.timestamp, transactions: point.value })
        .collect();

    Ok(SeriesResponse::new(network, frequency, entries))
}
