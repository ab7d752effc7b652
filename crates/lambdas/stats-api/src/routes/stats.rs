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
use chrono::{DateTime, Utc};
use juror_stats::{checked_sum, stake_gini, units::TOKEN_SYMBOL, StakeTimeline};
use std::sync::Arc;

use crate::{
    error::ApiError,
    models::{CountersResponse, GiniParams, GiniResponse, StatusResponse},
    routes::{json_response, resolve_network},
    state::AppState,
    utils::format_token_amount,
};

/// Create the status and counters routes
pub fn status_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(get_status))
        .route("/counters/:chain_id", get(get_counters))
}

/// Create stats routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/gini/:chain_id", get(get_gini))
}

/// GET /v1/status
/// Returns the service status and the served chains
#[utoipa::path(
    get,
    path = "/v1/status",
    tag = "Status",
    responses(
        (status = 200, description = "Service status", body = StatusResponse)
    )
)]
pub(crate) async fn get_status(State(state): State<Arc<AppState>>) -> Response {
    let chain_ids = state.networks.iter().map(|config| config.network.chain_id()).collect();
    json_response(
        Ok(StatusResponse { message: "Juror stats API is running".to_string(), chain_ids }),
        60,
    )
}

/// GET /v1/counters/{chain_id}
/// Returns the running totals kept by the court subgraph
#[utoipa::path(
    get,
    path = "/v1/counters/{chain_id}",
    tag = "Status",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment")
    ),
    responses(
        (status = 200, description = "Court counters", body = CountersResponse),
        (status = 400, description = "Unknown chain"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_counters(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Response {
    json_response(get_counters_impl(state, chain_id).await, 60)
}

async fn get_counters_impl(
    state: Arc<AppState>,
    chain_id: u64,
) -> anyhow::Result<CountersResponse> {
    let network = resolve_network(&state, chain_id)?.network;
    tracing::debug!("Fetching counters for {}", network);

    let counters = state.events.counters(network).await?;

    Ok(CountersResponse {
        chain_id: network.chain_id(),
        network: network.to_string(),
        courts: counters.courts_count,
        disputes: counters.disputes_count,
        open_disputes: counters.open_disputes,
        closed_disputes: counters.closed_disputes,
        active_jurors: counters.active_jurors,
        inactive_jurors: counters.inactive_jurors,
        drawn_jurors: counters.drawn_jurors,
        arbitrables: counters.number_of_arbitrables,
        token_staked: counters.token_staked.to_string(),
        token_staked_formatted: format_token_amount(counters.token_staked, TOKEN_SYMBOL),
        total_fees: counters.total_eth_fees.to_string(),
        total_fees_formatted: format_token_amount(counters.total_eth_fees, network.native_symbol()),
        token_redistributed: counters.total_token_redistributed.to_string(),
        token_redistributed_formatted: format_token_amount(
            counters.total_token_redistributed,
            TOKEN_SYMBOL,
        ),
    })
}

/// GET /v1/stats/gini/{chain_id}
/// Returns the Gini coefficient of the stakes of active jurors
#[utoipa::path(
    get,
    path = "/v1/stats/gini/{chain_id}",
    tag = "Stats",
    params(
        ("chain_id" = u64, Path, description = "Chain id of the court deployment"),
        GiniParams
    ),
    responses(
        (status = 200, description = "Stake inequality", body = GiniResponse),
        (status = 400, description = "Unknown chain or invalid timestamp"),
        (status = 422, description = "No active juror at the requested instant"),
        (status = 503, description = "Upstream source unavailable")
    )
)]
pub(crate) async fn get_gini(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(params): Query<GiniParams>,
) -> Response {
    json_response(get_gini_impl(state, chain_id, params).await, 300)
}

async fn get_gini_impl(
    state: Arc<AppState>,
    chain_id: u64,
    params: GiniParams,
) -> anyhow::Result<GiniResponse> {
    let network = resolve_network(&state, chain_id)?.network;
    let at = match params.at {
        Some(secs) => DateTime::from_timestamp(secs, 0).ok_or(ApiError::InvalidTimestamp(secs))?,
        None => Utc::now(),
    };
    tracing::debug!("Computing stake Gini for {} at {}", network, at);

    let events = state.events.stake_sets(network).await?;
    let jurors = StakeTimeline::new(events).active_jurors(at);
    let gini = stake_gini(&jurors)?;
    let total_staked = checked_sum(jurors.iter().map(|juror| juror.stake))?;

    Ok(GiniResponse {
        chain_id: network.chain_id(),
        network: network.to_string(),
        at,
        gini,
        active_jurors: jurors.len() as u64,
        total_staked: total_staked.to_string(),
        total_staked_formatted: format_token_amount(total_staked, TOKEN_SYMBOL),
    })
}
