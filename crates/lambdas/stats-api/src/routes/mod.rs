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

pub mod history;
pub mod stats;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use juror_stats::{Frequency, NetworkConfig};
use serde::Serialize;

use crate::{
    error::ApiError,
    handler::{cache_control, handle_error},
    state::AppState,
};

/// Frequency used when the request does not specify one
pub const DEFAULT_FREQUENCY: Frequency = Frequency::Month;

/// Looks up the configured network of `chain_id`
pub(crate) fn resolve_network(state: &AppState, chain_id: u64) -> Result<NetworkConfig, ApiError> {
    state.networks.by_chain_id(chain_id).cloned().ok_or(ApiError::ChainNotFound(chain_id))
}

pub(crate) fn parse_frequency(freq: Option<&str>) -> Result<Frequency, ApiError> {
    match freq {
        None => Ok(DEFAULT_FREQUENCY),
        Some(value) => value.parse().map_err(|_| ApiError::InvalidFrequency(value.to_string())),
    }
}

/// Serializes a handler result, with a cache header on success
pub(crate) fn json_response<T: Serialize>(result: anyhow::Result<T>, max_age: u32) -> Response {
    match result {
        Ok(response) => {
            let mut res = Json(response).into_response();
            res.headers_mut().insert(
                header::CACHE_CONTROL,
                cache_control(&format!("public, max-age={}", max_age)),
            );
            res
        }
        Err(err) => handle_error(err).into_response(),
    }
}
