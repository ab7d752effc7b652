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

use crate::models::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Juror Stats API",
        version = "1.0.0",
        description = "Historical statistics of court jurors: active jurors, stake, share of token supply, fees, cases, transactions, court counters and stake inequality.",
        contact(name = "Court Analytics Team")
    ),
    servers(
        (url = "/", description = "Current server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Status", description = "Service status endpoints"),
        (name = "History", description = "Time series endpoints"),
        (name = "Stats", description = "Point-in-time statistics endpoints")
    ),
    paths(
        // Health check
        crate::handler::health_check,
        // Status
        crate::routes::stats::get_status,
        // History endpoints
        crate::routes::history::get_active_jurors,
        crate::routes::history::get_growth_active_jurors,
        crate::routes::history::get_total_staked,
        crate::routes::history::get_staked_percentage,
        crate::routes::history::get_fees,
        crate::routes::history::get_cases,
        crate::routes::history::get_transactions,
        // Stats endpoints
        crate::routes::stats::get_counters,
        crate::routes::stats::get_gini,
    ),
    components(schemas(
        // Response models
        HealthResponse,
        StatusResponse,
        GiniResponse,
        CountersResponse,
        SeriesResponse<ActiveJurorsEntry>,
        SeriesResponse<GrowthEntry>,
        SeriesResponse<TotalStakedEntry>,
        SeriesResponse<StakedPercentageEntry>,
        SeriesResponse<FeesEntry>,
        SeriesResponse<CasesEntry>,
        SeriesResponse<TransactionsEntry>,

        // Entry types
        ActiveJurorsEntry,
        GrowthEntry,
        TotalStakedEntry,
        StakedPercentageEntry,
        FeesEntry,
        CasesEntry,
        TransactionsEntry,

        // Query parameters
        HistoryParams,
        GiniParams,
    ))
)]
pub struct ApiDoc;
