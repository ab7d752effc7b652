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

//! Integration tests for the status and point-in-time statistics endpoints

use reqwest::StatusCode;
use stats_api::models::{CountersResponse, GiniResponse, StatusResponse};

use super::{utc, TestEnv};

#[tokio::test]
async fn test_status() {
    let env = TestEnv::fixture().await;

    let response: StatusResponse = env.get("/v1/status").await.unwrap();
    assert!(!response.message.is_empty());
    assert_eq!(response.chain_ids, vec![1, 100]);
}

#[tokio::test]
async fn test_gini_now() {
    let env = TestEnv::fixture().await;

    let response: GiniResponse = env.get("/v1/stats/gini/100").await.unwrap();
    assert_eq!(response.network, "gnosis");
    assert_eq!(response.active_jurors, 1);
    assert_eq!(response.total_staked, "5000000000000000000");
    assert_eq!(response.gini, 0.0);
}

#[tokio::test]
async fn test_gini_at_timestamp() {
    let env = TestEnv::fixture().await;

    // 2023-03-01T00:00:00Z, both jurors staked
    let response: GiniResponse = env.get("/v1/stats/gini/100?at=1677628800").await.unwrap();
    assert_eq!(response.at, utc(2023, 3, 1, 0));
    assert_eq!(response.active_jurors, 2);
    assert_eq!(response.total_staked_formatted, "15 PNK");
    assert!((response.gini - 1.0 / 6.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_gini_without_active_jurors() {
    let env = TestEnv::fixture().await;

    // 2023-01-01T00:00:00Z, before the first stake
    let (status, body) = env.get_status("/v1/stats/gini/100?at=1672531200").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Empty input");
}

#[tokio::test]
async fn test_gini_unknown_chain() {
    let env = TestEnv::fixture().await;

    let (status, _) = env.get_status("/v1/stats/gini/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_counters() {
    let env = TestEnv::fixture().await;

    let response: CountersResponse = env.get("/v1/counters/100").await.unwrap();
    assert_eq!(response.network, "gnosis");
    assert_eq!(response.courts, 4);
    assert_eq!(response.disputes, 3);
    assert_eq!(response.open_disputes, 1);
    assert_eq!(response.token_staked, "5000000000000000000");
    assert_eq!(response.token_staked_formatted, "5 PNK");
    assert_eq!(response.total_fees_formatted, "3 xDAI");
}

#[tokio::test]
async fn test_counters_unavailable() {
    let env = TestEnv::fixture().await;

    let (status, _) = env.get_status("/v1/counters/1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = env.get_status("/v1/counters/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
