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

//! Integration tests for the history endpoints

use reqwest::StatusCode;
use stats_api::models::{
    ActiveJurorsEntry, CasesEntry, FeesEntry, GrowthEntry, SeriesResponse, StakedPercentageEntry,
    TotalStakedEntry, TransactionsEntry,
};

use super::{unavailable_state, utc, TestEnv};

#[test_log::test(tokio::test)]
async fn test_active_jurors_daily() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<ActiveJurorsEntry> =
        env.get("/v1/history/active-jurors/100").await.unwrap();

    assert_eq!(response.chain_id, 100);
    assert_eq!(response.network, "gnosis");
    assert_eq!(response.frequency, "D");
    // 2023-01-15 through 2023-03-05
    assert_eq!(response.entries.len(), 50);
    assert_eq!(response.entries[0].timestamp, utc(2023, 1, 15, 0));
    assert_eq!(response.entries[0].active_jurors, 0);
    assert_eq!(response.entries[1].active_jurors, 1);
    assert_eq!(response.entries.last().unwrap().active_jurors, 2);
}

#[tokio::test]
async fn test_active_jurors_empty_log() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<ActiveJurorsEntry> =
        env.get("/v1/history/active-jurors/1").await.unwrap();
    assert_eq!(response.network, "mainnet");
    assert!(response.entries.is_empty());
}

#[tokio::test]
async fn test_growth_active_jurors_monthly_default() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<GrowthEntry> =
        env.get("/v1/history/growth-active-jurors/100").await.unwrap();

    assert_eq!(response.frequency, "M");
    let growth: Vec<i64> = response.entries.iter().map(|e| e.growth).collect();
    assert_eq!(growth, vec![1, 1, 0]);
    assert_eq!(response.entries[1].timestamp, utc(2023, 2, 1, 0));
}

#[tokio::test]
async fn test_total_staked_monthly() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<TotalStakedEntry> =
        env.get("/v1/history/total-staked/100?freq=M").await.unwrap();

    let totals: Vec<&str> = response.entries.iter().map(|e| e.total_staked.as_str()).collect();
    assert_eq!(totals, vec!["10000000000000000000", "15000000000000000000", "5000000000000000000"]);
    assert_eq!(response.entries[1].total_staked_formatted, "15 PNK");
    // Labelled by the close of each month, never before the first stake
    assert_eq!(response.entries[0].timestamp, utc(2023, 2, 1, 0));
    assert_eq!(response.entries[2].timestamp, utc(2023, 4, 1, 0));
}

#[tokio::test]
async fn test_total_staked_weekly() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<TotalStakedEntry> =
        env.get("/v1/history/total-staked/100?freq=W").await.unwrap();

    assert_eq!(response.frequency, "W");
    // The first stake's week (from Monday 2023-01-09) closes on 2023-01-16
    assert_eq!(response.entries[0].timestamp, utc(2023, 1, 16, 0));
    assert_eq!(response.entries[0].total_staked, "10000000000000000000");
    assert_eq!(response.entries.last().unwrap().total_staked, "5000000000000000000");
}

#[tokio::test]
async fn test_staked_percentage() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<StakedPercentageEntry> =
        env.get("/v1/history/staked-percentage/100").await.unwrap();

    assert_eq!(response.entries.len(), 3);
    let february = &response.entries[0];
    assert_eq!(february.timestamp, utc(2023, 2, 1, 0));
    assert_eq!(february.total_supply, "764626704000000000000000000");
    assert_eq!(february.total_supply_formatted, "764,626,704 PNK");
    assert!((february.percentage - 10.0 / 764_626_704.0).abs() < 1e-15);
    assert!((response.entries[1].percentage - 15.0 / 764_626_704.0).abs() < 1e-15);
}

#[tokio::test]
async fn test_fees_priced_in_usd() {
    let env = TestEnv::fixture().await;

    let daily: SeriesResponse<FeesEntry> =
        env.get("/v1/history/fees/1?freq=D").await.unwrap();
    assert_eq!(daily.entries.len(), 2);
    assert_eq!(daily.entries[0].amount_native, 1.0);
    assert_eq!(daily.entries[0].amount_usd, Some(2000.0));
    assert_eq!(daily.entries[0].native_symbol, "ETH");
    // Next price sample is 29 hours after the start of the day
    assert_eq!(daily.entries[1].amount_native, 2.0);
    assert_eq!(daily.entries[1].amount_usd, None);

    let monthly: SeriesResponse<FeesEntry> = env.get("/v1/history/fees/1").await.unwrap();
    assert_eq!(monthly.entries.len(), 1);
    assert_eq!(monthly.entries[0].timestamp, utc(2023, 5, 1, 0));
    assert_eq!(monthly.entries[0].amount_native, 3.0);
    assert_eq!(monthly.entries[0].amount_usd, Some(2000.0));
}

#[tokio::test]
async fn test_fees_native_is_quote() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<FeesEntry> = env.get("/v1/history/fees/100").await.unwrap();
    assert_eq!(response.entries.len(), 1);
    assert_eq!(response.entries[0].native_symbol, "xDAI");
    assert_eq!(response.entries[0].amount_native, 3.0);
    assert_eq!(response.entries[0].amount_usd, Some(3.0));
}

#[tokio::test]
async fn test_cases_monthly() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<CasesEntry> = env.get("/v1/history/cases/100").await.unwrap();
    let cases: Vec<u64> = response.entries.iter().map(|e| e.cases).collect();
    assert_eq!(cases, vec![2, 0, 1]);
}

#[tokio::test]
async fn test_transactions_weekly() {
    let env = TestEnv::fixture().await;

    let response: SeriesResponse<TransactionsEntry> =
        env.get("/v1/history/transactions/100?freq=W").await.unwrap();

    assert_eq!(response.frequency, "W");
    // Weeks of 2023-01-09 through 2023-02-27
    assert_eq!(response.entries.len(), 8);
    assert_eq!(response.entries[0].timestamp, utc(2023, 1, 9, 0));
    assert_eq!(response.entries[0].transactions, 1);
    assert_eq!(response.entries[1].transactions, 1);
    assert_eq!(response.entries[7].transactions, 1);
    let total: u64 = response.entries.iter().map(|e| e.transactions).sum();
    assert_eq!(total, 3);

    let monthly: SeriesResponse<TransactionsEntry> =
        env.get("/v1/history/transactions/100").await.unwrap();
    let counts: Vec<u64> = monthly.entries.iter().map(|e| e.transactions).collect();
    assert_eq!(counts, vec![2, 0, 1]);
}

#[tokio::test]
async fn test_unknown_chain() {
    let env = TestEnv::fixture().await;

    let (status, body) = env.get_status("/v1/history/total-staked/5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Chain not found: 5");
}

#[tokio::test]
async fn test_invalid_frequency() {
    let env = TestEnv::fixture().await;

    let (status, body) = env.get_status("/v1/history/cases/100?freq=Q").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_source_unavailable() {
    let env = TestEnv::start(unavailable_state()).await;

    let (status, body) = env.get_status("/v1/history/active-jurors/100").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service Unavailable");
}
