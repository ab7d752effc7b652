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

//! Integration tests for documentation and OpenAPI endpoints

use reqwest::StatusCode;
use serde_json::Value;
use stats_api::models::HealthResponse;

use super::TestEnv;

#[tokio::test]
async fn test_health_endpoint() {
    let env = TestEnv::fixture().await;

    let response: HealthResponse = env.get("/health").await.unwrap();

    assert_eq!(response.status, "healthy");
    assert_eq!(response.service, "stats-api");
}

#[tokio::test]
async fn test_openapi_yaml_endpoint() {
    let env = TestEnv::fixture().await;

    // Get the raw YAML response
    let client = reqwest::Client::new();
    let url = format!("{}/openapi.yaml", env.api_url());
    let response = client.get(&url).send().await.unwrap();

    assert!(response.status().is_success());

    let content_type =
        response.headers().get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");

    assert!(content_type.contains("yaml"));

    let body = response.text().await.unwrap();
    assert!(body.contains("openapi:"));
    assert!(body.contains("Juror Stats API"));
}

#[tokio::test]
async fn test_openapi_json_endpoint() {
    let env = TestEnv::fixture().await;

    let response: Value = env.get("/openapi.json").await.unwrap();

    let paths = response["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/v1/status",
        "/v1/history/active-jurors/{chain_id}",
        "/v1/history/staked-percentage/{chain_id}",
        "/v1/history/fees/{chain_id}",
        "/v1/history/transactions/{chain_id}",
        "/v1/counters/{chain_id}",
        "/v1/stats/gini/{chain_id}",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let env = TestEnv::fixture().await;

    let (status, body) = env.get_status("/v2/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}
