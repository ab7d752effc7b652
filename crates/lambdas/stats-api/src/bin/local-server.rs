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

use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};

use stats_api::config::ApiConfig;
use stats_api::handler::create_app;
use stats_api::state::AppState;

/// Arguments for the local stats API server.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct LocalServerArgs {
    #[clap(flatten)]
    config: ApiConfig,

    /// Port to listen on.
    #[clap(long, env, default_value = "3000")]
    port: u16,

    /// Whether to log in JSON format.
    #[clap(long, env, default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = LocalServerArgs::parse();

    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy();

    if args.log_json {
        tracing_subscriber::fmt().with_ansi(false).json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting local stats-api server");
    tracing::info!("Port: {}", args.port);

    // Create application state with the upstream sources
    let state = AppState::new(&args.config).context("Failed to create application state")?;
    let shared_state = Arc::new(state);

    // Create the axum application with routes
    let app = create_app(shared_state);

    // Create the server address
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    tracing::info!("Server listening on http://{}", addr);

    // Create the listener
    let listener =
        tokio::net::TcpListener::bind(addr).await.context("Failed to bind to address")?;

    // Run the server
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
