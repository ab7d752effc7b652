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

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::network::Network;

/// Errors raised while aligning a staked series with the token supply
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposerError {
    /// No supply sample exists at or before the staked timestamp
    #[error("No supply sample at or before {timestamp}")]
    MissingSupply {
        /// Timestamp of the staked sample
        timestamp: DateTime<Utc>,
    },

    /// The aligned supply is zero or negative
    #[error("Non-positive supply {supply} at {timestamp}")]
    NonPositiveSupply {
        /// Timestamp of the staked sample
        timestamp: DateTime<Utc>,
        /// The offending supply value
        supply: String,
    },
}

/// Errors raised on degenerate input to the distribution statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatisticsError {
    /// No values were provided
    #[error("Empty input")]
    EmptyInput,

    /// The final cumulative value is zero
    #[error("Total of the distribution is zero")]
    ZeroTotal,

    /// Values and weights differ in length
    #[error("Length mismatch: {values} values, {weights} weights")]
    LengthMismatch {
        /// Number of values
        values: usize,
        /// Number of weights
        weights: usize,
    },

    /// A value or weight is negative or not finite
    #[error("Invalid value: {0}")]
    InvalidValue(f64),

    /// A sum of token amounts does not fit in 256 bits
    #[error("Sum of amounts overflows 256 bits")]
    Overflow,
}

/// Errors raised by event and price sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered but reported a failure
    #[error("{source_name} unavailable: {message}")]
    Unavailable {
        /// Name of the failing source
        source_name: String,
        /// Upstream message
        message: String,
    },

    /// The upstream answered with data that could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// No endpoint configured for the network
    #[error("Network {0} is not configured")]
    UnsupportedNetwork(Network),

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Umbrella error for the statistics pipeline
#[derive(Error, Debug)]
pub enum StatsError {
    /// Event or price source could not be read
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    /// Staked and supply series are inconsistent
    #[error(transparent)]
    Composer(#[from] ComposerError),

    /// Degenerate statistics input
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}
