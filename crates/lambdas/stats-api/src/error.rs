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

use thiserror::Error;

/// Request errors reported to the client as 400 Bad Request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Chain not found: {0}")]
    ChainNotFound(u64),

    #[error("Invalid frequency '{0}', expected one of D, W, M")]
    InvalidFrequency(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}
