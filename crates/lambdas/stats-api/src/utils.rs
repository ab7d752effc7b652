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

use alloy_primitives::{I256, U256};

/// Format a wei amount as whole tokens with commas, e.g. "1,000 PNK".
/// Amounts have 18 decimals; the fractional part is dropped.
pub fn format_token_amount(wei: U256, symbol: &str) -> String {
    let divisor = U256::from(10u64).pow(U256::from(18));
    format!("{} {}", format_with_commas(&(wei / divisor).to_string()), symbol)
}

/// Same as [format_token_amount] for signed amounts
pub fn format_signed_token_amount(wei: I256, symbol: &str) -> String {
    let formatted = format_token_amount(wei.unsigned_abs(), symbol);
    if wei.is_negative() {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Insert comma separators into a string of digits
pub fn format_with_commas(digits: &str) -> String {
    let mut result = String::new();
    let mut count = 0;

    for ch in digits.chars().rev() {
        if count == 3 {
            result.insert(0, ',');
            count = 0;
        }
        result.insert(0, ch);
        count += 1;
    }

    result
}
