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

//! Conversions between 18-decimal wei amounts and whole-token floats.

use alloy_primitives::{I256, U256};

/// Symbol of the staking token
pub const TOKEN_SYMBOL: &str = "PNK";

/// 10^18, the staking token and the native assets all have 18 decimals
pub const WEI_PER_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Whole tokens to wei
pub fn tokens(amount: u64) -> U256 {
    U256::from(amount) * WEI_PER_TOKEN
}

/// Whole tokens to signed wei
pub fn signed_tokens(amount: u64) -> I256 {
    I256::from_raw(tokens(amount))
}

/// Lossy conversion of a raw integer amount to `f64`
pub fn u256_to_f64(value: U256) -> f64 {
    match u128::try_from(value) {
        Ok(small) => small as f64,
        Err(_) => value.to_string().parse::<f64>().unwrap_or(f64::INFINITY),
    }
}

/// Wei to whole tokens, keeping the fractional part
pub fn wei_to_tokens(value: U256) -> f64 {
    let whole = value / WEI_PER_TOKEN;
    let fraction = value % WEI_PER_TOKEN;
    u256_to_f64(whole) + u256_to_f64(fraction) / u256_to_f64(WEI_PER_TOKEN)
}

/// Signed wei to whole tokens
pub fn signed_wei_to_tokens(value: I256) -> f64 {
    let magnitude = wei_to_tokens(value.unsigned_abs());
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Serde adapter reading and writing signed wei amounts as decimal token strings,
/// e.g. `"-1.5"` for -1.5 tokens.
pub mod token_amount {
    use alloy_primitives::{
        utils::{format_units, parse_units},
        I256,
    };
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Integer(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &I256, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted =
            format_units(*value, "ether").map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<I256, D::Error> {
        let text = match RawAmount::deserialize(deserializer)? {
            RawAmount::Integer(value) => value.to_string(),
            RawAmount::Text(value) => value,
        };
        parse_units(text.trim(), "ether").map(|units| units.get_signed()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wei_to_tokens() {
        assert_eq!(wei_to_tokens(tokens(776_626_704)), 776_626_704.0);
        assert_eq!(wei_to_tokens(WEI_PER_TOKEN / U256::from(2)), 0.5);
        assert_eq!(wei_to_tokens(U256::ZERO), 0.0);
        assert!(wei_to_tokens(U256::MAX).is_finite());
    }

    #[test]
    fn test_signed_wei_to_tokens() {
        assert_eq!(signed_wei_to_tokens(signed_tokens(12)), 12.0);
        assert_eq!(signed_wei_to_tokens(-signed_tokens(12)), -12.0);
    }

    #[test]
    fn test_u256_to_f64() {
        assert_eq!(u256_to_f64(U256::from(1000)), 1000.0);
        let huge = U256::from(u128::MAX) * U256::from(4);
        assert!((u256_to_f64(huge) / (u128::MAX as f64) - 4.0).abs() < 1e-9);
    }
}
