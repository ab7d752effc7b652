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

//! Gini coefficient of a distribution of non-negative values.

use crate::{error::StatisticsError, reconstruct::ActiveJuror, units::wei_to_tokens};

fn validate(values: &[f64]) -> Result<(), StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptyInput);
    }
    match values.iter().find(|value| !value.is_finite() || **value < 0.0) {
        Some(invalid) => Err(StatisticsError::InvalidValue(*invalid)),
        None => Ok(()),
    }
}

/// Unweighted Gini coefficient, in [0, 1] for valid input
pub fn gini(values: &[f64]) -> Result<f64, StatisticsError> {
    validate(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mut cumulative = 0.0;
    let mut cumulative_sum = 0.0;
    for value in &sorted {
        cumulative += value;
        cumulative_sum += cumulative;
    }

    if cumulative == 0.0 {
        return Err(StatisticsError::ZeroTotal);
    }

    Ok((n + 1.0 - 2.0 * cumulative_sum / cumulative) / n)
}

/// Weighted Gini coefficient. `weights[i]` is the weight of `values[i]`.
pub fn weighted_gini(values: &[f64], weights: &[f64]) -> Result<f64, StatisticsError> {
    if values.len() != weights.len() {
        return Err(StatisticsError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }
    validate(values)?;
    validate(weights)?;

    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Cumulative weight and cumulative weight * value
    let mut cum_weight = Vec::with_capacity(pairs.len());
    let mut cum_weighted = Vec::with_capacity(pairs.len());
    let (mut w, mut cw) = (0.0, 0.0);
    for (value, weight) in &pairs {
        w += weight;
        cw += weight * value;
        cum_weight.push(w);
        cum_weighted.push(cw);
    }

    let denominator = cw * w;
    if denominator == 0.0 {
        return Err(StatisticsError::ZeroTotal);
    }

    let numerator: f64 = (1..pairs.len())
        .map(|i| cum_weighted[i] * cum_weight[i - 1] - cum_weighted[i - 1] * cum_weight[i])
        .sum();

    Ok(numerator / denominator)
}

/// Gini coefficient of the stakes of active jurors, in whole tokens
pub fn stake_gini(jurors: &[ActiveJuror]) -> Result<f64, StatisticsError> {
    let stakes: Vec<f64> = jurors.iter().map(|juror| wei_to_tokens(juror.stake)).collect();
    gini(&stakes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use chrono::Utc;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_equal_values() {
        assert!(close(gini(&[2.0, 2.0, 2.0]).unwrap(), 0.0));
        assert!(close(weighted_gini(&[2.0, 2.0, 2.0], &[1.0, 1.0, 1.0]).unwrap(), 0.0));
        assert!(close(gini(&[7.0]).unwrap(), 0.0));
    }

    #[test]
    fn test_concentrated_values() {
        assert!(close(gini(&[0.0, 0.0, 0.0, 1.0]).unwrap(), 0.75));
        assert!(close(gini(&[1.0, 0.0, 0.0, 0.0]).unwrap(), 0.75));
        assert!(close(weighted_gini(&[0.0, 0.0, 0.0, 1.0], &[1.0; 4]).unwrap(), 0.75));
    }

    #[test]
    fn test_unit_weights_match_unweighted() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let unweighted = gini(&values).unwrap();
        let weighted = weighted_gini(&values, &[1.0; 8]).unwrap();
        assert!(close(unweighted, weighted));
        assert!((0.0..=1.0).contains(&unweighted));
    }

    #[test]
    fn test_weights_follow_their_values() {
        // Doubling a value's weight is the same as repeating it
        let weighted = weighted_gini(&[5.0, 1.0], &[2.0, 1.0]).unwrap();
        let repeated = gini(&[5.0, 5.0, 1.0]).unwrap();
        assert!(close(weighted, repeated));
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(gini(&[]), Err(StatisticsError::EmptyInput));
        assert_eq!(gini(&[0.0, 0.0]), Err(StatisticsError::ZeroTotal));
        assert_eq!(gini(&[1.0, -1.0]), Err(StatisticsError::InvalidValue(-1.0)));
        assert!(matches!(gini(&[1.0, f64::NAN]), Err(StatisticsError::InvalidValue(_))));
        assert_eq!(
            weighted_gini(&[1.0, 2.0], &[1.0]),
            Err(StatisticsError::LengthMismatch { values: 2, weights: 1 })
        );
        assert_eq!(weighted_gini(&[1.0, 2.0], &[0.0, 0.0]), Err(StatisticsError::ZeroTotal));
        assert_eq!(weighted_gini(&[], &[]), Err(StatisticsError::EmptyInput));
    }

    #[test]
    fn test_stake_gini() {
        let juror = |byte: u8, tokens: u64| ActiveJuror {
            address: Address::with_last_byte(byte),
            stake: crate::units::tokens(tokens),
            subcourt_id: 0,
            timestamp: Utc::now(),
        };

        assert!(close(stake_gini(&[juror(1, 100), juror(2, 100)]).unwrap(), 0.0));
        let skewed = stake_gini(&[juror(1, 1), juror(2, 1_000_000)]).unwrap();
        assert!(skewed > 0.49 && skewed <= 0.5);
        assert_eq!(stake_gini(&[]), Err(StatisticsError::EmptyInput));
    }
}
