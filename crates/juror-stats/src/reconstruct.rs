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

//! Point-in-time reconstruction of juror stakes from the stake-set log.
//!
//! The state as of a cutoff maps every address to the stake reported by its most recent
//! event strictly before the cutoff. Events at exactly the cutoff are not part of the state.
//! Addresses whose last stake is zero stay in the state; addresses without any earlier event
//! are absent.
//!
//! When two events of the same address share a timestamp, the one that appears later in the
//! log supplied by the event source wins.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::events::{SeriesPoint, StakeEvent};

/// Stake per address as of a cutoff instant
pub type AsOfState = HashMap<Address, U256>;

/// A juror with a positive stake as of a cutoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveJuror {
    pub address: Address,
    /// Stake reported by the juror's last event
    pub stake: U256,
    /// Subcourt of the juror's last event
    pub subcourt_id: u64,
    /// Time of the juror's last event
    pub timestamp: DateTime<Utc>,
}

/// Reconstructs the stake of every address as of `cutoff` with a single pass over `events`.
///
/// `events` may be in any order.
pub fn reconstruct(events: &[StakeEvent], cutoff: DateTime<Utc>) -> AsOfState {
    let mut latest: HashMap<Address, (DateTime<Utc>, U256)> = HashMap::new();

    for event in events.iter().filter(|event| event.timestamp < cutoff) {
        match latest.entry(event.address) {
            Entry::Occupied(mut entry) => {
                // `>=` so that a later log entry wins a timestamp tie
                if event.timestamp >= entry.get().0 {
                    entry.insert((event.timestamp, event.new_total_stake));
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((event.timestamp, event.new_total_stake));
            }
        }
    }

    latest.into_iter().map(|(address, (_, stake))| (address, stake)).collect()
}

/// Jurors with a positive stake as of `cutoff`, largest stake first
pub fn active_jurors(events: &[StakeEvent], cutoff: DateTime<Utc>) -> Vec<ActiveJuror> {
    StakeTimeline::from_events(events).active_jurors(cutoff)
}

/// Stake-set log sorted once by timestamp, for repeated as-of queries
#[derive(Debug, Clone, Default)]
pub struct StakeTimeline {
    events: Vec<StakeEvent>,
}

impl StakeTimeline {
    /// Builds a timeline. The sort is stable, so log order is kept among equal timestamps.
    pub fn new(mut events: Vec<StakeEvent>) -> Self {
        events.sort_by_key(|event| event.timestamp);

        let mut seen = HashSet::with_capacity(events.len());
        let ties =
            events.iter().filter(|event| !seen.insert((event.address, event.timestamp))).count();
        if ties > 0 {
            tracing::warn!(
                "{} stake events share a timestamp with another event of the same address; \
                 resolving by log order",
                ties
            );
        }

        tracing::debug!("Built stake timeline with {} events", events.len());
        Self { events }
    }

    pub fn from_events(events: &[StakeEvent]) -> Self {
        Self::new(events.to_vec())
    }

    pub fn events(&self) -> &[StakeEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.first().map(|event| event.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.last().map(|event| event.timestamp)
    }

    /// Number of events strictly before `cutoff`
    fn prefix_len(&self, cutoff: DateTime<Utc>) -> usize {
        self.events.partition_point(|event| event.timestamp < cutoff)
    }

    /// State as of `cutoff`
    pub fn as_of(&self, cutoff: DateTime<Utc>) -> AsOfState {
        let mut state = AsOfState::new();
        for event in &self.events[..self.prefix_len(cutoff)] {
            state.insert(event.address, event.new_total_stake);
        }
        state
    }

    /// Applies `reducer` to the state as of every instant of `grid`.
    ///
    /// An ascending grid is swept in a single pass over the log; a cutoff earlier than its
    /// predecessor restarts the sweep from that cutoff.
    pub fn sweep<T>(
        &self,
        grid: &[DateTime<Utc>],
        mut reducer: impl FnMut(&AsOfState) -> T,
    ) -> Vec<SeriesPoint<T>> {
        let mut state = AsOfState::new();
        let mut applied = 0usize;
        let mut previous: Option<DateTime<Utc>> = None;
        let mut series = Vec::with_capacity(grid.len());

        for &cutoff in grid {
            if previous.is_some_and(|previous| cutoff < previous) {
                state = self.as_of(cutoff);
                applied = self.prefix_len(cutoff);
            } else {
                while let Some(event) = self.events.get(applied) {
                    if event.timestamp >= cutoff {
                        break;
                    }
                    state.insert(event.address, event.new_total_stake);
                    applied += 1;
                }
            }

            series.push(SeriesPoint::new(cutoff, reducer(&state)));
            previous = Some(cutoff);
        }

        series
    }

    /// Jurors with a positive stake as of `cutoff`, largest stake first
    pub fn active_jurors(&self, cutoff: DateTime<Utc>) -> Vec<ActiveJuror> {
        let mut last_events: HashMap<Address, &StakeEvent> = HashMap::new();
        for event in &self.events[..self.prefix_len(cutoff)] {
            last_events.insert(event.address, event);
        }

        let mut jurors: Vec<ActiveJuror> = last_events
            .into_values()
            .filter(|event| event.new_total_stake > U256::ZERO)
            .map(|event| ActiveJuror {
                address: event.address,
                stake: event.new_total_stake,
                subcourt_id: event.subcourt_id,
                timestamp: event.timestamp,
            })
            .collect();

        jurors.sort_by(|a, b| b.stake.cmp(&a.stake).then(a.address.cmp(&b.address)));
        jurors
    }
}
