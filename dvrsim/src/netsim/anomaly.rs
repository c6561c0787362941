// DvrSim: Simulating Distance-Vector Routing and the Count-to-Infinity Problem
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # This module classifies the final routing state for symptoms of the count-to-infinity
//! problem, and inspects convergence traces for estimates that keep rising round after round.

use crate::netsim::routing_table::DistanceMatrix;
use crate::netsim::types::{Distance, NodeId};
use itertools::iproduct;
use log::*;

/// The default threshold above which a finite estimate counts as "counting to infinity".
pub static DEFAULT_INFINITY_THRESHOLD: u64 = 100;

/// The default number of trailing rounds inspected by [`AnomalyClassifier::rising_pairs`].
pub static DEFAULT_RISING_WINDOW: usize = 10;

/// The minimum number of finite samples a pair must show inside the window before it can be
/// reported as rising.
static MIN_RISING_SAMPLES: usize = 3;

/// A node pair whose estimate exceeds the count-to-infinity threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountToInfinityPair {
    /// The node holding the inflated estimate
    pub node: NodeId,
    /// The destination the estimate refers to
    pub dest: NodeId,
    /// The inflated estimate itself
    pub distance: Distance,
}

/// # Anomaly Classifier
///
/// Scans a distance matrix for estimates that are still *finite* but have grown past a threshold.
/// An `INF` estimate is an honest statement of disconnection and is never flagged; the anomaly is
/// a finite number slowly crawling upwards while the destination is in fact unreachable.
#[derive(Debug, Clone)]
pub struct AnomalyClassifier {
    threshold: u64,
}

impl Default for AnomalyClassifier {
    fn default() -> Self {
        Self { threshold: DEFAULT_INFINITY_THRESHOLD }
    }
}

impl AnomalyClassifier {
    /// Creates a classifier with a custom threshold.
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    /// Returns the threshold
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Returns every off-diagonal pair whose estimate is finite and at least as large as the
    /// threshold, in row-major order.
    pub fn classify(&self, matrix: &DistanceMatrix) -> Vec<CountToInfinityPair> {
        let num_nodes = matrix.num_nodes();
        let mut pairs = Vec::new();
        for (i, j) in iproduct!(0..num_nodes, 0..num_nodes) {
            if i == j {
                continue;
            }
            let node: NodeId = (i as u32).into();
            let dest: NodeId = (j as u32).into();
            let distance = matrix.get(node, dest);
            match distance.value() {
                Some(d) if d >= self.threshold => {
                    trace!(
                        "node {} holds an inflated estimate of {} towards node {}",
                        i + 1,
                        d,
                        j + 1
                    );
                    pairs.push(CountToInfinityPair { node, dest, distance });
                }
                _ => {}
            }
        }
        pairs
    }

    /// Returns every pair whose finite estimates rise strictly from one sample to the next over
    /// the trailing `window` snapshots of the trace. Snapshots in which the estimate is `INF` are
    /// skipped, so a pair alternating between a growing finite value and `INF` is still caught.
    /// Pairs with fewer than three finite samples inside the window are not reported.
    pub fn rising_pairs(
        &self,
        trace: &[DistanceMatrix],
        window: usize,
    ) -> Vec<(NodeId, NodeId)> {
        let num_nodes = match trace.last() {
            Some(matrix) => matrix.num_nodes(),
            None => return Vec::new(),
        };
        let tail = &trace[trace.len().saturating_sub(window)..];

        let mut pairs = Vec::new();
        for (i, j) in iproduct!(0..num_nodes, 0..num_nodes) {
            if i == j {
                continue;
            }
            let node: NodeId = (i as u32).into();
            let dest: NodeId = (j as u32).into();
            let samples: Vec<u64> =
                tail.iter().filter_map(|matrix| matrix.get(node, dest).value()).collect();
            if samples.len() >= MIN_RISING_SAMPLES
                && samples.windows(2).all(|pair| pair[0] < pair[1])
            {
                pairs.push((node, dest));
            }
        }
        pairs
    }
}
