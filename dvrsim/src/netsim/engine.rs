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

//! # This module contains the convergence engine, which executes synchronous rounds of the
//! distance-vector exchange until the estimates reach a fixed point (or the round cap strikes).
//!
//! In one round, every node recomputes its estimate towards every other node from the estimates
//! its *direct neighbors* advertised at the end of the previous round:
//!
//! ```text
//! new[i][j] = min over all neighbors k of i:  old[i][k] + old[k][j]
//! ```
//!
//! Note that `old[i][k]` is node `i`'s current *estimate* towards its neighbor `k`, not the cost
//! of the direct link. Two neighbors whose estimates justify each other can therefore keep a
//! stale path alive long after the links behind it are gone. This is precisely the behavior of
//! the classic protocol, and the reason the count-to-infinity problem exists at all.
//!
//! All nodes move in lockstep: the new matrix is computed from an immutable snapshot of the old
//! one and committed in a single step at the end of the round.

use crate::netsim::routing_table::{DistanceMatrix, RoutingTable};
use crate::netsim::types::{Distance, NodeId};
use itertools::iproduct;
use log::*;

/// The default number of rounds after which the engine gives up and declares the run capped.
static DEFAULT_ROUND_CAP: usize = 100;

/// # Update Policy
///
/// Decides when a node commits a recomputed estimate over its previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Commit only if the recomputed estimate is strictly smaller than the previous one. Under
    /// this policy estimates only ever shrink, so a network whose links never fail converges to
    /// shortest paths without ever inflating an estimate.
    ImproveOnly,
    /// Commit whenever the recomputed estimate differs from the previous one. This is required
    /// after a link failure (estimates must be allowed to grow), and it is what exposes the
    /// count-to-infinity problem.
    AnyChange,
}

/// The way a convergence run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// A round passed in which no node committed a change: the estimates are a fixed point.
    Converged,
    /// The round cap was reached before a quiet round was seen.
    Capped,
}

/// A single committed estimate that is strictly larger than the one it replaced. Only increases
/// between two *finite* values or from a finite value to `INF` are recorded, never the initial
/// drop from `INF` down to a real distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceIncrease {
    /// The round (starting at 1) in which the increase was committed
    pub round: usize,
    /// The node whose estimate grew
    pub node: NodeId,
    /// The destination the estimate refers to
    pub dest: NodeId,
    /// The estimate before the round
    pub previous: Distance,
    /// The estimate after the round
    pub current: Distance,
}

/// The result of executing a single round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// True if at least one node committed a changed estimate
    pub changed: bool,
    /// All estimates that grew in this round
    pub increases: Vec<DistanceIncrease>,
}

/// # Convergence
///
/// The report of a full convergence run: how many rounds were executed, whether a fixed point was
/// reached, every recorded estimate increase, and the complete history of distance matrices.
#[derive(Debug, Clone)]
pub struct Convergence {
    /// The number of executed rounds. At least one round is always executed, and the final quiet
    /// round confirming the fixed point is counted.
    pub rounds: usize,
    /// How the run ended
    pub status: ConvergenceStatus,
    /// All estimate increases, in the order they were committed
    pub increases: Vec<DistanceIncrease>,
    /// The distance matrix before the first round, followed by one snapshot per executed round
    pub trace: Vec<DistanceMatrix>,
}

/// # Convergence Engine
///
/// Executes rounds on a [`RoutingTable`] until a quiet round confirms the fixed point, or until
/// the round cap is reached. The cap is checked *before* the quiet-round check: a run whose final
/// round is both quiet and at the cap is reported as [`ConvergenceStatus::Capped`].
#[derive(Debug, Clone)]
pub struct ConvergenceEngine {
    round_cap: usize,
}

impl Default for ConvergenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvergenceEngine {
    /// Creates an engine with the default round cap.
    pub fn new() -> Self {
        Self { round_cap: DEFAULT_ROUND_CAP }
    }

    /// Overwrites the round cap, or resets it to the default if `None` is given.
    pub fn set_round_cap(&mut self, round_cap: Option<usize>) {
        self.round_cap = round_cap.unwrap_or(DEFAULT_ROUND_CAP);
    }

    /// Returns the current round cap
    pub fn round_cap(&self) -> usize {
        self.round_cap
    }

    /// Executes a single synchronous round on the table and commits the resulting matrix. The
    /// `round` argument is only used for reporting.
    pub fn run_round(
        &self,
        table: &mut RoutingTable,
        policy: UpdatePolicy,
        round: usize,
    ) -> RoundOutcome {
        let num_nodes = table.num_nodes();
        let old = table.distances().clone();
        let mut new = old.clone();
        let mut changed = false;
        let mut increases = Vec::new();

        for (i, j) in iproduct!(0..num_nodes, 0..num_nodes) {
            if i == j {
                continue;
            }
            let node: NodeId = (i as u32).into();
            let dest: NodeId = (j as u32).into();

            let mut best = Distance::INF;
            for neighbor in table.neighbors_of(node) {
                let through_neighbor = old.get(node, neighbor) + old.get(neighbor, dest);
                if through_neighbor < best {
                    best = through_neighbor;
                }
            }

            let previous = old.get(node, dest);
            let commit = match policy {
                UpdatePolicy::ImproveOnly => best < previous,
                UpdatePolicy::AnyChange => best != previous,
            };
            if commit {
                new.set(node, dest, best);
                changed = true;
                if previous.is_finite() && best > previous {
                    trace!(
                        "round {}: node {} raised its estimate towards {} from {} to {}",
                        round,
                        i + 1,
                        j + 1,
                        previous,
                        best
                    );
                    increases.push(DistanceIncrease {
                        round,
                        node,
                        dest,
                        previous,
                        current: best,
                    });
                }
            }
        }

        table.commit_distances(new);
        debug!("round {} executed, changed: {}", round, changed);
        RoundOutcome { changed, increases }
    }

    /// Executes rounds until a quiet round or the round cap, whichever comes first.
    pub fn run(&self, table: &mut RoutingTable, policy: UpdatePolicy) -> Convergence {
        let mut rounds: usize = 0;
        let mut increases: Vec<DistanceIncrease> = Vec::new();
        let mut trace: Vec<DistanceMatrix> = vec![table.distances().clone()];

        let status = loop {
            rounds += 1;
            let outcome = self.run_round(table, policy, rounds);
            trace.push(table.distances().clone());
            increases.extend(outcome.increases);

            if rounds >= self.round_cap {
                warn!(
                    "Stopped after {} rounds without convergence! Possible count-to-infinity problem.",
                    rounds
                );
                break ConvergenceStatus::Capped;
            }
            if !outcome.changed {
                break ConvergenceStatus::Converged;
            }
        };

        if status == ConvergenceStatus::Converged {
            info!("Converged after {} rounds", rounds);
        }

        Convergence { rounds, status, increases, trace }
    }
}
