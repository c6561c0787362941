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

//! # This module contains the simulation itself: a state machine driving one topology through
//! initial convergence, a single link failure, and reconvergence, while collecting the reports
//! of both runs and the final anomaly classification.

use crate::netsim::anomaly::{AnomalyClassifier, CountToInfinityPair, DEFAULT_RISING_WINDOW};
use crate::netsim::engine::{Convergence, ConvergenceEngine, UpdatePolicy};
use crate::netsim::routing_table::RoutingTable;
use crate::netsim::topology::Topology;
use crate::netsim::types::{NodeId, SimulationError};
use log::*;

/// The phase a [`Simulation`] is currently in. Operations are only legal in specific states, and
/// an operation called in the wrong state fails with
/// [`SimulationError::InvalidTransition`](crate::netsim::types::SimulationError) without touching
/// the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// The topology is loaded, but no round was executed yet.
    Initial,
    /// The initial convergence is running.
    Converging,
    /// The initial convergence has finished. A link may now be failed.
    Converged,
    /// A link has failed, and the estimates referring to it are stale.
    Failed,
    /// The reconvergence after the failure is running.
    Reconverging,
    /// The reconvergence has finished and the final state was classified. No further operation
    /// is possible.
    Terminal,
}

/// # Simulation
///
/// Owns the topology and the routing table, and walks them through the fixed lifecycle
///
/// ```text
/// Initial --converge()--> Converged --fail_link()--> Failed --reconverge()--> Terminal
/// ```
///
/// The initial convergence runs under [`UpdatePolicy::ImproveOnly`], so estimates only shrink
/// while the network is healthy. The reconvergence runs under [`UpdatePolicy::AnyChange`],
/// which lets estimates grow and thereby exposes the count-to-infinity problem whenever the
/// failure leaves nodes that justify each other's stale paths.
#[derive(Debug)]
pub struct Simulation {
    topology: Topology,
    table: RoutingTable,
    engine: ConvergenceEngine,
    classifier: AnomalyClassifier,
    state: SimulationState,
    failed_link: Option<(NodeId, NodeId)>,
    initial_run: Option<Convergence>,
    reconvergence_run: Option<Convergence>,
    anomalies: Vec<CountToInfinityPair>,
}

impl Simulation {
    /// Creates a simulation in the [`SimulationState::Initial`] state. The routing table starts
    /// with the direct link costs and `INF` everywhere else.
    pub fn new(topology: Topology) -> Self {
        let table = RoutingTable::from_topology(&topology);
        Self {
            topology,
            table,
            engine: ConvergenceEngine::new(),
            classifier: AnomalyClassifier::default(),
            state: SimulationState::Initial,
            failed_link: None,
            initial_run: None,
            reconvergence_run: None,
            anomalies: Vec::new(),
        }
    }

    /// Runs the initial convergence. Only legal in the [`SimulationState::Initial`] state. Even
    /// a run that hits the round cap moves the simulation to [`SimulationState::Converged`], the
    /// report of the run records the cap.
    pub fn converge(&mut self) -> Result<(), SimulationError> {
        if self.state != SimulationState::Initial {
            return Err(SimulationError::InvalidTransition {
                state: self.state,
                operation: "converge",
            });
        }
        self.state = SimulationState::Converging;
        info!("Starting the initial convergence of {} nodes", self.topology.num_nodes());
        let run = self.engine.run(&mut self.table, UpdatePolicy::ImproveOnly);
        self.initial_run = Some(run);
        self.state = SimulationState::Converged;
        Ok(())
    }

    /// Fails the direct link between the two nodes (given as 1-based ids). Only legal in the
    /// [`SimulationState::Converged`] state. Both endpoints immediately set their estimate
    /// towards each other to `INF`; all other estimates keep their stale values until
    /// [`Self::reconverge`] is called.
    pub fn fail_link(&mut self, src: usize, dest: usize) -> Result<(), SimulationError> {
        if self.state != SimulationState::Converged {
            return Err(SimulationError::InvalidTransition {
                state: self.state,
                operation: "fail a link",
            });
        }
        let src_id = self.topology.node_for(src, "failure source")?;
        let dest_id = self.topology.node_for(dest, "failure destination")?;
        self.topology.remove_link(src_id, dest_id)?;
        self.table.disconnect(src_id, dest_id);
        self.failed_link = Some((src_id, dest_id));
        info!("Failed the link between node {} and node {}", src, dest);
        self.state = SimulationState::Failed;
        Ok(())
    }

    /// Runs the reconvergence after the failure and classifies the final state. Only legal in
    /// the [`SimulationState::Failed`] state.
    pub fn reconverge(&mut self) -> Result<(), SimulationError> {
        if self.state != SimulationState::Failed {
            return Err(SimulationError::InvalidTransition {
                state: self.state,
                operation: "reconverge",
            });
        }
        self.state = SimulationState::Reconverging;
        info!("Starting the reconvergence after the link failure");
        let run = self.engine.run(&mut self.table, UpdatePolicy::AnyChange);

        self.anomalies = self.classifier.classify(self.table.distances());
        if !self.anomalies.is_empty() {
            warn!(
                "{} node pairs show the count-to-infinity pattern (threshold: {})",
                self.anomalies.len(),
                self.classifier.threshold()
            );
        }
        let rising = self.classifier.rising_pairs(&run.trace, DEFAULT_RISING_WINDOW);
        if !rising.is_empty() {
            debug!("{} node pairs kept rising over the last rounds", rising.len());
        }

        self.reconvergence_run = Some(run);
        self.state = SimulationState::Terminal;
        Ok(())
    }

    /// Returns the current state
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Returns a reference to the current routing table
    pub fn routing_table(&self) -> &RoutingTable {
        &self.table
    }

    /// Returns a reference to the topology
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the report of the initial convergence, if it was already executed
    pub fn initial_convergence(&self) -> Option<&Convergence> {
        self.initial_run.as_ref()
    }

    /// Returns the report of the reconvergence, if it was already executed
    pub fn reconvergence(&self) -> Option<&Convergence> {
        self.reconvergence_run.as_ref()
    }

    /// Returns the failed link as a pair of 1-based node ids, if a link was already failed
    pub fn failed_link(&self) -> Option<(usize, usize)> {
        self.failed_link.map(|(a, b)| (a.index() + 1, b.index() + 1))
    }

    /// Returns the node pairs classified as counting to infinity. Empty before
    /// [`Self::reconverge`] was called, and empty afterwards if the network reconverged cleanly.
    pub fn anomalies(&self) -> &[CountToInfinityPair] {
        &self.anomalies
    }

    /// Returns the threshold used by the anomaly classification
    pub fn anomaly_threshold(&self) -> u64 {
        self.classifier.threshold()
    }

    /// Returns the node pairs whose estimates kept rising over the trailing `window` rounds of
    /// the reconvergence. Empty before [`Self::reconverge`] was called.
    pub fn rising_pairs(&self, window: usize) -> Vec<(NodeId, NodeId)> {
        match &self.reconvergence_run {
            Some(run) => self.classifier.rising_pairs(&run.trace, window),
            None => Vec::new(),
        }
    }

    /// Overwrites the round cap of both convergence runs, or resets it to the default if `None`
    /// is given.
    pub fn set_round_cap(&mut self, round_cap: Option<usize>) {
        self.engine.set_round_cap(round_cap);
    }
}
