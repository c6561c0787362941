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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! This is a library for simulating the classic distance-vector routing protocol on a given
//! topology, round by round, including the behavior after a link failure.
//!
//! Every node keeps an estimate of its distance to every other node. In each synchronous round,
//! every node recomputes each estimate from the estimates its direct neighbors advertised at the
//! end of the previous round, and all nodes commit their new estimates at once. The
//! [`ConvergenceEngine`] executes such rounds until a fixed point; the [`Simulation`] wraps the
//! whole lifecycle of initial convergence, link failure, reconvergence and the final
//! count-to-infinity classification.
//!
//! ## Example usage
//!
//! The following example builds a line of three nodes, runs the exchange to the fixed point and
//! checks that the outer nodes have learned the two-hop path between them.
//!
//! ```rust
//! use dvrsim::netsim::{
//!     ConvergenceEngine, Link, RoutingTable, Topology, UpdatePolicy, ValidationError,
//! };
//!
//! fn main() -> Result<(), ValidationError> {
//!     // N1 --- 1 --- N2 --- 1 --- N3
//!     let topology = Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 1)])?;
//!     let n1 = topology.node(1)?;
//!     let n3 = topology.node(3)?;
//!
//!     let mut table = RoutingTable::from_topology(&topology);
//!     let convergence = ConvergenceEngine::new().run(&mut table, UpdatePolicy::ImproveOnly);
//!
//!     // N1 learned the two-hop path to N3 in the first round, and the second (quiet) round
//!     // confirmed the fixed point.
//!     assert_eq!(table.distance(n1, n3).value(), Some(2));
//!     assert_eq!(convergence.rounds, 2);
//!
//!     Ok(())
//! }
//! ```

pub mod anomaly;
pub(crate) mod engine;
pub(crate) mod routing_table;
pub(crate) mod topology;
pub(crate) mod types;

pub mod printer;
pub(crate) mod simulation;

pub use anomaly::{
    AnomalyClassifier, CountToInfinityPair, DEFAULT_INFINITY_THRESHOLD, DEFAULT_RISING_WINDOW,
};
pub use engine::{
    Convergence, ConvergenceEngine, ConvergenceStatus, DistanceIncrease, RoundOutcome,
    UpdatePolicy,
};
pub use routing_table::{DistanceMatrix, RoutingTable};
pub use simulation::{Simulation, SimulationState};
pub use topology::{Link, Topology};
pub use types::{Distance, DvrNetwork, LinkCost, NodeId, SimulationError, ValidationError};
