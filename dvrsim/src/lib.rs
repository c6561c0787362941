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

#![deny(missing_docs)]

//! # DvrSim: Simulating Distance-Vector Routing and the Count-to-Infinity Problem
//! This is a library for simulating the classic distance-vector routing protocol on small
//! topologies, and for studying what happens to the distance estimates after a link fails.
//!
//! ## Problem Statement
//! In distance-vector routing, every node only knows the distance estimates of its direct
//! neighbors. As long as the network is healthy, repeatedly relaxing those estimates converges
//! to the true shortest paths. After a link failure, however, two neighbors can keep justifying
//! each other's stale estimates towards an unreachable destination, inflating them round after
//! round. This is the count-to-infinity problem, and this library makes it observable: it runs
//! the protocol in synchronous rounds, records every estimate that grows, and classifies the
//! final state.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`NetSim`](netsim)**: The simulator itself. The [`Topology`](netsim::Topology) holds the
//!   validated network, the [`RoutingTable`](netsim::RoutingTable) the estimates of every node,
//!   and the [`ConvergenceEngine`](netsim::ConvergenceEngine) executes synchronous rounds until
//!   a fixed point. The [`Simulation`](netsim::Simulation) drives the whole lifecycle of initial
//!   convergence, link failure and reconvergence, and the
//!   [`AnomalyClassifier`](netsim::AnomalyClassifier) inspects the outcome for the
//!   count-to-infinity pattern.
//!
//! - **[`Input`](input)**: Parser for the plain-text scenario format describing a topology and
//!   the link to fail.
//!
//! - **[`ExampleTopologies`](example_topologies)**: Collection of prepared topologies showing
//!   the different reconvergence behaviors, from clean rerouting to counting to infinity.
//!
//! ## Usage
//!
//! Build a [`Topology`](netsim::Topology), wrap it in a [`Simulation`](netsim::Simulation), and
//! walk it through its lifecycle. On the smallest interesting topology, a line of three nodes,
//! the failure of a boundary link already exhibits the count-to-infinity problem:
//!
//! ```
//! use dvrsim::netsim::{Link, Simulation, SimulationState, Topology};
//!
//! fn main() -> Result<(), dvrsim::Error> {
//!     // N1 --- 1 --- N2 --- 1 --- N3
//!     let topology = Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 1)])?;
//!
//!     let mut simulation = Simulation::new(topology);
//!     simulation.converge()?;
//!     simulation.fail_link(1, 2)?;
//!     simulation.reconverge()?;
//!
//!     // N2 and N3 counted to infinity while chasing the unreachable N1.
//!     assert_eq!(simulation.state(), SimulationState::Terminal);
//!     assert!(!simulation.anomalies().is_empty());
//!
//!     Ok(())
//! }
//! ```

// test modules
pub mod example_topologies;
mod test;

mod error;
pub mod input;
pub mod netsim;

mod simulate;
pub use simulate::run_scenario;

pub use error::Error;
