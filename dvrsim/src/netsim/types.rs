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

//! Module containing all type definitions

use crate::netsim::simulation::SimulationState;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::fmt;
use std::ops::Add;
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// Cost of a single link (non-negative by construction)
pub type LinkCost = u32;
/// Undirected graph of the simulated topology
pub type DvrNetwork = StableGraph<(), LinkCost, Undirected, IndexType>;

/// # Distance estimate
///
/// The estimated distance from one node to another, either a finite value or the `INF` marker for
/// unreachable destinations. `Distance` orders like a number with `INF` larger than every finite
/// value, and addition absorbs `INF` (any sum involving an unreachable leg is unreachable).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Distance(u64);

impl Distance {
    /// The distance marking an unreachable destination
    pub const INF: Self = Self(u64::MAX);
    /// The distance of every node to itself
    pub const ZERO: Self = Self(0);

    /// Creates a finite distance from a link cost
    pub fn from_cost(cost: LinkCost) -> Self {
        Self(cost as u64)
    }

    /// Returns `true` if and only if the distance is finite
    pub fn is_finite(&self) -> bool {
        self.0 != u64::MAX
    }

    /// Returns `true` if and only if the distance marks an unreachable destination
    pub fn is_infinite(&self) -> bool {
        self.0 == u64::MAX
    }

    /// Returns the finite value, or `None` for an unreachable destination
    pub fn value(&self) -> Option<u64> {
        if self.is_finite() {
            Some(self.0)
        } else {
            None
        }
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.is_infinite() || rhs.is_infinite() {
            Self::INF
        } else {
            // a sum of two finite estimates must remain finite
            Self(self.0.saturating_add(rhs.0).min(u64::MAX - 1))
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(d) => write!(f, "{}", d),
            None => write!(f, "INF"),
        }
    }
}

/// Validation Error, raised when a scenario description refers to nodes or links that cannot
/// exist. Every variant names the offending element, so the caller can reject bad input before any
/// round is executed.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// The topology needs at least one node
    #[error("The topology must contain at least one node!")]
    NoNodes,
    /// A node reference lies outside of `1..=num_nodes`
    #[error("The {field} refers to node {index}, but the valid nodes are 1 to {num_nodes}")]
    NodeOutOfRange {
        /// Which field of the description holds the bad reference
        field: &'static str,
        /// The offending (1-based) node index
        index: usize,
        /// Number of nodes in the topology
        num_nodes: usize,
    },
    /// Links must connect two distinct nodes
    #[error("Link endpoints must differ, but both are node {node}")]
    SelfLoop {
        /// The node named on both ends (1-based)
        node: usize,
    },
    /// The referenced direct link does not exist
    #[error("There is no direct link between node {src} and node {dest}")]
    NoSuchLink {
        /// First endpoint (1-based)
        src: usize,
        /// Second endpoint (1-based)
        dest: usize,
    },
}

/// Simulation Errors
#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    /// The operation is not allowed in the current lifecycle state
    #[error("Cannot {operation} while the simulation is in state {state:?}!")]
    InvalidTransition {
        /// State the simulation is currently in
        state: SimulationState,
        /// The rejected operation
        operation: &'static str,
    },
    /// Scenario validation failed
    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),
}
