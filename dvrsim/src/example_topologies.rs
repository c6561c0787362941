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

//! # Example Topologies
//!
//! Module containing example topologies for testing and for exploring the protocol behavior on
//! the command line. Every example also names the link whose failure shows the interesting
//! behavior of that topology.

use crate::netsim::{Link, Topology, ValidationError};

/// Trait for the example topologies.
pub trait ExampleTopology {
    /// Builds the topology
    fn topology() -> Topology;
    /// Returns the link (as a pair of 1-based node ids) whose failure is worth simulating
    fn failure_link() -> (usize, usize);
}

/// # ThreeNodeLine
///
/// The smallest topology showing the count-to-infinity problem.
///
/// ```text
/// N1 --- 1 --- N2 --- 1 --- N3
/// ```
///
/// After the link between `N1` and `N2` fails, `N2` and `N3` keep advertising routes towards
/// `N1` through each other. Their estimates alternate between a finite value growing by two per
/// round and `INF`, and never settle.
pub struct ThreeNodeLine {}

impl ExampleTopology for ThreeNodeLine {
    fn topology() -> Topology {
        Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 1)]).unwrap()
    }

    fn failure_link() -> (usize, usize) {
        (1, 2)
    }
}

/// # IsolatedPair
///
/// Two nodes and a single link.
///
/// ```text
/// N1 --- 5 --- N2
/// ```
///
/// After the link fails, both nodes are honestly disconnected: their estimates towards each
/// other are `INF`, and no count-to-infinity pattern appears.
pub struct IsolatedPair {}

impl ExampleTopology for IsolatedPair {
    fn topology() -> Topology {
        Topology::build(2, &[Link::new(1, 2, 5)]).unwrap()
    }

    fn failure_link() -> (usize, usize) {
        (1, 2)
    }
}

/// # RedundantSquare
///
/// A cycle of four nodes with unit link costs.
///
/// ```text
/// N1 --- 1 --- N2
///  |            |
///  1            1
///  |            |
/// N4 --- 1 --- N3
/// ```
///
/// After the link between `N1` and `N2` fails, both endpoints reroute through the other side of
/// the square within two rounds. The redundancy keeps every estimate honest: no estimate ever
/// grows over one it previously held.
pub struct RedundantSquare {}

impl ExampleTopology for RedundantSquare {
    fn topology() -> Topology {
        Topology::build(
            4,
            &[Link::new(1, 2, 1), Link::new(2, 3, 1), Link::new(3, 4, 1), Link::new(4, 1, 1)],
        )
        .unwrap()
    }

    fn failure_link() -> (usize, usize) {
        (1, 2)
    }
}

/// # WeightedSquare
///
/// A cycle of four nodes in which one link is much more expensive than the others.
///
/// ```text
/// N1 --- 1 --- N2
///  |            |
/// 10            1
///  |            |
/// N4 --- 1 --- N3
/// ```
///
/// After the link between `N1` and `N2` fails, several estimates grow in finite steps before the
/// network settles. It settles on *wrong* values: `N1` keeps believing the three-hop distance of
/// 3 towards `N4`, because the protocol takes `N1`'s own estimate towards its neighbor as the
/// first leg, so the stale value keeps justifying itself even though the path behind it ran over
/// the failed link. A good example that reconvergence and correctness are not the same thing.
pub struct WeightedSquare {}

impl ExampleTopology for WeightedSquare {
    fn topology() -> Topology {
        Topology::build(
            4,
            &[Link::new(1, 2, 1), Link::new(2, 3, 1), Link::new(3, 4, 1), Link::new(4, 1, 10)],
        )
        .unwrap()
    }

    fn failure_link() -> (usize, usize) {
        (1, 2)
    }
}

/// # WeightedTriangle
///
/// Three nodes, fully connected, with one expensive link.
///
/// ```text
///       N2
///      /  \
///     1    1
///    /      \
///  N1 -- 10 - N3
/// ```
///
/// Already during the initial convergence, `N1` lowers its estimate towards `N3` below the
/// direct link cost of 10, because the two-hop path over `N2` is cheaper. After the link between
/// `N1` and `N2` fails, the stale two-hop estimate and the direct link compete.
pub struct WeightedTriangle {}

impl ExampleTopology for WeightedTriangle {
    fn topology() -> Topology {
        Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 1), Link::new(1, 3, 10)])
            .unwrap()
    }

    fn failure_link() -> (usize, usize) {
        (1, 2)
    }
}

/// Builds a line of `num_nodes` nodes with unit link costs.
///
/// ```text
/// N1 --- 1 --- N2 --- 1 --- ... --- 1 --- Nn
/// ```
pub fn line(num_nodes: usize) -> Result<Topology, ValidationError> {
    let mut topology = Topology::new(num_nodes)?;
    for i in 1..num_nodes {
        topology.add_link(Link::new(i, i + 1, 1))?;
    }
    Ok(topology)
}
