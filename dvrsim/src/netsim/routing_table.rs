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

//! # This module contains the global routing state: the matrix of distance estimates every node
//! currently advertises, together with the adjacency mask telling which nodes exchange those
//! estimates directly.

use crate::netsim::topology::Topology;
use crate::netsim::types::{Distance, NodeId};
use std::iter::repeat;

/// # Distance Matrix
///
/// The N×N matrix of distance estimates, one row per node. `matrix.get(i, j)` is the distance
/// node `i` currently believes to lie between itself and node `j`. The diagonal is always zero,
/// and estimates towards unknown destinations are [`Distance::INF`].
///
/// We use indices to refer to specific nodes (their ID). This works because the simulation never
/// removes a node from the topology, so the generated nodes have monotonically increasing
/// indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    /// Number of nodes, needed for computing the index
    num_nodes: usize,
    /// Flattened 2-dimensional vector of estimates, row by row.
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Creates the matrix of a network where nothing was learned yet: zero on the diagonal and
    /// `INF` everywhere else.
    pub(crate) fn new(num_nodes: usize) -> Self {
        let mut cells: Vec<Distance> =
            repeat(Distance::INF).take(num_nodes * num_nodes).collect();
        for i in 0..num_nodes {
            cells[get_idx(i, i, num_nodes)] = Distance::ZERO;
        }
        Self { num_nodes, cells }
    }

    /// Returns the number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the estimate from `node` to `dest`. Panics if one of the ids lies outside the
    /// matrix.
    pub fn get(&self, node: NodeId, dest: NodeId) -> Distance {
        self.cells[get_idx(node.index(), dest.index(), self.num_nodes)]
    }

    /// Overwrites the estimate from `node` to `dest`
    pub(crate) fn set(&mut self, node: NodeId, dest: NodeId, distance: Distance) {
        let idx = get_idx(node.index(), dest.index(), self.num_nodes);
        self.cells[idx] = distance;
    }
}

/// # Routing Table
///
/// The complete routing state of the network: the [`DistanceMatrix`] holding every node's current
/// estimates, and the adjacency mask recording which node pairs are direct neighbors. The mask
/// decides whose estimates a node may consult when it recomputes its own; the failure of a link
/// clears the two mask entries of that pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    /// Number of nodes, needed for computing the index
    num_nodes: usize,
    /// The current distance estimates of every node
    distances: DistanceMatrix,
    /// Flattened 2-dimensional adjacency mask. `neighbors[i * num_nodes + j]` is true if and only
    /// if nodes `i` and `j` are directly linked.
    neighbors: Vec<bool>,
}

impl RoutingTable {
    /// Derives the initial routing table of a topology: every node knows the distance to itself
    /// (zero) and the cost of its direct links; everything else is `INF`.
    pub fn from_topology(topology: &Topology) -> Self {
        let num_nodes = topology.num_nodes();
        let mut distances = DistanceMatrix::new(num_nodes);
        let mut neighbors: Vec<bool> = repeat(false).take(num_nodes * num_nodes).collect();

        for (a, b, cost) in topology.links() {
            distances.set(a, b, Distance::from_cost(cost));
            distances.set(b, a, Distance::from_cost(cost));
            neighbors[get_idx(a.index(), b.index(), num_nodes)] = true;
            neighbors[get_idx(b.index(), a.index(), num_nodes)] = true;
        }

        Self { num_nodes, distances, neighbors }
    }

    /// Returns the number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns a reference to the current distance matrix
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns the estimate from `node` to `dest`
    pub fn distance(&self, node: NodeId, dest: NodeId) -> Distance {
        self.distances.get(node, dest)
    }

    /// Returns `true` if and only if the two nodes are direct neighbors
    pub fn is_neighbor(&self, node: NodeId, other: NodeId) -> bool {
        self.neighbors[get_idx(node.index(), other.index(), self.num_nodes)]
    }

    /// Returns an iterator over all direct neighbors of a node
    pub fn neighbors_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let row = node.index() * self.num_nodes;
        self.neighbors[row..row + self.num_nodes]
            .iter()
            .enumerate()
            .filter(|(_, linked)| **linked)
            .map(|(other, _)| NodeId::new(other))
    }

    /// Removes the direct connection between two nodes: both distance entries become `INF`, and
    /// both mask entries are cleared. The estimates of third parties are left untouched, they only
    /// decay (or inflate) through subsequent rounds.
    pub(crate) fn disconnect(&mut self, a: NodeId, b: NodeId) {
        self.distances.set(a, b, Distance::INF);
        self.distances.set(b, a, Distance::INF);
        self.neighbors[get_idx(a.index(), b.index(), self.num_nodes)] = false;
        self.neighbors[get_idx(b.index(), a.index(), self.num_nodes)] = false;
    }

    /// Replaces the whole distance matrix at once (the commit at the end of a synchronous round)
    pub(crate) fn commit_distances(&mut self, distances: DistanceMatrix) {
        self.distances = distances;
    }
}

fn get_idx(node: usize, dest: usize, num_nodes: usize) -> usize {
    node * num_nodes + dest
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::netsim::topology::{Link, Topology};

    #[test]
    fn initial_table() {
        let n1: NodeId = 0.into();
        let n2: NodeId = 1.into();
        let n3: NodeId = 2.into();
        let topology =
            Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 4)]).unwrap();
        let table = RoutingTable::from_topology(&topology);

        assert_eq!(table.distance(n1, n1), Distance::ZERO);
        assert_eq!(table.distance(n2, n2), Distance::ZERO);
        assert_eq!(table.distance(n3, n3), Distance::ZERO);
        assert_eq!(table.distance(n1, n2).value(), Some(1));
        assert_eq!(table.distance(n2, n1).value(), Some(1));
        assert_eq!(table.distance(n2, n3).value(), Some(4));
        assert_eq!(table.distance(n1, n3), Distance::INF);

        assert!(table.is_neighbor(n1, n2));
        assert!(table.is_neighbor(n2, n3));
        assert!(!table.is_neighbor(n1, n3));
        assert_eq!(table.neighbors_of(n2).collect::<Vec<_>>(), vec![n1, n3]);
    }

    #[test]
    fn duplicate_links_keep_the_last_cost() {
        let n1: NodeId = 0.into();
        let n2: NodeId = 1.into();
        let topology =
            Topology::build(2, &[Link::new(1, 2, 3), Link::new(2, 1, 7)]).unwrap();
        assert_eq!(topology.graph().edge_count(), 1);
        let table = RoutingTable::from_topology(&topology);
        assert_eq!(table.distance(n1, n2).value(), Some(7));
        assert_eq!(table.distance(n2, n1).value(), Some(7));
    }

    #[test]
    fn disconnect_clears_both_directions() {
        let n1: NodeId = 0.into();
        let n2: NodeId = 1.into();
        let n3: NodeId = 2.into();
        let topology =
            Topology::build(3, &[Link::new(1, 2, 1), Link::new(2, 3, 1)]).unwrap();
        let mut table = RoutingTable::from_topology(&topology);

        table.disconnect(n1, n2);

        assert_eq!(table.distance(n1, n2), Distance::INF);
        assert_eq!(table.distance(n2, n1), Distance::INF);
        assert!(!table.is_neighbor(n1, n2));
        assert!(!table.is_neighbor(n2, n1));
        // the other link is untouched
        assert!(table.is_neighbor(n2, n3));
        assert_eq!(table.distance(n2, n3).value(), Some(1));
        assert_eq!(table.neighbors_of(n1).count(), 0);
    }
}
