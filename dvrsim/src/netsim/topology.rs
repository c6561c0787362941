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

//! # Topology
//!
//! This module contains the validated network topology: a set of nodes, numbered 1 to N at the
//! boundary, and a set of undirected, weighted links between them. All user-facing operations
//! accept 1-based node indices and translate them into [`NodeId`]s; everything past this module
//! works on `NodeId`s only.

use crate::netsim::types::{DvrNetwork, LinkCost, NodeId, ValidationError};
use log::*;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

/// A single bidirectional link of a scenario description. Both endpoints are 1-based node
/// indices, exactly as they appear in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// First endpoint (1-based)
    pub src: usize,
    /// Second endpoint (1-based)
    pub dest: usize,
    /// Cost of traversing the link (in either direction)
    pub cost: LinkCost,
}

impl Link {
    /// Creates a new link between two 1-based node indices
    pub fn new(src: usize, dest: usize, cost: LinkCost) -> Self {
        Self { src, dest, cost }
    }
}

/// # Topology
///
/// The validated network over which the routing protocol is simulated. A topology is built from a
/// node count and a list of [`Link`]s; every link is checked before it is inserted, so an invalid
/// scenario description is rejected with a [`ValidationError`] naming the offending field instead
/// of corrupting the simulation later on.
///
/// Listing the same node pair twice is allowed and keeps the cost given last.
#[derive(Debug, Clone)]
pub struct Topology {
    /// The underlying undirected graph
    net: DvrNetwork,
    /// Number of nodes
    num_nodes: usize,
}

impl Topology {
    /// Creates a topology with `num_nodes` nodes and no links
    pub fn new(num_nodes: usize) -> Result<Self, ValidationError> {
        if num_nodes == 0 {
            return Err(ValidationError::NoNodes);
        }
        let mut net = DvrNetwork::with_capacity(num_nodes, 0);
        for _ in 0..num_nodes {
            net.add_node(());
        }
        Ok(Self { net, num_nodes })
    }

    /// Creates a topology with `num_nodes` nodes and the given links
    pub fn build(num_nodes: usize, links: &[Link]) -> Result<Self, ValidationError> {
        let mut topology = Self::new(num_nodes)?;
        for link in links {
            topology.add_link(*link)?;
        }
        debug!("Built a topology with {} nodes and {} links", num_nodes, topology.net.edge_count());
        Ok(topology)
    }

    /// Adds a link between two nodes. Both endpoints must lie in `1..=num_nodes` and must differ.
    /// If the two nodes are already linked, the new cost replaces the old one.
    pub fn add_link(&mut self, link: Link) -> Result<(), ValidationError> {
        let src = self.node_for(link.src, "link source")?;
        let dest = self.node_for(link.dest, "link destination")?;
        if src == dest {
            return Err(ValidationError::SelfLoop { node: link.src });
        }
        self.net.update_edge(src, dest, link.cost);
        Ok(())
    }

    /// Translates a 1-based node index into the [`NodeId`] of that node
    pub fn node(&self, index: usize) -> Result<NodeId, ValidationError> {
        self.node_for(index, "node")
    }

    /// Same as [`Topology::node`], but names the field holding the index in the error.
    pub(crate) fn node_for(
        &self,
        index: usize,
        field: &'static str,
    ) -> Result<NodeId, ValidationError> {
        if index == 0 || index > self.num_nodes {
            Err(ValidationError::NodeOutOfRange { field, index, num_nodes: self.num_nodes })
        } else {
            Ok(NodeId::new(index - 1))
        }
    }

    /// Removes the direct link between two nodes, or returns an error if the nodes are not
    /// directly linked.
    pub(crate) fn remove_link(&mut self, src: NodeId, dest: NodeId) -> Result<(), ValidationError> {
        let edge = self.net.find_edge(src, dest).ok_or(ValidationError::NoSuchLink {
            src: src.index() + 1,
            dest: dest.index() + 1,
        })?;
        let _ = self.net.remove_edge(edge);
        Ok(())
    }

    /// Returns the number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns a reference to the underlying graph
    pub fn graph(&self) -> &DvrNetwork {
        &self.net
    }

    /// Returns `true` if and only if the two nodes are directly linked
    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.net.find_edge(a, b).is_some()
    }

    /// Returns an iterator over all links, as `(NodeId, NodeId, LinkCost)` triples
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId, LinkCost)> + '_ {
        self.net.edge_references().map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }
}
