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

//! Test the convergence engine: fixed points on known topologies, shortest paths against
//! dijkstra on random connected graphs, the round cap, and the recording of estimate increases.

use crate::example_topologies::{
    line, ExampleTopology, ThreeNodeLine, WeightedSquare, WeightedTriangle,
};
use crate::netsim::{
    ConvergenceEngine, ConvergenceStatus, Distance, DistanceIncrease, Link, NodeId, RoutingTable,
    Topology, UpdatePolicy,
};
use lazy_static::lazy_static;
use petgraph::algo::dijkstra;
use petgraph::visit::EdgeRef;
use rand::prelude::*;

lazy_static! {
    static ref N1: NodeId = 0.into();
    static ref N2: NodeId = 1.into();
    static ref N3: NodeId = 2.into();
    static ref N4: NodeId = 3.into();
}

#[test]
fn line_converges() {
    for n in 2..=8usize {
        let topology = line(n).unwrap();
        let mut table = RoutingTable::from_topology(&topology);
        let convergence = ConvergenceEngine::new().run(&mut table, UpdatePolicy::ImproveOnly);

        // the longest shortest path has n - 1 hops, learned in round n - 2, confirmed in the
        // quiet round n - 1
        assert_eq!(convergence.status, ConvergenceStatus::Converged);
        assert_eq!(convergence.rounds, n - 1);
        assert!(convergence.increases.is_empty());

        for i in 0..n {
            for j in 0..n {
                let node: NodeId = (i as u32).into();
                let dest: NodeId = (j as u32).into();
                let expected = if i > j { i - j } else { j - i };
                assert_eq!(table.distance(node, dest).value(), Some(expected as u64));
            }
        }
    }
}

#[test]
fn failure_free_estimates_never_grow() {
    for topology in vec![WeightedTriangle::topology(), line(6).unwrap()] {
        let num_nodes = topology.num_nodes();
        let mut table = RoutingTable::from_topology(&topology);
        let convergence = ConvergenceEngine::new().run(&mut table, UpdatePolicy::ImproveOnly);
        assert_eq!(convergence.status, ConvergenceStatus::Converged);
        assert!(convergence.increases.is_empty());

        for pair in convergence.trace.windows(2) {
            for i in 0..num_nodes {
                for j in 0..num_nodes {
                    let node: NodeId = (i as u32).into();
                    let dest: NodeId = (j as u32).into();
                    assert!(pair[1].get(node, dest) <= pair[0].get(node, dest));
                    // symmetric links keep the estimates symmetric
                    assert_eq!(pair[1].get(node, dest), pair[1].get(dest, node));
                }
            }
        }
    }
}

#[test]
fn initial_convergence_beats_the_expensive_link() {
    //       N2
    //      /  \
    //     1    1
    //    /      \
    //  N1 -- 10 - N3
    let mut table = RoutingTable::from_topology(&WeightedTriangle::topology());
    let convergence = ConvergenceEngine::new().run(&mut table, UpdatePolicy::ImproveOnly);
    assert_eq!(convergence.rounds, 2);

    // the estimate drops below the cost of the direct link
    assert_eq!(table.distance(*N1, *N3).value(), Some(2));
    assert_eq!(table.distance(*N3, *N1).value(), Some(2));
}

#[test]
fn converged_estimates_match_dijkstra() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let num_nodes: usize = rng.gen_range(2, 12);
        let mut topology = Topology::new(num_nodes).unwrap();
        // a random spanning tree keeps the graph connected, ...
        for i in 2..=num_nodes {
            let parent = rng.gen_range(1, i);
            topology.add_link(Link::new(parent, i, rng.gen_range(1, 10))).unwrap();
        }
        // ... and a few extra links create alternative paths
        for _ in 0..num_nodes {
            let a = rng.gen_range(1, num_nodes + 1);
            let b = rng.gen_range(1, num_nodes + 1);
            if a != b {
                topology.add_link(Link::new(a, b, rng.gen_range(1, 10))).unwrap();
            }
        }

        let mut table = RoutingTable::from_topology(&topology);
        let convergence = ConvergenceEngine::new().run(&mut table, UpdatePolicy::ImproveOnly);
        assert_eq!(convergence.status, ConvergenceStatus::Converged);
        assert!(convergence.rounds < num_nodes);

        for i in 0..num_nodes {
            let node: NodeId = (i as u32).into();
            let oracle = dijkstra(topology.graph(), node, None, |edge| *edge.weight() as u64);
            for j in 0..num_nodes {
                let dest: NodeId = (j as u32).into();
                assert_eq!(table.distance(node, dest).value(), oracle.get(&dest).copied());
            }
        }
    }
}

#[test]
fn extra_round_after_fixed_point() {
    let mut table = RoutingTable::from_topology(&WeightedSquare::topology());
    let engine = ConvergenceEngine::new();
    let convergence = engine.run(&mut table, UpdatePolicy::ImproveOnly);
    assert_eq!(convergence.status, ConvergenceStatus::Converged);

    // the fixed point is idempotent, even under the policy that allows estimates to grow
    let before = table.distances().clone();
    let outcome = engine.run_round(&mut table, UpdatePolicy::AnyChange, 1);
    assert!(!outcome.changed);
    assert!(outcome.increases.is_empty());
    assert_eq!(table.distances(), &before);

    // a full re-run confirms it in a single quiet round
    let again = engine.run(&mut table, UpdatePolicy::ImproveOnly);
    assert_eq!(again.rounds, 1);
    assert_eq!(again.status, ConvergenceStatus::Converged);
}

#[test]
fn round_cap_is_honored() {
    let mut table = RoutingTable::from_topology(&ThreeNodeLine::topology());
    let mut engine = ConvergenceEngine::new();
    assert_eq!(engine.round_cap(), 100);
    engine.run(&mut table, UpdatePolicy::ImproveOnly);

    // after losing the link to N1, N2 and N3 chase each other's estimates forever
    table.disconnect(*N1, *N2);
    engine.set_round_cap(Some(10));
    let convergence = engine.run(&mut table, UpdatePolicy::AnyChange);
    assert_eq!(convergence.status, ConvergenceStatus::Capped);
    assert_eq!(convergence.rounds, 10);
    assert_eq!(convergence.trace.len(), 11);

    engine.set_round_cap(None);
    assert_eq!(engine.round_cap(), 100);
}

#[test]
fn cap_takes_priority_over_the_quiet_round() {
    // the line converges in exactly two rounds, the second one being quiet. With the cap at 2,
    // the run is reported as capped even though nothing changed in the final round.
    let mut table = RoutingTable::from_topology(&ThreeNodeLine::topology());
    let mut engine = ConvergenceEngine::new();
    engine.set_round_cap(Some(2));
    let convergence = engine.run(&mut table, UpdatePolicy::ImproveOnly);
    assert_eq!(convergence.rounds, 2);
    assert_eq!(convergence.status, ConvergenceStatus::Capped);
}

#[test]
fn worsened_estimates_are_recorded() {
    let mut table = RoutingTable::from_topology(&WeightedSquare::topology());
    let engine = ConvergenceEngine::new();
    let initial = engine.run(&mut table, UpdatePolicy::ImproveOnly);
    assert_eq!(initial.rounds, 3);
    assert_eq!(table.distance(*N1, *N4).value(), Some(3));

    table.disconnect(*N1, *N2);
    let convergence = engine.run(&mut table, UpdatePolicy::AnyChange);
    assert_eq!(convergence.status, ConvergenceStatus::Converged);
    assert_eq!(convergence.rounds, 3);

    // only increases between finite estimates are recorded, never the drop from INF after the
    // failed endpoints relearn a path towards each other
    assert_eq!(
        convergence.increases,
        vec![
            DistanceIncrease {
                round: 1,
                node: *N1,
                dest: *N3,
                previous: Distance::from_cost(2),
                current: Distance::from_cost(4),
            },
            DistanceIncrease {
                round: 1,
                node: *N3,
                dest: *N1,
                previous: Distance::from_cost(2),
                current: Distance::from_cost(4),
            },
            DistanceIncrease {
                round: 2,
                node: *N2,
                dest: *N1,
                previous: Distance::from_cost(3),
                current: Distance::from_cost(5),
            },
        ]
    );

    // the square settles, but on stale values: N1 keeps the three-hop estimate towards N4 that
    // ran over the failed link, the stale first-leg estimate justifies itself
    assert_eq!(table.distance(*N1, *N4).value(), Some(3));
    assert_eq!(table.distance(*N1, *N2).value(), Some(5));
}
