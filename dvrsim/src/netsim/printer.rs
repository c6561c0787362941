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

//! # Utility functions for printing the simulation in a human-readable form
//!
//! All formatting functions return plain strings (or one string per line), the `print_*` wrappers
//! write them to stdout. Nodes are always displayed with 1-based ids (`N1`, `N2`, ...), and
//! finite estimates at or above the count-to-infinity threshold are displayed as `100+` to keep
//! the table narrow while they crawl upwards.

use crate::netsim::anomaly::CountToInfinityPair;
use crate::netsim::engine::{Convergence, ConvergenceStatus, DistanceIncrease};
use crate::netsim::routing_table::DistanceMatrix;
use crate::netsim::types::{Distance, NodeId};

/// Formats the header line of an iteration.
pub fn iteration_header(round: usize) -> String {
    format!("=== Iteration {} ===", round)
}

/// Formats a distance matrix as a table, one string per line.
pub fn distance_matrix(matrix: &DistanceMatrix, threshold: u64) -> Vec<String> {
    let num_nodes = matrix.num_nodes();
    let mut lines = Vec::with_capacity(num_nodes + 2);

    let mut header = String::from("Node |");
    for j in 0..num_nodes {
        header.push_str(&format!("{:>5}", format!("N{}", j + 1)));
    }
    lines.push(header);
    lines.push(format!("-----{}", "-----".repeat(num_nodes)));

    for i in 0..num_nodes {
        let node: NodeId = (i as u32).into();
        let mut row = format!("{:<5}|", format!("N{}", i + 1));
        for j in 0..num_nodes {
            let dest: NodeId = (j as u32).into();
            row.push_str(&format!("{:>5}", cell(matrix.get(node, dest), threshold)));
        }
        lines.push(row);
    }
    lines
}

fn cell(distance: Distance, threshold: u64) -> String {
    match distance.value() {
        None => String::from("INF"),
        Some(d) if d >= threshold => format!("{}+", threshold),
        Some(d) => d.to_string(),
    }
}

/// Formats the narration of a single estimate increase.
pub fn distance_increase(increase: &DistanceIncrease) -> String {
    format!(
        "Node {} updated its distance to Node {}:\nPrevious distance: {}\nNew distance: {}",
        increase.node.index() + 1,
        increase.dest.index() + 1,
        increase.previous,
        increase.current
    )
}

/// Formats the one-line summary of a convergence run.
pub fn convergence_summary(convergence: &Convergence) -> String {
    match convergence.status {
        ConvergenceStatus::Converged => {
            format!("Converged after {} iterations.", convergence.rounds)
        }
        ConvergenceStatus::Capped => format!(
            "Stopped after {} iterations - possible count-to-infinity problem.",
            convergence.rounds
        ),
    }
}

/// Formats the final anomaly report, one string per line.
pub fn anomaly_report(pairs: &[CountToInfinityPair], threshold: u64) -> Vec<String> {
    let mut lines = vec![String::from("=== Count-to-Infinity Analysis ===")];
    if pairs.is_empty() {
        lines.push(format!(
            "No count-to-infinity problems detected (threshold: {}).",
            threshold
        ));
    } else {
        lines.push(format!(
            "Nodes showing count-to-infinity pattern (threshold: {}):",
            threshold
        ));
        for pair in pairs {
            lines.push(format!(
                "Node {} to Node {} (Current distance: {})",
                pair.node.index() + 1,
                pair.dest.index() + 1,
                pair.distance
            ));
        }
    }
    lines
}

/// Prints the header and the distance matrix of one iteration.
pub fn print_iteration(round: usize, matrix: &DistanceMatrix, threshold: u64) {
    println!("\n{}\n", iteration_header(round));
    for line in distance_matrix(matrix, threshold) {
        println!("{}", line);
    }
}

/// Prints a full convergence run: the titled starting state, then for every executed round the
/// narration of all estimate increases followed by the resulting matrix, and finally the
/// one-line summary. With `quiet` set, the matrices are suppressed and only the narration and
/// the summary are printed.
pub fn print_convergence(title: &str, convergence: &Convergence, threshold: u64, quiet: bool) {
    if !quiet {
        println!("\n{}:", title);
        if let Some(start) = convergence.trace.first() {
            for line in distance_matrix(start, threshold) {
                println!("{}", line);
            }
        }
    }
    for round in 1..convergence.trace.len() {
        for increase in convergence.increases.iter().filter(|i| i.round == round) {
            println!("\n{}", distance_increase(increase));
        }
        if !quiet {
            print_iteration(round, &convergence.trace[round], threshold);
        }
    }
    println!("\n{}", convergence_summary(convergence));
}

/// Prints the final anomaly report.
pub fn print_anomaly_report(pairs: &[CountToInfinityPair], threshold: u64) {
    println!();
    for line in anomaly_report(pairs, threshold) {
        println!("{}", line);
    }
}
