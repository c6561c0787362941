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

use dvrsim::example_topologies::*;
use dvrsim::input::{parse_scenario, read_scenario, Scenario};
use dvrsim::netsim::{printer, Simulation, Topology};

use clap::{Parser, Subcommand, ValueEnum};
use log::*;
use std::error::Error;
use std::io::Read;

/// Simulate distance-vector routing and the count-to-infinity problem
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineArguments {
    /// Suppress the distance matrices, print only the narration and the summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Overwrite the maximum number of rounds per convergence run
    #[arg(long, global = true, value_name = "ROUNDS")]
    max_rounds: Option<usize>,

    #[command(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Simulate a scenario file (use `-` to read the scenario from stdin)
    Run {
        /// The scenario file
        file: String,

        /// Overwrite the link to fail (two 1-based node ids)
        #[arg(long, num_args = 2, value_names = ["SRC", "DEST"])]
        fail: Option<Vec<usize>>,
    },
    /// Simulate one of the prepared example topologies
    Example {
        /// The example topology
        #[arg(value_enum)]
        name: ExampleName,

        /// Number of nodes (only used by the line example)
        #[arg(long, default_value_t = 5, value_name = "N")]
        nodes: usize,

        /// Overwrite the link to fail (two 1-based node ids)
        #[arg(long, num_args = 2, value_names = ["SRC", "DEST"])]
        fail: Option<Vec<usize>>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ExampleName {
    /// Three nodes in a line, the smallest topology counting to infinity
    ThreeNodeLine,
    /// Two nodes whose only link fails
    IsolatedPair,
    /// A square with unit costs, rerouting cleanly over its redundant side
    RedundantSquare,
    /// A square with one expensive link, settling on stale estimates
    WeightedSquare,
    /// A triangle with one expensive link
    WeightedTriangle,
    /// A line of N nodes with unit costs
    Line,
}

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    match args.cmd {
        MainCommand::Run { file, fail } => {
            let scenario = load_scenario(&file)?;
            debug!("Loaded the scenario: {:?}", scenario);
            let failure = fail.map(|pair| (pair[0], pair[1])).or(scenario.failure);
            let topology = Topology::build(scenario.num_nodes, &scenario.links)?;
            simulate(topology, failure, args.max_rounds, args.quiet)
        }
        MainCommand::Example { name, nodes, fail } => {
            let (topology, default_failure) = example_topology(name, nodes)?;
            let failure = fail.map(|pair| (pair[0], pair[1])).unwrap_or(default_failure);
            simulate(topology, Some(failure), args.max_rounds, args.quiet)
        }
    }
}

fn load_scenario(file: &str) -> Result<Scenario, Box<dyn Error>> {
    if file == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(parse_scenario(&content)?)
    } else {
        Ok(read_scenario(file)?)
    }
}

fn example_topology(
    name: ExampleName,
    nodes: usize,
) -> Result<(Topology, (usize, usize)), Box<dyn Error>> {
    Ok(match name {
        ExampleName::ThreeNodeLine => (ThreeNodeLine::topology(), ThreeNodeLine::failure_link()),
        ExampleName::IsolatedPair => (IsolatedPair::topology(), IsolatedPair::failure_link()),
        ExampleName::RedundantSquare => {
            (RedundantSquare::topology(), RedundantSquare::failure_link())
        }
        ExampleName::WeightedSquare => {
            (WeightedSquare::topology(), WeightedSquare::failure_link())
        }
        ExampleName::WeightedTriangle => {
            (WeightedTriangle::topology(), WeightedTriangle::failure_link())
        }
        ExampleName::Line => (line(nodes)?, (1, 2)),
    })
}

fn simulate(
    topology: Topology,
    failure: Option<(usize, usize)>,
    max_rounds: Option<usize>,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    let mut simulation = Simulation::new(topology);
    simulation.set_round_cap(max_rounds);
    let threshold = simulation.anomaly_threshold();

    println!("=== Initial Network State ===");
    simulation.converge()?;
    if let Some(initial) = simulation.initial_convergence() {
        printer::print_convergence("Initial State", initial, threshold, quiet);
    }

    if let Some((src, dest)) = failure {
        println!("\n=== Simulating Link Failure between Node {} and Node {} ===", src, dest);
        simulation.fail_link(src, dest)?;
        simulation.reconverge()?;
        if let Some(reconvergence) = simulation.reconvergence() {
            printer::print_convergence("State after link failure", reconvergence, threshold, quiet);
        }
        printer::print_anomaly_report(simulation.anomalies(), threshold);
    }

    Ok(())
}
