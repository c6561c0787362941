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

//! Module containing the one-shot scenario runner

use crate::input::Scenario;
use crate::netsim::{Simulation, Topology};
use crate::Error;

/// Runs a complete scenario: builds the topology, performs the initial convergence, and, if the
/// scenario names a link to fail, fails that link and performs the reconvergence. The returned
/// [`Simulation`] holds the reports of all executed phases and the final anomaly classification.
pub fn run_scenario(scenario: &Scenario) -> Result<Simulation, Error> {
    let topology = Topology::build(scenario.num_nodes, &scenario.links)?;
    let mut simulation = Simulation::new(topology);
    simulation.converge()?;
    if let Some((src, dest)) = scenario.failure {
        simulation.fail_link(src, dest)?;
        simulation.reconverge()?;
    }
    Ok(simulation)
}
