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

//! # Scenario Input
//!
//! This module parses the plain-text scenario format. A scenario is a whitespace-separated
//! stream of numbers: the node count `N` and the link count `M`, followed by `M` links given as
//! `src dest cost`, optionally followed by the link to fail as `src dest`. Line breaks carry no
//! meaning. For example:
//!
//! ```text
//! 3 2
//! 1 2 1
//! 2 3 1
//! 1 2
//! ```
//!
//! describes a line of three nodes with unit link costs, in which the link between node 1 and
//! node 2 fails after the initial convergence.
//!
//! Parsing only checks that the stream is well-formed. Whether the described nodes and links can
//! actually exist is checked when the [`Topology`](crate::netsim::Topology) is built from the
//! scenario.

use crate::netsim::{Link, LinkCost};
use log::*;
use std::fs::File;
use std::io::Read;
use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Input Error, raised when a scenario description cannot be read or parsed.
#[derive(Error, Debug)]
pub enum InputError {
    /// The scenario file could not be read
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// A token is not a valid number
    #[error("Cannot parse number: {0}")]
    ParseIntError(#[from] ParseIntError),
    /// The token stream ended in the middle of the description
    #[error("Unexpected end of input while reading the {0}")]
    UnexpectedEof(&'static str),
    /// The description is complete, but tokens remain
    #[error("Unexpected trailing token: {0}")]
    TrailingToken(String),
}

/// A parsed scenario description: the topology to simulate, and optionally the link to fail
/// after the initial convergence. All node references are 1-based, exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Number of nodes in the topology
    pub num_nodes: usize,
    /// All links of the topology
    pub links: Vec<Link>,
    /// The link to fail after the initial convergence, if any
    pub failure: Option<(usize, usize)>,
}

/// Parses a scenario from its textual form.
pub fn parse_scenario(content: &str) -> Result<Scenario, InputError> {
    let mut tokens = content.split_whitespace();

    let num_nodes: usize = next_number(&mut tokens, "number of nodes")?;
    let num_links: usize = next_number(&mut tokens, "number of links")?;

    let mut links: Vec<Link> = Vec::with_capacity(num_links);
    for _ in 0..num_links {
        let src: usize = next_number(&mut tokens, "link source")?;
        let dest: usize = next_number(&mut tokens, "link destination")?;
        let cost: LinkCost = next_number(&mut tokens, "link cost")?;
        links.push(Link::new(src, dest, cost));
    }

    let failure = match tokens.next() {
        Some(token) => {
            let src: usize = parse_token(token)?;
            let dest: usize = next_number(&mut tokens, "failure destination")?;
            Some((src, dest))
        }
        None => None,
    };

    if let Some(extra) = tokens.next() {
        return Err(InputError::TrailingToken(extra.to_string()));
    }

    debug!(
        "Parsed a scenario with {} nodes, {} links and {}",
        num_nodes,
        links.len(),
        match failure {
            Some((src, dest)) => format!("a failure of the link {} - {}", src, dest),
            None => String::from("no failure"),
        }
    );

    Ok(Scenario { num_nodes, links, failure })
}

/// Reads and parses a scenario file.
pub fn read_scenario(path: impl AsRef<Path>) -> Result<Scenario, InputError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    parse_scenario(&content)
}

fn next_number<'a, T>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<T, InputError>
where
    T: FromStr<Err = ParseIntError>,
{
    match tokens.next() {
        Some(token) => parse_token(token),
        None => Err(InputError::UnexpectedEof(what)),
    }
}

fn parse_token<T>(token: &str) -> Result<T, InputError>
where
    T: FromStr<Err = ParseIntError>,
{
    Ok(token.parse::<T>()?)
}
