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

//! Module containing the top-level error enumeration

use crate::input::InputError;
use crate::netsim::{SimulationError, ValidationError};
use thiserror::Error;

/// Top-level error, wrapping everything that can go wrong while loading and simulating a
/// scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation was called in the wrong lifecycle state
    #[error("Simulation Error: {0}")]
    SimulationError(#[from] SimulationError),
    /// The scenario describes an impossible topology or link
    #[error("Validation Error: {0}")]
    ValidationError(#[from] ValidationError),
    /// The scenario description could not be read or parsed
    #[error("Input Error: {0}")]
    InputError(#[from] InputError),
}
