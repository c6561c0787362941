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

//! Test the count-to-infinity classification and the rising-estimate inspection of traces.

use crate::netsim::{AnomalyClassifier, Distance, DistanceMatrix, NodeId, DEFAULT_RISING_WINDOW};
use lazy_static::lazy_static;

lazy_static! {
    static ref N1: NodeId = 0.into();
    static ref N2: NodeId = 1.into();
    static ref N3: NodeId = 2.into();
}

#[test]
fn threshold_boundary() {
    let mut matrix = DistanceMatrix::new(3);
    matrix.set(*N1, *N2, Distance::from_cost(99));
    matrix.set(*N1, *N3, Distance::from_cost(100));
    matrix.set(*N2, *N1, Distance::from_cost(250));
    matrix.set(*N2, *N3, Distance::from_cost(1));
    // the estimates of N3 keep their INF entries

    let classifier = AnomalyClassifier::default();
    assert_eq!(classifier.threshold(), 100);

    // flagged are exactly the finite estimates at or above the threshold, in row-major order
    let pairs = classifier.classify(&matrix);
    assert_eq!(pairs.len(), 2);
    assert_eq!((pairs[0].node, pairs[0].dest), (*N1, *N3));
    assert_eq!(pairs[0].distance.value(), Some(100));
    assert_eq!((pairs[1].node, pairs[1].dest), (*N2, *N1));
    assert_eq!(pairs[1].distance.value(), Some(250));
}

#[test]
fn infinite_estimates_are_never_flagged() {
    // a fresh matrix is all INF off the diagonal, an honest statement of disconnection
    let matrix = DistanceMatrix::new(4);
    assert!(AnomalyClassifier::default().classify(&matrix).is_empty());
}

#[test]
fn custom_threshold() {
    let mut matrix = DistanceMatrix::new(2);
    matrix.set(*N1, *N2, Distance::from_cost(12));

    let classifier = AnomalyClassifier::new(10);
    assert_eq!(classifier.threshold(), 10);
    assert_eq!(classifier.classify(&matrix).len(), 1);
    assert!(AnomalyClassifier::default().classify(&matrix).is_empty());
}

#[test]
fn rising_pairs_skip_infinite_snapshots() {
    // (N1, N2) alternates between a growing finite estimate and INF, as the estimates do while
    // counting to infinity. (N2, N1) stays constant.
    let mut trace = Vec::new();
    for round in 0..6u32 {
        let mut matrix = DistanceMatrix::new(2);
        if round % 2 == 0 {
            matrix.set(*N1, *N2, Distance::from_cost(3 + round));
        }
        matrix.set(*N2, *N1, Distance::from_cost(7));
        trace.push(matrix);
    }

    let classifier = AnomalyClassifier::default();
    assert_eq!(classifier.rising_pairs(&trace, DEFAULT_RISING_WINDOW), vec![(*N1, *N2)]);
    assert_eq!(classifier.rising_pairs(&trace, 6), vec![(*N1, *N2)]);

    // a window too short to gather three finite samples reports nothing
    assert!(classifier.rising_pairs(&trace, 3).is_empty());
    assert!(classifier.rising_pairs(&[], DEFAULT_RISING_WINDOW).is_empty());
}
