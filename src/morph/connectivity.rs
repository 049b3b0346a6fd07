// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Connectivity graph derived from face edges

use std::collections::VecDeque;

use ahash::AHashSet;

use super::{Face, Morph};
use crate::error::Result;

/// Undirected adjacency derived from the faces: two points are directly
/// connected iff they are edge-adjacent in at least one face. Rebuilt from
/// scratch whenever the owning morph mutates; never outlives it.
#[derive(Debug)]
pub(crate) struct Adjacency {
    edges: AHashSet<(usize, usize)>,
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub(crate) fn from_faces(point_count: usize, faces: &[Face]) -> Self {
        let mut edges = AHashSet::new();
        let mut neighbors = vec![Vec::new(); point_count];
        for face in faces {
            for (a, b) in face.edges() {
                if edges.insert(canonical(a, b)) {
                    neighbors[a].push(b);
                    neighbors[b].push(a);
                }
            }
        }
        Self { edges, neighbors }
    }

    pub(crate) fn contains(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&canonical(a, b))
    }

    pub(crate) fn neighbors(&self, id: usize) -> &[usize] {
        &self.neighbors[id]
    }
}

/// Canonical undirected edge representation (min, max).
fn canonical(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Morph {
    /// Whether `a` and `b` are consecutive (including wrap-around) in the
    /// point list of at least one face. Symmetric; O(1) amortized via the
    /// cached edge set.
    pub fn is_directly_connected(&self, a: usize, b: usize) -> Result<bool> {
        self.ensure_point(a)?;
        self.ensure_point(b)?;
        Ok(self.with_adjacency(|adjacency| adjacency.contains(a, b)))
    }

    /// Breadth-first reachability from `a` to `b` over direct connections.
    ///
    /// Reflexive and symmetric; the visited set guarantees termination on
    /// the cyclic graphs mesh topology produces.
    pub fn has_path(&self, a: usize, b: usize) -> Result<bool> {
        self.ensure_point(a)?;
        self.ensure_point(b)?;
        if a == b {
            return Ok(true);
        }

        Ok(self.with_adjacency(|adjacency| {
            let mut visited = vec![false; self.points.len()];
            let mut frontier = VecDeque::new();
            visited[a] = true;
            frontier.push_back(a);

            while let Some(current) = frontier.pop_front() {
                for &next in adjacency.neighbors(current) {
                    if next == b {
                        return true;
                    }
                    if !visited[next] {
                        visited[next] = true;
                        frontier.push_back(next);
                    }
                }
            }
            false
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_from_triangle() {
        let faces = vec![Face::new(vec![0, 1, 2])];
        let adjacency = Adjacency::from_faces(3, &faces);

        assert!(adjacency.contains(0, 1));
        assert!(adjacency.contains(1, 0));
        assert!(adjacency.contains(1, 2));
        assert!(adjacency.contains(2, 0));
        assert_eq!(adjacency.neighbors(0), &[1, 2]);
    }

    #[test]
    fn test_shared_edge_is_recorded_once() {
        let faces = vec![Face::new(vec![0, 1, 2]), Face::new(vec![2, 1, 3])];
        let adjacency = Adjacency::from_faces(4, &faces);

        assert!(adjacency.contains(1, 2));
        // The shared edge contributes one neighbor entry per endpoint.
        assert_eq!(adjacency.neighbors(1).iter().filter(|&&n| n == 2).count(), 1);
    }

    #[test]
    fn test_isolated_points_are_unconnected() {
        let faces = vec![Face::new(vec![0, 1, 2])];
        let adjacency = Adjacency::from_faces(5, &faces);

        assert!(!adjacency.contains(3, 4));
        assert!(adjacency.neighbors(3).is_empty());
    }
}
