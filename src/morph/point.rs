// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Welded point

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A welded vertex with stable identity.
///
/// Ids are assigned in weld discovery order and are never reused; after the
/// build the id is immutable even though the position may be edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    id: usize,
    position: Point3<f64>,
    incident_faces: Vec<usize>,
}

impl Point {
    pub(crate) fn new(id: usize, position: Point3<f64>) -> Self {
        Self {
            id,
            position,
            incident_faces: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Indices of the faces containing this point. Non-owning
    /// back-reference, in face discovery order.
    pub fn incident_faces(&self) -> &[usize] {
        &self.incident_faces
    }

    pub(crate) fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    pub(crate) fn add_incident_face(&mut self, face: usize) {
        if !self.incident_faces.contains(&face) {
            self.incident_faces.push(face);
        }
    }
}
