// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Source mesh input

use crate::error::{MorphError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// An independently authored input mesh: raw vertex positions plus per-face
/// vertex index lists in the author's winding order.
///
/// Positions are expected in the morph's local space; converting from any
/// other space is the host's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl SourceMesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check that every face index refers to a vertex of this mesh.
    /// `mesh_index` identifies this mesh within the build input for error
    /// reporting.
    pub(crate) fn validate(&self, mesh_index: usize) -> Result<()> {
        for (face, indices) in self.faces.iter().enumerate() {
            for &vertex in indices {
                if vertex >= self.vertices.len() {
                    return Err(MorphError::InvalidSourceVertex {
                        mesh: mesh_index,
                        face,
                        vertex,
                        vertex_count: self.vertices.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
