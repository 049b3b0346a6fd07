// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Mesh regeneration for the host renderer

use log::debug;
use nalgebra::Vector3;

use super::Morph;
use crate::geometry::{Mesh, Triangle, Vertex};

impl Morph {
    /// Re-emit the morph as a renderable triangle mesh.
    ///
    /// Every face is fan-triangulated in its own plane and vertex normals
    /// are recomputed from the current point positions. Output vertices are
    /// in point-id order, one per welded point. Pure function of the
    /// current state; the result is cached until the morph mutates.
    pub fn to_mesh(&self) -> Mesh {
        self.with_derived(|derived| {
            derived
                .render_mesh
                .get_or_insert_with(|| self.triangulate())
                .clone()
        })
    }

    fn triangulate(&self) -> Mesh {
        let triangle_count: usize = self
            .faces
            .iter()
            .map(|face| face.len().saturating_sub(2))
            .sum();
        let mut mesh = Mesh::with_capacity(self.points.len(), triangle_count);

        for point in &self.points {
            mesh.add_vertex(Vertex::new(point.position(), Vector3::zeros()));
        }
        for face in &self.faces {
            let ids = face.points();
            for i in 1..ids.len() - 1 {
                mesh.add_triangle(Triangle::new([ids[0], ids[i], ids[i + 1]]));
            }
        }

        mesh.recompute_normals();
        debug!(
            "triangulated {} faces into {} triangles over {} vertices",
            self.faces.len(),
            mesh.triangle_count(),
            mesh.vertex_count()
        );
        mesh
    }
}
