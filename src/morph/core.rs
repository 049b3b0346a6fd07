// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Morph orchestrator: welding build, point edits, and derived-state caching

use std::cell::RefCell;

use ahash::AHashMap;
use log::debug;
use nalgebra::{Point3, Vector3};

use super::connectivity::Adjacency;
use super::{Face, Point};
use crate::error::{MorphError, Result};
use crate::geometry::{Mesh, SourceMesh};
use crate::utils::math::polygon_normal;

/// Default weld tolerance: raw vertices closer than this are merged into
/// one point. Scene units; editor-authored geometry sits well above it.
pub const WELD_EPSILON: f64 = 1e-4;

/// Below this unnormalized Newell-normal length a polygon has no usable
/// plane (collinear or coincident points).
pub(crate) const AREA_EPSILON: f64 = 1e-10;

/// Derived structures, lazily rebuilt when the owning morph's generation
/// moves past the one they were computed for.
#[derive(Debug, Default)]
pub(crate) struct DerivedState {
    pub(crate) generation: u64,
    pub(crate) adjacency: Option<Adjacency>,
    pub(crate) perimeters: AHashMap<usize, Vec<usize>>,
    pub(crate) render_mesh: Option<Mesh>,
}

/// Unified point-and-face topology welded together from one or more source
/// meshes.
///
/// A morph exclusively owns its points and faces; they have no existence
/// outside it and are never shared between instances. All operations are
/// synchronous and single-threaded, matching the host engine's scene-update
/// model.
pub struct Morph {
    pub(crate) points: Vec<Point>,
    pub(crate) faces: Vec<Face>,
    weld_epsilon: f64,
    generation: u64,
    derived: RefCell<DerivedState>,
}

impl std::fmt::Debug for Morph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Morph")
            .field("point_count", &self.points.len())
            .field("face_count", &self.faces.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Morph {
    /// Weld one or more source meshes into a unified topology using the
    /// default tolerance.
    pub fn build(sources: &[SourceMesh]) -> Result<Self> {
        Self::build_with_epsilon(sources, WELD_EPSILON)
    }

    /// Weld with an explicit tolerance.
    ///
    /// Raw vertices are processed in a stable order (source mesh order,
    /// then in-mesh vertex order) and merged onto the first seen point
    /// within `epsilon`, so repeated builds on identical input assign
    /// identical ids. Either the whole input is committed or the build
    /// fails without producing a morph.
    pub fn build_with_epsilon(sources: &[SourceMesh], epsilon: f64) -> Result<Self> {
        for (mesh_index, source) in sources.iter().enumerate() {
            source.validate(mesh_index)?;
        }

        let raw_vertex_count: usize = sources.iter().map(SourceMesh::vertex_count).sum();
        let mut points: Vec<Point> = Vec::with_capacity(raw_vertex_count);
        let mut faces: Vec<Face> = Vec::new();

        for (mesh_index, source) in sources.iter().enumerate() {
            // Map each raw vertex onto the first seen point within tolerance,
            // creating a new point otherwise.
            let mut welded: Vec<usize> = Vec::with_capacity(source.vertices.len());
            for position in &source.vertices {
                let existing = points
                    .iter()
                    .find(|p| (*position - p.position()).norm() < epsilon)
                    .map(Point::id);
                let id = match existing {
                    Some(id) => id,
                    None => {
                        let id = points.len();
                        points.push(Point::new(id, *position));
                        id
                    }
                };
                welded.push(id);
            }

            for indices in &source.faces {
                let ids = collapse_consecutive(indices.iter().map(|&i| welded[i]).collect());
                let distinct = distinct_count(&ids);
                if distinct < 3 {
                    return Err(MorphError::DegenerateFace {
                        face: faces.len(),
                        detail: format!(
                            "source mesh {mesh_index}: only {distinct} distinct points after welding"
                        ),
                    });
                }
                faces.push(Face::new(ids));
            }
        }

        for (face_index, face) in faces.iter().enumerate() {
            for &id in face.points() {
                points[id].add_incident_face(face_index);
            }
        }

        debug!(
            "welded {} raw vertices from {} meshes into {} points, {} faces",
            raw_vertex_count,
            sources.len(),
            points.len(),
            faces.len()
        );

        Ok(Self {
            points,
            faces,
            weld_epsilon: epsilon,
            generation: 0,
            derived: RefCell::new(DerivedState::default()),
        })
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Tolerance the morph was welded with.
    pub fn weld_epsilon(&self) -> f64 {
        self.weld_epsilon
    }

    /// Monotonic mutation counter. Changes whenever the morph is edited,
    /// so hosts can detect staleness of anything they derived from it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Iterate over all points in id order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Best-effort point lookup; `None` for unknown ids.
    pub fn get_point(&self, id: usize) -> Option<&Point> {
        self.points.get(id)
    }

    /// Face lookup by index.
    pub fn face(&self, face: usize) -> Option<&Face> {
        self.faces.get(face)
    }

    /// Iterate over all faces in input order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }

    /// Move an existing point.
    ///
    /// Positions may diverge freely after the build; the edit never
    /// re-runs welding, so identity and connectivity are unaffected.
    pub fn set_point(&mut self, id: usize, position: Point3<f64>) -> Result<()> {
        let point = self
            .points
            .get_mut(id)
            .ok_or(MorphError::UnknownPoint(id))?;
        point.set_position(position);
        self.generation += 1;
        Ok(())
    }

    /// Reverse the winding of every face, inverting each derived normal.
    /// Applying it twice restores the original orderings.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
        self.generation += 1;
    }

    /// Unit normal of a face, derived from its winding and the current
    /// point positions.
    pub fn face_normal(&self, face: usize) -> Result<Vector3<f64>> {
        let normal = self.face_area_normal(face)?;
        let norm = normal.norm();
        if norm <= AREA_EPSILON {
            return Err(MorphError::DegenerateFace {
                face,
                detail: "zero-area polygon has no normal".to_string(),
            });
        }
        Ok(normal / norm)
    }

    /// Unnormalized Newell normal of a face; zero length means the face's
    /// points are collinear or coincident.
    pub(crate) fn face_area_normal(&self, face: usize) -> Result<Vector3<f64>> {
        let f = self.faces.get(face).ok_or(MorphError::UnknownFace(face))?;
        let positions: Vec<Point3<f64>> = f
            .points()
            .iter()
            .map(|&id| self.points[id].position())
            .collect();
        Ok(polygon_normal(&positions))
    }

    pub(crate) fn ensure_point(&self, id: usize) -> Result<()> {
        if id < self.points.len() {
            Ok(())
        } else {
            Err(MorphError::UnknownPoint(id))
        }
    }

    /// Run `f` against the derived-state cache, resetting it first if the
    /// morph has been mutated since the cache was filled.
    pub(crate) fn with_derived<T>(&self, f: impl FnOnce(&mut DerivedState) -> T) -> T {
        let mut derived = self.derived.borrow_mut();
        if derived.generation != self.generation {
            *derived = DerivedState {
                generation: self.generation,
                ..DerivedState::default()
            };
        }
        f(&mut derived)
    }

    pub(crate) fn with_adjacency<T>(&self, f: impl FnOnce(&Adjacency) -> T) -> T {
        self.with_derived(|derived| {
            let adjacency = derived
                .adjacency
                .get_or_insert_with(|| Adjacency::from_faces(self.points.len(), &self.faces));
            f(adjacency)
        })
    }
}

/// Collapse consecutive duplicate ids, including the wrap-around pair,
/// left behind when welding merges neighboring vertices of one face.
fn collapse_consecutive(mut ids: Vec<usize>) -> Vec<usize> {
    ids.dedup();
    while ids.len() > 1 && ids.first() == ids.last() {
        ids.pop();
    }
    ids
}

fn distinct_count(ids: &[usize]) -> usize {
    let mut seen: Vec<usize> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> SourceMesh {
        SourceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_build_single_square() {
        let morph = Morph::build(&[unit_square()]).unwrap();
        assert_eq!(morph.point_count(), 4);
        assert_eq!(morph.face_count(), 1);
        assert_eq!(morph.face(0).unwrap().points(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_incident_faces_are_back_references() {
        let morph = Morph::build(&[unit_square()]).unwrap();
        for point in morph.points() {
            assert_eq!(point.incident_faces(), &[0]);
        }
    }

    #[test]
    fn test_welded_pair_collapses_quad_to_triangle() {
        // The last vertex sits within tolerance of the third, so the quad
        // welds down to a triangle rather than failing.
        let source = SourceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 1.0 + 1e-5, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        );
        let morph = Morph::build(&[source]).unwrap();
        assert_eq!(morph.point_count(), 3);
        assert_eq!(morph.face(0).unwrap().points(), &[0, 1, 2]);
    }

    #[test]
    fn test_degenerate_face_fails_build() {
        // Vertex 2 welds onto vertex 0, leaving only two distinct points.
        let source = SourceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 5e-5),
            ],
            vec![vec![0, 1, 2]],
        );
        let err = Morph::build(&[source]).unwrap_err();
        assert!(matches!(err, MorphError::DegenerateFace { face: 0, .. }));
    }

    #[test]
    fn test_set_point_bumps_generation() {
        let mut morph = Morph::build(&[unit_square()]).unwrap();
        let before = morph.generation();
        morph.set_point(0, Point3::new(0.0, 0.0, 0.5)).unwrap();
        assert!(morph.generation() > before);
        assert_eq!(
            morph.get_point(0).unwrap().position(),
            Point3::new(0.0, 0.0, 0.5)
        );
    }

    #[test]
    fn test_set_point_unknown_id() {
        let mut morph = Morph::build(&[unit_square()]).unwrap();
        let err = morph.set_point(17, Point3::origin()).unwrap_err();
        assert!(matches!(err, MorphError::UnknownPoint(17)));
    }

    #[test]
    fn test_get_point_unknown_id_is_none() {
        let morph = Morph::build(&[unit_square()]).unwrap();
        assert!(morph.get_point(17).is_none());
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let mut morph = Morph::build(&[unit_square()]).unwrap();
        let normal = morph.face_normal(0).unwrap();
        assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));

        morph.flip_normals();
        let flipped = morph.face_normal(0).unwrap();
        assert_eq!(flipped, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_face_normal_unknown_face() {
        let morph = Morph::build(&[unit_square()]).unwrap();
        let err = morph.face_normal(4).unwrap_err();
        assert!(matches!(err, MorphError::UnknownFace(4)));
    }

    #[test]
    fn test_collapse_consecutive_wraps() {
        assert_eq!(collapse_consecutive(vec![0, 1, 2, 2]), vec![0, 1, 2]);
        assert_eq!(collapse_consecutive(vec![0, 1, 2, 0]), vec![0, 1, 2]);
        assert_eq!(collapse_consecutive(vec![0, 0, 1, 2]), vec![0, 1, 2]);
    }
}
