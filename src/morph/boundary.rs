// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Ordered face-boundary extraction via a 2D angle sweep

use nalgebra::{Rotation3, Vector2, Vector3};

use super::core::AREA_EPSILON;
use super::Morph;
use crate::error::{MorphError, Result};
use crate::utils::math::approx_eq;

/// Turn angles closer than this are treated as ties and fall through to
/// the distance tie-break, so rounding noise cannot reorder the walk.
const ANGLE_EPSILON: f64 = 1e-7;

impl Morph {
    /// Ordered outer boundary of a face's point set as a closed polygon.
    ///
    /// The face's points are projected into its own plane (the normal is
    /// rotated onto +Z and the Z coordinate discarded) and walked with an
    /// angle sweep:
    ///
    /// 1. Start at the point with minimum projected x, ties broken by
    ///    minimum y.
    /// 2. From a reference direction (initially straight down), pick the
    ///    candidate maximizing the counter-clockwise turn angle; angles
    ///    within [`ANGLE_EPSILON`] tie-break to the candidate nearest the
    ///    current point.
    /// 3. The reference direction becomes the direction from the chosen
    ///    point back to the one it was reached from; the walk ends when it
    ///    returns to the start.
    ///
    /// A 3-point face short-circuits to its original winding. Collinear
    /// point sets have no well-defined perimeter and fail with
    /// [`MorphError::DegenerateFace`]. Results are cached until the morph
    /// is mutated.
    pub fn perimeter(&self, face: usize) -> Result<Vec<usize>> {
        if face >= self.faces.len() {
            return Err(MorphError::UnknownFace(face));
        }
        if let Some(cached) = self.with_derived(|derived| derived.perimeters.get(&face).cloned()) {
            return Ok(cached);
        }

        let boundary = self.extract_perimeter(face)?;
        self.with_derived(|derived| derived.perimeters.insert(face, boundary.clone()));
        Ok(boundary)
    }

    fn extract_perimeter(&self, face: usize) -> Result<Vec<usize>> {
        let normal = self.face_area_normal(face)?;
        if normal.norm() <= AREA_EPSILON {
            return Err(MorphError::DegenerateFace {
                face,
                detail: "collinear points have no perimeter".to_string(),
            });
        }

        let ids = self.faces[face].points();
        if ids.len() == 3 {
            return Ok(ids.to_vec());
        }

        // Rotate the face plane onto XY and drop Z.
        let rotation = rotation_onto_z(&normal);
        let mut candidates: Vec<(usize, Vector2<f64>)> = Vec::with_capacity(ids.len());
        for &id in ids {
            if candidates.iter().any(|&(seen, _)| seen == id) {
                continue;
            }
            let p = rotation * self.points[id].position();
            candidates.push((id, Vector2::new(p.x, p.y)));
        }

        let start = lowest_point(&candidates);
        let mut boundary = vec![candidates[start].0];
        let mut current = start;
        let mut reference = Vector2::new(0.0, -1.0);

        loop {
            let mut best: Option<(usize, f64, f64)> = None;
            for (i, &(_, position)) in candidates.iter().enumerate() {
                if i == current {
                    continue;
                }
                let offset = position - candidates[current].1;
                let distance_sq = offset.norm_squared();
                if distance_sq == 0.0 {
                    continue;
                }
                let angle = ccw_angle(&reference, &offset);
                best = match best {
                    None => Some((i, angle, distance_sq)),
                    Some((_, best_angle, best_distance_sq)) => {
                        if approx_eq(angle, best_angle, ANGLE_EPSILON) {
                            if distance_sq < best_distance_sq {
                                Some((i, angle.max(best_angle), distance_sq))
                            } else {
                                best
                            }
                        } else if angle > best_angle {
                            Some((i, angle, distance_sq))
                        } else {
                            best
                        }
                    }
                };
            }

            let Some((next, _, _)) = best else {
                return Err(MorphError::DegenerateFace {
                    face,
                    detail: "no candidate to continue the boundary walk".to_string(),
                });
            };
            if next == start {
                break;
            }
            if boundary.len() == candidates.len() {
                return Err(MorphError::DegenerateFace {
                    face,
                    detail: "boundary walk failed to close".to_string(),
                });
            }

            boundary.push(candidates[next].0);
            reference = candidates[current].1 - candidates[next].1;
            current = next;
        }

        Ok(boundary)
    }
}

/// Rotation taking `normal` onto the +Z axis.
fn rotation_onto_z(normal: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::rotation_between(normal, &Vector3::z())
        .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI))
}

/// Index of the candidate with minimum x, ties broken by minimum y.
fn lowest_point(candidates: &[(usize, Vector2<f64>)]) -> usize {
    let mut best = 0;
    for (i, &(_, p)) in candidates.iter().enumerate().skip(1) {
        let (_, q) = candidates[best];
        if p.x < q.x || (p.x == q.x && p.y < q.y) {
            best = i;
        }
    }
    best
}

/// Counter-clockwise angle from `from` to `to`, in [0, 2π).
fn ccw_angle(from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    let mut angle = from.perp(to).atan2(from.dot(to));
    if angle < 0.0 {
        angle += std::f64::consts::TAU;
    }
    angle
}
