// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Unnormalized normal of a triangle (cross product of its edges).
///
/// The length of the result is twice the triangle's area, which makes it
/// suitable for area-weighted normal accumulation.
pub fn triangle_area_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> Vector3<f64> {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    e1.cross(&e2)
}

/// Unnormalized polygon normal via Newell's method.
///
/// Works for any planar polygon regardless of vertex count; the length of
/// the result is twice the polygon's area, so a (near-)zero result means
/// the points are collinear or coincident.
pub fn polygon_normal(positions: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    let n = positions.len();
    for i in 0..n {
        let p = &positions[i];
        let q = &positions[(i + 1) % n];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal
}
