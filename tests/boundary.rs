// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Perimeter extraction verification tests

use anyhow::Result;
use morphkit::{Morph, MorphError, SourceMesh};
use nalgebra::Point3;

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
fn test_square_perimeter_starts_at_min_corner() -> Result<()> {
    let morph = Morph::build(&[unit_square()])?;
    let perimeter = morph.perimeter(0)?;

    // The walk starts at the minimum-x (then minimum-y) corner (0,0,0) and
    // visits all four corners in one consistent winding.
    assert_eq!(perimeter, vec![0, 3, 2, 1]);
    Ok(())
}

#[test]
fn test_perimeter_is_deterministic() -> Result<()> {
    let morph = Morph::build(&[unit_square()])?;
    assert_eq!(morph.perimeter(0)?, morph.perimeter(0)?);

    // A fresh build of the same input walks the same loop.
    let rebuilt = Morph::build(&[unit_square()])?;
    assert_eq!(morph.perimeter(0)?, rebuilt.perimeter(0)?);
    Ok(())
}

#[test]
fn test_triangle_returns_original_winding() -> Result<()> {
    let triangle = SourceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
        ],
        vec![vec![0, 1, 2]],
    );
    let morph = Morph::build(&[triangle])?;
    assert_eq!(morph.perimeter(0)?, vec![0, 1, 2]);
    Ok(())
}

#[test]
fn test_collinear_points_are_rejected() -> Result<()> {
    let line = SourceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    );
    let morph = Morph::build(&[line])?;
    let err = morph.perimeter(0).unwrap_err();
    assert!(matches!(err, MorphError::DegenerateFace { face: 0, .. }));
    Ok(())
}

#[test]
fn test_collinear_candidates_prefer_nearest() -> Result<()> {
    // (1,0,0) lies exactly between (0,0,0) and (2,0,0); when the walk looks
    // back along the bottom edge both are at the same turn angle, and the
    // nearer one must win.
    let shape = SourceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3, 4]],
    );
    let morph = Morph::build(&[shape])?;
    assert_eq!(morph.perimeter(0)?, vec![0, 4, 3, 2, 1]);
    Ok(())
}

#[test]
fn test_perimeter_in_tilted_plane() -> Result<()> {
    // The same square rotated out of the XY plane; the walk happens in the
    // face's own projected plane, so it still closes over all four points.
    let tilted = SourceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ],
        vec![vec![0, 1, 2, 3]],
    );
    let morph = Morph::build(&[tilted])?;
    let perimeter = morph.perimeter(0)?;

    assert_eq!(perimeter.len(), 4);
    let mut seen = perimeter.clone();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);

    // Deterministic across rebuilds.
    let rebuilt = Morph::build(&[SourceMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ],
        vec![vec![0, 1, 2, 3]],
    )])?;
    assert_eq!(perimeter, rebuilt.perimeter(0)?);
    Ok(())
}

#[test]
fn test_perimeter_recomputed_after_edit() -> Result<()> {
    let mut morph = Morph::build(&[unit_square()])?;
    assert_eq!(morph.perimeter(0)?, vec![0, 3, 2, 1]);

    // Pull corner 1 left of the old start so the walk begins there instead.
    morph.set_point(1, Point3::new(-1.0, -0.5, 0.0))?;
    assert_eq!(morph.perimeter(0)?, vec![1, 3, 2, 0]);
    Ok(())
}

#[test]
fn test_perimeter_after_flip_still_closes() -> Result<()> {
    let mut morph = Morph::build(&[unit_square()])?;
    morph.perimeter(0)?;
    morph.flip_normals();

    // The flipped winding projects through the opposite plane, so the walk
    // starts at the corner that is lowest in that projection.
    let perimeter = morph.perimeter(0)?;
    assert_eq!(perimeter, vec![3, 0, 1, 2]);
    Ok(())
}

#[test]
fn test_perimeter_unknown_face() -> Result<()> {
    let morph = Morph::build(&[unit_square()])?;
    assert!(matches!(
        morph.perimeter(3),
        Err(MorphError::UnknownFace(3))
    ));
    Ok(())
}
