// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Morphkit topology kernel
//!
//! Welds independently authored meshes into a unified point-and-face
//! topology, answers connectivity queries over it (direct adjacency,
//! reachability), extracts ordered face boundaries, and re-emits a
//! renderable mesh after edits.

pub mod error;
pub mod geometry;
pub mod morph;
pub mod utils;

pub use error::{MorphError, Result};
pub use geometry::{BoundingBox, Mesh, SourceMesh, Triangle, Vertex};
pub use morph::{Face, Morph, Point, WELD_EPSILON};
