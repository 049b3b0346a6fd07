// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Geometry module - mesh input/output representations

mod bbox;
mod mesh;
mod source;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use source::SourceMesh;
