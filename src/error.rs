// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Error types for morphkit

use thiserror::Error;

/// Result type alias using [`MorphError`].
pub type Result<T> = std::result::Result<T, MorphError>;

/// Errors that can occur while building or querying a morph.
#[derive(Debug, Error)]
pub enum MorphError {
    /// A face has no usable geometry: fewer than 3 distinct points after
    /// welding, or a point set with no well-defined perimeter.
    #[error("face {face} is degenerate: {detail}")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
        /// What made the face degenerate.
        detail: String,
    },

    /// A query or mutation referenced a point id that is not present.
    #[error("unknown point id {0}")]
    UnknownPoint(usize),

    /// A query referenced a face index that is not present.
    #[error("unknown face index {0}")]
    UnknownFace(usize),

    /// A source face references a vertex index outside its own mesh.
    #[error("source mesh {mesh}: face {face} references vertex index {vertex} (mesh has {vertex_count} vertices)")]
    InvalidSourceVertex {
        /// Index of the source mesh in the build input.
        mesh: usize,
        /// Face index within that source mesh.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in that source mesh.
        vertex_count: usize,
    },
}
