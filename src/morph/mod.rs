// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Morphkit Contributors

//! Morph module - welded topology, connectivity queries, and boundary
//! extraction

mod boundary;
mod connectivity;
mod core;
mod export;
mod face;
mod point;

pub use self::core::{Morph, WELD_EPSILON};
pub use self::face::Face;
pub use self::point::Point;
