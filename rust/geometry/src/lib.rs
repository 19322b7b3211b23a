// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Struct Geometry
//!
//! Placement chain resolution and cross-section interpretation for structural
//! elements, using nalgebra for vectors and points. Nothing here tessellates;
//! the outputs are translations and extents in millimetres.

pub mod error;
pub mod placement;
pub mod profile;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use error::{Error, Result};
pub use placement::{
    PlacementResolution, PlacementResolver, ZPolicy, DEFAULT_PLACEMENT_DEPTH_CAP,
};
pub use profile::{
    InterpretedProfile, ProfileGeometry, ProfileInterpreter, DEFAULT_POLYGON_FALLBACK,
};
