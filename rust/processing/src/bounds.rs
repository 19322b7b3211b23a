// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model bounds over element locations
//!
//! Rendering collaborators use the centroid to recentre large site
//! coordinates before converting to f32.

use crate::element::{Location, NormalizedElement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds in mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
    /// Number of locations added
    pub sample_count: usize,
}

impl ModelBounds {
    /// Create new bounds initialized to invalid state
    pub fn new() -> Self {
        Self {
            min: [f64::MAX; 3],
            max: [f64::MIN; 3],
            sample_count: 0,
        }
    }

    pub fn from_elements(elements: &[NormalizedElement]) -> Self {
        let mut bounds = Self::new();
        for element in elements {
            bounds.expand(&element.location);
        }
        bounds
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand bounds to include a location; non-finite locations are ignored
    #[inline]
    pub fn expand(&mut self, location: &Location) {
        if !location.is_finite() {
            return;
        }
        for (axis, value) in [location.x, location.y, location.z].into_iter().enumerate() {
            self.min[axis] = self.min[axis].min(value);
            self.max[axis] = self.max[axis].max(value);
        }
        self.sample_count += 1;
    }

    /// Centre of the box, origin when empty
    pub fn centroid(&self) -> Point3<f64> {
        if !self.is_valid() {
            return Point3::origin();
        }
        Point3::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        )
    }

    /// Extent along each axis, zero when empty
    pub fn size(&self) -> [f64; 3] {
        if !self.is_valid() {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

impl Default for ModelBounds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, z: f64) -> Location {
        Location { x, y, z }
    }

    #[test]
    fn test_bounds_and_centroid() {
        let mut bounds = ModelBounds::new();
        assert!(!bounds.is_valid());
        assert_eq!(bounds.centroid(), Point3::origin());

        bounds.expand(&at(0.0, 0.0, 0.0));
        bounds.expand(&at(6000.0, 4000.0, 9000.0));
        bounds.expand(&at(f64::NAN, 1.0, 1.0));

        assert_eq!(bounds.sample_count, 2);
        assert_eq!(bounds.centroid(), Point3::new(3000.0, 2000.0, 4500.0));
        assert_eq!(bounds.size(), [6000.0, 4000.0, 9000.0]);
    }
}
