// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized element records and their parts.

use ifc_struct_model::ElementCategory;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Width, depth and height in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// All three components finite and strictly positive
    #[inline]
    pub fn is_valid(&self) -> bool {
        [self.width, self.depth, self.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Bounding volume in m³
    #[inline]
    pub fn volume_m3(&self) -> f64 {
        self.width * self.depth * self.height / 1e9
    }

    /// Plan area (width × depth) in m²
    #[inline]
    pub fn footprint_area_m2(&self) -> f64 {
        self.width * self.depth / 1e6
    }
}

/// World position in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3<f64>> for Location {
    fn from(p: Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Concrete,
    Steel,
    Wood,
}

/// Material with the physical constants weight and strength need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub category: MaterialCategory,
    /// kg/m³
    pub density: f64,
    /// MPa, zero when unknown
    pub compressive_strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionSource {
    Properties,
    Geometry,
    MaterialLayers,
    CategoryDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorSource {
    Elevation,
    StoreyName,
    AbsoluteZ,
    Default,
}

/// Relation through which the storey was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreyLink {
    Containment,
    Decomposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSource {
    Quantity,
    Dimensions,
    Unavailable,
}

/// Which strategy produced each derived value
///
/// Diagnostic only; nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub dimensions: DimensionSource,
    pub floor: FloorSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storey_link: Option<StoreyLink>,
    pub volume: VolumeSource,
    /// Set when the placement chain could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_diagnostic: Option<String>,
}

/// One structural element, normalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedElement {
    pub global_id: String,
    /// Source name, or the category name when the source has none
    pub name: String,
    pub category: ElementCategory,
    /// IFC entity name, e.g. `IfcColumn`
    pub ifc_type: String,
    pub location: Location,
    pub dimensions: Dimensions,
    /// Beams only, mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Slabs only, m²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Slabs only, mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    pub floor_level: i32,
    /// m³
    pub volume: f64,
    /// kg, present only with a material
    pub weight: Option<f64>,
    pub material: Option<Material>,
    pub provenance: Provenance,
}

impl NormalizedElement {
    /// Weight for aggregation, zero without a material
    #[inline]
    pub fn weight_kg(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    #[inline]
    pub fn material_name(&self) -> Option<&str> {
        self.material.as_ref().map(|m| m.name.as_str())
    }
}
