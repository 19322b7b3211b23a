// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placements, spatial structure elements and the relations between them.

use serde::{Deserialize, Serialize};

/// IfcLocalPlacement
///
/// `relative_to` is PlacementRelTo, the parent link of the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPlacement {
    pub id: u32,
    #[serde(default)]
    pub relative_to: Option<u32>,
    #[serde(default)]
    pub relative_placement: Option<AxisPlacement>,
}

/// RelativePlacement of a local placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AxisPlacement {
    /// IfcAxis2Placement3D: Location, Axis, RefDirection
    #[serde(rename = "axis2_placement_3d")]
    Axis3D {
        location: [f64; 3],
        #[serde(default)]
        axis: Option<[f64; 3]>,
        #[serde(default)]
        ref_direction: Option<[f64; 3]>,
    },
    /// IfcAxis2Placement2D, which has no place in a 3D chain
    #[serde(rename = "axis2_placement_2d")]
    Axis2D {
        location: [f64; 2],
        #[serde(default)]
        ref_direction: Option<[f64; 2]>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialKind {
    Site,
    Building,
    Storey,
    Space,
}

/// IfcSpatialStructureElement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialElement {
    pub id: u32,
    pub kind: SpatialKind,
    #[serde(default)]
    pub name: Option<String>,
    /// Storey elevation in model length units
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub placement: Option<u32>,
}

impl SpatialElement {
    #[inline]
    pub fn is_storey(&self) -> bool {
        self.kind == SpatialKind::Storey
    }
}

/// IfcRelContainedInSpatialStructure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainmentRelation {
    pub relating_structure: u32,
    #[serde(default)]
    pub related_elements: Vec<u32>,
}

/// IfcRelAggregates (decomposition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationRelation {
    pub relating_object: u32,
    #[serde(default)]
    pub related_objects: Vec<u32>,
}
