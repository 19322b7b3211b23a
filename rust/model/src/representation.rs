// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Body representation trees
//!
//! Only the items that carry usable extents are modelled. Everything else the
//! reader encounters (breps, face sets, swept disks) arrives as `Other` so that
//! the source order of items is preserved.

use serde::{Deserialize, Serialize};

/// IfcRepresentationItem subset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepresentationItem {
    /// IfcExtrudedAreaSolid: SweptArea, Depth
    ExtrudedAreaSolid { profile: ProfileDef, depth: f64 },
    /// IfcBoundingBox: XDim, YDim, ZDim
    BoundingBox { x_dim: f64, y_dim: f64, z_dim: f64 },
    /// IfcMappedItem with its mapped representation items inlined
    MappedItem {
        #[serde(default)]
        items: Vec<RepresentationItem>,
    },
    /// IfcBooleanClippingResult: only the first operand carries the body
    BooleanClippingResult { first_operand: Box<RepresentationItem> },
    Other {
        #[serde(default)]
        type_name: String,
    },
}

/// IfcProfileDef subset
///
/// Field names follow the IFC attribute names of each profile type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileDef {
    Rectangle {
        x_dim: f64,
        y_dim: f64,
    },
    Circle {
        radius: f64,
    },
    CircleHollow {
        radius: f64,
        wall_thickness: f64,
    },
    IShape {
        overall_width: f64,
        overall_depth: f64,
    },
    LShape {
        depth: f64,
        /// Defaults to `depth` for equal-leg angles
        #[serde(default)]
        width: Option<f64>,
    },
    TShape {
        depth: f64,
        flange_width: f64,
    },
    UShape {
        depth: f64,
        flange_width: f64,
    },
    /// IfcArbitraryClosedProfileDef with the outer curve flattened to points
    ArbitraryClosed {
        #[serde(default)]
        outer_curve: Vec<[f64; 2]>,
    },
    Other {
        #[serde(default)]
        type_name: String,
    },
}
