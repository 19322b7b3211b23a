// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local placement chain resolution
//!
//! An IfcLocalPlacement points at its parent through PlacementRelTo. The
//! absolute position of an element is the sum of the translations along that
//! chain. The walk is iterative and capped so that cyclic or absurdly deep
//! chains in malformed files end in a diagnostic instead of a hang.

use crate::error::{Error, Result};
use ifc_struct_model::{AxisPlacement, ModelSource};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of links walked before a chain is considered malformed
pub const DEFAULT_PLACEMENT_DEPTH_CAP: usize = 64;

/// Outcome of resolving one placement chain
///
/// `translation` is in millimetres, world frame. When `diagnostic` is set the
/// translation is the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResolution {
    pub translation: Vector3<f64>,
    pub diagnostic: Option<Error>,
}

impl PlacementResolution {
    fn origin_with(diagnostic: Option<Error>) -> Self {
        Self {
            translation: Vector3::zeros(),
            diagnostic,
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Walks placement chains of one model
pub struct PlacementResolver<'a> {
    model: &'a dyn ModelSource,
    depth_cap: usize,
    scale_mm: f64,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(model: &'a dyn ModelSource) -> Self {
        Self::with_depth_cap(model, DEFAULT_PLACEMENT_DEPTH_CAP)
    }

    pub fn with_depth_cap(model: &'a dyn ModelSource, depth_cap: usize) -> Self {
        Self {
            model,
            depth_cap,
            scale_mm: model.length_scale_mm(),
        }
    }

    /// Absolute translation of the chain starting at `head`
    ///
    /// Never fails. A missing head is the origin without a diagnostic; any
    /// failure along the chain is the origin with one.
    pub fn resolve(&self, head: Option<u32>) -> PlacementResolution {
        let Some(head) = head else {
            return PlacementResolution::origin_with(None);
        };

        match self.try_resolve(head) {
            Ok(translation) => PlacementResolution {
                translation,
                diagnostic: None,
            },
            Err(e) => PlacementResolution::origin_with(Some(e)),
        }
    }

    /// Sum of local translations from `head` up to the root placement
    pub fn try_resolve(&self, head: u32) -> Result<Vector3<f64>> {
        let mut total = Vector3::zeros();
        let mut current = Some(head);
        let mut links = 0usize;

        while let Some(id) = current {
            if links >= self.depth_cap {
                return Err(Error::PlacementDepthExceeded {
                    depth: self.depth_cap,
                });
            }

            let link = self
                .model
                .placement(id)
                .ok_or(Error::DanglingPlacement(id))?;

            total += local_translation(link.relative_placement.as_ref());
            current = link.relative_to;
            links += 1;
        }

        let total = total * self.scale_mm;
        if !(total.x.is_finite() && total.y.is_finite() && total.z.is_finite()) {
            return Err(Error::NonFinite("placement"));
        }
        Ok(total)
    }
}

/// Translation contributed by one link
///
/// Only 3D axis placements move a 3D chain; 2D or absent placements are zero.
fn local_translation(placement: Option<&AxisPlacement>) -> Vector3<f64> {
    match placement {
        Some(AxisPlacement::Axis3D { location, .. }) => {
            Vector3::new(location[0], location[1], location[2])
        }
        Some(AxisPlacement::Axis2D { .. }) | None => Vector3::zeros(),
    }
}

/// How the world Z of an element combines storey elevation and placement Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZPolicy {
    /// Storey elevation plus placement Z
    StoreyPlusPlacement,
    /// Storey elevation, placement Z discarded
    StoreyElevation,
    /// Placement Z only, storey ignored
    PlacementOnly,
}

impl ZPolicy {
    /// Combine placement Z with a known storey elevation (both mm)
    ///
    /// Without a storey elevation every policy falls back to placement Z.
    #[inline]
    pub fn combine(self, placement_z: f64, storey_elevation: Option<f64>) -> f64 {
        match (self, storey_elevation) {
            (ZPolicy::StoreyPlusPlacement, Some(elevation)) => elevation + placement_z,
            (ZPolicy::StoreyElevation, Some(elevation)) => elevation,
            (ZPolicy::PlacementOnly, _) | (_, None) => placement_z,
        }
    }

    /// World location from a resolved translation
    pub fn world_location(
        self,
        translation: &Vector3<f64>,
        storey_elevation: Option<f64>,
    ) -> Point3<f64> {
        Point3::new(
            translation.x,
            translation.y,
            self.combine(translation.z, storey_elevation),
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZPolicy::StoreyPlusPlacement => "storey_plus_placement",
            ZPolicy::StoreyElevation => "storey_elevation",
            ZPolicy::PlacementOnly => "placement_only",
        }
    }
}

impl fmt::Display for ZPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offset" | "storey_plus_placement" => Ok(ZPolicy::StoreyPlusPlacement),
            "storey" | "storey_elevation" => Ok(ZPolicy::StoreyElevation),
            "placement" | "placement_only" => Ok(ZPolicy::PlacementOnly),
            other => Err(format!("unknown Z policy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ifc_struct_model::BuildingModel;

    fn model(json: &str) -> BuildingModel {
        BuildingModel::from_json(json).unwrap()
    }

    #[test]
    fn test_chain_sums_translations() {
        let m = model(
            r#"{"placements": [
                {"id": 1, "relative_placement": {"type": "axis2_placement_3d", "location": [1000, 0, 0]}},
                {"id": 2, "relative_to": 1, "relative_placement": {"type": "axis2_placement_3d", "location": [0, 2000, 3000]}},
                {"id": 3, "relative_to": 2, "relative_placement": {"type": "axis2_placement_3d", "location": [5, 5, 5]}}
            ]}"#,
        );
        let resolution = PlacementResolver::new(&m).resolve(Some(3));
        assert!(resolution.is_clean());
        assert_relative_eq!(resolution.translation, Vector3::new(1005.0, 2005.0, 3005.0));
    }

    #[test]
    fn test_missing_head_is_origin_without_diagnostic() {
        let m = model("{}");
        let resolution = PlacementResolver::new(&m).resolve(None);
        assert!(resolution.is_clean());
        assert_eq!(resolution.translation, Vector3::zeros());
    }

    #[test]
    fn test_link_without_axis_contributes_nothing() {
        let m = model(
            r#"{"placements": [
                {"id": 1, "relative_placement": {"type": "axis2_placement_3d", "location": [10, 20, 30]}},
                {"id": 2, "relative_to": 1},
                {"id": 3, "relative_to": 2, "relative_placement": {"type": "axis2_placement_2d", "location": [99, 99]}}
            ]}"#,
        );
        let resolution = PlacementResolver::new(&m).resolve(Some(3));
        assert_relative_eq!(resolution.translation, Vector3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_cycle_hits_depth_cap() {
        let m = model(
            r#"{"placements": [
                {"id": 1, "relative_to": 2, "relative_placement": {"type": "axis2_placement_3d", "location": [1, 1, 1]}},
                {"id": 2, "relative_to": 1, "relative_placement": {"type": "axis2_placement_3d", "location": [1, 1, 1]}}
            ]}"#,
        );
        let resolution = PlacementResolver::with_depth_cap(&m, 8).resolve(Some(1));
        assert_eq!(resolution.translation, Vector3::zeros());
        assert_eq!(
            resolution.diagnostic,
            Some(Error::PlacementDepthExceeded { depth: 8 })
        );
    }

    #[test]
    fn test_dangling_parent() {
        let m = model(r#"{"placements": [{"id": 1, "relative_to": 77}]}"#);
        let resolution = PlacementResolver::new(&m).resolve(Some(1));
        assert_eq!(resolution.diagnostic, Some(Error::DanglingPlacement(77)));
    }

    #[test]
    fn test_metre_model_scales_to_mm() {
        let m = model(
            r#"{"length_unit": {"prefix": null}, "placements": [
                {"id": 1, "relative_placement": {"type": "axis2_placement_3d", "location": [1.5, 0, 3]}}
            ]}"#,
        );
        let translation = PlacementResolver::new(&m).try_resolve(1).unwrap();
        assert_relative_eq!(translation, Vector3::new(1500.0, 0.0, 3000.0));
    }

    #[test]
    fn test_z_policies() {
        assert_eq!(ZPolicy::StoreyPlusPlacement.combine(250.0, Some(3000.0)), 3250.0);
        assert_eq!(ZPolicy::StoreyElevation.combine(250.0, Some(3000.0)), 3000.0);
        assert_eq!(ZPolicy::PlacementOnly.combine(250.0, Some(3000.0)), 250.0);
        assert_eq!(ZPolicy::StoreyElevation.combine(250.0, None), 250.0);
    }

    #[test]
    fn test_z_policy_parsing() {
        assert_eq!("offset".parse::<ZPolicy>(), Ok(ZPolicy::StoreyPlusPlacement));
        assert_eq!(" Storey ".parse::<ZPolicy>(), Ok(ZPolicy::StoreyElevation));
        assert_eq!("placement_only".parse::<ZPolicy>(), Ok(ZPolicy::PlacementOnly));
        assert!("sideways".parse::<ZPolicy>().is_err());
    }
}
