// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized form of a building model.

use crate::entities::RawElement;
use crate::spatial::{AggregationRelation, ContainmentRelation, LocalPlacement, SpatialElement};
use crate::units::LengthUnit;
use serde::{Deserialize, Serialize};

/// Everything the reader extracted from one model file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// IFC schema version (e.g., "IFC2X3", "IFC4", "IFC4X3")
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub placements: Vec<LocalPlacement>,
    #[serde(default)]
    pub spatial_elements: Vec<SpatialElement>,
    #[serde(default)]
    pub containment: Vec<ContainmentRelation>,
    #[serde(default)]
    pub aggregation: Vec<AggregationRelation>,
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

fn default_schema() -> String {
    "IFC4".to_string()
}

impl Default for ModelSnapshot {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            project: ProjectInfo::default(),
            length_unit: LengthUnit::default(),
            placements: Vec::new(),
            spatial_elements: Vec::new(),
            containment: Vec::new(),
            aggregation: Vec::new(),
            elements: Vec::new(),
        }
    }
}

/// IfcProject header data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectInfo {
    pub const UNNAMED: &'static str = "Unnamed Project";

    /// Project name, falling back to a placeholder
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(Self::UNNAMED)
    }
}
