// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction configuration loaded from environment variables.

use crate::element::Dimensions;
use ifc_struct_geometry::{ZPolicy, DEFAULT_PLACEMENT_DEPTH_CAP, DEFAULT_POLYGON_FALLBACK};
use ifc_struct_model::ElementCategory;
use serde::{Deserialize, Serialize};

/// One value per element category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub column: T,
    pub beam: T,
    pub slab: T,
}

impl<T> PerCategory<T> {
    #[inline]
    pub fn get(&self, category: ElementCategory) -> &T {
        match category {
            ElementCategory::Column => &self.column,
            ElementCategory::Beam => &self.beam,
            ElementCategory::Slab => &self.slab,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, category: ElementCategory) -> &mut T {
        match category {
            ElementCategory::Column => &mut self.column,
            ElementCategory::Beam => &mut self.beam,
            ElementCategory::Slab => &mut self.slab,
        }
    }
}

/// Per-category dimensions (mm) shipped with the crate
const BUILTIN_DEFAULTS: PerCategory<Dimensions> = PerCategory {
    column: Dimensions::new(300.0, 300.0, 3000.0),
    beam: Dimensions::new(300.0, 500.0, 6000.0),
    slab: Dimensions::new(5000.0, 5000.0, 200.0),
};

/// Extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Assumed storey height used to turn elevations into floor indices (mm).
    pub storey_height_mm: f64,
    /// Maximum placement links walked before a chain is considered malformed.
    pub placement_depth_cap: usize,
    /// How world Z combines storey elevation and placement Z, per category.
    pub z_policy: PerCategory<ZPolicy>,
    /// Dimensions used when no other strategy resolves (mm).
    pub defaults: PerCategory<Dimensions>,
    /// Width and depth for outlines without usable extent (mm).
    pub polygon_fallback: (f64, f64),
    /// Derive the floor from absolute Z when no storey data helps.
    pub absolute_z_heuristic: bool,
    /// Material assigned to elements without a usable association.
    pub default_material: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            storey_height_mm: 3000.0,
            placement_depth_cap: DEFAULT_PLACEMENT_DEPTH_CAP,
            z_policy: PerCategory {
                column: ZPolicy::StoreyElevation,
                beam: ZPolicy::StoreyPlusPlacement,
                slab: ZPolicy::StoreyElevation,
            },
            defaults: BUILTIN_DEFAULTS,
            polygon_fallback: DEFAULT_POLYGON_FALLBACK,
            absolute_z_heuristic: true,
            default_material: None,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configured default dimensions for `category`
    ///
    /// A default that is not strictly positive and finite is replaced by the
    /// built-in one.
    pub fn default_dimensions(&self, category: ElementCategory) -> Dimensions {
        let configured = *self.defaults.get(category);
        if configured.is_valid() {
            configured
        } else {
            *BUILTIN_DEFAULTS.get(category)
        }
    }

    /// Categories whose configured default dimensions are unusable
    pub fn invalid_defaults(&self) -> Vec<ElementCategory> {
        ElementCategory::ALL
            .into_iter()
            .filter(|c| !self.defaults.get(*c).is_valid())
            .collect()
    }

    /// Load configuration from any key lookup, falling back per value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let storey_height_mm = lookup("IFC_STRUCT_STOREY_HEIGHT_MM")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(defaults.storey_height_mm);

        let placement_depth_cap = lookup("IFC_STRUCT_PLACEMENT_DEPTH_CAP")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|cap| *cap > 0)
            .unwrap_or(defaults.placement_depth_cap);

        let z_policy = lookup("IFC_STRUCT_Z_POLICY")
            .map(|v| parse_z_policies(&v, defaults.z_policy))
            .unwrap_or(defaults.z_policy);

        let absolute_z_heuristic = lookup("IFC_STRUCT_ABSOLUTE_Z_FLOORS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.absolute_z_heuristic);

        let default_material = lookup("IFC_STRUCT_DEFAULT_MATERIAL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self {
            storey_height_mm,
            placement_depth_cap,
            z_policy,
            absolute_z_heuristic,
            default_material,
            ..defaults
        }
    }
}

/// Parse `beam=offset,column=storey` style overrides on top of `base`
fn parse_z_policies(value: &str, base: PerCategory<ZPolicy>) -> PerCategory<ZPolicy> {
    let mut policies = base;
    for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((category, policy)) = entry.split_once('=') else {
            tracing::warn!(entry, "Ignoring Z policy entry without '='");
            continue;
        };
        match (
            category.parse::<ElementCategory>(),
            policy.parse::<ZPolicy>(),
        ) {
            (Ok(category), Ok(policy)) => *policies.get_mut(category) = policy,
            _ => tracing::warn!(entry, "Ignoring unrecognized Z policy entry"),
        }
    }
    policies
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
