// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension extraction
//!
//! Strategies run in a fixed order and the first one that produces a full,
//! positive triple wins:
//!
//! 1. single-valued properties named like width, depth/thickness and
//!    height/length, all three required, the last match per slot winning
//! 2. the first recognized profile in the body representation
//! 3. summed material layer thickness with the default footprint, slabs only
//! 4. category defaults, which always succeed
//!
//! A strategy that errors is skipped like one that found nothing.

use crate::config::ExtractionConfig;
use crate::element::{DimensionSource, Dimensions};
use crate::error::ElementError;
use ifc_struct_geometry::ProfileInterpreter;
use ifc_struct_model::RawElement;

type StrategyResult = std::result::Result<Option<Dimensions>, ElementError>;
type Strategy<'c> = fn(&DimensionExtractor<'c>, &RawElement) -> StrategyResult;

const WIDTH_NAMES: &[&str] = &["width"];
const DEPTH_NAMES: &[&str] = &["depth", "thickness"];
const HEIGHT_NAMES: &[&str] = &["height", "length"];

/// Dimensions plus the strategy that produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDimensions {
    pub dimensions: Dimensions,
    pub source: DimensionSource,
}

pub struct DimensionExtractor<'c> {
    config: &'c ExtractionConfig,
    scale_mm: f64,
    interpreter: ProfileInterpreter,
}

impl<'c> DimensionExtractor<'c> {
    pub fn new(config: &'c ExtractionConfig, scale_mm: f64) -> Self {
        let (fallback_width, fallback_depth) = config.polygon_fallback;
        Self {
            config,
            scale_mm,
            interpreter: ProfileInterpreter::new(scale_mm)
                .with_polygon_fallback(fallback_width, fallback_depth),
        }
    }

    /// Resolve dimensions; never fails
    pub fn extract(&self, element: &RawElement) -> ResolvedDimensions {
        let strategies: [(DimensionSource, Strategy<'c>); 3] = [
            (DimensionSource::Properties, Self::from_properties),
            (DimensionSource::Geometry, Self::from_geometry),
            (DimensionSource::MaterialLayers, Self::from_material_layers),
        ];

        for (source, strategy) in strategies {
            match strategy(self, element) {
                Ok(Some(dimensions)) if dimensions.is_valid() => {
                    return ResolvedDimensions { dimensions, source };
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        element = element.id,
                        strategy = ?source,
                        error = %e,
                        "Dimension strategy skipped"
                    );
                }
            }
        }

        ResolvedDimensions {
            dimensions: self.config.default_dimensions(element.category),
            source: DimensionSource::CategoryDefaults,
        }
    }

    /// Width, depth and height from single-valued properties
    ///
    /// Names match by case-insensitive substring. Later positive values
    /// overwrite earlier ones, so the last property set carrying a slot wins.
    pub fn from_properties(&self, element: &RawElement) -> StrategyResult {
        let (mut width, mut depth, mut height) = (None, None, None);

        for (name, value) in element.single_values() {
            let Some(value) = value.as_f64().filter(|v| *v > 0.0) else {
                continue;
            };
            let name = name.to_lowercase();
            let slot = if matches_any(&name, WIDTH_NAMES) {
                &mut width
            } else if matches_any(&name, DEPTH_NAMES) {
                &mut depth
            } else if matches_any(&name, HEIGHT_NAMES) {
                &mut height
            } else {
                continue;
            };
            *slot = Some(self.positive_mm(value, "property value")?);
        }

        Ok(match (width, depth, height) {
            (Some(w), Some(d), Some(h)) => Some(Dimensions::new(w, d, h)),
            _ => None,
        })
    }

    /// Footprint and extrusion length of the body representation
    pub fn from_geometry(&self, element: &RawElement) -> StrategyResult {
        let profile = self.interpreter.interpret(&element.representation)?;
        Ok(profile.map(|p| Dimensions::new(p.width, p.depth, p.length)))
    }

    /// Summed layer thickness on the default footprint, plate-like elements only
    pub fn from_material_layers(&self, element: &RawElement) -> StrategyResult {
        if !element.category.is_plate_like() {
            return Ok(None);
        }
        let Some(thickness) = element
            .material
            .as_ref()
            .and_then(|m| m.layer_thickness_sum())
        else {
            return Ok(None);
        };
        let thickness = self.positive_mm(thickness, "layer thickness")?;
        let footprint = self.config.default_dimensions(element.category);
        Ok(Some(Dimensions::new(
            footprint.width,
            footprint.depth,
            thickness,
        )))
    }

    fn positive_mm(&self, value: f64, field: &'static str) -> std::result::Result<f64, ElementError> {
        let mm = value * self.scale_mm;
        if !mm.is_finite() || mm <= 0.0 {
            return Err(ElementError::NonPositive { field, value: mm });
        }
        Ok(mm)
    }
}

#[inline]
fn matches_any(name: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|s| name.contains(s))
}
