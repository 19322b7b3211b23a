// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor level resolution
//!
//! The storey is looked up first, through containment and then through
//! decomposition; spaces and other intermediate objects are walked up the
//! aggregation tree. With a storey in hand the floor comes from its
//! elevation, else from the digits in its name. Without either, the absolute
//! Z of the element is divided by the storey height. The last resort is 0.

use crate::config::ExtractionConfig;
use crate::element::{FloorSource, StoreyLink};
use ifc_struct_model::{ModelSource, RawElement, SpatialElement};

/// Storey an element belongs to
#[derive(Debug, Clone, Copy)]
pub struct StoreyContext<'m> {
    pub storey: &'m SpatialElement,
    pub link: StoreyLink,
    /// Elevation in mm, when the storey carries a finite one
    pub elevation_mm: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFloor {
    pub level: i32,
    pub source: FloorSource,
}

pub struct FloorLevelResolver<'a> {
    model: &'a dyn ModelSource,
    storey_height_mm: f64,
    absolute_z_heuristic: bool,
    depth_cap: usize,
    scale_mm: f64,
}

impl<'a> FloorLevelResolver<'a> {
    pub fn new(model: &'a dyn ModelSource, config: &ExtractionConfig) -> Self {
        Self {
            model,
            storey_height_mm: config.storey_height_mm,
            absolute_z_heuristic: config.absolute_z_heuristic,
            depth_cap: config.placement_depth_cap,
            scale_mm: model.length_scale_mm(),
        }
    }

    /// Storey of `element`, via containment first, then decomposition
    pub fn find_storey(&self, element: &RawElement) -> Option<StoreyContext<'a>> {
        let contained = self
            .model
            .containing_structure(element.id)
            .and_then(|id| self.walk_to_storey(id))
            .map(|storey| (storey, StoreyLink::Containment));

        let (storey, link) = contained.or_else(|| {
            self.model
                .decomposes(element.id)
                .and_then(|id| self.walk_to_storey(id))
                .map(|storey| (storey, StoreyLink::Decomposition))
        })?;

        let elevation_mm = storey
            .elevation
            .map(|e| e * self.scale_mm)
            .filter(|e| e.is_finite());

        Some(StoreyContext {
            storey,
            link,
            elevation_mm,
        })
    }

    /// Nearest storey at or above `start` in the aggregation tree
    fn walk_to_storey(&self, start: u32) -> Option<&'a SpatialElement> {
        let mut current = start;
        for _ in 0..self.depth_cap {
            if let Some(spatial) = self.model.spatial_element(current) {
                if spatial.is_storey() {
                    return Some(spatial);
                }
            }
            current = self.model.decomposes(current)?;
        }
        None
    }

    /// Floor index; never fails
    ///
    /// `absolute_z` is the element's resolved world Z in mm.
    pub fn resolve(&self, storey: Option<&StoreyContext<'_>>, absolute_z: f64) -> ResolvedFloor {
        if let Some(ctx) = storey {
            if let Some(level) = ctx.elevation_mm.and_then(|e| self.level_from_height(e)) {
                return ResolvedFloor {
                    level,
                    source: FloorSource::Elevation,
                };
            }
            if let Some(level) = ctx.storey.name.as_deref().and_then(parse_storey_number) {
                return ResolvedFloor {
                    level,
                    source: FloorSource::StoreyName,
                };
            }
        }

        if self.absolute_z_heuristic {
            if let Some(level) = self.level_from_height(absolute_z) {
                return ResolvedFloor {
                    level,
                    source: FloorSource::AbsoluteZ,
                };
            }
        }

        ResolvedFloor {
            level: 0,
            source: FloorSource::Default,
        }
    }

    /// Half-way heights round to the even level: 1500 is 0, 7500 is 2
    fn level_from_height(&self, height_mm: f64) -> Option<i32> {
        let level = (height_mm / self.storey_height_mm).round_ties_even();
        (level.is_finite() && level.abs() <= i32::MAX as f64).then_some(level as i32)
    }
}

/// First run of digits in a storey name, with a directly preceding minus sign
///
/// "Level 2" is 2, "Etage -1" is -1, "B1" is 1, "Roof" has none.
pub fn parse_storey_number(name: &str) -> Option<i32> {
    let bytes = name.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset);

    let negative = start > 0 && bytes[start - 1] == b'-';
    let digits = &name[start..end];
    let value: i32 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_struct_model::{BuildingModel, ModelSource};

    const MODEL: &str = r#"{
        "spatial_elements": [
            {"id": 100, "kind": "building", "name": "Main"},
            {"id": 101, "kind": "storey", "name": "Level 5", "elevation": 3000},
            {"id": 102, "kind": "storey", "name": "Level 2"},
            {"id": 103, "kind": "space", "name": "Room 2.14"},
            {"id": 104, "kind": "storey", "name": "Roof"}
        ],
        "containment": [
            {"relating_structure": 101, "related_elements": [1]},
            {"relating_structure": 103, "related_elements": [2]},
            {"relating_structure": 100, "related_elements": [4]},
            {"relating_structure": 104, "related_elements": [5]}
        ],
        "aggregation": [
            {"relating_object": 102, "related_objects": [103, 3]},
            {"relating_object": 100, "related_objects": [101, 102, 104]}
        ],
        "elements": [
            {"id": 1, "global_id": "a", "category": "Column"},
            {"id": 2, "global_id": "b", "category": "Beam"},
            {"id": 3, "global_id": "c", "category": "Slab"},
            {"id": 4, "global_id": "d", "category": "Slab"},
            {"id": 5, "global_id": "e", "category": "Slab"}
        ]
    }"#;

    fn resolve(model: &BuildingModel, config: &ExtractionConfig, id: u32, z: f64) -> ResolvedFloor {
        let resolver = FloorLevelResolver::new(model, config);
        let element = model.element(id).unwrap();
        let storey = resolver.find_storey(element);
        resolver.resolve(storey.as_ref(), z)
    }

    #[test]
    fn test_elevation_beats_name() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        let floor = resolve(&model, &ExtractionConfig::default(), 1, 0.0);
        assert_eq!(floor, ResolvedFloor { level: 1, source: FloorSource::Elevation });
    }

    #[test]
    fn test_space_walks_up_to_storey_name() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        let resolver = FloorLevelResolver::new(&model, &ExtractionConfig::default());
        let storey = resolver.find_storey(model.element(2).unwrap()).unwrap();
        assert_eq!(storey.storey.id, 102);
        assert_eq!(storey.link, StoreyLink::Containment);
        assert_eq!(
            resolver.resolve(Some(&storey), 0.0),
            ResolvedFloor { level: 2, source: FloorSource::StoreyName }
        );
    }

    #[test]
    fn test_decomposition_when_not_contained() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        let resolver = FloorLevelResolver::new(&model, &ExtractionConfig::default());
        let storey = resolver.find_storey(model.element(3).unwrap()).unwrap();
        assert_eq!(storey.link, StoreyLink::Decomposition);
    }

    #[test]
    fn test_absolute_z_fallback() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        // Contained in the building only: no storey
        let floor = resolve(&model, &ExtractionConfig::default(), 4, 6200.0);
        assert_eq!(floor, ResolvedFloor { level: 2, source: FloorSource::AbsoluteZ });

        // Storey without elevation or digits
        let floor = resolve(&model, &ExtractionConfig::default(), 5, -3100.0);
        assert_eq!(floor, ResolvedFloor { level: -1, source: FloorSource::AbsoluteZ });
    }

    #[test]
    fn test_default_when_heuristic_disabled() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        let config = ExtractionConfig {
            absolute_z_heuristic: false,
            ..ExtractionConfig::default()
        };
        let floor = resolve(&model, &config, 4, 6200.0);
        assert_eq!(floor, ResolvedFloor { level: 0, source: FloorSource::Default });
    }

    #[test]
    fn test_storey_height_is_configurable() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        let config = ExtractionConfig {
            storey_height_mm: 4000.0,
            ..ExtractionConfig::default()
        };
        // 3000 / 4000 rounds to 1
        assert_eq!(resolve(&model, &config, 1, 0.0).level, 1);
        // 6200 / 4000 rounds to 2
        assert_eq!(resolve(&model, &config, 4, 6200.0).level, 2);
    }

    #[test]
    fn test_half_storey_elevation_rounds_to_even() {
        let model = BuildingModel::from_json(
            r#"{
                "spatial_elements": [
                    {"id": 201, "kind": "storey", "name": "Mezzanine", "elevation": 1500},
                    {"id": 202, "kind": "storey", "name": "Plant", "elevation": 7500},
                    {"id": 203, "kind": "storey", "name": "Upper", "elevation": 4500}
                ],
                "containment": [
                    {"relating_structure": 201, "related_elements": [1]},
                    {"relating_structure": 202, "related_elements": [2]},
                    {"relating_structure": 203, "related_elements": [3]}
                ],
                "elements": [
                    {"id": 1, "global_id": "a", "category": "Column"},
                    {"id": 2, "global_id": "b", "category": "Column"},
                    {"id": 3, "global_id": "c", "category": "Column"}
                ]
            }"#,
        )
        .unwrap();
        let config = ExtractionConfig::default();

        assert_eq!(resolve(&model, &config, 1, 0.0), ResolvedFloor { level: 0, source: FloorSource::Elevation });
        assert_eq!(resolve(&model, &config, 2, 0.0), ResolvedFloor { level: 2, source: FloorSource::Elevation });
        assert_eq!(resolve(&model, &config, 3, 0.0).level, 2);
    }

    #[test]
    fn test_parse_storey_number() {
        assert_eq!(parse_storey_number("Level 2"), Some(2));
        assert_eq!(parse_storey_number("Etage -1"), Some(-1));
        assert_eq!(parse_storey_number("B1"), Some(1));
        assert_eq!(parse_storey_number("03 - Office"), Some(3));
        assert_eq!(parse_storey_number("Level 12a"), Some(12));
        assert_eq!(parse_storey_number("Roof"), None);
        assert_eq!(parse_storey_number("Level 99999999999"), None);
    }
}
