// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed, read-only building model.

use crate::entities::{ElementCategory, RawElement};
use crate::error::{Error, Result};
use crate::snapshot::{ModelSnapshot, ProjectInfo};
use crate::spatial::{LocalPlacement, SpatialElement};
use rustc_hash::FxHashMap;

/// Read access the extraction core needs from a model reader
///
/// Implementors hand out borrowed, already-deserialized data. Nothing here
/// mutates the model.
pub trait ModelSource {
    fn schema(&self) -> &str;

    fn project(&self) -> &ProjectInfo;

    /// Factor converting model length units to millimetres
    fn length_scale_mm(&self) -> f64;

    /// All elements of one category, fully enumerated, in source order
    fn elements_of(&self, category: ElementCategory) -> Vec<&RawElement>;

    fn element(&self, id: u32) -> Option<&RawElement>;

    fn placement(&self, id: u32) -> Option<&LocalPlacement>;

    fn spatial_element(&self, id: u32) -> Option<&SpatialElement>;

    /// RelatingStructure of the first containment relation naming `element_id`
    fn containing_structure(&self, element_id: u32) -> Option<u32>;

    /// RelatingObject of the aggregation that `object_id` is part of
    fn decomposes(&self, object_id: u32) -> Option<u32>;
}

/// Snapshot plus id lookup tables
#[derive(Debug, Clone)]
pub struct BuildingModel {
    snapshot: ModelSnapshot,
    element_index: FxHashMap<u32, usize>,
    placement_index: FxHashMap<u32, usize>,
    spatial_index: FxHashMap<u32, usize>,
    contained_in: FxHashMap<u32, u32>,
    decomposes: FxHashMap<u32, u32>,
}

impl BuildingModel {
    /// Index a snapshot
    ///
    /// Duplicate entity ids make references ambiguous and reject the model,
    /// as does a blank schema.
    /// Relations that point at unknown ids are kept; lookups simply miss.
    pub fn new(snapshot: ModelSnapshot) -> Result<Self> {
        if snapshot.schema.trim().is_empty() {
            return Err(Error::invalid("empty schema identifier"));
        }

        let element_index = index_ids(snapshot.elements.iter().map(|e| e.id), "element")?;
        let placement_index = index_ids(snapshot.placements.iter().map(|p| p.id), "placement")?;
        let spatial_index =
            index_ids(snapshot.spatial_elements.iter().map(|s| s.id), "spatial element")?;

        let mut contained_in = FxHashMap::default();
        for rel in &snapshot.containment {
            for &element in &rel.related_elements {
                contained_in.entry(element).or_insert(rel.relating_structure);
            }
        }

        let mut decomposes = FxHashMap::default();
        for rel in &snapshot.aggregation {
            for &object in &rel.related_objects {
                decomposes.entry(object).or_insert(rel.relating_object);
            }
        }

        Ok(Self {
            snapshot,
            element_index,
            placement_index,
            spatial_index,
            contained_in,
            decomposes,
        })
    }

    /// Parse and index a JSON snapshot
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: ModelSnapshot = serde_json::from_str(content)?;
        Self::new(snapshot)
    }

    pub fn snapshot(&self) -> &ModelSnapshot {
        &self.snapshot
    }

    /// Number of columns, beams and slabs
    pub fn structural_element_count(&self) -> usize {
        self.snapshot.elements.len()
    }
}

fn index_ids(ids: impl Iterator<Item = u32>, what: &str) -> Result<FxHashMap<u32, usize>> {
    let mut index = FxHashMap::default();
    for (pos, id) in ids.enumerate() {
        if index.insert(id, pos).is_some() {
            return Err(Error::invalid(format!("duplicate {} id #{}", what, id)));
        }
    }
    Ok(index)
}

impl ModelSource for BuildingModel {
    fn schema(&self) -> &str {
        &self.snapshot.schema
    }

    fn project(&self) -> &ProjectInfo {
        &self.snapshot.project
    }

    fn length_scale_mm(&self) -> f64 {
        self.snapshot.length_unit.scale_to_mm()
    }

    fn elements_of(&self, category: ElementCategory) -> Vec<&RawElement> {
        self.snapshot
            .elements
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    fn element(&self, id: u32) -> Option<&RawElement> {
        self.element_index
            .get(&id)
            .map(|&pos| &self.snapshot.elements[pos])
    }

    fn placement(&self, id: u32) -> Option<&LocalPlacement> {
        self.placement_index
            .get(&id)
            .map(|&pos| &self.snapshot.placements[pos])
    }

    fn spatial_element(&self, id: u32) -> Option<&SpatialElement> {
        self.spatial_index
            .get(&id)
            .map(|&pos| &self.snapshot.spatial_elements[pos])
    }

    fn containing_structure(&self, element_id: u32) -> Option<u32> {
        self.contained_in.get(&element_id).copied()
    }

    fn decomposes(&self, object_id: u32) -> Option<u32> {
        self.decomposes.get(&object_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "schema": "IFC4",
        "project": {"name": "Tower"},
        "placements": [
            {"id": 10, "relative_placement": {"type": "axis2_placement_3d", "location": [0, 0, 0]}},
            {"id": 11, "relative_to": 10}
        ],
        "spatial_elements": [
            {"id": 100, "kind": "storey", "name": "Level 1", "elevation": 0.0}
        ],
        "containment": [
            {"relating_structure": 100, "related_elements": [1, 2]}
        ],
        "aggregation": [
            {"relating_object": 100, "related_objects": [3]}
        ],
        "elements": [
            {"id": 1, "global_id": "c1", "category": "Column", "placement": 11},
            {"id": 2, "global_id": "b1", "category": "Beam"},
            {"id": 3, "global_id": "s1", "category": "Slab"}
        ]
    }"#;

    #[test]
    fn test_lookups() {
        let model = BuildingModel::from_json(MODEL).unwrap();
        assert_eq!(model.project().display_name(), "Tower");
        assert_eq!(model.elements_of(ElementCategory::Column).len(), 1);
        assert_eq!(model.placement(11).unwrap().relative_to, Some(10));
        assert!(model.spatial_element(100).unwrap().is_storey());
        assert_eq!(model.containing_structure(2), Some(100));
        assert_eq!(model.containing_structure(3), None);
        assert_eq!(model.decomposes(3), Some(100));
        assert_eq!(model.element(3).unwrap().global_id, "s1");
        assert!((model.length_scale_mm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"elements": [
            {"id": 1, "category": "Column"},
            {"id": 1, "category": "Beam"}
        ]}"#;
        let err = BuildingModel::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = BuildingModel::from_json("ISO-10303-21;").unwrap_err();
        assert!(matches!(err, Error::Unreadable(_)));
    }
}
