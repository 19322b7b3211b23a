// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statistics over normalized elements
//!
//! Snapshots are derived on demand and never stored. Maps are ordered so that
//! serialized output is stable.

use crate::element::NormalizedElement;
use ifc_struct_model::ElementCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Count, volume (m³) and weight (kg) of one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    pub volume: f64,
    pub weight: f64,
}

impl GroupStats {
    #[inline]
    fn add(&mut self, element: &NormalizedElement) {
        self.count += 1;
        self.volume += element.volume;
        self.weight += element.weight_kg();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_count: usize,
    /// Sum of the per-category volumes
    pub total_volume: f64,
    pub total_weight: f64,
    pub by_category: BTreeMap<ElementCategory, GroupStats>,
    pub by_floor: BTreeMap<i32, GroupStats>,
    /// Elements without a material are left out here only
    pub by_material: BTreeMap<String, GroupStats>,
}

impl StatisticsSnapshot {
    pub fn from_elements<'e, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'e NormalizedElement>,
    {
        let mut snapshot = Self::default();
        for category in ElementCategory::ALL {
            snapshot.by_category.insert(category, GroupStats::default());
        }

        for element in elements {
            snapshot
                .by_category
                .entry(element.category)
                .or_default()
                .add(element);
            snapshot
                .by_floor
                .entry(element.floor_level)
                .or_default()
                .add(element);
            if let Some(name) = element.material_name() {
                snapshot
                    .by_material
                    .entry(name.to_string())
                    .or_default()
                    .add(element);
            }
        }

        for group in snapshot.by_category.values() {
            snapshot.total_count += group.count;
            snapshot.total_volume += group.volume;
            snapshot.total_weight += group.weight;
        }
        snapshot
    }

    /// Snapshot restricted to one floor
    pub fn for_floor(elements: &[NormalizedElement], floor_level: i32) -> Self {
        Self::from_elements(by_floor(elements, floor_level))
    }

    /// Number of distinct floor levels
    #[inline]
    pub fn floor_count(&self) -> usize {
        self.by_floor.len()
    }

    pub fn category(&self, category: ElementCategory) -> GroupStats {
        self.by_category.get(&category).copied().unwrap_or_default()
    }
}

/// Elements on one floor
pub fn by_floor(
    elements: &[NormalizedElement],
    floor_level: i32,
) -> impl Iterator<Item = &NormalizedElement> {
    elements.iter().filter(move |e| e.floor_level == floor_level)
}

/// Elements of one category
pub fn by_category(
    elements: &[NormalizedElement],
    category: ElementCategory,
) -> impl Iterator<Item = &NormalizedElement> {
    elements.iter().filter(move |e| e.category == category)
}

/// Distinct floor levels, ascending
pub fn distinct_floors(elements: &[NormalizedElement]) -> BTreeSet<i32> {
    elements.iter().map(|e| e.floor_level).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{
        DimensionSource, Dimensions, FloorSource, Location, Material, MaterialCategory,
        Provenance, VolumeSource,
    };
    use approx::assert_relative_eq;

    fn record(category: ElementCategory, floor: i32, volume: f64, material: Option<&str>) -> NormalizedElement {
        let material = material.map(|name| Material {
            name: name.to_string(),
            category: MaterialCategory::Concrete,
            density: 2500.0,
            compressive_strength: 30.0,
        });
        NormalizedElement {
            global_id: format!("{}-{}-{}", category, floor, volume),
            name: category.to_string(),
            category,
            ifc_type: category.ifc_type_name().to_string(),
            location: Location::default(),
            dimensions: Dimensions::new(300.0, 300.0, 3000.0),
            length: None,
            area: None,
            thickness: None,
            floor_level: floor,
            volume,
            weight: material.as_ref().map(|m| volume * m.density),
            material,
            provenance: Provenance {
                dimensions: DimensionSource::CategoryDefaults,
                floor: FloorSource::Default,
                storey_link: None,
                volume: VolumeSource::Dimensions,
                placement_diagnostic: None,
            },
        }
    }

    fn sample() -> Vec<NormalizedElement> {
        vec![
            record(ElementCategory::Column, 0, 0.27, Some("C30/37 Concrete")),
            record(ElementCategory::Column, 1, 0.36, Some("C30/37 Concrete")),
            record(ElementCategory::Beam, 1, 0.9, None),
            record(ElementCategory::Slab, 1, 5.0, Some("C35/45 Concrete")),
            record(ElementCategory::Slab, -1, 4.0, None),
        ]
    }

    #[test]
    fn test_totals_match_groups() {
        let elements = sample();
        let stats = StatisticsSnapshot::from_elements(&elements);

        assert_eq!(stats.total_count, 5);
        let floor_total: usize = stats.by_floor.values().map(|g| g.count).sum();
        assert_eq!(floor_total, stats.total_count);

        let category_volume: f64 = stats.by_category.values().map(|g| g.volume).sum();
        assert_relative_eq!(stats.total_volume, category_volume);
        assert_relative_eq!(stats.total_volume, 10.53, epsilon = 1e-9);

        assert_eq!(stats.category(ElementCategory::Column).count, 2);
        assert_eq!(stats.floor_count(), 3);
    }

    #[test]
    fn test_missing_material_weighs_nothing() {
        let elements = sample();
        let stats = StatisticsSnapshot::from_elements(&elements);

        assert_relative_eq!(stats.total_weight, (0.27 + 0.36 + 5.0) * 2500.0, epsilon = 1e-6);
        assert_eq!(stats.by_material.len(), 2);
        assert_eq!(stats.by_material["C30/37 Concrete"].count, 2);
        let material_count: usize = stats.by_material.values().map(|g| g.count).sum();
        assert_eq!(material_count, 3);
    }

    #[test]
    fn test_floor_snapshot() {
        let elements = sample();
        let floor_one = StatisticsSnapshot::for_floor(&elements, 1);
        assert_eq!(floor_one.total_count, 3);
        assert_eq!(floor_one.category(ElementCategory::Slab).count, 1);
        assert_eq!(floor_one.floor_count(), 1);

        assert_eq!(by_category(&elements, ElementCategory::Slab).count(), 2);
        assert_eq!(
            distinct_floors(&elements).into_iter().collect::<Vec<_>>(),
            vec![-1, 0, 1]
        );
    }

    #[test]
    fn test_empty() {
        let stats = StatisticsSnapshot::from_elements(std::iter::empty::<&NormalizedElement>());
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.by_category.len(), 3);
        assert_eq!(stats.floor_count(), 0);
    }
}
