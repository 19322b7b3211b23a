// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material catalog
//!
//! Known grades resolve by exact (case-insensitive) name. Unknown names that
//! mention a material family get that family's nominal density and keep the
//! source name, so grouping still reflects the model.

use crate::element::{Material, MaterialCategory};
use rustc_hash::FxHashMap;

/// Nominal density per family (kg/m³)
fn family_density(category: MaterialCategory) -> f64 {
    match category {
        MaterialCategory::Concrete => 2500.0,
        MaterialCategory::Steel => 7850.0,
        MaterialCategory::Wood => 500.0,
    }
}

/// Family named somewhere in a material name
pub fn classify_material_name(name: &str) -> Option<MaterialCategory> {
    let lower = name.to_lowercase();
    if lower.contains("concrete") || lower.contains("beton") {
        Some(MaterialCategory::Concrete)
    } else if lower.contains("steel") || lower.contains("stahl") {
        Some(MaterialCategory::Steel)
    } else if lower.contains("timber") || lower.contains("wood") {
        Some(MaterialCategory::Wood)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    entries: FxHashMap<String, Material>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MaterialCatalog {
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Catalog with the standard concrete and reinforcing steel grades
    pub fn seeded() -> Self {
        let mut catalog = Self::empty();
        for (name, category, strength) in [
            ("C30/37 Concrete", MaterialCategory::Concrete, 30.0),
            ("C35/45 Concrete", MaterialCategory::Concrete, 35.0),
            ("S420 Steel", MaterialCategory::Steel, 420.0),
            ("S500 Steel", MaterialCategory::Steel, 500.0),
        ] {
            catalog.insert(Material {
                name: name.to_string(),
                category,
                density: family_density(category),
                compressive_strength: strength,
            });
        }
        catalog
    }

    pub fn insert(&mut self, material: Material) {
        self.entries
            .insert(material.name.trim().to_lowercase(), material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.entries.get(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Material for a source name: catalog entry, else family by keyword
    pub fn lookup(&self, name: &str) -> Option<Material> {
        if let Some(known) = self.get(name) {
            return Some(known.clone());
        }
        let category = classify_material_name(name)?;
        Some(Material {
            name: name.trim().to_string(),
            category,
            density: family_density(category),
            compressive_strength: 0.0,
        })
    }

    /// Source name first, then the configured default
    pub fn resolve(&self, source_name: Option<&str>, default: Option<&str>) -> Option<Material> {
        source_name
            .and_then(|name| self.lookup(name))
            .or_else(|| default.and_then(|name| self.lookup(name)))
    }
}
