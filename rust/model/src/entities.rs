// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural elements and the property, quantity and material data attached to them.

use crate::error::Error;
use crate::representation::RepresentationItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural element category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementCategory {
    Column,
    Beam,
    Slab,
}

impl ElementCategory {
    /// All categories in extraction order
    pub const ALL: [ElementCategory; 3] = [
        ElementCategory::Column,
        ElementCategory::Beam,
        ElementCategory::Slab,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Column => "Column",
            ElementCategory::Beam => "Beam",
            ElementCategory::Slab => "Slab",
        }
    }

    /// IFC entity name the category was read from
    #[inline]
    pub fn ifc_type_name(&self) -> &'static str {
        match self {
            ElementCategory::Column => "IfcColumn",
            ElementCategory::Beam => "IfcBeam",
            ElementCategory::Slab => "IfcSlab",
        }
    }

    /// Plate-like elements carry their thickness in material layers
    #[inline]
    pub fn is_plate_like(&self) -> bool {
        matches!(self, ElementCategory::Slab)
    }

    /// Map an IFC entity type name (any case, StandardCase variants included)
    pub fn from_ifc_type(type_name: &str) -> Option<Self> {
        let upper = type_name.to_ascii_uppercase();
        let base = upper.strip_suffix("STANDARDCASE").unwrap_or(&upper);
        match base {
            "IFCCOLUMN" => Some(ElementCategory::Column),
            "IFCBEAM" => Some(ElementCategory::Beam),
            "IFCSLAB" => Some(ElementCategory::Slab),
            _ => None,
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "column" => Ok(ElementCategory::Column),
            "beam" => Ok(ElementCategory::Beam),
            "slab" => Ok(ElementCategory::Slab),
            other => ElementCategory::from_ifc_type(other)
                .ok_or_else(|| Error::UnknownCategory(s.to_string())),
        }
    }
}

/// One structural element as delivered by the model reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawElement {
    /// Entity id (STEP instance number)
    pub id: u32,
    /// IFC GlobalId. Advisory, duplicates happen in real files
    #[serde(default)]
    pub global_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: ElementCategory,
    /// ObjectPlacement: head of the local placement chain
    #[serde(default)]
    pub placement: Option<u32>,
    /// Items of the body representation, in source order
    #[serde(default)]
    pub representation: Vec<RepresentationItem>,
    #[serde(default)]
    pub property_sets: Vec<PropertySet>,
    #[serde(default)]
    pub quantity_sets: Vec<QuantitySet>,
    #[serde(default)]
    pub material: Option<MaterialAssociation>,
}

impl RawElement {
    /// Iterate every single-valued property across all property sets
    pub fn single_values(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.property_sets
            .iter()
            .flat_map(|pset| pset.properties.iter())
            .filter_map(|prop| match prop {
                Property::SingleValue {
                    name,
                    value: Some(value),
                } => Some((name.as_str(), value)),
                _ => None,
            })
    }

    /// Iterate all quantities across all quantity sets
    pub fn quantities(&self) -> impl Iterator<Item = &Quantity> {
        self.quantity_sets.iter().flat_map(|qset| qset.quantities.iter())
    }
}

/// IfcPropertySet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySet {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// IfcProperty subtypes the reader surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    SingleValue {
        name: String,
        #[serde(default)]
        value: Option<PropertyValue>,
    },
    EnumeratedValue {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    ListValue {
        name: String,
        #[serde(default)]
        values: Vec<PropertyValue>,
    },
}

/// Nominal value of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl PropertyValue {
    /// Numeric reading of the value; text is parsed leniently
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            PropertyValue::Integer(i) => *i as f64,
            PropertyValue::Real(r) => *r,
            PropertyValue::Text(s) => s.trim().parse::<f64>().ok()?,
            PropertyValue::Boolean(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// IfcElementQuantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantitySet {
    pub name: String,
    #[serde(default)]
    pub quantities: Vec<Quantity>,
}

/// Single physical quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    pub name: String,
    pub kind: QuantityKind,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Length,
    Area,
    Volume,
    Count,
    Weight,
    Time,
}

/// Material association (IfcRelAssociatesMaterial target)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialAssociation {
    Single {
        name: String,
    },
    LayerSet {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        layers: Vec<MaterialLayer>,
    },
    List {
        #[serde(default)]
        names: Vec<String>,
    },
}

/// IfcMaterialLayer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLayer {
    #[serde(default)]
    pub material: Option<String>,
    /// LayerThickness in model length units
    pub thickness: f64,
}

impl MaterialAssociation {
    /// Name that best represents the material for grouping
    pub fn primary_name(&self) -> Option<&str> {
        let name = match self {
            MaterialAssociation::Single { name } => Some(name.as_str()),
            MaterialAssociation::LayerSet { name, layers } => layers
                .iter()
                .find_map(|l| l.material.as_deref())
                .or(name.as_deref()),
            MaterialAssociation::List { names } => names.first().map(String::as_str),
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }

    /// Sum of layer thicknesses in model units, `None` without layers
    pub fn layer_thickness_sum(&self) -> Option<f64> {
        match self {
            MaterialAssociation::LayerSet { layers, .. } if !layers.is_empty() => {
                Some(layers.iter().map(|l| l.thickness).sum())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("beam".parse::<ElementCategory>().unwrap(), ElementCategory::Beam);
        assert_eq!(" Column ".parse::<ElementCategory>().unwrap(), ElementCategory::Column);
        assert_eq!(
            "IFCSLABSTANDARDCASE".parse::<ElementCategory>().unwrap(),
            ElementCategory::Slab
        );
        assert!("wall".parse::<ElementCategory>().is_err());
    }

    #[test]
    fn test_property_value_numeric() {
        assert_eq!(PropertyValue::Integer(300).as_f64(), Some(300.0));
        assert_eq!(PropertyValue::Text(" 250.5 ".into()).as_f64(), Some(250.5));
        assert_eq!(PropertyValue::Text("C30/37".into()).as_f64(), None);
        assert_eq!(PropertyValue::Boolean(true).as_f64(), None);
    }

    #[test]
    fn test_property_value_untagged_json() {
        let values: Vec<PropertyValue> = serde_json::from_str(r#"[true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PropertyValue::Boolean(true),
                PropertyValue::Integer(3),
                PropertyValue::Real(2.5),
                PropertyValue::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_layer_thickness_sum() {
        let layers = MaterialAssociation::LayerSet {
            name: Some("Floor".into()),
            layers: vec![
                MaterialLayer {
                    material: None,
                    thickness: 100.0,
                },
                MaterialLayer {
                    material: Some("C30/37 Concrete".into()),
                    thickness: 50.0,
                },
            ],
        };
        assert_eq!(layers.layer_thickness_sum(), Some(150.0));
        assert_eq!(layers.primary_name(), Some("C30/37 Concrete"));

        let single = MaterialAssociation::Single { name: "  ".into() };
        assert_eq!(single.layer_thickness_sum(), None);
        assert_eq!(single.primary_name(), None);
    }
}
