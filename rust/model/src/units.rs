// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit handling
//!
//! Snapshots record the project length unit as an IfcSIPrefix on metres.
//! Everything downstream works in millimetres, so the only thing exposed here
//! is the factor that takes a model length to mm.

use serde::{Deserialize, Serialize};

/// SI Prefix multipliers as defined by the IFC schema
/// Maps IfcSIPrefix enum values to their numeric multipliers
#[inline]
pub fn get_si_prefix_multiplier(prefix: &str) -> f64 {
    let prefix = prefix.trim().trim_matches('.');
    match prefix.to_ascii_uppercase().as_str() {
        "ATTO" => 1e-18,
        "FEMTO" => 1e-15,
        "PICO" => 1e-12,
        "NANO" => 1e-9,
        "MICRO" => 1e-6,
        "MILLI" => 1e-3,
        "CENTI" => 1e-2,
        "DECI" => 1e-1,
        "DECA" => 1e1,
        "HECTO" => 1e2,
        "KILO" => 1e3,
        "MEGA" => 1e6,
        "GIGA" => 1e9,
        "TERA" => 1e12,
        "PETA" => 1e15,
        "EXA" => 1e18,
        _ => 1.0, // No prefix or unknown = base unit (meters)
    }
}

/// Project length unit (IfcSIUnit of type LENGTHUNIT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthUnit {
    /// IfcSIPrefix name, `None` for plain metres
    pub prefix: Option<String>,
}

impl LengthUnit {
    pub fn millimetre() -> Self {
        Self {
            prefix: Some("MILLI".to_string()),
        }
    }

    pub fn metre() -> Self {
        Self { prefix: None }
    }

    /// Multiplier converting a length in this unit to millimetres
    pub fn scale_to_mm(&self) -> f64 {
        let to_metres = self
            .prefix
            .as_deref()
            .map(get_si_prefix_multiplier)
            .unwrap_or(1.0);
        to_metres * 1000.0
    }
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::millimetre()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_multipliers() {
        assert_eq!(get_si_prefix_multiplier("MILLI"), 1e-3);
        assert_eq!(get_si_prefix_multiplier(".CENTI."), 1e-2);
        assert_eq!(get_si_prefix_multiplier("kilo"), 1e3);
        assert_eq!(get_si_prefix_multiplier("BOGUS"), 1.0);
    }

    #[test]
    fn test_scale_to_mm() {
        assert!((LengthUnit::millimetre().scale_to_mm() - 1.0).abs() < 1e-12);
        assert!((LengthUnit::metre().scale_to_mm() - 1000.0).abs() < 1e-9);
        let cm = LengthUnit {
            prefix: Some("CENTI".into()),
        };
        assert!((cm.scale_to_mm() - 10.0).abs() < 1e-9);
    }
}
