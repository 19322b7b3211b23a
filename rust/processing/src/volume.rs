// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume calculation.

use crate::element::{Dimensions, VolumeSource};
use ifc_struct_model::{QuantityKind, RawElement};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedVolume {
    /// m³, never negative
    pub volume_m3: f64,
    pub source: VolumeSource,
}

/// Explicit volume quantity first, else the dimension product
///
/// Volume quantities are taken as m³ regardless of the length unit.
pub fn calculate_volume(element: &RawElement, dimensions: &Dimensions) -> ResolvedVolume {
    let explicit = element
        .quantities()
        .find(|q| q.kind == QuantityKind::Volume)
        .map(|q| q.value)
        .filter(|v| v.is_finite() && *v > 0.0);

    if let Some(volume_m3) = explicit {
        return ResolvedVolume {
            volume_m3,
            source: VolumeSource::Quantity,
        };
    }

    let derived = dimensions.volume_m3();
    if derived.is_finite() && derived >= 0.0 {
        ResolvedVolume {
            volume_m3: derived,
            source: VolumeSource::Dimensions,
        }
    } else {
        ResolvedVolume {
            volume_m3: 0.0,
            source: VolumeSource::Unavailable,
        }
    }
}
