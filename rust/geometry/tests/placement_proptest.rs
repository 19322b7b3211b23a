// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests for placement chain resolution
//!
//! Any acyclic chain within the depth cap resolves to the plain sum of its
//! link translations; anything deeper resolves to the origin with a
//! diagnostic.

use ifc_struct_geometry::{Error, PlacementResolver, DEFAULT_PLACEMENT_DEPTH_CAP};
use ifc_struct_model::{AxisPlacement, BuildingModel, LocalPlacement, ModelSnapshot};
use proptest::prelude::*;

/// Build a linear chain where link `i` points at link `i - 1`; returns the head id
fn chain_model(links: &[[f64; 3]]) -> (BuildingModel, u32) {
    let placements = links
        .iter()
        .enumerate()
        .map(|(i, location)| LocalPlacement {
            id: i as u32 + 1,
            relative_to: (i > 0).then_some(i as u32),
            relative_placement: Some(AxisPlacement::Axis3D {
                location: *location,
                axis: None,
                ref_direction: None,
            }),
        })
        .collect();
    let snapshot = ModelSnapshot {
        placements,
        ..ModelSnapshot::default()
    };
    (BuildingModel::new(snapshot).unwrap(), links.len() as u32)
}

fn translation_strategy() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-1.0e5..1.0e5f64)
}

proptest! {
    #[test]
    fn chain_resolves_to_sum_of_links(
        links in prop::collection::vec(translation_strategy(), 1..=DEFAULT_PLACEMENT_DEPTH_CAP)
    ) {
        let (model, head) = chain_model(&links);
        let resolution = PlacementResolver::new(&model).resolve(Some(head));
        prop_assert!(resolution.is_clean());

        for axis in 0..3 {
            let expected: f64 = links.iter().map(|l| l[axis]).sum();
            let tolerance = 1e-6 * (1.0 + expected.abs());
            prop_assert!((resolution.translation[axis] - expected).abs() <= tolerance);
        }
    }

    #[test]
    fn chain_over_cap_resolves_to_origin(
        links in prop::collection::vec(translation_strategy(), 5..40),
        cap in 1usize..5
    ) {
        let (model, head) = chain_model(&links);
        let resolution = PlacementResolver::with_depth_cap(&model, cap).resolve(Some(head));
        prop_assert_eq!(resolution.translation, nalgebra_zero());
        prop_assert_eq!(resolution.diagnostic, Some(Error::PlacementDepthExceeded { depth: cap }));
    }
}

fn nalgebra_zero() -> ifc_struct_geometry::Vector3<f64> {
    ifc_struct_geometry::Vector3::zeros()
}
