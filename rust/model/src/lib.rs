// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Struct Model
//!
//! Read-only view of an already-deserialized building model, as handed over
//! by a building-model reader. The extraction core never parses the STEP
//! grammar itself; it consumes these structures.
//!
//! ## Overview
//!
//! - **Elements**: columns, beams and slabs with their property sets,
//!   quantity sets, representation trees and material associations
//! - **Placements**: local placement links keyed by entity id
//! - **Spatial structure**: sites, buildings, storeys and spaces, plus the
//!   containment and aggregation relations that connect elements to them
//! - **Snapshots**: a JSON serialization of all of the above, loaded with
//!   [`load_model`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_struct_model::{load_model, ElementCategory, ModelSource};
//!
//! let model = load_model("tower.json")?;
//! for column in model.elements_of(ElementCategory::Column) {
//!     println!("{} {:?}", column.global_id, column.name);
//! }
//! ```

pub mod entities;
pub mod error;
pub mod loader;
pub mod model;
pub mod representation;
pub mod snapshot;
pub mod spatial;
pub mod units;

pub use entities::{
    ElementCategory, MaterialAssociation, MaterialLayer, Property, PropertySet, PropertyValue,
    Quantity, QuantityKind, QuantitySet, RawElement,
};
pub use error::{Error, Result};
pub use loader::{load_model, quick_info, validate_model_path, QuickInfo, SNAPSHOT_EXTENSION};
pub use model::{BuildingModel, ModelSource};
pub use representation::{ProfileDef, RepresentationItem};
pub use snapshot::{ModelSnapshot, ProjectInfo};
pub use spatial::{
    AggregationRelation, AxisPlacement, ContainmentRelation, LocalPlacement, SpatialElement,
    SpatialKind,
};
pub use units::{get_si_prefix_multiplier, LengthUnit};
