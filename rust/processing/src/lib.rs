// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Struct Processing
//!
//! Turns the columns, beams and slabs of a building model into flat,
//! normalized records for structural quantity takeoff.
//!
//! ## Overview
//!
//! - **Dimensions**: properties, then body geometry, then material layers,
//!   then per-category defaults
//! - **Floor levels**: storey elevation, storey name digits, absolute Z
//! - **Volumes**: declared quantities, else the dimension product
//! - **Materials**: catalog lookup with density for weight
//! - **Statistics**: totals grouped by category, floor and material
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_struct_processing::{ExtractionConfig, ExtractionPipeline};
//!
//! let pipeline = ExtractionPipeline::new(ExtractionConfig::from_env());
//! let output = pipeline.extract_file("tower.json")?;
//! println!("{} elements, {:.2} m³", output.elements.len(), output.report.total_volume);
//! ```

pub mod bounds;
pub mod config;
pub mod dimensions;
pub mod element;
pub mod error;
pub mod floor;
pub mod materials;
pub mod pipeline;
pub mod statistics;
pub mod volume;

pub use bounds::ModelBounds;
pub use config::{ExtractionConfig, PerCategory};
pub use dimensions::{DimensionExtractor, ResolvedDimensions};
pub use element::{
    DimensionSource, Dimensions, FloorSource, Location, Material, MaterialCategory,
    NormalizedElement, Provenance, StoreyLink, VolumeSource,
};
pub use error::{ElementError, Error, Result};
pub use floor::{parse_storey_number, FloorLevelResolver, ResolvedFloor, StoreyContext};
pub use materials::{classify_material_name, MaterialCatalog};
pub use pipeline::{
    BatchReport, CancellationToken, CategoryPhase, CategoryReport, ExtractionEvent,
    ExtractionOutput, ExtractionPipeline,
};
pub use statistics::{by_category, by_floor, distinct_floors, GroupStats, StatisticsSnapshot};
pub use volume::{calculate_volume, ResolvedVolume};
