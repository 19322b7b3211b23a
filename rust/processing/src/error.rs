// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for extraction runs
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a whole extraction run
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ifc_struct_model::Error),

    #[error("extraction cancelled after {processed} elements")]
    Cancelled { processed: usize },
}

/// Failure while building one element record
///
/// Caught at the pipeline boundary and counted; the batch carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("element #{0} has no GlobalId")]
    MissingGlobalId(u32),

    #[error("element #{id} has a non-finite {field}")]
    NonFinite { id: u32, field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error(transparent)]
    Geometry(#[from] ifc_struct_geometry::Error),
}
