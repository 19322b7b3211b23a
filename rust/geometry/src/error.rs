// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving placements or interpreting profiles
///
/// None of these reach callers of the resolvers' infallible entry points;
/// they come back as diagnostics next to a safe value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("placement chain exceeds {depth} links")]
    PlacementDepthExceeded { depth: usize },

    #[error("placement #{0} is referenced but not defined")]
    DanglingPlacement(u32),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}
