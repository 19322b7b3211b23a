// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model loading
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole extraction before any element is processed
#[derive(Error, Debug)]
pub enum Error {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported model file {}: expected a .{expected} file", .path.display())]
    WrongExtension {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable model structure: {0}")]
    Unreadable(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("unknown element category: {0}")]
    UnknownCategory(String),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidModel(msg.into())
    }
}
