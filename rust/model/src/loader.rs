// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loading model snapshots from disk.

use crate::error::{Error, Result};
use crate::model::{BuildingModel, ModelSource};
use std::path::Path;

/// File extension of model snapshots
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Project name and element count, without running an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    pub project_name: String,
    pub element_count: usize,
}

/// Check that `path` exists and has the snapshot extension
pub fn validate_model_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION));

    if !has_extension {
        return Err(Error::WrongExtension {
            path: path.to_path_buf(),
            expected: SNAPSHOT_EXTENSION,
        });
    }

    Ok(())
}

/// Validate, read and index a model snapshot
pub fn load_model(path: impl AsRef<Path>) -> Result<BuildingModel> {
    let path = path.as_ref();
    validate_model_path(path)?;
    let content = std::fs::read_to_string(path)?;
    BuildingModel::from_json(&content)
}

pub fn quick_info(path: impl AsRef<Path>) -> Result<QuickInfo> {
    let model = load_model(path)?;
    Ok(QuickInfo {
        project_name: model.project().display_name().to_string(),
        element_count: model.structural_element_count(),
    })
}
