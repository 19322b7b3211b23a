// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loading snapshots from disk: batch-fatal checks and quick info.

use ifc_struct_model::{load_model, quick_info, Error, ModelSource, ProjectInfo};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SMALL_MODEL: &str = r#"{
    "schema": "IFC2X3",
    "project": {"name": "Parking Deck"},
    "length_unit": {"prefix": null},
    "elements": [
        {"id": 1, "global_id": "2O2Fr$t4X7Zf8NOew3FLOH", "category": "Column"},
        {"id": 2, "global_id": "2O2Fr$t4X7Zf8NOew3FLOI", "category": "Beam"}
    ]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_missing_file() {
    let err = load_model(Path::new("/definitely/not/here/model.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_wrong_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "model.ifc", SMALL_MODEL);
    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, Error::WrongExtension { .. }));
    assert!(err.to_string().contains(".json"));
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "MODEL.JSON", SMALL_MODEL);
    let model = load_model(&path).unwrap();
    assert_eq!(model.schema(), "IFC2X3");
    assert!((model.length_scale_mm() - 1000.0).abs() < 1e-9);
}

#[test]
fn test_unreadable_structure() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{\"elements\": [");
    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, Error::Unreadable(_)));
}

#[test]
fn test_quick_info() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "deck.json", SMALL_MODEL);
    let info = quick_info(&path).unwrap();
    assert_eq!(info.project_name, "Parking Deck");
    assert_eq!(info.element_count, 2);
}

#[test]
fn test_quick_info_unnamed_project() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "anon.json", r#"{"project": {"name": "  "}}"#);
    let info = quick_info(&path).unwrap();
    assert_eq!(info.project_name, ProjectInfo::UNNAMED);
    assert_eq!(info.element_count, 0);
}
