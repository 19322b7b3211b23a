// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Struct CLI - structural quantity takeoff from model snapshots.
//!
//! Runs the extraction pipeline over one or more snapshot files and prints a
//! JSON document on stdout. Logs go to stderr.
//!
//! ```text
//! ifc-struct tower.json
//! ifc-struct --output records --floor 2 tower.json
//! ifc-struct --info a.json b.json
//! ```
//!
//! Extraction settings come from `IFC_STRUCT_*` environment variables.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use ifc_struct_model::quick_info;
use ifc_struct_processing::{
    BatchReport, ExtractionConfig, ExtractionOutput, ExtractionPipeline, NormalizedElement,
    StatisticsSnapshot,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "info,ifc_struct_processing=debug";

#[derive(Parser, Debug)]
#[command(name = "ifc-struct", version, about = "Normalize columns, beams and slabs of building models")]
struct Args {
    /// Model snapshot files (.json)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// What to print for each file
    #[arg(long, short, value_enum, default_value_t = OutputKind::Summary)]
    output: OutputKind,

    /// Print project name and element count only, without extraction
    #[arg(long)]
    info: bool,

    /// Restrict statistics and records to one floor level
    #[arg(long, allow_hyphen_values = true)]
    floor: Option<i32>,

    /// Worker threads for multi-file batches (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// Batch report and statistics
    Summary,
    /// Normalized records only
    Records,
    /// Report, statistics and records
    Full,
}

#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a BatchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<StatisticsSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    centroid: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<Vec<&'a NormalizedElement>>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    if args.info {
        return print_info(&args.files);
    }

    let config = ExtractionConfig::from_env();
    tracing::info!(
        files = args.files.len(),
        storey_height_mm = config.storey_height_mm,
        placement_depth_cap = config.placement_depth_cap,
        absolute_z_heuristic = config.absolute_z_heuristic,
        "Starting IFC-Struct extraction"
    );

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("Failed to initialize rayon thread pool")?;
    }

    let pipeline = ExtractionPipeline::new(config);
    let results = pipeline.extract_files(&args.files);

    let mut documents = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (path, result) in &results {
        match result {
            Ok(output) => documents.push(serde_json::to_value(render(
                path, output, args.output, args.floor,
            ))?),
            Err(e) => {
                failures += 1;
                tracing::error!(path = %path.display(), error = %e, "Extraction failed");
                documents.push(json!({ "path": path.display().to_string(), "error": e.to_string() }));
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&documents)?);

    if failures > 0 {
        bail!("{} of {} files failed", failures, results.len());
    }
    Ok(())
}

fn render<'a>(
    path: &std::path::Path,
    output: &'a ExtractionOutput,
    kind: OutputKind,
    floor: Option<i32>,
) -> FileResult<'a> {
    let elements: Vec<&NormalizedElement> = output
        .elements
        .iter()
        .filter(|e| floor.map_or(true, |f| e.floor_level == f))
        .collect();
    let statistics = match floor {
        Some(f) => StatisticsSnapshot::for_floor(&output.elements, f),
        None => output.statistics.clone(),
    };
    let centroid = output.bounds.centroid();
    let with_summary = kind != OutputKind::Records;

    FileResult {
        path: path.display().to_string(),
        report: with_summary.then_some(&output.report),
        statistics: with_summary.then_some(statistics),
        centroid: with_summary.then_some([centroid.x, centroid.y, centroid.z]),
        elements: (kind != OutputKind::Summary).then_some(elements),
    }
}

fn print_info(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let info = quick_info(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        documents.push(json!({
            "path": path.display().to_string(),
            "project_name": info.project_name,
            "element_count": info.element_count,
        }));
    }
    println!("{}", serde_json::to_string_pretty(&documents)?);
    Ok(())
}

fn init_logging(json: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}
