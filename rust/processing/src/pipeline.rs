// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction pipeline
//!
//! Categories run one after another, each enumerated in full before its
//! first element is processed. Every element goes through placement,
//! dimensions, floor, volume and material resolution inside its own failure
//! boundary: a failing element is counted and skipped, the batch carries on.
//! Only a missing or unreadable model, or cancellation, ends a run early.

use crate::bounds::ModelBounds;
use crate::config::ExtractionConfig;
use crate::dimensions::DimensionExtractor;
use crate::element::{Location, NormalizedElement, Provenance};
use crate::error::{ElementError, Error, Result};
use crate::floor::FloorLevelResolver;
use crate::materials::MaterialCatalog;
use crate::statistics::StatisticsSnapshot;
use crate::volume::calculate_volume;
use ifc_struct_geometry::PlacementResolver;
use ifc_struct_model::{load_model, ElementCategory, ModelSource, RawElement};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Elements between two progress events
const PROGRESS_INTERVAL: usize = 100;

/// Externally triggered stop signal, checked between elements
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Per-category lifecycle: NotStarted, then Parsing, then Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPhase {
    NotStarted,
    Parsing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: ElementCategory,
    pub phase: CategoryPhase,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Emitted elements whose placement fell back to the origin
    pub placement_diagnostics: usize,
}

impl CategoryReport {
    fn new(category: ElementCategory) -> Self {
        Self {
            category,
            phase: CategoryPhase::NotStarted,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            placement_diagnostics: 0,
        }
    }
}

/// Batch diagnostics of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub project_name: String,
    pub schema: String,
    pub categories: Vec<CategoryReport>,
    /// m³, sum across categories
    pub total_volume: f64,
    /// Distinct floor levels across all records
    pub floor_count: usize,
    pub elapsed_ms: u64,
}

impl BatchReport {
    pub fn category(&self, category: ElementCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|r| r.category == category)
    }

    pub fn attempted(&self) -> usize {
        self.categories.iter().map(|r| r.attempted).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.categories.iter().map(|r| r.succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.categories.iter().map(|r| r.failed).sum()
    }
}

/// Progress notifications delivered to an observer during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionEvent {
    CategoryStarted {
        category: ElementCategory,
        total: usize,
    },
    Progress {
        category: ElementCategory,
        processed: usize,
        total: usize,
    },
    CategoryCompleted {
        report: CategoryReport,
    },
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub elements: Vec<NormalizedElement>,
    pub report: BatchReport,
    pub statistics: StatisticsSnapshot,
    pub bounds: ModelBounds,
}

/// Resolvers bound to one model for the duration of a run
struct RunContext<'a> {
    placements: PlacementResolver<'a>,
    dimensions: DimensionExtractor<'a>,
    floors: FloorLevelResolver<'a>,
}

pub struct ExtractionPipeline {
    config: ExtractionConfig,
    catalog: MaterialCatalog,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl ExtractionPipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        for category in config.invalid_defaults() {
            tracing::warn!(
                %category,
                defaults = ?config.defaults.get(category),
                "Configured default dimensions are not positive, using built-in ones"
            );
        }
        Self {
            config,
            catalog: MaterialCatalog::seeded(),
        }
    }

    pub fn with_catalog(mut self, catalog: MaterialCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run over all categories without observer or cancellation
    pub fn run(&self, model: &dyn ModelSource) -> Result<ExtractionOutput> {
        self.run_with(model, &CancellationToken::new(), &mut |_| {})
    }

    /// Run with progress events and cooperative cancellation
    pub fn run_with(
        &self,
        model: &dyn ModelSource,
        cancel: &CancellationToken,
        observer: &mut dyn FnMut(&ExtractionEvent),
    ) -> Result<ExtractionOutput> {
        let started = Instant::now();
        let scale_mm = model.length_scale_mm();
        let ctx = RunContext {
            placements: PlacementResolver::with_depth_cap(model, self.config.placement_depth_cap),
            dimensions: DimensionExtractor::new(&self.config, scale_mm),
            floors: FloorLevelResolver::new(model, &self.config),
        };

        tracing::info!(
            project = %model.project().display_name(),
            schema = %model.schema(),
            scale_mm,
            "Starting structural element extraction"
        );

        let mut elements = Vec::new();
        let mut reports = Vec::with_capacity(ElementCategory::ALL.len());
        let mut processed = 0usize;

        for category in ElementCategory::ALL {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled { processed });
            }
            let report = self.extract_category(
                model,
                &ctx,
                category,
                cancel,
                observer,
                &mut elements,
                &mut processed,
            )?;
            reports.push(report);
        }

        let statistics = StatisticsSnapshot::from_elements(&elements);
        let bounds = ModelBounds::from_elements(&elements);
        let report = BatchReport {
            project_name: model.project().display_name().to_string(),
            schema: model.schema().to_string(),
            categories: reports,
            total_volume: statistics.total_volume,
            floor_count: statistics.floor_count(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            elements = elements.len(),
            failed = report.failed(),
            total_volume = report.total_volume,
            floor_count = report.floor_count,
            elapsed_ms = report.elapsed_ms,
            "Extraction complete"
        );

        Ok(ExtractionOutput {
            elements,
            report,
            statistics,
            bounds,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn extract_category(
        &self,
        model: &dyn ModelSource,
        ctx: &RunContext<'_>,
        category: ElementCategory,
        cancel: &CancellationToken,
        observer: &mut dyn FnMut(&ExtractionEvent),
        out: &mut Vec<NormalizedElement>,
        processed: &mut usize,
    ) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(category);
        let raw = model.elements_of(category);
        let total = raw.len();

        report.phase = CategoryPhase::Parsing;
        observer(&ExtractionEvent::CategoryStarted { category, total });

        for (index, element) in raw.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled {
                    processed: *processed,
                });
            }

            report.attempted += 1;
            match self.extract_element(ctx, element) {
                Ok(record) => {
                    if let Some(diagnostic) = &record.provenance.placement_diagnostic {
                        report.placement_diagnostics += 1;
                        tracing::debug!(
                            element = element.id,
                            %category,
                            diagnostic = %diagnostic,
                            "Placement fell back to origin"
                        );
                    }
                    report.succeeded += 1;
                    out.push(record);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::debug!(element = element.id, %category, error = %e, "Element skipped");
                }
            }
            *processed += 1;

            let done = index + 1;
            if done % PROGRESS_INTERVAL == 0 || done == total {
                observer(&ExtractionEvent::Progress {
                    category,
                    processed: done,
                    total,
                });
            }
        }

        report.phase = CategoryPhase::Completed;
        tracing::info!(
            %category,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "Category extracted"
        );
        if report.failed > 0 {
            tracing::warn!(%category, failed = report.failed, "Some elements could not be normalized");
        }
        observer(&ExtractionEvent::CategoryCompleted {
            report: report.clone(),
        });

        Ok(report)
    }

    /// Build one normalized record
    fn extract_element(
        &self,
        ctx: &RunContext<'_>,
        element: &RawElement,
    ) -> std::result::Result<NormalizedElement, ElementError> {
        let global_id = element.global_id.trim();
        if global_id.is_empty() {
            return Err(ElementError::MissingGlobalId(element.id));
        }

        let storey = ctx.floors.find_storey(element);
        let placement = ctx.placements.resolve(element.placement);
        let policy = *self.config.z_policy.get(element.category);
        let location: Location = policy
            .world_location(&placement.translation, storey.and_then(|s| s.elevation_mm))
            .into();
        if !location.is_finite() {
            return Err(ElementError::NonFinite {
                id: element.id,
                field: "location",
            });
        }

        let dimensions = ctx.dimensions.extract(element);
        let floor = ctx.floors.resolve(storey.as_ref(), location.z);
        let volume = calculate_volume(element, &dimensions.dimensions);

        let material = self.catalog.resolve(
            element.material.as_ref().and_then(|m| m.primary_name()),
            self.config.default_material.as_deref(),
        );
        let weight = material.as_ref().map(|m| volume.volume_m3 * m.density);
        if weight.is_some_and(|w| !w.is_finite()) {
            return Err(ElementError::NonFinite {
                id: element.id,
                field: "weight",
            });
        }

        let dims = dimensions.dimensions;
        let (length, area, thickness) = match element.category {
            ElementCategory::Beam => (Some(dims.height), None, None),
            ElementCategory::Slab => (None, Some(dims.footprint_area_m2()), Some(dims.height)),
            ElementCategory::Column => (None, None, None),
        };

        Ok(NormalizedElement {
            global_id: global_id.to_string(),
            name: element
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(element.category.as_str())
                .to_string(),
            category: element.category,
            ifc_type: element.category.ifc_type_name().to_string(),
            location,
            dimensions: dims,
            length,
            area,
            thickness,
            floor_level: floor.level,
            volume: volume.volume_m3,
            weight,
            material,
            provenance: Provenance {
                dimensions: dimensions.source,
                floor: floor.source,
                storey_link: storey.map(|s| s.link),
                volume: volume.source,
                placement_diagnostic: placement.diagnostic.map(|d| d.to_string()),
            },
        })
    }

    /// Load a snapshot and run over it
    ///
    /// Load failures surface before any element is processed.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionOutput> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading model snapshot");
        let model = load_model(path)?;
        self.run(&model)
    }

    /// Independent runs over several files, in parallel
    pub fn extract_files(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<ExtractionOutput>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.extract_file(path)))
            .collect()
    }
}
