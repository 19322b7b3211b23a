// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-section interpretation of body representations
//!
//! The interpreter looks for the first extruded profile in a representation
//! tree and reports its footprint and extrusion length. A bounding box is
//! only used when the tree holds no extrusion at all.

use crate::error::{Error, Result};
use ifc_struct_model::{ProfileDef, RepresentationItem};
use nalgebra::Point2;

/// Width/depth used when a polygon outline has no usable extent (mm)
pub const DEFAULT_POLYGON_FALLBACK: (f64, f64) = (300.0, 600.0);

/// Classified cross-section, all lengths in mm
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileGeometry {
    Rectangular { width: f64, depth: f64 },
    Circular { radius: f64 },
    ArbitraryPolygon { points: Vec<Point2<f64>> },
    BoundingBox { x: f64, y: f64, z: f64 },
}

impl ProfileGeometry {
    /// Axis-aligned width and depth, `None` for a degenerate polygon
    pub fn extent(&self) -> Option<(f64, f64)> {
        match self {
            ProfileGeometry::Rectangular { width, depth } => Some((*width, *depth)),
            ProfileGeometry::Circular { radius } => Some((radius * 2.0, radius * 2.0)),
            ProfileGeometry::BoundingBox { x, y, .. } => Some((*x, *y)),
            ProfileGeometry::ArbitraryPolygon { points } => polygon_extent(points),
        }
    }
}

/// Bounding extents of an outline; zero or missing extents are degenerate
fn polygon_extent(points: &[Point2<f64>]) -> Option<(f64, f64)> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let (width, depth) = (max_x - min_x, max_y - min_y);
    (width > 0.0 && depth > 0.0).then_some((width, depth))
}

/// Interpreted profile with the extents the dimension chain consumes
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedProfile {
    pub geometry: ProfileGeometry,
    pub width: f64,
    pub depth: f64,
    /// Extrusion depth, or the Z extent of a bounding box
    pub length: f64,
}

/// Stateless interpreter configured with the model scale
#[derive(Debug, Clone, Copy)]
pub struct ProfileInterpreter {
    scale_mm: f64,
    polygon_fallback: (f64, f64),
}

impl Default for ProfileInterpreter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ProfileInterpreter {
    pub fn new(scale_mm: f64) -> Self {
        Self {
            scale_mm,
            polygon_fallback: DEFAULT_POLYGON_FALLBACK,
        }
    }

    pub fn with_polygon_fallback(mut self, width: f64, depth: f64) -> Self {
        self.polygon_fallback = (width, depth);
        self
    }

    /// First recognized profile in the tree
    ///
    /// Errors only when the first recognized item carries unusable numbers.
    /// An unrecognized tree is `Ok(None)`.
    pub fn interpret(&self, items: &[RepresentationItem]) -> Result<Option<InterpretedProfile>> {
        if let Some(found) = self.find_extrusion(items)? {
            return Ok(Some(found));
        }
        self.find_bounding_box(items)
    }

    fn find_extrusion(&self, items: &[RepresentationItem]) -> Result<Option<InterpretedProfile>> {
        for item in items {
            let found = match item {
                RepresentationItem::ExtrudedAreaSolid { profile, depth } => {
                    match self.classify(profile)? {
                        Some(geometry) => Some(self.finish(geometry, *depth)?),
                        None => None,
                    }
                }
                RepresentationItem::MappedItem { items } => self.find_extrusion(items)?,
                RepresentationItem::BooleanClippingResult { first_operand } => {
                    self.find_extrusion(std::slice::from_ref(&**first_operand))?
                }
                RepresentationItem::BoundingBox { .. } | RepresentationItem::Other { .. } => None,
            };
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    fn find_bounding_box(&self, items: &[RepresentationItem]) -> Result<Option<InterpretedProfile>> {
        for item in items {
            let found = match item {
                RepresentationItem::BoundingBox { x_dim, y_dim, z_dim } => {
                    let x = self.length(*x_dim, "bounding box")?;
                    let y = self.length(*y_dim, "bounding box")?;
                    let z = self.length(*z_dim, "bounding box")?;
                    Some(InterpretedProfile {
                        geometry: ProfileGeometry::BoundingBox { x, y, z },
                        width: x,
                        depth: y,
                        length: z,
                    })
                }
                RepresentationItem::MappedItem { items } => self.find_bounding_box(items)?,
                RepresentationItem::BooleanClippingResult { first_operand } => {
                    self.find_bounding_box(std::slice::from_ref(&**first_operand))?
                }
                RepresentationItem::ExtrudedAreaSolid { .. } | RepresentationItem::Other { .. } => {
                    None
                }
            };
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Classify a swept area, `None` for profile types without extents
    fn classify(&self, profile: &ProfileDef) -> Result<Option<ProfileGeometry>> {
        let geometry = match profile {
            ProfileDef::Rectangle { x_dim, y_dim } => ProfileGeometry::Rectangular {
                width: self.length(*x_dim, "rectangle profile")?,
                depth: self.length(*y_dim, "rectangle profile")?,
            },
            ProfileDef::Circle { radius } | ProfileDef::CircleHollow { radius, .. } => {
                ProfileGeometry::Circular {
                    radius: self.length(*radius, "circle profile")?,
                }
            }
            ProfileDef::IShape {
                overall_width,
                overall_depth,
            } => ProfileGeometry::Rectangular {
                width: self.length(*overall_width, "I-shape profile")?,
                depth: self.length(*overall_depth, "I-shape profile")?,
            },
            ProfileDef::LShape { depth, width } => ProfileGeometry::Rectangular {
                width: self.length(width.unwrap_or(*depth), "L-shape profile")?,
                depth: self.length(*depth, "L-shape profile")?,
            },
            ProfileDef::TShape {
                depth,
                flange_width,
            }
            | ProfileDef::UShape {
                depth,
                flange_width,
            } => ProfileGeometry::Rectangular {
                width: self.length(*flange_width, "flanged profile")?,
                depth: self.length(*depth, "flanged profile")?,
            },
            ProfileDef::ArbitraryClosed { outer_curve } => ProfileGeometry::ArbitraryPolygon {
                points: outer_curve
                    .iter()
                    .filter(|[x, y]| x.is_finite() && y.is_finite())
                    .map(|[x, y]| Point2::new(x * self.scale_mm, y * self.scale_mm))
                    .collect(),
            },
            ProfileDef::Other { .. } => return Ok(None),
        };
        Ok(Some(geometry))
    }

    fn finish(&self, geometry: ProfileGeometry, depth: f64) -> Result<InterpretedProfile> {
        let length = self.length(depth, "extrusion depth")?;
        let (width, depth) = geometry.extent().unwrap_or(self.polygon_fallback);
        Ok(InterpretedProfile {
            geometry,
            width,
            depth,
            length,
        })
    }

    /// Scale a model length to mm, rejecting non-finite and non-positive values
    fn length(&self, value: f64, what: &'static str) -> Result<f64> {
        let mm = value * self.scale_mm;
        if !mm.is_finite() {
            return Err(Error::NonFinite(what));
        }
        if mm <= 0.0 {
            return Err(Error::InvalidProfile(format!("{} must be positive, got {}", what, mm)));
        }
        Ok(mm)
    }
}
