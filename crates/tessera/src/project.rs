//! Project files: the tile, the pattern size and the stored primitives.
//!
//! This is the one fallible surface of the crate. Everything downstream of
//! [`Project::validate`] assumes well-formed input and never errors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::primitive::Primitive;
use crate::tile::{PatternSize, TileConfig, TileShape};

/// Reasons a project is rejected on load.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Not valid project JSON
    #[error("invalid project JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tile size must be a positive finite number, got {size}")]
    InvalidTileSize { size: f64 },

    #[error("pattern must have at least one column and one row, got {columns}x{rows}")]
    InvalidPattern { columns: u32, rows: u32 },

    #[error("primitive '{id}' has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("circle '{id}' must have a positive radius, got {radius}")]
    NonPositiveRadius { id: String, radius: f64 },

    #[error("primitive '{id}' has an invalid stroke width {width}")]
    InvalidStrokeWidth { id: String, width: f64 },

    #[error("primitive with an empty id")]
    EmptyId,

    #[error("duplicate primitive id '{id}'")]
    DuplicateId { id: String },
}

/// A saved drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub tile: TileConfig,
    #[serde(default)]
    pub pattern: PatternSize,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

impl Project {
    /// Empty project on the given tile with a 1x1 pattern.
    pub fn new(tile: TileConfig) -> Self {
        Self { tile, pattern: PatternSize::default(), primitives: Vec::new() }
    }

    /// Parse and validate a project from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProjectError> {
        let project: Project = serde_json::from_str(text)?;
        project.validate()?;
        Ok(project)
    }

    pub fn to_json_pretty(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Switch tile shape. Primitives drawn for the old lattice would not
    /// tile on the new one, so they are discarded.
    pub fn with_tile_shape(self, shape: TileShape) -> Self {
        Self {
            tile: TileConfig::new(shape, self.tile.size),
            pattern: self.pattern,
            primitives: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        let size = self.tile.size;
        if !size.is_finite() || size <= 0.0 {
            return Err(ProjectError::InvalidTileSize { size });
        }
        if self.pattern.columns == 0 || self.pattern.rows == 0 {
            return Err(ProjectError::InvalidPattern {
                columns: self.pattern.columns,
                rows: self.pattern.rows,
            });
        }

        let mut ids = HashSet::new();
        for primitive in &self.primitives {
            validate_primitive(primitive)?;
            if !ids.insert(primitive.id()) {
                return Err(ProjectError::DuplicateId { id: primitive.id().to_string() });
            }
        }
        Ok(())
    }
}

fn validate_primitive(primitive: &Primitive) -> Result<(), ProjectError> {
    let id = primitive.id();
    if id.is_empty() {
        return Err(ProjectError::EmptyId);
    }

    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    if !primitive.points().iter().all(finite) {
        return Err(ProjectError::NonFiniteCoordinate { id: id.to_string() });
    }

    if let Primitive::Circle(c) = primitive {
        if !c.radius.is_finite() || c.radius <= 0.0 {
            return Err(ProjectError::NonPositiveRadius { id: id.to_string(), radius: c.radius });
        }
    }

    let width = primitive.style().stroke_width;
    if !width.is_finite() || width < 0.0 {
        return Err(ProjectError::InvalidStrokeWidth { id: id.to_string(), width });
    }

    Ok(())
}
