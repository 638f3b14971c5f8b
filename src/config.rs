// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration management.
//!
//! Every tunable of the stroke pipeline lives here. Defaults reproduce the
//! reference behavior; a YAML or JSON file may override any subset.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    pub raster: RasterConfig,
    pub classifier: ClassifierConfig,
    pub gesture: GestureConfig,
}

/// Canvas geometry used for rasterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub width: u32,
    pub height: u32,
    /// Stroke thickness in pixels.
    pub stroke_thickness: u32,
}

/// Which qualifying contour decides the label when several survive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourPolicy {
    /// The last labelled contour in trace order overwrites earlier ones.
    #[default]
    LastWins,
    /// The labelled contour with the largest enclosed area wins.
    LargestArea,
}

/// Shape classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Trails shorter than this are rejected before rasterization.
    pub min_points: usize,
    /// Side of the square smoothing kernel (odd).
    pub blur_kernel_size: usize,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Contours enclosing less area (px²) are discarded.
    pub min_contour_area: f64,
    /// Polygon approximation tolerance as a fraction of the perimeter.
    pub approx_epsilon_ratio: f64,
    pub square_ratio_min: f64,
    pub square_ratio_max: f64,
    /// Minimum area / enclosing-circle area for a circle.
    pub circle_fill_ratio: f64,
    pub contour_policy: ContourPolicy,
}

/// Side of the adjacent joint the thumb tip must be on to count as raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbSide {
    #[default]
    Left,
    Right,
}

/// Clear gesture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Raised digits needed for a clear.
    pub clear_finger_count: u32,
    pub thumb_side: ThumbSide,
    /// Consecutive clear frames required before the trail is wiped.
    pub clear_hold_frames: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            stroke_thickness: 8,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_points: 20,
            blur_kernel_size: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            min_contour_area: 2000.0,
            approx_epsilon_ratio: 0.02,
            square_ratio_min: 0.95,
            square_ratio_max: 1.05,
            circle_fill_ratio: 0.75,
            contour_policy: ContourPolicy::LastWins,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            clear_finger_count: 5,
            thumb_side: ThumbSide::Left,
            clear_hold_frames: 1,
        }
    }
}

impl PenConfig {
    /// Check that values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raster.width == 0 || self.raster.height == 0 {
            return Err(ConfigError(format!(
                "canvas must be non-empty, got {}x{}",
                self.raster.width, self.raster.height
            )));
        }
        if self.raster.stroke_thickness == 0 {
            return Err(ConfigError("stroke_thickness must be > 0".to_string()));
        }
        let classifier = &self.classifier;
        if classifier.blur_kernel_size % 2 == 0 {
            return Err(ConfigError(format!(
                "blur_kernel_size must be odd, got {}",
                classifier.blur_kernel_size
            )));
        }
        if classifier.canny_low < 0.0 || classifier.canny_low > classifier.canny_high {
            return Err(ConfigError(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                classifier.canny_low, classifier.canny_high
            )));
        }
        if classifier.approx_epsilon_ratio <= 0.0 || classifier.approx_epsilon_ratio >= 1.0 {
            return Err(ConfigError(format!(
                "approx_epsilon_ratio must be in (0, 1), got {}",
                classifier.approx_epsilon_ratio
            )));
        }
        if classifier.square_ratio_min > classifier.square_ratio_max {
            return Err(ConfigError(format!(
                "square ratio range is empty: [{}, {}]",
                classifier.square_ratio_min, classifier.square_ratio_max
            )));
        }
        if !(0.0..=1.0).contains(&classifier.circle_fill_ratio) {
            return Err(ConfigError(format!(
                "circle_fill_ratio must be in [0, 1], got {}",
                classifier.circle_fill_ratio
            )));
        }
        if !(1..=5).contains(&self.gesture.clear_finger_count) {
            return Err(ConfigError(format!(
                "clear_finger_count must be in [1, 5], got {}",
                self.gesture.clear_finger_count
            )));
        }
        if self.gesture.clear_hold_frames == 0 {
            return Err(ConfigError("clear_hold_frames must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load config from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let extension = path.extension().and_then(|s| s.to_str());
        let config: Self = match extension {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => anyhow::bail!("Unsupported config extension: {:?}", extension),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
