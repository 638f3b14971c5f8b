// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recording and trail serialization.
//!
//! This module handles reading tracker recordings and reading/writing point
//! trails in YAML and JSON formats, chosen by file extension.

use crate::models::recording::Recording;
use crate::models::stroke::Point;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let extension = path.extension().and_then(|s| s.to_str());
    let data = match extension {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => anyhow::bail!("Unsupported file extension: {:?}", extension),
    };
    Ok(data)
}

fn export<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    let content = match extension {
        Some("yaml") | Some("yml") => serde_yaml::to_string(data)?,
        Some("json") => serde_json::to_string_pretty(data)?,
        _ => anyhow::bail!("Unsupported file extension: {:?}", extension),
    };
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import a tracker recording.
pub fn import_recording(path: &Path) -> Result<Recording> {
    let recording: Recording = import(path)?;
    log::info!(
        "Imported {} frames ({}x{}) from {}",
        recording.frames.len(),
        recording.frame_width,
        recording.frame_height,
        path.display()
    );
    Ok(recording)
}

/// Import a trail as an ordered list of points.
pub fn import_trail(path: &Path) -> Result<Vec<Point>> {
    import(path)
}

/// Export a trail as an ordered list of points.
pub fn export_trail(points: &[Point], path: &Path) -> Result<()> {
    export(&points, path)?;
    log::info!("Exported {} points to {}", points.len(), path.display());
    Ok(())
}
