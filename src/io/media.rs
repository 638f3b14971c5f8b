// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas image export.
//!
//! Rasterized canvases are written as regular image files so a stroke can
//! be inspected or handed to an external OCR tool.

use crate::vision::RasterCanvas;
use anyhow::{Context, Result};
use std::path::Path;

/// Save a canvas; the image format follows the file extension.
pub fn save_canvas(canvas: &RasterCanvas, path: &Path) -> Result<()> {
    canvas
        .image()
        .save(path)
        .with_context(|| format!("Failed to write canvas to {}", path.display()))?;
    log::info!("Saved {}x{} canvas to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}
