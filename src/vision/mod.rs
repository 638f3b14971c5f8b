// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The stroke-to-symbol pipeline.
//!
//! Gesture interpretation turns hand poses into fingertip points and clear
//! signals; rasterization and classification turn a finished trail into a
//! shape label.

pub mod classify;
pub mod gesture;
pub mod raster;

pub use classify::ShapeClassifier;
pub use gesture::{DebouncedClear, Gesture, GestureInterpreter};
pub use raster::{RasterCanvas, Rasterizer};
