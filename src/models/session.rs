// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing session state.
//!
//! The session owns the live trail together with the last shape label and
//! the last recognized text. The two results are independent of each other
//! but are always reset together with the trail.

use super::shape::ShapeLabel;
use super::stroke::{Point, PointTrail};

/// Trail plus the most recent recognition results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    trail: PointTrail,
    shape: ShapeLabel,
    recognized_text: String,
}

impl SessionState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trail(&self) -> &PointTrail {
        &self.trail
    }

    pub fn shape(&self) -> ShapeLabel {
        self.shape
    }

    pub fn recognized_text(&self) -> &str {
        &self.recognized_text
    }

    /// Append a fingertip position to the trail.
    pub fn append(&mut self, point: Point) {
        self.trail.append(point);
    }

    /// Empty the trail and reset both results in one step.
    pub fn clear(&mut self) {
        self.trail.clear();
        self.shape = ShapeLabel::None;
        self.recognized_text.clear();
        log::info!("Screen cleared");
    }

    pub(crate) fn set_shape(&mut self, shape: ShapeLabel) {
        self.shape = shape;
    }

    pub(crate) fn set_recognized_text(&mut self, text: String) {
        self.recognized_text = text;
    }
}
