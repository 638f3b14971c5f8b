// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stroke data structures.
//!
//! This module defines the pixel-space point and the append-only trail of
//! fingertip positions that makes up the drawn stroke.

use serde::{Deserialize, Serialize};

/// A 2D point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for imageproc::point::Point<i32> {
    fn from(p: Point) -> Self {
        imageproc::point::Point::new(p.x, p.y)
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Ordered fingertip path since the last clear.
///
/// Insertion order defines the stroke. Consecutive duplicates are kept;
/// they rasterize as zero-length segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointTrail {
    points: Vec<Point>,
}

impl PointTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to the end of the trail.
    pub fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Borrow the points in insertion order.
    pub fn snapshot(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point>> for PointTrail {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}
