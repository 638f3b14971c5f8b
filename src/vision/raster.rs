// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trail rasterization.
//!
//! A trail is drawn as a connected black polyline with a fixed stroke
//! thickness onto a fresh white canvas. The result depends only on the
//! ordered points, so the same trail always yields the same pixels.

use crate::config::RasterConfig;
use crate::models::stroke::Point;
use image::{GrayImage, Luma};
use imageproc::drawing::BresenhamLineIter;

/// Pixel value of drawn strokes.
pub const INK: Luma<u8> = Luma([0]);
/// Pixel value of the empty canvas.
pub const BACKGROUND: Luma<u8> = Luma([255]);

/// Single-channel canvas holding only ink and background pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterCanvas {
    image: GrayImage,
}

impl RasterCanvas {
    /// Create a blank canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, BACKGROUND),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the pixel at (x, y) is ink. Out-of-bounds pixels are background.
    #[cfg(test)]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && *self.image.get_pixel(x, y) == INK
    }

    /// Number of ink pixels.
    #[cfg(test)]
    pub fn ink_count(&self) -> usize {
        self.image.pixels().filter(|p| **p == INK).count()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}

/// Draws trails onto fixed-size canvases.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    /// Pixel offsets covered by one stamp of the brush
    brush: Vec<(i32, i32)>,
    /// Farthest any brush offset reaches from the stamp position
    reach: i32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(&RasterConfig::default())
    }
}

impl Rasterizer {
    pub fn new(config: &RasterConfig) -> Self {
        let brush = round_brush(config.stroke_thickness);
        let reach = brush
            .iter()
            .map(|&(dx, dy)| dx.abs().max(dy.abs()))
            .max()
            .unwrap_or(0);
        Self {
            width: config.width,
            height: config.height,
            brush,
            reach,
        }
    }

    /// Draw the polyline through `trail` in order.
    ///
    /// Each segment is stamped with a round brush along its Bresenham line,
    /// which gives round joins and caps. Fewer than two points draw nothing.
    pub fn rasterize(&self, trail: &[Point]) -> RasterCanvas {
        let mut canvas = RasterCanvas::blank(self.width, self.height);
        for segment in trail.windows(2) {
            let Some((start, end)) = self.clip(segment[0], segment[1]) else {
                continue;
            };
            for (x, y) in BresenhamLineIter::new(start, end) {
                self.stamp(&mut canvas.image, x, y);
            }
        }
        canvas
    }

    fn stamp(&self, image: &mut GrayImage, x: i32, y: i32) {
        for &(dx, dy) in &self.brush {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < self.width && (py as u32) < self.height {
                image.put_pixel(px as u32, py as u32, INK);
            }
        }
    }

    /// Clip a segment to the canvas grown by the brush reach (Liang-Barsky).
    ///
    /// Segments that stay inside come back with their exact endpoints.
    fn clip(&self, a: Point, b: Point) -> Option<((f32, f32), (f32, f32))> {
        let reach = self.reach as f64;
        let (min_x, min_y) = (-reach, -reach);
        let max_x = self.width as f64 - 1.0 + reach;
        let max_y = self.height as f64 - 1.0 + reach;

        let (x0, y0) = (a.x as f64, a.y as f64);
        let (dx, dy) = (b.x as f64 - x0, b.y as f64 - y0);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [
            (-dx, x0 - min_x),
            (dx, max_x - x0),
            (-dy, y0 - min_y),
            (dy, max_y - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| ((x0 + t * dx).round() as f32, (y0 + t * dy).round() as f32);
        Some((at(t0), at(t1)))
    }
}

/// Offsets of a filled disc exactly `thickness` pixels across.
///
/// Even sizes center the disc on a pixel corner, so the footprint spans
/// `thickness / 2` pixels before the stamp position and one fewer after.
fn round_brush(thickness: u32) -> Vec<(i32, i32)> {
    let size = thickness as i32;
    let low = -(size / 2);
    let center = low as f64 + (size - 1) as f64 / 2.0;
    let radius = thickness as f64 / 2.0;
    let mut brush = Vec::new();
    for dy in low..low + size {
        for dx in low..low + size {
            let (ox, oy) = (dx as f64 - center, dy as f64 - center);
            if ox * ox + oy * oy <= radius * radius {
                brush.push((dx, dy));
            }
        }
    }
    brush
}
