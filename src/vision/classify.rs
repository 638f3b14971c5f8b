// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape classification of rasterized strokes.
//!
//! The canvas is smoothed, reduced to Canny edges, and traced for outer
//! contours. Each contour large enough to matter is approximated by a
//! polygon and labelled by its vertex count: three sides make a triangle,
//! four a square or rectangle depending on the bounding-box aspect ratio,
//! and more a circle or generic polygon depending on how much of the
//! minimum enclosing circle the contour fills.

use crate::config::{ClassifierConfig, ContourPolicy};
use crate::models::shape::ShapeLabel;
use crate::models::stroke::Point;
use crate::util::geometry::{approximate_polygon, bounding_rect, min_enclosing_circle};
use crate::vision::raster::RasterCanvas;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::geometry::{arc_length, contour_area};
use log::debug;

/// Contour-based shape classifier.
#[derive(Debug, Clone)]
pub struct ShapeClassifier {
    config: ClassifierConfig,
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl ShapeClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Classify the dominant contour of `canvas`.
    ///
    /// Returns `None` when no contour qualifies; callers keep their previous
    /// label in that case.
    pub fn classify(&self, canvas: &RasterCanvas) -> Option<ShapeLabel> {
        let contours = self.extract_contours(canvas);
        debug!("Found {} contours", contours.len());
        self.select(&contours)
    }

    /// Outer contours of the smoothed canvas' edge map.
    pub fn extract_contours(&self, canvas: &RasterCanvas) -> Vec<Vec<Point>> {
        let smoothed = smooth(canvas.image(), self.config.blur_kernel_size);
        let edges = canny(&smoothed, self.config.canny_low, self.config.canny_high);
        external_contours(&edges)
    }

    /// Pick the label for a set of contours according to the configured policy.
    pub fn select(&self, contours: &[Vec<Point>]) -> Option<ShapeLabel> {
        let labelled = contours.iter().filter_map(|c| self.label_contour(c));
        let chosen = match self.config.contour_policy {
            ContourPolicy::LastWins => labelled.last(),
            ContourPolicy::LargestArea => labelled.max_by(|a, b| a.1.total_cmp(&b.1)),
        };
        chosen.map(|(label, _)| label)
    }

    /// Label a single contour, returning the label with the contour's area.
    ///
    /// Contours below the area threshold, or whose approximation has fewer
    /// than three vertices, yield `None`.
    pub fn label_contour(&self, contour: &[Point]) -> Option<(ShapeLabel, f64)> {
        let pixels: Vec<imageproc::point::Point<i32>> = contour.iter().map(|&p| p.into()).collect();
        let area = contour_area(&pixels).abs();
        if area < self.config.min_contour_area {
            return None;
        }

        let perimeter = arc_length(&pixels, true);
        let polygon = approximate_polygon(contour, self.config.approx_epsilon_ratio * perimeter);
        let sides = polygon.len();
        debug!("Detected {} sides", sides);

        let label = match sides {
            3 => ShapeLabel::Triangle,
            4 => {
                let ratio = bounding_rect(&polygon)?.aspect_ratio();
                if (self.config.square_ratio_min..=self.config.square_ratio_max).contains(&ratio) {
                    ShapeLabel::Square
                } else {
                    ShapeLabel::Rectangle
                }
            }
            n if n > 4 => {
                let circle = min_enclosing_circle(contour);
                let fill_ratio = area / circle.area();
                if fill_ratio > self.config.circle_fill_ratio {
                    ShapeLabel::Circle
                } else {
                    ShapeLabel::Polygon
                }
            }
            _ => return None,
        };
        Some((label, area))
    }
}

/// Blur with a separable binomial kernel of the given odd size.
///
/// Sizes 3 and 5 give the standard small Gaussian kernels (1-2-1 and
/// 1-4-6-4-1).
pub fn smooth(image: &GrayImage, kernel_size: usize) -> GrayImage {
    if kernel_size <= 1 {
        return image.clone();
    }
    separable_filter_equal(image, &binomial_kernel(kernel_size))
}

fn binomial_kernel(size: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..size {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    let sum: f32 = row.iter().sum();
    row.iter().map(|v| v / sum).collect()
}

/// Trace the outermost contours of a binary edge map, skipping anything
/// nested inside another contour.
fn external_contours(edges: &GrayImage) -> Vec<Vec<Point>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points.into_iter().map(Point::from).collect())
        .collect()
}
