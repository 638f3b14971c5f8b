// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate conversion from normalized landmark
//! positions to pixels, and the contour measurements that `imageproc`
//! lacks. Area, perimeter and hull come from `imageproc::geometry`.

use crate::models::pose::Landmark;
use crate::models::stroke::Point;
use imageproc::geometry::convex_hull;

/// Convert a normalized landmark to pixel coordinates, truncating toward zero.
pub fn denormalize_coordinates(landmark: &Landmark, width: u32, height: u32) -> Point {
    Point::new(
        (landmark.x * width as f64) as i32,
        (landmark.y * height as f64) as i32,
    )
}

/// Axis-aligned bounding box in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Smallest box covering every point. Sizes count pixels, so a single
/// point is 1x1.
pub fn bounding_rect(points: &[Point]) -> Option<BoundingRect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingRect {
        x: min_x,
        y: min_y,
        width: (max_x - min_x) as u32 + 1,
        height: (max_y - min_y) as u32 + 1,
    })
}

/// Approximate a closed contour by a polygon whose edges stay within
/// `epsilon` of the contour.
///
/// The contour is split at two mutually distant points, which are always
/// kept, and each half is simplified with Ramer-Douglas-Peucker. Unlike
/// `imageproc::geometry::approximate_polygon_dp`, the result does not
/// depend on where the tracer happened to start the contour.
pub fn approximate_polygon(contour: &[Point], epsilon: f64) -> Vec<Point> {
    if contour.len() < 3 {
        return contour.to_vec();
    }

    let a = farthest_from(contour, contour[0]);
    let b = farthest_from(contour, contour[a]);
    let (start, end) = (a.min(b), a.max(b));
    if start == end {
        // Every point coincides
        return vec![contour[start]];
    }

    let mut polygon = rdp_simplify(&contour[start..=end], epsilon);
    let wrapped: Vec<Point> = contour[end..]
        .iter()
        .chain(&contour[..=start])
        .copied()
        .collect();
    let back = rdp_simplify(&wrapped, epsilon);

    // Both halves share their endpoints
    polygon.pop();
    polygon.extend(back);
    polygon.pop();
    polygon
}

fn farthest_from(points: &[Point], origin: Point) -> usize {
    let mut best = 0;
    let mut best_dist = -1.0;
    for (i, p) in points.iter().enumerate() {
        let d = distance(*p, origin);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Ramer-Douglas-Peucker simplification of an open polyline.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = (line_end.x - line_start.x) as f64;
    let dy = (line_end.y - line_start.y) as f64;

    let line_len_sq = dx * dx + dy * dy;
    if line_len_sq < f64::EPSILON {
        return distance(point, line_start);
    }

    let area2 = ((point.x - line_start.x) as f64 * dy - (point.y - line_start.y) as f64 * dx).abs();
    area2 / line_len_sq.sqrt()
}

fn distance(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// A circle in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    fn from_diameter(a: (f64, f64), b: (f64, f64)) -> Self {
        let cx = (a.0 + b.0) / 2.0;
        let cy = (a.1 + b.1) / 2.0;
        Self {
            cx,
            cy,
            radius: (a.0 - cx).hypot(a.1 - cy),
        }
    }

    fn circumscribed(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < 1e-12 {
            // Collinear: the two farthest-apart points span the circle
            let candidates = [Self::from_diameter(a, b), Self::from_diameter(a, c), Self::from_diameter(b, c)];
            return candidates
                .into_iter()
                .fold(Self::default(), |best, c| if c.radius > best.radius { c } else { best });
        }
        let a2 = a.0 * a.0 + a.1 * a.1;
        let b2 = b.0 * b.0 + b.1 * b.1;
        let c2 = c.0 * c.0 + c.1 * c.1;
        let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
        let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
        Self {
            cx,
            cy,
            radius: (a.0 - cx).hypot(a.1 - cy),
        }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        (p.0 - self.cx).hypot(p.1 - self.cy) <= self.radius + 1e-7
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

/// Smallest circle containing every point.
///
/// Runs the incremental algorithm over the convex hull, which bounds the
/// work for dense pixel contours.
pub fn min_enclosing_circle(points: &[Point]) -> Circle {
    let pixels: Vec<imageproc::point::Point<i32>> = points.iter().map(|&p| p.into()).collect();
    let hull: Vec<(f64, f64)> = convex_hull(pixels.as_slice())
        .into_iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect();
    let Some(&first) = hull.first() else {
        return Circle::default();
    };

    let mut circle = Circle {
        cx: first.0,
        cy: first.1,
        radius: 0.0,
    };
    for i in 1..hull.len() {
        if circle.contains(hull[i]) {
            continue;
        }
        circle = Circle {
            cx: hull[i].0,
            cy: hull[i].1,
            radius: 0.0,
        };
        for j in 0..i {
            if circle.contains(hull[j]) {
                continue;
            }
            circle = Circle::from_diameter(hull[i], hull[j]);
            for k in 0..j {
                if !circle.contains(hull[k]) {
                    circle = Circle::circumscribed(hull[i], hull[j], hull[k]);
                }
            }
        }
    }
    circle
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::geometry::arc_length;

    fn perimeter(points: &[Point]) -> f64 {
        let pixels: Vec<imageproc::point::Point<i32>> = points.iter().map(|&p| p.into()).collect();
        arc_length(&pixels, true)
    }

    fn square_outline(x0: i32, y0: i32, side: i32) -> Vec<Point> {
        let mut points = Vec::new();
        for x in x0..x0 + side {
            points.push(Point::new(x, y0));
        }
        for y in y0..y0 + side {
            points.push(Point::new(x0 + side, y));
        }
        for x in (x0 + 1..=x0 + side).rev() {
            points.push(Point::new(x, y0 + side));
        }
        for y in (y0 + 1..=y0 + side).rev() {
            points.push(Point::new(x0, y));
        }
        points
    }

    #[test]
    fn test_denormalize_truncates() {
        let p = denormalize_coordinates(&Landmark::new(0.5, 0.25), 1280, 720);
        assert_eq!(p, Point::new(640, 180));

        let p = denormalize_coordinates(&Landmark::new(0.0999, 0.9999), 100, 100);
        assert_eq!(p, Point::new(9, 99));
    }

    #[test]
    fn test_denormalize_corners() {
        assert_eq!(denormalize_coordinates(&Landmark::new(0.0, 0.0), 1920, 1080), Point::new(0, 0));
        assert_eq!(
            denormalize_coordinates(&Landmark::new(1.0, 1.0), 1920, 1080),
            Point::new(1920, 1080)
        );
    }

    #[test]
    fn test_bounding_rect_counts_pixels() {
        let rect = bounding_rect(&[Point::new(2, 3), Point::new(11, 7)]).unwrap();
        assert_eq!(rect, BoundingRect { x: 2, y: 3, width: 10, height: 5 });
        assert!((rect.aspect_ratio() - 2.0).abs() < 1e-9);
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_approximate_square_outline() {
        let outline = square_outline(100, 100, 300);
        let polygon = approximate_polygon(&outline, 0.02 * perimeter(&outline));
        assert_eq!(polygon.len(), 4);
        for corner in [Point::new(100, 100), Point::new(400, 100), Point::new(400, 400), Point::new(100, 400)] {
            assert!(polygon.contains(&corner), "missing corner {:?}", corner);
        }
    }

    #[test]
    fn test_approximate_starts_mid_edge() {
        // Rotate so the first contour point lies in the middle of an edge
        let mut outline = square_outline(0, 0, 200);
        outline.rotate_left(100);
        assert_eq!(approximate_polygon(&outline, 0.02 * perimeter(&outline)).len(), 4);
    }

    #[test]
    fn test_approximate_degenerate_inputs() {
        assert!(approximate_polygon(&[], 1.0).is_empty());
        assert_eq!(approximate_polygon(&[Point::new(1, 1); 5], 1.0), vec![Point::new(1, 1)]);
    }

    #[test]
    fn test_min_enclosing_circle_of_square() {
        let circle = min_enclosing_circle(&square_outline(0, 0, 100));
        assert!((circle.cx - 50.0).abs() < 1e-6);
        assert!((circle.cy - 50.0).abs() < 1e-6);
        assert!((circle.radius - 50.0 * 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_min_enclosing_circle_of_obtuse_triangle_uses_longest_side() {
        let circle = min_enclosing_circle(&[Point::new(0, 0), Point::new(100, 0), Point::new(50, 10)]);
        assert!((circle.cx - 50.0).abs() < 1e-6);
        assert!(circle.cy.abs() < 1e-6);
        assert!((circle.radius - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_enclosing_circle_ignores_interior_points() {
        let mut points = square_outline(0, 0, 100);
        points.extend([Point::new(50, 50), Point::new(20, 70), Point::new(99, 1)]);
        let circle = min_enclosing_circle(&points);
        assert!((circle.radius - 50.0 * 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_min_enclosing_circle_of_collinear_points() {
        let circle = min_enclosing_circle(&[Point::new(0, 0), Point::new(5, 0), Point::new(20, 0)]);
        assert!((circle.radius - 10.0).abs() < 1e-6);
        assert_eq!(min_enclosing_circle(&[]), Circle::default());
    }
}
