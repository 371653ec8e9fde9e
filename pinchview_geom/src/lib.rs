// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchview Geom: touch-point geometry helpers.
//!
//! Small pure functions over [`kurbo`] points used by the gesture classifier
//! and the transform engine:
//!
//! - [`centroid`]: average of a non-empty set of touch points.
//! - [`distance`]: Euclidean distance between two points.
//! - [`scale_ratio`]: ratio between the spans of two touch pairs, used to
//!   turn a pinch movement into a zoom factor.
//!
//! All inputs are container-relative coordinates; the functions carry no
//! state and no unit assumptions beyond that.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pinchview_geom::{centroid, scale_ratio};
//!
//! let start = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
//! let end = [Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
//!
//! // Fingers moved twice as far apart.
//! assert_eq!(scale_ratio(start, end), 2.0);
//!
//! // Pinch center between the end touches.
//! let center = centroid(&end);
//! assert_eq!(center, Point::new(10.0, 0.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Vec2};

/// Returns the centroid of a set of touch points.
///
/// Callers must not pass an empty slice; the classifier only computes
/// centers while at least one contact is down. An empty slice returns
/// [`Point::ZERO`] (and debug-asserts) rather than propagating NaN into
/// downstream transform state.
#[must_use]
pub fn centroid(points: &[Point]) -> Point {
    debug_assert!(!points.is_empty(), "centroid of zero touch points");
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / points.len() as f64).to_point()
}

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Returns the scale ratio between two touch pairs.
///
/// This is `distance(end) / distance(start)`: the factor by which the
/// fingers have spread apart (or come together) since the reference pair
/// was captured.
///
/// A degenerate reference pair (both touches at the same point) would
/// divide by zero; that case reports a ratio of `1.0` so a noisy pinch
/// start can never inject `Infinity`/`NaN` into the zoom factor.
#[must_use]
pub fn scale_ratio(start: [Point; 2], end: [Point; 2]) -> f64 {
    let start_span = distance(start[0], start[1]);
    if start_span == 0.0 {
        return 1.0;
    }
    distance(end[0], end[1]) / start_span
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{centroid, distance, scale_ratio};

    #[test]
    fn centroid_of_single_point_is_the_point() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(centroid(&[p]), p);
    }

    #[test]
    fn centroid_of_two_points_is_the_midpoint() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(10.0, 30.0);
        assert_eq!(centroid(&[a, b]), Point::new(5.0, 20.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
    }

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = Point::new(7.0, 7.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn scale_ratio_reports_spread_factor() {
        let start = [Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
        let half = [Point::new(0.0, 0.0), Point::new(0.0, 5.0)];
        let double = [Point::new(0.0, 0.0), Point::new(0.0, 20.0)];
        assert_eq!(scale_ratio(start, half), 0.5);
        assert_eq!(scale_ratio(start, double), 2.0);
    }

    #[test]
    fn degenerate_start_pair_reports_identity() {
        let p = Point::new(50.0, 50.0);
        let end = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let ratio = scale_ratio([p, p], end);
        assert_eq!(ratio, 1.0, "zero-span reference must not divide by zero");
        assert!(ratio.is_finite(), "ratio must stay finite");
    }
}
