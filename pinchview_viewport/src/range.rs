// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Validated `[min, max]` bounds for the user zoom factor.
///
/// Constructed once per widget; an inverted or non-finite range is a
/// configuration error, refused at construction rather than producing
/// undefined clamp behavior later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
    min: f64,
    max: f64,
}

impl ZoomRange {
    /// Creates a zoom range, validating that both bounds are finite,
    /// strictly positive, and ordered `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ZoomRangeError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max <= 0.0 || min > max {
            return Err(ZoomRangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the minimum zoom factor.
    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    /// Returns the maximum zoom factor.
    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Clamps a zoom factor into this range.
    #[must_use]
    pub fn clamp(self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }

    /// Returns `true` if `zoom` lies inside this range.
    #[must_use]
    pub fn contains(self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

impl Default for ZoomRange {
    /// The default widget range: `[0.5, 4.0]`.
    fn default() -> Self {
        Self { min: 0.5, max: 4.0 }
    }
}

/// Error returned when zoom bounds are inverted or not finite positive numbers.
#[derive(Clone, Copy, PartialEq)]
pub struct ZoomRangeError {
    /// The rejected minimum bound.
    pub min: f64,
    /// The rejected maximum bound.
    pub max: f64,
}

impl fmt::Debug for ZoomRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ZoomRangeError {{ min: {:?}, max: {:?} }}",
            self.min, self.max
        )
    }
}

impl fmt::Display for ZoomRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid zoom range [{}, {}]: bounds must be finite, positive, and ordered",
            self.min, self.max
        )
    }
}

impl core::error::Error for ZoomRangeError {}
