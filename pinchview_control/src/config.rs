// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use pinchview_viewport::{ZoomRange, ZoomRangeError};

/// Per-instance widget settings.
///
/// Constructed once at widget creation and never mutated; re-creating the
/// widget is the supported path for changing configuration. Validated by
/// [`Config::validate`] before any state is built on top of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Target zoom factor of a double tap from the unzoomed state.
    pub tap_zoom_factor: f64,
    /// Zoom factors below this snap back to 1 when the interaction ends.
    pub zoom_out_factor: f64,
    /// Duration of programmatic transitions (double tap, snap-back).
    pub animation_duration_ms: u64,
    /// Upper bound for the user zoom factor.
    pub max_zoom: f64,
    /// Lower bound for the user zoom factor.
    pub min_zoom: f64,
    /// Allow single-finger dragging while not zoomed in.
    pub draggable_when_unzoomed: bool,
    /// Restrict each drag sample to its dominant axis.
    pub lock_drag_axis: bool,
    /// Compute the initial centering offset only once, keeping it across
    /// later resize and content-load signals.
    pub set_offsets_once: bool,
    /// Horizontal overscroll allowance in container pixels.
    pub horizontal_padding: f64,
    /// Vertical overscroll allowance in container pixels.
    pub vertical_padding: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tap_zoom_factor: 2.0,
            zoom_out_factor: 1.3,
            animation_duration_ms: 300,
            max_zoom: 4.0,
            min_zoom: 0.5,
            draggable_when_unzoomed: true,
            lock_drag_axis: false,
            set_offsets_once: false,
            horizontal_padding: 0.0,
            vertical_padding: 0.0,
        }
    }
}

impl Config {
    /// Validates the configuration, returning the zoom range on success.
    ///
    /// Rejects inverted or non-finite zoom bounds, non-positive zoom
    /// targets, and negative or non-finite paddings.
    pub fn validate(&self) -> Result<ZoomRange, ConfigError> {
        for (field, value) in [
            ("tap_zoom_factor", self.tap_zoom_factor),
            ("zoom_out_factor", self.zoom_out_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("horizontal_padding", self.horizontal_padding),
            ("vertical_padding", self.vertical_padding),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativePadding { field, value });
            }
        }
        ZoomRange::new(self.min_zoom, self.max_zoom).map_err(ConfigError::ZoomRange)
    }
}

/// Construction-time configuration error.
///
/// The widget refuses to initialize on any of these rather than producing
/// undefined clamp behavior later.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_zoom`/`max_zoom` are inverted or not finite positive numbers.
    ZoomRange(ZoomRangeError),
    /// A numeric field is NaN or infinite.
    NonFinite {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A zoom target field must be strictly positive.
    NonPositive {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A padding field must be non-negative.
    NegativePadding {
        /// Field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomRange(err) => err.fmt(f),
            Self::NonFinite { field, value } => {
                write!(f, "config field `{field}` must be finite, got {value}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "config field `{field}` must be positive, got {value}")
            }
            Self::NegativePadding { field, value } => {
                write!(f, "config field `{field}` must be non-negative, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::ZoomRange(err) => Some(err),
            _ => None,
        }
    }
}
