// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::modes::AxisLock;
use crate::range::ZoomRange;

/// Tolerance below which the user zoom factor counts as "not zoomed".
///
/// [`Viewport::current_zoom_center`] divides by `1 / zoom - 1`, which
/// degenerates as the zoom approaches 1; this guard keeps that inversion
/// well away from the singularity.
const UNZOOMED_EPSILON: f64 = 1e-6;

/// Committed transform snapshot for the host renderer.
///
/// `scale` is the effective zoom (`initial_fit_zoom * zoom_factor`);
/// `offset` is the pre-scale translation vector. The host renders this as a
/// 2D affine scale followed by a translate with the transform origin at the
/// element's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Effective scale factor.
    pub scale: f64,
    /// Offset in pre-scale container coordinates.
    pub offset: Vec2,
}

/// Container and element sizes, known only once both have real dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    container: Size,
    element: Size,
}

impl Layout {
    /// The zoom factor that makes the element exactly fit the container.
    fn initial_zoom(self) -> f64 {
        let x = self.container.width / self.element.width;
        let y = self.container.height / self.element.height;
        x.min(y)
    }
}

/// Zoomable, pannable viewport over a fixed-size element in a container.
///
/// `Viewport` owns the user zoom factor, the offset vector, and the initial
/// centering offset, and exposes the transform-engine operations: clamp-aware
/// scaling around a pivot, axis-lockable panning, and offset sanitizing.
///
/// Layout sizes are bound late via [`Viewport::set_layout`]; until both the
/// container and the element report positive dimensions, sanitizing and
/// centering are identity operations and the effective zoom equals the user
/// zoom factor. This makes a widget constructed against a hidden or
/// not-yet-loaded element recoverable: a later resize or load signal
/// completes the setup.
#[derive(Clone, Debug)]
pub struct Viewport {
    zoom_factor: f64,
    offset: Vec2,
    initial_offset: Vec2,
    range: ZoomRange,
    padding: Vec2,
    layout: Option<Layout>,
}

impl Viewport {
    /// Creates a viewport with zoom factor 1, zero offsets, zero padding,
    /// and no layout bound yet.
    #[must_use]
    pub fn new(range: ZoomRange) -> Self {
        Self {
            zoom_factor: 1.0,
            offset: Vec2::ZERO,
            initial_offset: Vec2::ZERO,
            range,
            padding: Vec2::ZERO,
            layout: None,
        }
    }

    /// Sets the overscroll padding allowance, `x` horizontal and `y` vertical.
    pub fn set_padding(&mut self, padding: Vec2) {
        self.padding = padding;
    }

    /// Binds (or clears) the container and element sizes.
    ///
    /// Returns `true` if the sizes are usable. Zero, negative, or non-finite
    /// dimensions clear the layout instead of propagating `Infinity` through
    /// the fit-zoom division; callers should retry on the next resize or
    /// content-load signal.
    pub fn set_layout(&mut self, container: Size, element: Size) -> bool {
        let usable = container.width.is_finite()
            && container.height.is_finite()
            && element.width.is_finite()
            && element.height.is_finite()
            && container.width > 0.0
            && container.height > 0.0
            && element.width > 0.0
            && element.height > 0.0;
        self.layout = usable.then_some(Layout { container, element });
        usable
    }

    /// Returns `true` once usable container and element sizes are bound.
    #[must_use]
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Returns the current user zoom factor.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Returns the configured zoom bounds.
    #[must_use]
    pub fn zoom_range(&self) -> ZoomRange {
        self.range
    }

    /// Returns the current offset in pre-scale container coordinates.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Overwrites the offset. Used by offset animations, whose target is a
    /// sanitized value by construction.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Returns the initial centering offset.
    #[must_use]
    pub fn initial_offset(&self) -> Vec2 {
        self.initial_offset
    }

    /// Returns the fit-to-container zoom factor, or `1.0` without a layout.
    #[must_use]
    pub fn initial_zoom_factor(&self) -> f64 {
        self.layout.map_or(1.0, Layout::initial_zoom)
    }

    /// Returns the effective zoom used for rendering:
    /// `initial_fit_zoom * zoom_factor`.
    #[must_use]
    pub fn effective_zoom(&self) -> f64 {
        self.initial_zoom_factor() * self.zoom_factor
    }

    /// Returns the committed transform snapshot.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.effective_zoom(),
            offset: self.offset,
        }
    }

    /// Multiplies the zoom factor by `ratio`, clamped into the zoom range,
    /// and returns the ratio that was *actually applied*.
    ///
    /// At the clamp boundary the applied ratio differs from `ratio`; any
    /// dependent offset math must use the returned value, otherwise the
    /// offset drifts while the zoom saturates. Non-finite or non-positive
    /// ratios are rejected as identity.
    pub fn scale_zoom_factor(&mut self, ratio: f64) -> f64 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return 1.0;
        }
        let old = self.zoom_factor;
        self.zoom_factor = self.range.clamp(old * ratio);
        self.zoom_factor / old
    }

    /// Scales around `pivot` (container-relative), keeping the pivot's
    /// apparent screen position fixed.
    ///
    /// With the transform origin at the element's top-left and the offset in
    /// pre-scale coordinates, the pivot stays put exactly when the offset
    /// moves by `(applied - 1) * (pivot + offset)` per axis.
    pub fn scale(&mut self, ratio: f64, pivot: Point) {
        let applied = self.scale_zoom_factor(ratio);
        self.offset += (applied - 1.0) * (pivot.to_vec2() + self.offset);
    }

    /// Scales to an absolute target zoom factor around `pivot`.
    pub fn scale_to(&mut self, target_zoom_factor: f64, pivot: Point) {
        self.scale(target_zoom_factor / self.zoom_factor, pivot);
    }

    /// Pans by a screen-space delta, subtracting it from the offset.
    ///
    /// With [`AxisLock::Dominant`], only the axis with the larger absolute
    /// movement is applied.
    pub fn pan(&mut self, delta: Vec2, lock: AxisLock) {
        let delta = match lock {
            AxisLock::Free => delta,
            AxisLock::Dominant => {
                if delta.x.abs() > delta.y.abs() {
                    Vec2::new(delta.x, 0.0)
                } else {
                    Vec2::new(0.0, delta.y)
                }
            }
        };
        self.offset -= delta;
    }

    /// Clamps an offset into the currently valid range for the current zoom.
    ///
    /// Per axis the range is `[min(o, 0) - padding, max(o, 0)]` where
    /// `o = element * initial_zoom * zoom_factor - container + padding` is
    /// the maximum overflow of the scaled element past the container. When
    /// the scaled element is smaller than the container this keeps it
    /// centered-or-inside; when larger, it keeps the container covered.
    /// Without a layout the offset passes through unchanged.
    #[must_use]
    pub fn sanitize_offset(&self, offset: Vec2) -> Vec2 {
        let Some(layout) = self.layout else {
            return offset;
        };
        let scale = layout.initial_zoom() * self.zoom_factor;
        Vec2::new(
            sanitize_axis(
                offset.x,
                layout.element.width * scale,
                layout.container.width,
                self.padding.x,
            ),
            sanitize_axis(
                offset.y,
                layout.element.height * scale,
                layout.container.height,
                self.padding.y,
            ),
        )
    }

    /// Returns `true` iff sanitizing would move the offset.
    #[must_use]
    pub fn is_out_of_bounds(&self, offset: Vec2) -> bool {
        self.sanitize_offset(offset) != offset
    }

    /// Recomputes the initial centering offset from the current layout:
    /// `-|element * initial_zoom - container| / 2` per axis.
    ///
    /// No-op without a layout.
    pub fn compute_initial_offset(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        let iz = layout.initial_zoom();
        self.initial_offset = Vec2::new(
            -(layout.element.width * iz - layout.container.width).abs() / 2.0,
            -(layout.element.height * iz - layout.container.height).abs() / 2.0,
        );
    }

    /// Resets the offset to the initial centering offset.
    pub fn reset_offset(&mut self) {
        self.offset = self.initial_offset;
    }

    /// Recovers the pivot that undoes the current zoom without a visual jump.
    ///
    /// Solving the [`Viewport::scale`] identity for the pivot given the
    /// current offset yields, per axis,
    /// `-offset - (offset - initial_offset) / (1 / zoom - 1)`. A subsequent
    /// `scale_to(1.0, pivot)` with the returned pivot restores the offset to
    /// `initial_offset`.
    ///
    /// Returns `None` at (or numerically near) zoom factor 1, where the
    /// inversion is undefined.
    #[must_use]
    pub fn current_zoom_center(&self) -> Option<Point> {
        if (self.zoom_factor - 1.0).abs() < UNZOOMED_EPSILON {
            return None;
        }
        let denom = 1.0 / self.zoom_factor - 1.0;
        let rel = self.offset - self.initial_offset;
        Some(Point::new(
            -self.offset.x - rel.x / denom,
            -self.offset.y - rel.y / denom,
        ))
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            zoom_factor: self.zoom_factor,
            effective_zoom: self.effective_zoom(),
            offset: self.offset,
            initial_offset: self.initial_offset,
            min_zoom: self.range.min(),
            max_zoom: self.range.max(),
            padding: self.padding,
            has_layout: self.layout.is_some(),
        }
    }
}

fn sanitize_axis(offset: f64, scaled_element: f64, container: f64, padding: f64) -> f64 {
    let max_overflow = scaled_element - container + padding;
    let hi = max_overflow.max(0.0);
    let lo = max_overflow.min(0.0) - padding;
    offset.clamp(lo, hi)
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Current user zoom factor.
    pub zoom_factor: f64,
    /// Current effective (rendered) zoom.
    pub effective_zoom: f64,
    /// Current offset in pre-scale container coordinates.
    pub offset: Vec2,
    /// Initial centering offset.
    pub initial_offset: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Overscroll padding allowance.
    pub padding: Vec2,
    /// Whether usable layout sizes are bound.
    pub has_layout: bool,
}
