// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use pinchview_viewport::Transform;

/// Narrow capability interface the widget needs from its host environment.
///
/// The controller never reaches into host globals; everything ambient —
/// the clock, the frame scheduler, layout measurement, and the rendered
/// transform — flows through this trait. A browser host backs it with
/// `performance.now()`, `requestAnimationFrame`, element measurement, and
/// a CSS transform writer; a test host backs it with plain fields.
///
/// ## Contract
///
/// - `now_millis` is monotonic. It never needs to be wall-clock time.
/// - After `request_frame`, the host calls
///   [`PinchZoom::on_frame`](crate::PinchZoom::on_frame) once on its next
///   rendering tick. Multiple requests before that tick coalesce into one
///   call.
/// - Size queries are answered fresh on every call, not cached; the widget
///   queries them at the moments its algorithms need them.
pub trait Host {
    /// Returns the current monotonic time in milliseconds.
    fn now_millis(&mut self) -> u64;

    /// Returns the container's current size in CSS pixels.
    fn container_size(&mut self) -> Size;

    /// Returns the element's natural (unscaled) size in CSS pixels.
    fn element_size(&mut self) -> Size;

    /// Asks the host to schedule one rendering tick.
    fn request_frame(&mut self);

    /// Receives a committed transform to render.
    fn apply_transform(&mut self, transform: Transform);

    /// Observes gesture lifecycle moments for host instrumentation.
    ///
    /// Purely observational; the widget consumes no return value. The
    /// default implementation ignores the events.
    fn gesture_hook(&mut self, event: GestureHook) {
        let _ = event;
    }
}

/// Gesture lifecycle moments surfaced to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureHook {
    /// A single-finger drag began.
    DragStart,
    /// The drag ended.
    DragEnd,
    /// A two-finger pinch began.
    PinchStart,
    /// The pinch ended.
    PinchEnd,
    /// A double tap fired.
    DoubleTap,
}
