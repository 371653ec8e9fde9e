// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Event batch produced by one classifier transition.
///
/// A single input sample emits at most a handful of events (an end plus a
/// start on a mode change); the inline capacity keeps the common case
/// allocation-free.
pub type GestureEvents = SmallVec<[GestureEvent; 2]>;

/// A classified gesture action, ready to be applied to a transform engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A drag began. Consumers typically cancel any running animation.
    DragStart,
    /// The dragged contact moved by this screen-space delta since the
    /// previous sample.
    DragBy(Vec2),
    /// The drag ended (finger lifted or the gesture reclassified).
    DragEnd,
    /// A two-finger pinch began. Consumers typically cancel any running
    /// animation.
    PinchStart,
    /// A settled pinch sample.
    PinchBy {
        /// Incremental scale ratio since the previous sample
        /// (`new_scale / last_scale`), to be compounded by the consumer.
        ratio: f64,
        /// Current touch centroid, container-relative. The zoom pivot.
        center: Point,
        /// Movement of the centroid since the previous sample; the
        /// two-finger pan component.
        translation: Vec2,
    },
    /// The pinch ended (a finger lifted or the gesture reclassified).
    PinchEnd,
    /// Two single-finger touch-starts landed within the double-tap window.
    /// Carries the tap point.
    DoubleTap(Point),
}
