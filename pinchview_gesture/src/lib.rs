// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchview Gesture: a touch gesture classification state machine.
//!
//! [`GestureClassifier`] consumes a stream of touch-point snapshots
//! (0–2 container-relative contact points per sample, plus a monotonic
//! timestamp on touch-start) and emits typed [`GestureEvent`] batches:
//! drag start/move/end, pinch start/move/end, and double taps.
//!
//! The classifier is deliberately an explicit, inspectable struct mutated
//! only through its named transition methods, so the state machine can be
//! unit-tested directly instead of through event replay against a host.
//!
//! ## Classification rules
//!
//! - Two contacts classify as [`GestureMode::Pinching`] from any state.
//! - One contact classifies as [`GestureMode::Dragging`] when the caller
//!   reports dragging is allowed (typically "configured draggable, or
//!   currently zoomed").
//! - Anything else is [`GestureMode::Idle`].
//!
//! Classification happens on the first move after a touch-start, matching
//! how browsers deliver a settled contact set; touch-end reclassifies
//! immediately so a pinch degrades into a drag when one finger lifts.
//!
//! ## Incremental deltas
//!
//! Drag deltas are computed against the *previous* sample, so arbitrarily
//! long drags never accumulate error against a stale origin. Pinch ratios
//! are likewise incremental: each move reports `new_scale / last_scale`,
//! to be compounded by a clamp-aware transform engine. The first three
//! scale samples of every pinch are discarded — touch coordinates are
//! noisy right after the second finger lands, and applying them causes a
//! visible jump at pinch start.
//!
//! ## Double taps
//!
//! Two single-finger touch-starts within [`DOUBLE_TAP_WINDOW_MS`] emit
//! [`GestureEvent::DoubleTap`] and suppress the remainder of that touch
//! sequence. A touch-start with more than one finger down invalidates the
//! tap timer, so a slow pinch start never fires a false positive.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pinchview_gesture::{GestureClassifier, GestureEvent, GestureMode};
//!
//! let mut classifier = GestureClassifier::new();
//! let finger = Point::new(40.0, 40.0);
//!
//! classifier.touch_start(&[finger], 1_000);
//! // First move classifies the gesture.
//! let events = classifier.touch_move(&[finger], true);
//! assert_eq!(events.as_slice(), [GestureEvent::DragStart]);
//! assert_eq!(classifier.mode(), GestureMode::Dragging);
//!
//! // Later moves report deltas against the previous sample.
//! let events = classifier.touch_move(&[Point::new(45.0, 42.0)], true);
//! assert_eq!(
//!     events.as_slice(),
//!     [GestureEvent::DragBy(kurbo::Vec2::new(5.0, 2.0))]
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod classifier;
mod events;

pub use classifier::{DOUBLE_TAP_WINDOW_MS, GestureClassifier, GestureMode};
pub use events::{GestureEvent, GestureEvents};
