// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use pinchview_geom::{centroid, scale_ratio};
use smallvec::SmallVec;

use crate::events::{GestureEvent, GestureEvents};

/// Maximum interval between two single-finger touch-starts that still
/// counts as a double tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Number of leading pinch scale samples discarded after classification.
///
/// Device touch coordinates are unreliable immediately after the second
/// finger lands; applying those samples produces a visible jump.
const PINCH_SETTLE_SAMPLES: u32 = 3;

/// Current interaction mode of the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureMode {
    /// No recognized gesture in progress.
    #[default]
    Idle,
    /// One contact, panning.
    Dragging,
    /// Two contacts, zooming (and panning via the centroid).
    Pinching,
}

/// State machine that classifies touch samples into gesture events.
///
/// Feed it the three sample kinds via [`GestureClassifier::touch_start`],
/// [`GestureClassifier::touch_move`] and [`GestureClassifier::touch_end`];
/// each call returns the [`GestureEvents`] the sample produced, in order.
/// See the crate docs for the classification rules.
#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    mode: GestureMode,
    finger_count: usize,
    /// Timestamp of the previous single-finger touch-start, if still valid
    /// for double-tap pairing.
    last_single_touch_start_ms: Option<u64>,
    /// Set by touch-start; the next move classifies instead of reporting.
    awaiting_first_move: bool,
    /// Set when a double tap fired; suppresses the rest of the sequence.
    double_tap_latch: bool,
    /// Touch pair captured at pinch entry; the scale reference.
    reference_touches: SmallVec<[Point; 2]>,
    last_drag_position: Option<Point>,
    last_pinch_center: Option<Point>,
    /// Scale of the previous pinch sample relative to the reference pair.
    last_scale: f64,
    /// Samples seen since pinch entry, for the settle discard.
    pinch_samples: u32,
}

impl GestureClassifier {
    /// Creates an idle classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current interaction mode.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Returns the contact count of the most recent sample.
    #[must_use]
    pub fn finger_count(&self) -> usize {
        self.finger_count
    }

    /// Returns `true` while a drag or pinch is in progress.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.mode != GestureMode::Idle
    }

    /// Processes a touch-start sample.
    ///
    /// Runs double-tap detection and arms first-move classification.
    /// Mode transitions themselves wait for the first move (or for
    /// touch-end), matching how contact sets settle on real devices.
    pub fn touch_start(&mut self, touches: &[Point], now_ms: u64) -> GestureEvents {
        let mut events = GestureEvents::new();
        self.finger_count = touches.len();
        self.awaiting_first_move = true;
        self.double_tap_latch = false;

        if self.finger_count > 1 {
            // A second finger landing invalidates the tap timer, so a slow
            // pinch start cannot pair with an earlier tap.
            self.last_single_touch_start_ms = None;
        }

        if self.finger_count == 1 {
            let paired = self
                .last_single_touch_start_ms
                .is_some_and(|t| now_ms.saturating_sub(t) < DOUBLE_TAP_WINDOW_MS);
            if paired {
                self.double_tap_latch = true;
                if self.mode == GestureMode::Idle {
                    events.push(GestureEvent::DoubleTap(touches[0]));
                } else {
                    // A tap landed while a gesture was still live: end the
                    // gesture and swallow the tap.
                    self.set_mode(GestureMode::Idle, touches, &mut events);
                }
            }
            self.last_single_touch_start_ms = Some(now_ms);
        }
        events
    }

    /// Processes a touch-move sample.
    ///
    /// `dragging_allowed` is the caller's policy for single-finger drags
    /// (typically "configured draggable when unzoomed, or currently
    /// zoomed"). The first move after a touch-start classifies the gesture
    /// and establishes baselines; later moves report incremental deltas.
    pub fn touch_move(&mut self, touches: &[Point], dragging_allowed: bool) -> GestureEvents {
        let mut events = GestureEvents::new();
        if self.double_tap_latch {
            return events;
        }
        self.finger_count = touches.len();

        if self.awaiting_first_move {
            self.awaiting_first_move = false;
            let target = self.classify(dragging_allowed);
            if target == self.mode {
                // Same mode across a touch-start: re-baseline so the gap
                // in the sample stream cannot produce a jump.
                self.rebaseline(touches);
            } else {
                self.set_mode(target, touches, &mut events);
            }
            return events;
        }

        match self.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging => {
                if let Some(&position) = touches.first() {
                    if let Some(last) = self.last_drag_position {
                        events.push(GestureEvent::DragBy(position - last));
                    }
                    self.last_drag_position = Some(position);
                }
            }
            GestureMode::Pinching => {
                if touches.len() == 2 && self.reference_touches.len() == 2 {
                    self.pinch_sample([touches[0], touches[1]], &mut events);
                }
            }
        }
        events
    }

    /// Processes a touch-end sample and reclassifies immediately, so a
    /// pinch degrades into a drag as soon as one finger lifts.
    pub fn touch_end(&mut self, touches: &[Point], dragging_allowed: bool) -> GestureEvents {
        let mut events = GestureEvents::new();
        self.finger_count = touches.len();
        let target = self.classify(dragging_allowed);
        self.set_mode(target, touches, &mut events);
        events
    }

    fn classify(&self, dragging_allowed: bool) -> GestureMode {
        match self.finger_count {
            2 => GestureMode::Pinching,
            1 if dragging_allowed => GestureMode::Dragging,
            _ => GestureMode::Idle,
        }
    }

    fn set_mode(&mut self, target: GestureMode, touches: &[Point], events: &mut GestureEvents) {
        if self.mode == target {
            return;
        }
        match self.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging => events.push(GestureEvent::DragEnd),
            GestureMode::Pinching => events.push(GestureEvent::PinchEnd),
        }
        self.mode = target;
        match target {
            GestureMode::Idle => {}
            GestureMode::Dragging => {
                events.push(GestureEvent::DragStart);
                self.last_drag_position = touches.first().copied();
            }
            GestureMode::Pinching => {
                events.push(GestureEvent::PinchStart);
                self.begin_pinch(touches);
            }
        }
    }

    fn rebaseline(&mut self, touches: &[Point]) {
        match self.mode {
            GestureMode::Idle => {}
            GestureMode::Dragging => self.last_drag_position = touches.first().copied(),
            GestureMode::Pinching => self.begin_pinch(touches),
        }
    }

    fn begin_pinch(&mut self, touches: &[Point]) {
        self.reference_touches = touches.iter().copied().collect();
        self.last_scale = 1.0;
        self.last_pinch_center = None;
        self.pinch_samples = 0;
    }

    fn pinch_sample(&mut self, current: [Point; 2], events: &mut GestureEvents) {
        let reference = [self.reference_touches[0], self.reference_touches[1]];
        let new_scale = scale_ratio(reference, current);
        let ratio = if self.last_scale > 0.0 {
            new_scale / self.last_scale
        } else {
            1.0
        };
        self.last_scale = new_scale;

        let center = centroid(&current);
        self.pinch_samples += 1;
        if self.pinch_samples > PINCH_SETTLE_SAMPLES {
            let translation = self
                .last_pinch_center
                .map_or(Vec2::ZERO, |last| center - last);
            events.push(GestureEvent::PinchBy {
                ratio,
                center,
                translation,
            });
        }
        self.last_pinch_center = Some(center);
    }
}
