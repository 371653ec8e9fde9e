// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchview Animate: a single-job, host-tick-driven animation primitive.
//!
//! The host environment owns the clock and the frame scheduler; this crate
//! owns only the bookkeeping. Instead of registering a frame callback, the
//! consumer starts an [`Animator`] job and calls [`Animator::tick`] with a
//! monotonic now-milliseconds value on every rendering tick the host grants.
//! Each tick yields an eased progress [`Frame`]; the consumer applies it to
//! whatever it is animating and keeps requesting ticks until the frame
//! reports finished.
//!
//! Semantics, matching the interactive-widget use case:
//!
//! - **Single job, no queue**: starting a job while one is running
//!   supersedes it (last writer wins).
//! - **Immediate, idempotent stop**: after [`Animator::stop`], any
//!   in-flight tick is a no-op, guaranteeing no post-cancellation mutation.
//! - **Exactly-once completion**: the finishing tick reports progress `1.0`
//!   and deactivates the job; further ticks yield nothing.
//!
//! The default easing is the cosine ease-in-out `(1 - cos(p·π)) / 2`, a
//! smoothstep-like curve that starts and ends with zero velocity.
//!
//! ## Minimal example
//!
//! ```rust
//! use pinchview_animate::{Animator, Easing, Timeline};
//!
//! let mut animator = Animator::new();
//! animator.start(Timeline::new(1_000, 300, Easing::CosineInOut));
//!
//! // Halfway through, the cosine curve crosses exactly 0.5.
//! let frame = animator.tick(1_150).unwrap();
//! assert!((frame.progress - 0.5).abs() < 1e-12);
//! assert!(!frame.finished);
//!
//! // Past the duration, the job completes and retires itself.
//! let frame = animator.tick(1_400).unwrap();
//! assert_eq!(frame.progress, 1.0);
//! assert!(frame.finished);
//! assert!(animator.tick(1_416).is_none());
//! ```

use core::f64::consts::PI;

/// Progress-shaping curve applied to a timeline's raw progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Raw progress, unshaped.
    Linear,
    /// `(1 - cos(p·π)) / 2`: ease-in-out, zero velocity at both ends.
    #[default]
    CosineInOut,
}

impl Easing {
    /// Applies the curve to a raw progress value in `[0, 1]`.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        match self {
            Self::Linear => progress,
            Self::CosineInOut => (1.0 - (progress * PI).cos()) / 2.0,
        }
    }
}

/// A fixed-duration interpolation schedule against a monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl Timeline {
    /// Creates a timeline starting at `start_ms` and lasting `duration_ms`.
    ///
    /// A zero duration completes on its first sample.
    #[must_use]
    pub fn new(start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Samples the timeline at `now_ms`.
    ///
    /// Raw progress is `elapsed / duration` clamped to `[0, 1]` (times
    /// before the start count as zero elapsed), then shaped by the easing
    /// curve. The frame reports finished once the raw progress reaches 1.
    #[must_use]
    pub fn sample(&self, now_ms: u64) -> Frame {
        let raw = if self.duration_ms == 0 {
            1.0
        } else {
            let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
            (elapsed / self.duration_ms as f64).min(1.0)
        };
        Frame {
            progress: self.easing.apply(raw),
            finished: raw >= 1.0,
        }
    }
}

/// One sampled animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
    /// `true` on the completing frame.
    pub finished: bool,
}

/// Holder for the zero-or-one live animation job.
#[derive(Clone, Copy, Debug, Default)]
pub struct Animator {
    timeline: Option<Timeline>,
}

impl Animator {
    /// Creates an inactive animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a job, superseding any running one.
    pub fn start(&mut self, timeline: Timeline) {
        self.timeline = Some(timeline);
    }

    /// Stops the current job, if any. Idempotent; ticks after a stop are
    /// no-ops.
    pub fn stop(&mut self) {
        self.timeline = None;
    }

    /// Returns `true` while a job is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.timeline.is_some()
    }

    /// Advances the live job to `now_ms`.
    ///
    /// Returns the sampled frame, or `None` when no job is live. The frame
    /// that reports finished also retires the job.
    pub fn tick(&mut self, now_ms: u64) -> Option<Frame> {
        let frame = self.timeline.as_ref()?.sample(now_ms);
        if frame.finished {
            self.timeline = None;
        }
        Some(frame)
    }
}
