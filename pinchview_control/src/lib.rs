// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchview Control: the pinch-zoom widget controller.
//!
//! [`PinchZoom`] wires the lower layers together: the gesture classifier
//! from `pinchview_gesture`, the zoom/pan transform engine from
//! `pinchview_viewport`, and the animation driver from `pinchview_animate`.
//! It is headless; everything environment-specific — the clock, layout
//! measurement, frame scheduling, and rendering the committed transform —
//! is provided by the embedder through the [`Host`] trait.
//!
//! The interaction model:
//!
//! - **Drag** pans the element (optionally restricted to the dominant
//!   axis per sample).
//! - **Pinch** zooms around the touch centroid, clamped to the configured
//!   zoom range, and pans by the centroid's movement.
//! - **Double tap** toggles between unzoomed and
//!   [`Config::tap_zoom_factor`], animated.
//! - When an interaction ends, a zoom below [`Config::zoom_out_factor`]
//!   snaps back to 1, and an out-of-bounds offset snaps back into range;
//!   both animated.
//!
//! State mutations coalesce into at most one committed [`Transform`] per
//! rendering tick the host grants.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use pinchview_control::{Config, Host, PinchZoom, Transform};
//!
//! struct DemoHost {
//!     now: u64,
//!     frame_requested: bool,
//!     rendered: Option<Transform>,
//! }
//!
//! impl Host for DemoHost {
//!     fn now_millis(&mut self) -> u64 {
//!         self.now
//!     }
//!     fn container_size(&mut self) -> Size {
//!         Size::new(400.0, 300.0)
//!     }
//!     fn element_size(&mut self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!     fn request_frame(&mut self) {
//!         self.frame_requested = true;
//!     }
//!     fn apply_transform(&mut self, transform: Transform) {
//!         self.rendered = Some(transform);
//!     }
//! }
//!
//! let host = DemoHost { now: 0, frame_requested: false, rendered: None };
//! let mut widget = PinchZoom::new(Config::default(), host).unwrap();
//!
//! // The embedder forwards touch samples and answers frame requests.
//! widget.on_touch_start(&[Point::new(100.0, 100.0)]);
//! while widget.host().frame_requested {
//!     widget.host_mut().frame_requested = false;
//!     widget.host_mut().now += 16;
//!     widget.on_frame();
//! }
//! assert_eq!(widget.host().rendered.unwrap().scale, 0.5);
//! ```

mod config;
mod controller;
mod host;

pub use config::{Config, ConfigError};
pub use controller::PinchZoom;
pub use host::{GestureHook, Host};
pub use pinchview_viewport::Transform;
