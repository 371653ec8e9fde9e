// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchview Viewport: viewport state and the zoom/pan transform engine.
//!
//! This crate provides a small, headless model of a zoomable, pannable view
//! over a fixed-size element (typically an image) inside a container. It
//! focuses on:
//!
//! - Viewport state: user zoom factor, offset vector, and the initial
//!   centering offset derived from the fit-to-container zoom.
//! - Anchor-preserving zoom: scaling around a container-relative pivot so
//!   the pivot's apparent screen position never jumps.
//! - Clamp-aware zoom compounding: [`Viewport::scale_zoom_factor`] reports
//!   the ratio *actually applied* after clamping, so dependent offset math
//!   never drifts at the zoom limits.
//! - Offset sanitizing: clamping the offset into the range that keeps the
//!   scaled element covering (or centered within) the container, with an
//!   explicit padding allowance for deliberate overscroll.
//!
//! It does **not** listen to input or paint anything. Callers feed it
//! gesture deltas (see `pinchview_gesture`) and render the committed
//! [`Transform`] it produces.
//!
//! ## Coordinate model
//!
//! The rendered transform is `scale` then `translate` with the transform
//! origin fixed at the element's top-left. `offset` is expressed in
//! pre-scale container coordinates and both pivot points and touch input
//! are container-relative. The effective scale is
//! `initial_fit_zoom * zoom_factor`, where the initial fit zoom makes the
//! element exactly fit the container.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use pinchview_viewport::{Viewport, ZoomRange};
//!
//! let mut vp = Viewport::new(ZoomRange::new(0.5, 4.0).unwrap());
//! vp.set_layout(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
//! vp.compute_initial_offset();
//! vp.reset_offset();
//!
//! // Zoom in 2x around a container-relative pivot.
//! vp.scale(2.0, Point::new(200.0, 150.0));
//! assert_eq!(vp.zoom_factor(), 2.0);
//!
//! // The committed transform combines the fit zoom (0.5) with user zoom.
//! assert_eq!(vp.transform().scale, 1.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod range;
mod viewport;

pub use modes::AxisLock;
pub use range::{ZoomRange, ZoomRangeError};
pub use viewport::{Transform, Viewport, ViewportDebugInfo};
