// Copyright 2025 the Pinchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Vec2};
use pinchview_animate::{Animator, Easing, Timeline};
use pinchview_gesture::{GestureClassifier, GestureEvent, GestureEvents};
use pinchview_viewport::{AxisLock, Viewport};

use crate::config::{Config, ConfigError};
use crate::host::{GestureHook, Host};

/// Tolerance for "the zoom factor counts as 1" when deciding whether an
/// unzoomed widget may be dragged.
const UNZOOMED_TOLERANCE: f64 = 0.01;

/// What the live animation job interpolates.
#[derive(Clone, Copy, Debug)]
enum AnimationTarget {
    /// Zoom factor transition around a fixed pivot (double tap, zoom-out
    /// snap).
    Zoom { from: f64, to: f64, pivot: Point },
    /// Offset transition toward a sanitized value (bounds snap-back).
    Offset { from: Vec2, to: Vec2 },
}

/// The pinch-zoom widget controller.
///
/// Owns one [`Viewport`], one [`GestureClassifier`], and zero-or-one
/// running animation, and translates touch samples into committed
/// transforms pushed to the [`Host`]. The host forwards touch samples to
/// [`PinchZoom::on_touch_start`] / [`on_touch_move`](Self::on_touch_move) /
/// [`on_touch_end`](Self::on_touch_end), resize and content-load signals to
/// [`on_resize`](Self::on_resize) / [`on_content_load`](Self::on_content_load),
/// and answers every [`Host::request_frame`] with one
/// [`on_frame`](Self::on_frame) call.
///
/// Commits coalesce: any number of state mutations between two rendering
/// ticks produce exactly one [`Host::apply_transform`], reflecting the
/// latest state. During an active gesture the offset may transiently leave
/// its sanitized bounds; the interaction-end hook corrects it with an
/// animated snap (zoom-out snap below the configured `zoom_out_factor`,
/// otherwise an offset snap-back — never both).
pub struct PinchZoom<H: Host> {
    host: H,
    config: Config,
    viewport: Viewport,
    classifier: GestureClassifier,
    animator: Animator,
    animation: Option<AnimationTarget>,
    commit_planned: bool,
    offsets_set: bool,
    enabled: bool,
}

impl<H: Host> PinchZoom<H> {
    /// Creates a widget over `host`, validating `config` first.
    ///
    /// Queries the initial layout immediately; if the container or element
    /// has no usable size yet (hidden, image not loaded), setup is deferred
    /// until a resize or content-load signal provides real dimensions.
    pub fn new(config: Config, host: H) -> Result<Self, ConfigError> {
        let range = config.validate()?;
        let mut viewport = Viewport::new(range);
        viewport.set_padding(Vec2::new(config.horizontal_padding, config.vertical_padding));

        let mut widget = Self {
            host,
            config,
            viewport,
            classifier: GestureClassifier::new(),
            animator: Animator::new(),
            animation: None,
            commit_planned: false,
            offsets_set: false,
            enabled: true,
        };
        widget.refresh_layout();
        widget.invalidate();
        Ok(widget)
    }

    /// Returns the viewport for inspection.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the widget configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns `true` while a programmatic transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Returns `true` if touch input is currently processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes processing touch input.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Makes all touch input inert until [`PinchZoom::enable`].
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Feeds a touch-start sample (the full set of active contacts).
    pub fn on_touch_start(&mut self, touches: &[Point]) {
        if !self.enabled {
            return;
        }
        let now = self.host.now_millis();
        let events = self.classifier.touch_start(touches, now);
        self.handle_events(events);
    }

    /// Feeds a touch-move sample.
    pub fn on_touch_move(&mut self, touches: &[Point]) {
        if !self.enabled {
            return;
        }
        let dragging_allowed = self.dragging_allowed();
        let events = self.classifier.touch_move(touches, dragging_allowed);
        self.handle_events(events);
    }

    /// Feeds a touch-end sample (the contacts still down, possibly none).
    pub fn on_touch_end(&mut self, touches: &[Point]) {
        if !self.enabled {
            return;
        }
        let dragging_allowed = self.dragging_allowed();
        let events = self.classifier.touch_end(touches, dragging_allowed);
        self.handle_events(events);
    }

    /// Signals that the container was resized.
    pub fn on_resize(&mut self) {
        self.refresh_layout();
        self.invalidate();
    }

    /// Signals that the element's content (image) finished loading.
    pub fn on_content_load(&mut self) {
        self.refresh_layout();
        self.invalidate();
    }

    /// Runs one rendering tick: advances a live animation and performs the
    /// coalesced commit.
    ///
    /// Call exactly once per granted [`Host::request_frame`].
    pub fn on_frame(&mut self) {
        let now = self.host.now_millis();
        if let Some(frame) = self.animator.tick(now) {
            if let Some(target) = self.animation {
                self.apply_animation(target, frame.progress);
            }
            if frame.finished {
                self.animation = None;
            } else {
                self.host.request_frame();
            }
            self.commit_planned = true;
        }
        if self.commit_planned {
            self.commit_planned = false;
            self.host.apply_transform(self.viewport.transform());
        }
    }

    fn handle_events(&mut self, events: GestureEvents) {
        for event in events {
            match event {
                GestureEvent::DragStart => {
                    self.stop_animation();
                    self.host.gesture_hook(GestureHook::DragStart);
                }
                GestureEvent::DragBy(delta) => {
                    self.viewport.pan(delta, self.axis_lock());
                    self.invalidate();
                }
                GestureEvent::DragEnd => {
                    self.host.gesture_hook(GestureHook::DragEnd);
                    self.finish_interaction();
                }
                GestureEvent::PinchStart => {
                    self.stop_animation();
                    self.host.gesture_hook(GestureHook::PinchStart);
                }
                GestureEvent::PinchBy {
                    ratio,
                    center,
                    translation,
                } => {
                    self.viewport.scale(ratio, center);
                    self.viewport.pan(translation, self.axis_lock());
                    self.invalidate();
                }
                GestureEvent::PinchEnd => {
                    self.host.gesture_hook(GestureHook::PinchEnd);
                    self.finish_interaction();
                }
                GestureEvent::DoubleTap(point) => {
                    self.host.gesture_hook(GestureHook::DoubleTap);
                    self.double_tap(point);
                }
            }
        }
    }

    /// End-of-interaction hook: snap the zoom back to 1 when below the
    /// zoom-out threshold, otherwise snap an out-of-bounds offset back in.
    ///
    /// At zoom 1 the zoom branch has nothing to undo (and no defined zoom
    /// center), so an out-of-bounds offset still gets the snap-back.
    fn finish_interaction(&mut self) {
        let zoom_pivot = if self.viewport.zoom_factor() < self.config.zoom_out_factor {
            self.viewport.current_zoom_center()
        } else {
            None
        };
        if let Some(pivot) = zoom_pivot {
            self.start_animation(AnimationTarget::Zoom {
                from: self.viewport.zoom_factor(),
                to: 1.0,
                pivot,
            });
        } else if self.viewport.is_out_of_bounds(self.viewport.offset()) {
            self.offset_snap();
        }
        self.invalidate();
    }

    fn offset_snap(&mut self) {
        let from = self.viewport.offset();
        let to = self.viewport.sanitize_offset(from);
        self.start_animation(AnimationTarget::Offset { from, to });
    }

    /// Double tap: toggle between unzoomed and `tap_zoom_factor`, animated.
    ///
    /// Zooming in anchors at the tap point; zooming out anchors at the
    /// current zoom center so the un-zoom lands back on the initial
    /// centering offset without a jump.
    fn double_tap(&mut self, point: Point) {
        let from = self.viewport.zoom_factor();
        let (to, pivot) = if from > 1.0 {
            (1.0, self.viewport.current_zoom_center().unwrap_or(point))
        } else {
            (self.config.tap_zoom_factor, point)
        };
        self.start_animation(AnimationTarget::Zoom { from, to, pivot });
    }

    fn apply_animation(&mut self, target: AnimationTarget, progress: f64) {
        match target {
            AnimationTarget::Zoom { from, to, pivot } => {
                self.viewport.scale_to(from + (to - from) * progress, pivot);
            }
            AnimationTarget::Offset { from, to } => {
                self.viewport.set_offset(from + (to - from) * progress);
            }
        }
    }

    fn start_animation(&mut self, target: AnimationTarget) {
        let now = self.host.now_millis();
        self.animator.start(Timeline::new(
            now,
            self.config.animation_duration_ms,
            Easing::CosineInOut,
        ));
        self.animation = Some(target);
        self.host.request_frame();
    }

    fn stop_animation(&mut self) {
        self.animator.stop();
        self.animation = None;
    }

    /// Marks the state dirty and asks for a tick. At most one commit is
    /// performed per tick no matter how many mutations preceded it.
    fn invalidate(&mut self) {
        if !self.commit_planned {
            self.commit_planned = true;
            self.host.request_frame();
        }
    }

    fn refresh_layout(&mut self) {
        let container = self.host.container_size();
        let element = self.host.element_size();
        if self.viewport.set_layout(container, element) {
            self.setup_offsets();
        }
    }

    fn setup_offsets(&mut self) {
        if self.config.set_offsets_once && self.offsets_set {
            return;
        }
        self.offsets_set = true;
        self.viewport.compute_initial_offset();
        self.viewport.reset_offset();
    }

    fn dragging_allowed(&self) -> bool {
        self.config.draggable_when_unzoomed
            || (self.viewport.zoom_factor() - 1.0).abs() >= UNZOOMED_TOLERANCE
    }

    fn axis_lock(&self) -> AxisLock {
        if self.config.lock_drag_axis {
            AxisLock::Dominant
        } else {
            AxisLock::Free
        }
    }
}

impl<H: Host> fmt::Debug for PinchZoom<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinchZoom")
            .field("viewport", &self.viewport)
            .field("classifier", &self.classifier)
            .field("animation", &self.animation)
            .field("commit_planned", &self.commit_planned)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};
    use pinchview_viewport::Transform;

    use super::{Config, GestureHook, Host, PinchZoom};

    /// Fixed-size host backed by plain fields: a 400x300 container showing
    /// an 800x600 element, so the initial fit zoom is 0.5 and the initial
    /// centering offset is zero.
    struct TestHost {
        now: u64,
        container: Size,
        element: Size,
        frame_requested: bool,
        transforms: Vec<Transform>,
        hooks: Vec<GestureHook>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                now: 0,
                container: Size::new(400.0, 300.0),
                element: Size::new(800.0, 600.0),
                frame_requested: false,
                transforms: Vec::new(),
                hooks: Vec::new(),
            }
        }
    }

    impl Host for TestHost {
        fn now_millis(&mut self) -> u64 {
            self.now
        }

        fn container_size(&mut self) -> Size {
            self.container
        }

        fn element_size(&mut self) -> Size {
            self.element
        }

        fn request_frame(&mut self) {
            self.frame_requested = true;
        }

        fn apply_transform(&mut self, transform: Transform) {
            self.transforms.push(transform);
        }

        fn gesture_hook(&mut self, event: GestureHook) {
            self.hooks.push(event);
        }
    }

    fn widget(config: Config) -> PinchZoom<TestHost> {
        let mut widget = PinchZoom::new(config, TestHost::new()).unwrap();
        run_ticks(&mut widget);
        widget
    }

    /// Drives granted frames (16 ms apart) until the widget stops asking.
    fn run_ticks(widget: &mut PinchZoom<TestHost>) {
        let mut guard = 0;
        while widget.host().frame_requested {
            widget.host_mut().frame_requested = false;
            widget.host_mut().now += 16;
            widget.on_frame();
            guard += 1;
            assert!(guard < 1_000, "widget never settled");
        }
    }

    /// Two horizontal touches `span` apart, centered on (100, 100).
    fn pair(span: f64) -> [Point; 2] {
        [
            Point::new(100.0 - span / 2.0, 100.0),
            Point::new(100.0 + span / 2.0, 100.0),
        ]
    }

    fn tap(widget: &mut PinchZoom<TestHost>, point: Point) {
        widget.on_touch_start(&[point]);
        widget.on_touch_end(&[]);
    }

    #[test]
    fn construction_commits_the_initial_transform() {
        let widget = widget(Config::default());
        let last = *widget.host().transforms.last().unwrap();
        assert_eq!(
            last,
            Transform {
                scale: 0.5,
                offset: Vec2::ZERO
            }
        );
    }

    #[test]
    fn double_tap_toggles_zoom() {
        let mut widget = widget(Config::default());
        let point = Point::new(50.0, 50.0);

        tap(&mut widget, point);
        widget.host_mut().now += 100;
        tap(&mut widget, point);
        assert!(widget.is_animating());
        assert!(widget.host().hooks.contains(&GestureHook::DoubleTap));

        run_ticks(&mut widget);
        assert!((widget.viewport().zoom_factor() - 2.0).abs() < 1e-9);

        // Second double tap: back to 1, re-centered on the zoom center.
        widget.host_mut().now += 1_000;
        tap(&mut widget, point);
        widget.host_mut().now += 100;
        tap(&mut widget, point);
        run_ticks(&mut widget);

        assert!((widget.viewport().zoom_factor() - 1.0).abs() < 1e-9);
        let offset = widget.viewport().offset();
        let initial = widget.viewport().initial_offset();
        assert!((offset.x - initial.x).abs() < 1e-6);
        assert!((offset.y - initial.y).abs() < 1e-6);
    }

    #[test]
    fn slow_taps_do_not_toggle() {
        let mut widget = widget(Config::default());
        let point = Point::new(50.0, 50.0);

        tap(&mut widget, point);
        widget.host_mut().now += 400;
        tap(&mut widget, point);
        assert!(!widget.is_animating());
        assert_eq!(widget.viewport().zoom_factor(), 1.0);
    }

    #[test]
    fn pinch_discards_settle_samples_then_zooms() {
        let mut widget = widget(Config::default());

        widget.on_touch_start(&pair(10.0));
        widget.on_touch_move(&pair(10.0));
        assert!(widget.host().hooks.contains(&GestureHook::PinchStart));

        // Three doubling samples are settle noise: zoom must not move.
        for span in [20.0, 40.0, 80.0] {
            widget.on_touch_move(&pair(span));
        }
        assert_eq!(widget.viewport().zoom_factor(), 1.0);

        // The fourth sample applies its incremental ratio of 2.
        widget.on_touch_move(&pair(160.0));
        assert!((widget.viewport().zoom_factor() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn shallow_zoom_snaps_back_to_one_on_release() {
        let mut widget = widget(Config::default());

        // Pinch to 1.1: below the 1.3 zoom-out threshold.
        widget.on_touch_start(&pair(10.0));
        widget.on_touch_move(&pair(10.0));
        for _ in 0..3 {
            widget.on_touch_move(&pair(10.0));
        }
        widget.on_touch_move(&pair(11.0));
        assert!((widget.viewport().zoom_factor() - 1.1).abs() < 1e-9);

        widget.on_touch_end(&[]);
        assert!(widget.host().hooks.contains(&GestureHook::PinchEnd));
        // The correction is a zoom animation, not an offset-only fix.
        assert!(widget.is_animating());

        run_ticks(&mut widget);
        assert!((widget.viewport().zoom_factor() - 1.0).abs() < 1e-9);
        let offset = widget.viewport().offset();
        let initial = widget.viewport().initial_offset();
        assert!((offset.x - initial.x).abs() < 1e-6);
        assert!((offset.y - initial.y).abs() < 1e-6);
    }

    #[test]
    fn out_of_bounds_drag_snaps_offset_back() {
        let mut widget = widget(Config::default());

        // Zoom to 2 first so there is a real pan range, ending the pinch
        // cleanly inside bounds.
        widget.on_touch_start(&pair(10.0));
        widget.on_touch_move(&pair(10.0));
        for _ in 0..3 {
            widget.on_touch_move(&pair(10.0));
        }
        widget.on_touch_move(&pair(20.0));
        widget.on_touch_end(&[]);
        run_ticks(&mut widget);
        let zoom = widget.viewport().zoom_factor();
        assert!((zoom - 2.0).abs() < 1e-9);

        // Drag far past the pan range; mid-gesture the offset is transient
        // and uncorrected.
        let start = Point::new(200.0, 150.0);
        widget.on_touch_start(&[start]);
        widget.on_touch_move(&[start]);
        widget.on_touch_move(&[Point::new(1_200.0, 150.0)]);
        assert!(widget.viewport().is_out_of_bounds(widget.viewport().offset()));

        widget.on_touch_end(&[]);
        assert!(widget.is_animating());
        run_ticks(&mut widget);

        // Zoom untouched (2.0 is above the threshold), offset back in bounds.
        assert_eq!(widget.viewport().zoom_factor(), zoom);
        assert!(!widget.viewport().is_out_of_bounds(widget.viewport().offset()));
    }

    #[test]
    fn unzoomed_overscroll_snaps_offset_back_on_release() {
        let mut widget = widget(Config::default());

        // At zoom 1 the scaled element exactly fits the container, so any
        // drag leaves the offset out of bounds.
        let start = Point::new(200.0, 150.0);
        widget.on_touch_start(&[start]);
        widget.on_touch_move(&[start]);
        widget.on_touch_move(&[Point::new(900.0, 150.0)]);
        assert!(widget.viewport().is_out_of_bounds(widget.viewport().offset()));

        // Release at zoom 1: there is no zoom to undo, but the offset
        // snap-back must still run.
        widget.on_touch_end(&[]);
        assert!(widget.is_animating());
        run_ticks(&mut widget);

        assert_eq!(widget.viewport().zoom_factor(), 1.0);
        assert!(!widget.viewport().is_out_of_bounds(widget.viewport().offset()));
        assert_eq!(widget.viewport().offset(), Vec2::ZERO);
        assert_eq!(widget.host().transforms.last().unwrap().offset, Vec2::ZERO);
    }

    #[test]
    fn locked_drag_moves_the_dominant_axis_only() {
        let config = Config {
            lock_drag_axis: true,
            ..Config::default()
        };
        let mut widget = widget(config);
        let start = widget.viewport().offset();

        let origin = Point::new(100.0, 100.0);
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);

        widget.on_touch_move(&[origin + Vec2::new(10.0, 2.0)]);
        let after_x = widget.viewport().offset();
        assert_eq!(after_x.x, start.x - 10.0);
        assert_eq!(after_x.y, start.y);

        widget.on_touch_move(&[origin + Vec2::new(10.0, 2.0) + Vec2::new(2.0, 10.0)]);
        let after_y = widget.viewport().offset();
        assert_eq!(after_y.x, after_x.x);
        assert_eq!(after_y.y, after_x.y - 10.0);
    }

    #[test]
    fn unzoomed_drag_needs_permission() {
        let config = Config {
            draggable_when_unzoomed: false,
            ..Config::default()
        };
        let mut widget = widget(config);
        let start = widget.viewport().offset();

        let origin = Point::new(100.0, 100.0);
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);
        widget.on_touch_move(&[Point::new(140.0, 120.0)]);

        assert_eq!(widget.viewport().offset(), start);
        assert!(!widget.host().hooks.contains(&GestureHook::DragStart));
    }

    #[test]
    fn commits_coalesce_to_one_per_tick() {
        let mut widget = widget(Config::default());
        let committed = widget.host().transforms.len();

        let origin = Point::new(100.0, 100.0);
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);
        widget.on_touch_move(&[Point::new(104.0, 100.0)]);
        widget.on_touch_move(&[Point::new(109.0, 101.0)]);
        widget.on_touch_move(&[Point::new(115.0, 103.0)]);

        // Three mutations, no tick yet: nothing committed.
        assert_eq!(widget.host().transforms.len(), committed);
        assert!(widget.host().frame_requested);

        widget.host_mut().frame_requested = false;
        widget.host_mut().now += 16;
        widget.on_frame();

        // One tick, one commit, reflecting the latest state.
        assert_eq!(widget.host().transforms.len(), committed + 1);
        let last = widget.host().transforms.last().unwrap();
        assert_eq!(last.offset, Vec2::new(-15.0, -3.0));
    }

    #[test]
    fn disabled_widget_ignores_touch_input() {
        let mut widget = widget(Config::default());
        widget.disable();

        let origin = Point::new(100.0, 100.0);
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);
        widget.on_touch_move(&[Point::new(150.0, 150.0)]);
        widget.on_touch_end(&[]);

        assert!(widget.host().hooks.is_empty());
        assert_eq!(widget.viewport().offset(), Vec2::ZERO);

        widget.enable();
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);
        assert!(widget.host().hooks.contains(&GestureHook::DragStart));
    }

    #[test]
    fn hidden_element_defers_setup_until_load() {
        let mut host = TestHost::new();
        host.element = Size::ZERO;
        let mut widget = PinchZoom::new(Config::default(), host).unwrap();
        run_ticks(&mut widget);

        // No layout yet: the committed scale is the bare zoom factor.
        assert!(!widget.viewport().has_layout());
        assert_eq!(widget.host().transforms.last().unwrap().scale, 1.0);

        // The image finishes loading; setup completes on the signal.
        widget.host_mut().element = Size::new(800.0, 600.0);
        widget.on_content_load();
        run_ticks(&mut widget);
        assert!(widget.viewport().has_layout());
        assert_eq!(widget.host().transforms.last().unwrap().scale, 0.5);
    }

    #[test]
    fn resize_recomputes_the_centering_offset() {
        let mut widget = widget(Config::default());
        widget.host_mut().container = Size::new(300.0, 300.0);
        widget.on_resize();
        run_ticks(&mut widget);
        // 800x600 into 300x300: fit zoom 0.375, scaled element 300x225,
        // centered vertically.
        assert_eq!(widget.viewport().offset(), Vec2::new(0.0, -37.5));
    }

    #[test]
    fn set_offsets_once_keeps_the_first_centering_across_resizes() {
        let config = Config {
            set_offsets_once: true,
            ..Config::default()
        };
        let mut widget = widget(config);
        let before = widget.viewport().offset();
        widget.host_mut().container = Size::new(300.0, 300.0);
        widget.on_resize();
        run_ticks(&mut widget);
        assert_eq!(widget.viewport().offset(), before);
    }

    #[test]
    fn gesture_start_cancels_a_running_animation() {
        let mut widget = widget(Config::default());
        let point = Point::new(50.0, 50.0);

        tap(&mut widget, point);
        widget.host_mut().now += 100;
        tap(&mut widget, point);
        assert!(widget.is_animating());

        // A new drag must supersede the double-tap animation immediately.
        widget.host_mut().now += 1_000;
        let origin = Point::new(100.0, 100.0);
        widget.on_touch_start(&[origin]);
        widget.on_touch_move(&[origin]);
        assert!(!widget.is_animating());
    }
}
