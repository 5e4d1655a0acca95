//! The curl state machine: two independently animated fold edges, drag and
//! tap handling, page-turn commits and the observable progress scalar.
//!
//! Everything runs on one logical (UI) thread. Animation progression is
//! driven by the host calling [`PageCurlState::tick`] once per frame;
//! starting a new drag or scripted turn cancels any in-flight animation
//! first, and cancellation always runs the animation's finalizer. That
//! cancel-before-restart discipline is the entire concurrency model — no
//! locks, no shared mutable state.

pub mod animation;
pub mod gesture;
pub mod velocity;

use log::debug;

pub use animation::{AnimatedEdge, Easing, Finalize};
pub use gesture::{Direction, PointerEvent, TOUCH_SLOP};
pub use velocity::VelocityTracker;

use crate::config::PageCurlConfig;
use crate::fold::Edge;
use crate::math::rect::PageRect;
use crate::math::Point2;
use crate::render::{self, DrawOp};
use animation::{SETTLE_DURATION, TURN_DURATION, TURN_MIDPOINT};
use gesture::ActiveDrag;

/// A custom tap hook: returns `true` when it consumed the tap.
pub type CustomTapHandler<'a> = &'a mut dyn FnMut(Point2) -> bool;

#[derive(Debug)]
struct InternalState {
    page: PageRect,
    forward: AnimatedEdge,
    backward: AnimatedEdge,
    drag: Option<ActiveDrag>,
    pending_down: Option<(Point2, f64)>,
}

impl InternalState {
    fn new(page: PageRect) -> Self {
        Self {
            page,
            forward: AnimatedEdge::new(Edge::trailing(&page)),
            backward: AnimatedEdge::new(Edge::leading(&page)),
            drag: None,
            pending_down: None,
        }
    }

    /// The overshoot midpoint of a scripted turn: top anchor at the trailing
    /// corner, bottom anchor halfway across the bottom boundary.
    fn script_middle(&self) -> Edge {
        Edge::new(
            Point2::new(self.page.width, self.page.height / 2.0),
            Point2::new(self.page.width / 2.0, self.page.height),
        )
    }
}

/// The page-curl state machine.
///
/// Owns the forward and backward fold edges, tracks the current page index
/// and exposes `progress` for external observers. The host feeds pointer
/// events and frame ticks, and reads back draw ops via [`Self::frame`].
#[derive(Debug)]
pub struct PageCurlState {
    current: usize,
    page_count: usize,
    internal: Option<InternalState>,
}

impl PageCurlState {
    #[must_use]
    pub fn new(page_count: usize, initial_current: usize) -> Self {
        Self {
            current: initial_current.min(page_count.saturating_sub(1)),
            page_count,
            internal: None,
        }
    }

    /// Installs the page bounds for the current layout pass. A no-op when
    /// the bounds are unchanged; a resize rebuilds both edges at rest.
    pub fn setup(&mut self, page: PageRect) {
        if self
            .internal
            .as_ref()
            .is_some_and(|internal| internal.page == page)
        {
            return;
        }
        self.internal = Some(InternalState::new(page));
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Updates the page count, clamping the current page into range.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.current = self.current.min(page_count.saturating_sub(1));
    }

    /// Current forward fold edge; trailing rest when not set up.
    #[must_use]
    pub fn forward_edge(&self) -> Option<Edge> {
        self.internal.as_ref().map(|i| i.forward.value())
    }

    /// Current backward fold edge; leading rest when not set up.
    #[must_use]
    pub fn backward_edge(&self) -> Option<Edge> {
        self.internal.as_ref().map(|i| i.backward.value())
    }

    /// The observable turn progress in `[-1, 1]`: 0 at rest, approaching 1
    /// as a forward turn completes and -1 as a backward turn completes.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let Some(internal) = self.internal.as_ref() else {
            return 0.0;
        };
        let width = internal.page.width;
        let forward = internal.forward.value();
        let backward = internal.backward.value();
        if !forward.approx_eq(&Edge::trailing(&internal.page)) {
            1.0 - forward.center_x() / width
        } else if !backward.approx_eq(&Edge::leading(&internal.page)) {
            -backward.center_x() / width
        } else {
            0.0
        }
    }

    /// True while either edge is under animation control.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.internal
            .as_ref()
            .is_some_and(|i| i.forward.is_animating() || i.backward.is_animating())
    }

    /// Advances animations by `dt` seconds, applying any page-turn commits
    /// that complete this tick.
    pub fn tick(&mut self, dt: f64) {
        let Some(internal) = self.internal.as_mut() else {
            return;
        };
        let forward_commit = internal.forward.tick(dt);
        let backward_commit = internal.backward.tick(dt);
        for delta in [forward_commit, backward_commit].into_iter().flatten() {
            self.apply_turn(delta);
        }
    }

    /// Composes this frame's draw ops from the current edge values.
    #[must_use]
    pub fn frame(&self, config: &PageCurlConfig) -> Vec<DrawOp> {
        let Some(internal) = self.internal.as_ref() else {
            return Vec::new();
        };
        render::compose_frame(
            &internal.forward.value(),
            &internal.backward.value(),
            &internal.page,
            &config.curl,
            self.current,
            self.page_count,
        )
    }

    /// Instantly snaps to the given page, resetting both edges to rest.
    pub fn snap_to(&mut self, index: usize) {
        self.cancel_animations();
        self.current = index.min(self.page_count.saturating_sub(1));
        self.reset_edges();
    }

    /// Turns to the next page with the scripted animation. Silently ignored
    /// on the last page.
    pub fn next(&mut self) {
        self.cancel_animations();
        if self.current + 1 >= self.page_count {
            return;
        }
        let Some(internal) = self.internal.as_mut() else {
            return;
        };
        let page = internal.page;
        let middle = internal.script_middle();
        let rest = Edge::trailing(&page);
        internal.forward.snap_to(rest);
        internal.backward.snap_to(Edge::leading(&page));
        debug!("scripted forward turn from page {}", self.current);
        internal.forward.animate_through(
            &[(middle, TURN_MIDPOINT), (Edge::leading(&page), TURN_DURATION)],
            Finalize::CommitTurn { delta: 1, rest },
        );
    }

    /// Turns to the previous page with the scripted animation. Silently
    /// ignored on the first page.
    pub fn prev(&mut self) {
        self.cancel_animations();
        if self.current == 0 {
            return;
        }
        let Some(internal) = self.internal.as_mut() else {
            return;
        };
        let page = internal.page;
        let middle = internal.script_middle();
        let rest = Edge::leading(&page);
        internal.forward.snap_to(Edge::trailing(&page));
        internal.backward.snap_to(rest);
        debug!("scripted backward turn from page {}", self.current);
        internal.backward.animate_through(
            &[
                (middle, TURN_DURATION - TURN_MIDPOINT),
                (Edge::trailing(&page), TURN_DURATION),
            ],
            Finalize::CommitTurn { delta: -1, rest },
        );
    }

    /// Feeds one pointer event to the drag recognizer.
    ///
    /// Returns the tap position when the gesture ended without ever leaving
    /// the slop radius — the host decides whether to forward it to
    /// [`Self::handle_tap`].
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        config: &PageCurlConfig,
    ) -> Option<Point2> {
        match event {
            PointerEvent::Down { position, time } => {
                if let Some(internal) = self.internal.as_mut() {
                    internal.pending_down = Some((position, time));
                }
                None
            }
            PointerEvent::Move { position, time } => {
                self.on_move(position, time, config);
                None
            }
            PointerEvent::Up { position, time } => self.on_up(position, time, config),
        }
    }

    /// Handles a recognized tap. The custom hook, when present, runs first
    /// and may consume the tap; otherwise the configured forward/backward
    /// target rects decide which scripted turn to start.
    pub fn handle_tap(
        &mut self,
        position: Point2,
        config: &PageCurlConfig,
        custom: Option<CustomTapHandler<'_>>,
    ) {
        let Some(internal) = self.internal.as_ref() else {
            return;
        };
        let page = internal.page;

        if let Some(custom) = custom {
            if custom(position) {
                debug!("tap at ({}, {}) consumed by custom handler", position.x, position.y);
                return;
            }
        }

        let tap = &config.interaction.tap;
        if config.interaction.tap_forward_enabled
            && tap.forward_target.resolve(&page).contains(position)
        {
            self.next();
        } else if config.interaction.tap_backward_enabled
            && tap.backward_target.resolve(&page).contains(position)
        {
            self.prev();
        }
    }

    fn on_move(&mut self, position: Point2, time: f64, config: &PageCurlConfig) {
        let Some(internal) = self.internal.as_mut() else {
            return;
        };

        if let Some(drag) = internal.drag.as_mut() {
            let enabled = match drag.direction {
                Direction::Forward => config.interaction.drag_forward_enabled,
                Direction::Backward => config.interaction.drag_backward_enabled,
            };
            let page = internal.page;
            let edge = match drag.direction {
                Direction::Forward => &mut internal.forward,
                Direction::Backward => &mut internal.backward,
            };
            if enabled {
                drag.tracker.add_sample(time, position);
                let target =
                    gesture::fold_edge_for_pointer(drag.behavior, &page, drag.start, position);
                edge.snap_to(target);
            } else {
                // Disabled mid-drag: spring back and drop the gesture.
                debug!("drag disabled mid-flight, cancelling");
                let rest = match drag.direction {
                    Direction::Forward => Edge::trailing(&page),
                    Direction::Backward => Edge::leading(&page),
                };
                edge.animate_to(rest, SETTLE_DURATION, Finalize::SnapTo(rest));
                internal.drag = None;
            }
            return;
        }

        let Some((down, down_time)) = internal.pending_down else {
            return;
        };
        if (position - down).norm() < TOUCH_SLOP {
            return;
        }
        internal.pending_down = None;

        let Some((direction, behavior)) =
            gesture::classify_start(config, &internal.page, down, position)
        else {
            return;
        };

        // An eligible start supersedes whatever is animating; cancelled
        // commit animations still report their page turn.
        self.cancel_animations();
        let has_target = match direction {
            Direction::Forward => self.current + 1 < self.page_count,
            Direction::Backward => self.current > 0,
        };
        let Some(internal) = self.internal.as_mut() else {
            return;
        };
        internal.forward.snap_to(Edge::trailing(&internal.page));
        internal.backward.snap_to(Edge::leading(&internal.page));
        if !has_target {
            return;
        }

        debug!("drag start {direction:?} at ({}, {})", down.x, down.y);
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(down_time, down);
        tracker.add_sample(time, position);
        internal.drag = Some(ActiveDrag {
            direction,
            behavior,
            start: down,
            tracker,
        });
        let target = gesture::fold_edge_for_pointer(behavior, &internal.page, down, position);
        match direction {
            Direction::Forward => internal.forward.snap_to(target),
            Direction::Backward => internal.backward.snap_to(target),
        };
    }

    fn on_up(&mut self, position: Point2, time: f64, config: &PageCurlConfig) -> Option<Point2> {
        let internal = self.internal.as_mut()?;

        if internal.drag.is_none() {
            let (down, _) = internal.pending_down.take()?;
            return ((position - down).norm() < TOUCH_SLOP).then_some(position);
        }

        let Some(mut drag) = internal.drag.take() else {
            return None;
        };
        drag.tracker.add_sample(time, position);
        let velocity = drag.tracker.velocity();
        let settled = velocity::project(position, velocity);
        let settled = Point2::new(
            settled.x.clamp(0.0, internal.page.width - 1.0),
            settled.y.clamp(0.0, internal.page.height - 1.0),
        );

        let page = internal.page;
        let commits =
            gesture::commit_decision(config, &page, drag.direction, drag.start, settled);
        debug!(
            "drag end {:?}: settled at ({:.1}, {:.1}), commit={commits}",
            drag.direction, settled.x, settled.y
        );

        let (far, rest, delta) = match drag.direction {
            Direction::Forward => (Edge::leading(&page), Edge::trailing(&page), 1),
            Direction::Backward => (Edge::trailing(&page), Edge::leading(&page), -1),
        };
        let edge = match drag.direction {
            Direction::Forward => &mut internal.forward,
            Direction::Backward => &mut internal.backward,
        };
        if commits {
            edge.animate_to(far, SETTLE_DURATION, Finalize::CommitTurn { delta, rest });
        } else {
            edge.animate_to(rest, SETTLE_DURATION, Finalize::SnapTo(rest));
        }
        None
    }

    /// Cancels any running animation on both directions, applying commits
    /// from their finalizers.
    fn cancel_animations(&mut self) {
        let Some(internal) = self.internal.as_mut() else {
            return;
        };
        let forward_commit = internal.forward.cancel();
        let backward_commit = internal.backward.cancel();
        for delta in [forward_commit, backward_commit].into_iter().flatten() {
            self.apply_turn(delta);
        }
    }

    fn reset_edges(&mut self) {
        if let Some(internal) = self.internal.as_mut() {
            internal.forward.snap_to(Edge::trailing(&internal.page));
            internal.backward.snap_to(Edge::leading(&internal.page));
        }
    }

    fn apply_turn(&mut self, delta: i64) {
        if self.page_count == 0 {
            return;
        }
        let max = i64::try_from(self.page_count - 1).unwrap_or(i64::MAX);
        let current = i64::try_from(self.current).unwrap_or(i64::MAX);
        let turned = (current + delta).clamp(0, max);
        debug!("page turn {delta:+}: {} -> {turned}", self.current);
        self.current = usize::try_from(turned).unwrap_or(0);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DT: f64 = 0.016;

    // Surfaces the debug! traces when running with --nocapture.
    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn state() -> PageCurlState {
        init_logging();
        let mut state = PageCurlState::new(3, 0);
        state.setup(PageRect::new(100.0, 200.0));
        state
    }

    fn settle(state: &mut PageCurlState) {
        for _ in 0..60 {
            state.tick(DT);
        }
        assert!(!state.is_animating());
    }

    fn down(x: f64, y: f64, t: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point2::new(x, y),
            time: t,
        }
    }

    fn mv(x: f64, y: f64, t: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point2::new(x, y),
            time: t,
        }
    }

    fn up(x: f64, y: f64, t: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point2::new(x, y),
            time: t,
        }
    }

    #[test]
    fn progress_is_one_when_forward_fold_completes() {
        let mut state = state();
        let page = PageRect::new(100.0, 200.0);
        state
            .internal
            .as_mut()
            .unwrap()
            .forward
            .snap_to(Edge::leading(&page));
        assert!((state.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_negative_for_backward_fold() {
        let mut state = state();
        let page = PageRect::new(100.0, 200.0);
        state
            .internal
            .as_mut()
            .unwrap()
            .backward
            .snap_to(Edge::new(Point2::new(50.0, 0.0), Point2::new(50.0, 200.0)));
        assert!((state.progress() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn scripted_next_is_monotone_and_commits() {
        let mut state = state();
        state.next();
        assert!(state.is_animating());

        let mut last = state.progress();
        assert!(last.abs() < f64::EPSILON);
        while state.is_animating() {
            state.tick(DT);
            let progress = state.progress();
            if state.is_animating() {
                assert!(progress >= last - 1e-9, "progress regressed: {last} -> {progress}");
                last = progress;
            }
        }

        assert!(last > 0.8, "turn never got near completion: {last}");
        assert_eq!(state.current(), 1);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn next_on_last_page_is_ignored() {
        let mut state = state();
        state.snap_to(2);
        state.next();
        assert!(!state.is_animating());
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn prev_on_first_page_is_ignored() {
        let mut state = state();
        state.prev();
        assert!(!state.is_animating());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn snap_to_clamps_into_range() {
        let mut state = state();
        state.snap_to(9);
        assert_eq!(state.current(), 2);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn tap_forward_turns_the_page() {
        let mut state = state();
        let config = PageCurlConfig::default();
        state.handle_tap(Point2::new(75.0, 100.0), &config, None);
        assert!(state.is_animating());
        settle(&mut state);
        assert_eq!(state.current(), 1);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn tap_backward_on_first_page_does_nothing() {
        let mut state = state();
        let config = PageCurlConfig::default();
        state.handle_tap(Point2::new(25.0, 100.0), &config, None);
        assert!(!state.is_animating());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn custom_tap_handler_consumes_first() {
        let mut state = state();
        let config = PageCurlConfig::default();
        let mut seen = None;
        let mut handler = |p: Point2| {
            seen = Some(p);
            true
        };
        state.handle_tap(Point2::new(75.0, 100.0), &config, Some(&mut handler));
        assert!(seen.is_some());
        assert!(!state.is_animating());
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn slow_drag_released_short_springs_back() {
        let mut state = state();
        let config = PageCurlConfig::default();

        state.handle_pointer(down(80.0, 100.0, 0.0), &config);
        state.handle_pointer(mv(70.0, 100.0, 0.05), &config);
        state.handle_pointer(mv(65.0, 100.0, 0.10), &config);
        // Fold line follows the pointer during the drag.
        assert!(state.progress() > 0.0);
        let tap = state.handle_pointer(up(65.0, 100.0, 0.15), &config);
        assert!(tap.is_none());

        // Released slowly at x=65: the decay projection stays right of the
        // left-half end zone, so the turn is rejected.
        settle(&mut state);
        assert_eq!(state.current(), 0);
        assert_eq!(
            state.forward_edge().unwrap(),
            Edge::trailing(&PageRect::new(100.0, 200.0))
        );
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn fast_flick_commits_short_of_end_zone() {
        let mut state = state();
        let config = PageCurlConfig::default();

        state.handle_pointer(down(80.0, 100.0, 0.0), &config);
        state.handle_pointer(mv(70.0, 100.0, 0.02), &config);
        state.handle_pointer(mv(55.0, 100.0, 0.04), &config);
        // Released at x=55, still right of the end zone, but the velocity
        // projection carries it across.
        state.handle_pointer(up(55.0, 100.0, 0.05), &config);

        settle(&mut state);
        assert_eq!(state.current(), 1);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn drag_outside_start_zones_is_ignored() {
        let mut state = state();
        let mut config = PageCurlConfig::default();
        config.interaction.drag = crate::config::DragInteraction::StartEnd {
            forward: crate::config::StartEndZones {
                start: crate::math::rect::FracRect::new(0.9, 0.0, 1.0, 1.0),
                end: crate::math::rect::FracRect::left_half(),
            },
            backward: crate::config::StartEndZones {
                start: crate::math::rect::FracRect::new(0.0, 0.0, 0.1, 1.0),
                end: crate::math::rect::FracRect::right_half(),
            },
            pointer_behavior: crate::config::PointerBehavior::Default,
        };

        state.handle_pointer(down(50.0, 100.0, 0.0), &config);
        state.handle_pointer(mv(30.0, 100.0, 0.05), &config);
        state.handle_pointer(up(30.0, 100.0, 0.10), &config);

        assert!(!state.is_animating());
        assert_eq!(state.current(), 0);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn backward_drag_supersedes_forward_animation() {
        let mut state = state();
        let config = PageCurlConfig::default();

        // Forward commit animation in flight.
        state.next();
        state.tick(0.1);
        assert!(state.is_animating());

        // A backward drag starts: the forward job is cancelled, its commit
        // still lands, the forward edge snaps to rest and the backward drag
        // proceeds on the now-current page.
        state.handle_pointer(down(20.0, 100.0, 1.0), &config);
        state.handle_pointer(mv(35.0, 100.0, 1.05), &config);

        assert_eq!(state.current(), 1);
        let page = PageRect::new(100.0, 200.0);
        assert_eq!(state.forward_edge().unwrap(), Edge::trailing(&page));
        assert!(state.progress() < 0.0, "backward drag should be active");

        // Finish the backward drag toward the right: commits back to page 0.
        state.handle_pointer(mv(80.0, 100.0, 1.10), &config);
        state.handle_pointer(up(80.0, 100.0, 1.15), &config);
        settle(&mut state);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn pointer_up_without_movement_reports_a_tap() {
        let mut state = state();
        let config = PageCurlConfig::default();
        state.handle_pointer(down(60.0, 50.0, 0.0), &config);
        let tap = state.handle_pointer(up(62.0, 50.0, 0.05), &config);
        assert_eq!(tap, Some(Point2::new(62.0, 50.0)));
        assert!(!state.is_animating());
    }

    #[test]
    fn resize_rebuilds_edges_at_rest() {
        let mut state = state();
        state.next();
        state.tick(0.1);
        state.setup(PageRect::new(300.0, 400.0));
        assert!(!state.is_animating());
        let page = PageRect::new(300.0, 400.0);
        assert_eq!(state.forward_edge().unwrap(), Edge::trailing(&page));
        assert_eq!(state.backward_edge().unwrap(), Edge::leading(&page));
    }
}
