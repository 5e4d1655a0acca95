use std::f64::consts::FRAC_PI_2;

use crate::config::{DragInteraction, PageCurlConfig, PointerBehavior};
use crate::fold::Edge;
use crate::math::rect::PageRect;
use crate::math::{rotate, Point2};
use crate::state::velocity::VelocityTracker;

/// Movement below this distance stays a tap; beyond it a drag begins.
pub const TOUCH_SLOP: f64 = 8.0;

/// A pointer event in page-local coordinates. `time` is in seconds on any
/// monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point2, time: f64 },
    Move { position: Point2, time: f64 },
    Up { position: Point2, time: f64 },
}

/// Which way a gesture turns the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A drag in progress on one direction.
#[derive(Debug)]
pub(crate) struct ActiveDrag {
    pub direction: Direction,
    pub behavior: PointerBehavior,
    pub start: Point2,
    pub tracker: VelocityTracker,
}

/// Decides whether a post-slop movement starting at `down` begins a drag,
/// and if so in which direction. This is the single dispatch point shared by
/// both drag policies.
///
/// Only the static configuration is consulted here (zones, enable flags,
/// motion direction). Whether the target page exists is checked by the
/// caller after in-flight animations are cancelled, since a cancelled
/// commit animation can still change the current page.
pub(crate) fn classify_start(
    config: &PageCurlConfig,
    page: &PageRect,
    down: Point2,
    first_move: Point2,
) -> Option<(Direction, PointerBehavior)> {
    let forward_allowed = config.interaction.drag_forward_enabled;
    let backward_allowed = config.interaction.drag_backward_enabled;

    match &config.interaction.drag {
        DragInteraction::StartEnd {
            forward,
            backward,
            pointer_behavior,
        } => {
            if forward_allowed && forward.start.resolve(page).contains(down) {
                Some((Direction::Forward, *pointer_behavior))
            } else if backward_allowed && backward.start.resolve(page).contains(down) {
                Some((Direction::Backward, *pointer_behavior))
            } else {
                None
            }
        }
        DragInteraction::GestureDirection {
            forward_target,
            backward_target,
        } => {
            if forward_allowed
                && forward_target.resolve(page).contains(down)
                && first_move.x < down.x
            {
                Some((Direction::Forward, PointerBehavior::Default))
            } else if backward_allowed
                && backward_target.resolve(page).contains(down)
                && first_move.x > down.x
            {
                Some((Direction::Backward, PointerBehavior::Default))
            } else {
                None
            }
        }
    }
}

/// Decides whether a finished drag commits the page turn. `settled` is the
/// velocity-extrapolated release point, already clamped into page bounds, so
/// a fast flick short of the end zone still commits.
pub(crate) fn commit_decision(
    config: &PageCurlConfig,
    page: &PageRect,
    direction: Direction,
    start: Point2,
    settled: Point2,
) -> bool {
    match &config.interaction.drag {
        DragInteraction::StartEnd {
            forward, backward, ..
        } => match direction {
            Direction::Forward => forward.end.resolve(page).contains(settled),
            Direction::Backward => backward.end.resolve(page).contains(settled),
        },
        DragInteraction::GestureDirection { .. } => match direction {
            Direction::Forward => settled.x < start.x,
            Direction::Backward => settled.x > start.x,
        },
    }
}

/// Builds the fold line for the current pointer position.
///
/// The construction anchors a vector at the page's trailing boundary at the
/// gesture's start height, points it at the pointer, and rotates it by
/// ±90°; the fold line spans the rotated vector on both sides of the
/// pointer.
#[must_use]
pub fn fold_edge_for_pointer(
    behavior: PointerBehavior,
    page: &PageRect,
    start: Point2,
    current: Point2,
) -> Edge {
    let vector = Point2::new(page.width, start.y) - current;
    let rotated = rotate(vector, FRAC_PI_2);
    match behavior {
        PointerBehavior::Default => Edge::new(current - rotated, current + rotated),
        PointerBehavior::PageEdge => Edge::new(
            current - rotated + vector / 2.0,
            current + rotated + vector / 2.0,
        ),
    }
}
