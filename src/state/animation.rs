use crate::fold::Edge;

/// Scripted page-turn timing: total duration and the overshoot midpoint,
/// in seconds.
pub const TURN_DURATION: f64 = 0.45;
pub const TURN_MIDPOINT: f64 = 0.15;

/// Settle animation length for drag release (commit or spring-back).
pub const SETTLE_DURATION: f64 = 0.3;

/// Per-segment easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Standard accelerate/decelerate cubic bézier (0.4, 0.0, 0.2, 1.0).
    FastOutSlowIn,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluates y of a unit cubic bézier easing at time `x`, solving the
/// parametric curve for `x` by bisection.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let sample = |c1: f64, c2: f64, t: f64| {
        // Cubic through (0,0) and (1,1) with control values c1, c2.
        3.0 * c1 * t * (1.0 - t) * (1.0 - t) + 3.0 * c2 * t * t * (1.0 - t) + t * t * t
    };

    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        if sample(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    sample(y1, y2, (lo + hi) * 0.5)
}

/// Action guaranteed to run when an animation finishes or is cancelled.
///
/// Mirrors try/finally semantics: superseding a running animation still runs
/// its finalizer, so a cancelled commit animation still reports its page
/// turn and the edge still lands on a rest value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finalize {
    /// Leave the edge wherever the animation stopped.
    None,
    /// Snap the edge to a fixed value.
    SnapTo(Edge),
    /// Report a page turn of `delta` and snap the edge back to `rest`.
    CommitTurn { delta: i64, rest: Edge },
}

/// One linear-in-time span of an animation.
#[derive(Debug, Clone, Copy)]
struct Segment {
    from: Edge,
    to: Edge,
    start: f64,
    end: f64,
    easing: Easing,
}

#[derive(Debug)]
struct EdgeAnimation {
    segments: Vec<Segment>,
    duration: f64,
    elapsed: f64,
    finalize: Finalize,
}

/// An [`Edge`] under animation control: the single-writer cell the state
/// machine drives and the renderer reads.
///
/// All mutation happens on the owning (UI) thread; superseding operations
/// cancel the running animation first and cancellation always runs the
/// finalizer.
#[derive(Debug)]
pub struct AnimatedEdge {
    value: Edge,
    animation: Option<EdgeAnimation>,
}

impl AnimatedEdge {
    #[must_use]
    pub fn new(rest: Edge) -> Self {
        Self {
            value: rest,
            animation: None,
        }
    }

    /// The current interpolated value.
    #[must_use]
    pub fn value(&self) -> Edge {
        self.value
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Cancels any running animation, running its finalizer. Returns the
    /// committed page delta if the finalizer was a turn commit.
    pub fn cancel(&mut self) -> Option<i64> {
        let animation = self.animation.take()?;
        self.run_finalizer(animation.finalize)
    }

    /// Cancels any running animation and pins the edge to `target`.
    pub fn snap_to(&mut self, target: Edge) -> Option<i64> {
        let committed = self.cancel();
        self.value = target;
        committed
    }

    /// Starts an eased animation from the current value to `target`,
    /// cancelling any running animation first.
    pub fn animate_to(&mut self, target: Edge, duration: f64, finalize: Finalize) -> Option<i64> {
        let committed = self.cancel();
        self.animation = Some(EdgeAnimation {
            segments: vec![Segment {
                from: self.value,
                to: target,
                start: 0.0,
                end: duration,
                easing: Easing::FastOutSlowIn,
            }],
            duration,
            elapsed: 0.0,
            finalize,
        });
        committed
    }

    /// Starts a multi-keyframe animation. `keyframes` are `(edge, at)` pairs
    /// with strictly increasing times starting at 0; interpolation between
    /// keyframes is linear, as in a scripted turn.
    pub fn animate_through(&mut self, keyframes: &[(Edge, f64)], finalize: Finalize) -> Option<i64> {
        let committed = self.cancel();
        let Some(&(_, duration)) = keyframes.last() else {
            return committed;
        };

        let mut segments = Vec::with_capacity(keyframes.len());
        let mut prev = (self.value, 0.0);
        for &(edge, at) in keyframes {
            segments.push(Segment {
                from: prev.0,
                to: edge,
                start: prev.1,
                end: at,
                easing: Easing::Linear,
            });
            prev = (edge, at);
        }

        self.animation = Some(EdgeAnimation {
            segments,
            duration,
            elapsed: 0.0,
            finalize,
        });
        committed
    }

    /// Advances the animation by `dt` seconds. Returns the committed page
    /// delta when a turn-committing animation finishes this tick.
    pub fn tick(&mut self, dt: f64) -> Option<i64> {
        let Some(animation) = self.animation.as_mut() else {
            return None;
        };

        animation.elapsed += dt;
        if animation.elapsed >= animation.duration {
            let animation = self.animation.take()?;
            if let Some(last) = animation.segments.last() {
                self.value = last.to;
            }
            return self.run_finalizer(animation.finalize);
        }

        let elapsed = animation.elapsed;
        if let Some(segment) = animation
            .segments
            .iter()
            .find(|s| elapsed >= s.start && elapsed < s.end)
        {
            let span = segment.end - segment.start;
            let t = if span <= f64::EPSILON {
                1.0
            } else {
                (elapsed - segment.start) / span
            };
            self.value = segment.from.lerp(&segment.to, segment.easing.apply(t));
        }
        None
    }

    fn run_finalizer(&mut self, finalize: Finalize) -> Option<i64> {
        match finalize {
            Finalize::None => None,
            Finalize::SnapTo(rest) => {
                self.value = rest;
                None
            }
            Finalize::CommitTurn { delta, rest } => {
                self.value = rest;
                Some(delta)
            }
        }
    }
}
