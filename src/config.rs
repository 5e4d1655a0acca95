//! Configuration snapshot consumed read-only each frame.
//!
//! The host owns the "current configuration" and hands an immutable snapshot
//! to the renderer and state machine every frame; changing an option means
//! producing a new snapshot. This keeps the renderer a pure function of
//! (edges, config, page content).

use crate::error::{ConfigError, Result};
use crate::math::rect::FracRect;
use crate::math::Vector2;

/// An RGBA color with components in `[0, 1]`. The host maps it to its own
/// color type when executing draw ops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Appearance of the turned-over side of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackPageConfig {
    /// Paper color of the back face.
    pub color: Color,
    /// How much of the mirrored content shows through the back face;
    /// the renderer composites an overlay with alpha `1 - content_alpha`.
    pub content_alpha: f64,
}

impl Default for BackPageConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            content_alpha: 0.1,
        }
    }
}

/// How the host should realize the shadow outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowStrategy {
    /// The host's shadow-layer primitive blurs the outset polygon directly.
    #[default]
    Direct,
    /// The host cannot blur polygon paths; the plan carries an oversized
    /// offscreen buffer layout to rasterize into and composite back.
    OffscreenBuffer,
}

/// Soft shadow drawn under the flap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub color: Color,
    pub alpha: f64,
    /// Blur radius in page pixels; also the polygon outset distance.
    pub radius: f64,
    /// Offset configured in page space; counter-rotated into flap space at
    /// build time.
    pub offset: Vector2,
    pub strategy: ShadowStrategy,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha: 0.2,
            radius: 15.0,
            offset: Vector2::new(-5.0, 0.0),
            strategy: ShadowStrategy::default(),
        }
    }
}

/// Visual parameters of the curl effect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurlConfig {
    pub back_page: BackPageConfig,
    pub shadow: ShadowConfig,
}

/// How the fold line is constructed from the pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerBehavior {
    /// The fold line passes through the pointer.
    #[default]
    Default,
    /// The page edge follows the pointer and the fold line trails at half
    /// the turn distance, like pinching the physical page edge.
    PageEdge,
}

/// Start and end zones of a region-based drag, as fractions of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartEndZones {
    pub start: FracRect,
    pub end: FracRect,
}

/// Drag commit policy. Exactly one is active; both share the same dispatch
/// point in the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInteraction {
    /// Region-based: the drag must start inside `start` and its
    /// velocity-extrapolated release point must land inside `end`.
    StartEnd {
        forward: StartEndZones,
        backward: StartEndZones,
        pointer_behavior: PointerBehavior,
    },
    /// Direction-based: the drag must start inside the target rect and
    /// commits on the net horizontal direction of the motion.
    GestureDirection {
        forward_target: FracRect,
        backward_target: FracRect,
    },
}

impl Default for DragInteraction {
    fn default() -> Self {
        Self::StartEnd {
            forward: StartEndZones {
                start: FracRect::right_half(),
                end: FracRect::left_half(),
            },
            backward: StartEndZones {
                start: FracRect::left_half(),
                end: FracRect::right_half(),
            },
            pointer_behavior: PointerBehavior::default(),
        }
    }
}

/// Tap target rects, as fractions of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapInteraction {
    pub forward_target: FracRect,
    pub backward_target: FracRect,
}

impl Default for TapInteraction {
    fn default() -> Self {
        Self {
            forward_target: FracRect::right_half(),
            backward_target: FracRect::left_half(),
        }
    }
}

/// Interaction surface: drag policy, tap targets and per-direction enables.
///
/// A custom tap handler, when the host has one, is passed directly to
/// [`crate::state::PageCurlState::handle_tap`] so the snapshot stays plain
/// data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    pub drag: DragInteraction,
    pub drag_forward_enabled: bool,
    pub drag_backward_enabled: bool,
    pub tap: TapInteraction,
    pub tap_forward_enabled: bool,
    pub tap_backward_enabled: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag: DragInteraction::default(),
            drag_forward_enabled: true,
            drag_backward_enabled: true,
            tap: TapInteraction::default(),
            tap_forward_enabled: true,
            tap_backward_enabled: true,
        }
    }
}

/// The full per-frame configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageCurlConfig {
    pub curl: CurlConfig,
    pub interaction: InteractionConfig,
}

impl PageCurlConfig {
    /// Validates the snapshot at the configuration boundary.
    ///
    /// The geometry and rendering components assume a valid snapshot; a
    /// negative shadow radius or an inverted interaction rect is undefined
    /// behavior past this point.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        in_unit("back_page.content_alpha", self.curl.back_page.content_alpha)?;
        in_unit("shadow.alpha", self.curl.shadow.alpha)?;
        if self.curl.shadow.radius < 0.0 {
            return Err(ConfigError::OutOfRange {
                parameter: "shadow.radius",
                value: self.curl.shadow.radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }

        match &self.interaction.drag {
            DragInteraction::StartEnd {
                forward, backward, ..
            } => {
                forward.start.validate("drag.forward.start")?;
                forward.end.validate("drag.forward.end")?;
                backward.start.validate("drag.backward.start")?;
                backward.end.validate("drag.backward.end")?;
            }
            DragInteraction::GestureDirection {
                forward_target,
                backward_target,
            } => {
                forward_target.validate("drag.forward.target")?;
                backward_target.validate("drag.backward.target")?;
            }
        }
        self.interaction.tap.forward_target.validate("tap.forward.target")?;
        self.interaction.tap.backward_target.validate("tap.backward.target")?;
        Ok(())
    }
}

fn in_unit(parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PageCurlConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_shadow_radius_rejected() {
        let mut config = PageCurlConfig::default();
        config.curl.shadow.radius = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_alpha_rejected() {
        let mut config = PageCurlConfig::default();
        config.curl.back_page.content_alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_drag_zone_rejected() {
        let mut config = PageCurlConfig::default();
        config.interaction.drag = DragInteraction::StartEnd {
            forward: StartEndZones {
                start: FracRect::new(0.9, 0.0, 0.1, 1.0),
                end: FracRect::left_half(),
            },
            backward: StartEndZones {
                start: FracRect::left_half(),
                end: FracRect::right_half(),
            },
            pointer_behavior: PointerBehavior::Default,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlay_alpha_relation() {
        let back = BackPageConfig::default();
        assert!((1.0 - back.content_alpha - 0.9).abs() < f64::EPSILON);
    }
}
