//! Shadow outline under the flap.
//!
//! The flap's soft shadow is an outset of the flipped polygon rather than a
//! blur of an arbitrary path: the host either blurs the outset polygon with
//! its native shadow-layer primitive, or rasterizes it into an oversized
//! offscreen buffer when no such primitive exists.

use crate::config::{Color, ShadowConfig, ShadowStrategy};
use crate::fold::into_flap_space;
use crate::math::polygon::Polygon;
use crate::math::rect::PageRect;
use crate::math::{Vector2, TOLERANCE};

/// How the host realizes the planned shadow.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowLayout {
    /// Blur [`ShadowPlan::outline`] directly with a shadow layer.
    Direct,
    /// Rasterize the outline into an offscreen buffer and composite it back.
    ///
    /// The buffer is oversized by `4 * radius` per axis so the blur is never
    /// clipped; the outline is pre-translated to stay centered and the
    /// composite offset undoes that translation.
    OffscreenBuffer {
        buffer_width: f64,
        buffer_height: f64,
        composite_offset: Vector2,
    },
}

/// One frame's shadow drawing parameters, built inside the flap's
/// mirrored/rotated context.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPlan {
    /// Flipped polygon outset by the blur radius.
    pub outline: Polygon,
    /// Shadow color with the configured alpha applied.
    pub color: Color,
    pub blur_radius: f64,
    /// Blur offset, counter-rotated into flap space. The configured offset
    /// lives in page space; drawing happens inside the mirror/rotate
    /// transform, so without the counter-rotation the shadow would swing the
    /// wrong way as the fold angle changes.
    pub offset: Vector2,
    pub layout: ShadowLayout,
}

impl ShadowPlan {
    /// Builds the shadow plan for a flap, or `None` when the configuration
    /// disables the shadow (`alpha == 0` or `radius == 0`) — the common rest
    /// configuration must stay a cheap no-op, not a zero-radius blur call.
    #[must_use]
    pub fn build(
        flipped: &Polygon,
        config: &ShadowConfig,
        mirror_angle: f64,
        page: &PageRect,
    ) -> Option<Self> {
        if config.alpha.abs() < TOLERANCE || config.radius.abs() < TOLERANCE {
            return None;
        }

        let radius = config.radius;
        let offset = into_flap_space(config.offset, mirror_angle);
        let color = config.color.with_alpha(config.alpha);

        let (outline, layout) = match config.strategy {
            ShadowStrategy::Direct => (flipped.offset(radius), ShadowLayout::Direct),
            ShadowStrategy::OffscreenBuffer => (
                flipped
                    .translate(Vector2::new(2.0 * radius, 2.0 * radius))
                    .offset(radius),
                ShadowLayout::OffscreenBuffer {
                    buffer_width: page.width + radius * 4.0,
                    buffer_height: page.height + radius * 4.0,
                    composite_offset: Vector2::new(-2.0 * radius, -2.0 * radius),
                },
            ),
        };

        Some(Self {
            outline,
            color,
            blur_radius: radius,
            offset,
            layout,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::math::Point2;

    fn flap() -> Polygon {
        Polygon::quad(
            Point2::new(60.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 200.0),
            Point2::new(40.0, 200.0),
        )
    }

    fn page() -> PageRect {
        PageRect::new(100.0, 200.0)
    }

    #[test]
    fn zero_alpha_short_circuits() {
        let config = ShadowConfig {
            alpha: 0.0,
            ..ShadowConfig::default()
        };
        assert!(ShadowPlan::build(&flap(), &config, PI, &page()).is_none());
    }

    #[test]
    fn zero_radius_short_circuits() {
        let config = ShadowConfig {
            radius: 0.0,
            ..ShadowConfig::default()
        };
        assert!(ShadowPlan::build(&flap(), &config, PI, &page()).is_none());
    }

    #[test]
    fn direct_outline_grows_the_flap() {
        let config = ShadowConfig::default();
        let plan = ShadowPlan::build(&flap(), &config, PI, &page()).unwrap();
        assert_eq!(plan.layout, ShadowLayout::Direct);
        assert!(plan.outline.signed_area().abs() > flap().signed_area().abs());
        assert!((plan.color.a - config.alpha).abs() < TOLERANCE);
    }

    #[test]
    fn offscreen_buffer_is_oversized_and_recentered() {
        let config = ShadowConfig {
            strategy: ShadowStrategy::OffscreenBuffer,
            radius: 10.0,
            ..ShadowConfig::default()
        };
        let plan = ShadowPlan::build(&flap(), &config, PI, &page()).unwrap();
        match plan.layout {
            ShadowLayout::OffscreenBuffer {
                buffer_width,
                buffer_height,
                composite_offset,
            } => {
                assert!((buffer_width - 140.0).abs() < TOLERANCE);
                assert!((buffer_height - 240.0).abs() < TOLERANCE);
                assert!((composite_offset.x + 20.0).abs() < TOLERANCE);
                assert!((composite_offset.y + 20.0).abs() < TOLERANCE);
            }
            ShadowLayout::Direct => panic!("expected offscreen layout"),
        }
        // Outline recentered by (2r, 2r) before the outset.
        let direct = flap().translate(Vector2::new(20.0, 20.0)).offset(10.0);
        assert_eq!(plan.outline, direct);
    }

    #[test]
    fn offset_counter_rotated_for_pure_mirror() {
        // angle = 2π is the pure-mirror transform; the configured (-5, 0)
        // offset must come out x-negated and unrotated.
        let config = ShadowConfig::default();
        let plan = ShadowPlan::build(&flap(), &config, 2.0 * PI, &page()).unwrap();
        assert!((plan.offset.x - 5.0).abs() < 1e-9);
        assert!(plan.offset.y.abs() < 1e-9);
    }
}
