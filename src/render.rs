//! Frame composition: turns the two animated fold edges into an ordered list
//! of drawing operations for the host rasterizer.

use crate::config::{Color, CurlConfig};
use crate::fold::{Edge, FlipTransform, FoldRegions};
use crate::math::intersect::line_line_intersect;
use crate::math::polygon::Polygon;
use crate::math::rect::PageRect;
use crate::shadow::ShadowPlan;

/// Which page's content a draw op renders. The host maps slots to indices
/// relative to the current page; at most three slots appear per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Previous,
    Current,
    Next,
}

/// One drawing operation. Ops are emitted bottom-to-top; the host executes
/// them in order against a context with polygon clipping and an affine
/// transform stack.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Draw a page's content, optionally clipped and/or transformed.
    Content {
        slot: PageSlot,
        clip: Option<Polygon>,
        transform: Option<FlipTransform>,
    },
    /// Draw the flap shadow inside the flip transform.
    Shadow {
        plan: ShadowPlan,
        transform: FlipTransform,
    },
    /// Flood the clip region with a flat color inside the flip transform;
    /// makes the back face look like paper instead of mirrored content.
    Overlay {
        color: Color,
        clip: Polygon,
        transform: FlipTransform,
    },
}

impl DrawOp {
    /// True when the op neither clips nor transforms — the cheap path.
    #[must_use]
    pub fn is_plain_content(&self) -> bool {
        matches!(
            self,
            Self::Content {
                clip: None,
                transform: None,
                ..
            }
        )
    }
}

/// Composes one frame.
///
/// Layering, bottom to top: the next page as plain content (emerging under a
/// forward fold), the current page through the forward edge's curl, the
/// previous page through the backward edge's curl. A backward edge resting
/// on the left boundary contributes nothing, so the previous page is
/// invisible until a backward gesture displaces it.
#[must_use]
pub fn compose_frame(
    forward: &Edge,
    backward: &Edge,
    page: &PageRect,
    config: &CurlConfig,
    current: usize,
    page_count: usize,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    if current + 1 < page_count {
        ops.push(DrawOp::Content {
            slot: PageSlot::Next,
            clip: None,
            transform: None,
        });
    }

    if current < page_count {
        curl_ops(PageSlot::Current, forward, page, config, &mut ops);
    }

    if current > 0 {
        curl_ops(PageSlot::Previous, backward, page, config, &mut ops);
    }

    ops
}

/// Emits the draw ops for one page seen through one fold edge.
fn curl_ops(slot: PageSlot, edge: &Edge, page: &PageRect, config: &CurlConfig, ops: &mut Vec<DrawOp>) {
    // Fold fully completed: the page has been turned away, draw nothing.
    if edge.approx_eq(&Edge::leading(page)) {
        return;
    }

    // Fold at rest on the trailing boundary: the page is untouched, skip all
    // clip and transform work.
    if edge.approx_eq(&Edge::trailing(page)) {
        ops.push(DrawOp::Content {
            slot,
            clip: None,
            transform: None,
        });
        return;
    }

    // Anchor the fold line on the top and bottom page boundaries. A fold
    // line parallel to them cannot fold anything; fall back to plain content.
    let top_anchor = line_line_intersect(
        &page.top_left(),
        &page.top_right(),
        &edge.top,
        &edge.bottom,
    );
    let bottom_anchor = line_line_intersect(
        &page.bottom_left(),
        &page.bottom_right(),
        &edge.top,
        &edge.bottom,
    );
    let (Some(top_anchor), Some(bottom_anchor)) = (top_anchor, bottom_anchor) else {
        ops.push(DrawOp::Content {
            slot,
            clip: None,
            transform: None,
        });
        return;
    };

    let fold = FoldRegions::compute(&Edge::new(top_anchor, bottom_anchor), page);

    ops.push(DrawOp::Content {
        slot,
        clip: Some(fold.kept.clone()),
        transform: None,
    });

    let Some(flipped) = fold.flipped else {
        return;
    };

    if let Some(plan) = ShadowPlan::build(&flipped, &config.shadow, fold.transform.angle, page) {
        ops.push(DrawOp::Shadow {
            plan,
            transform: fold.transform,
        });
    }

    ops.push(DrawOp::Content {
        slot,
        clip: Some(flipped.clone()),
        transform: Some(fold.transform),
    });

    let overlay_alpha = 1.0 - config.back_page.content_alpha;
    ops.push(DrawOp::Overlay {
        color: config.back_page.color.with_alpha(overlay_alpha),
        clip: flipped,
        transform: fold.transform,
    });
}
