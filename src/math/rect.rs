use super::Point2;
use crate::error::{ConfigError, Result};

/// The page's rectangular bounds, origin at (0, 0).
///
/// Immutable per layout pass; the host recomputes it when the container is
/// resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub width: f64,
    pub height: f64,
}

impl PageRect {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn top_left(&self) -> Point2 {
        Point2::new(0.0, 0.0)
    }

    #[must_use]
    pub fn top_right(&self) -> Point2 {
        Point2::new(self.width, 0.0)
    }

    #[must_use]
    pub fn bottom_left(&self) -> Point2 {
        Point2::new(0.0, self.height)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point2 {
        Point2::new(self.width, self.height)
    }
}

/// An axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// A rectangle expressed as fractions of the page, scaled to pixel bounds on
/// demand. Interaction regions (drag start/end zones, tap targets) are
/// configured this way so one configuration works for any page size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl FracRect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole page.
    #[must_use]
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// The left half of the page.
    #[must_use]
    pub fn left_half() -> Self {
        Self::new(0.0, 0.0, 0.5, 1.0)
    }

    /// The right half of the page.
    #[must_use]
    pub fn right_half() -> Self {
        Self::new(0.5, 0.0, 1.0, 1.0)
    }

    /// Scales the fractional bounds to actual page pixels.
    #[must_use]
    pub fn resolve(&self, page: &PageRect) -> Rect {
        Rect {
            left: self.left * page.width,
            top: self.top * page.height,
            right: self.right * page.width,
            bottom: self.bottom * page.height,
        }
    }

    /// Checks the rect is non-inverted and within `[0, 1]` on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFracRect`] otherwise.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        let ordered = self.left <= self.right && self.top <= self.bottom;
        if ordered
            && in_unit(self.left)
            && in_unit(self.top)
            && in_unit(self.right)
            && in_unit(self.bottom)
        {
            Ok(())
        } else {
            Err(ConfigError::InvalidFracRect { name }.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_scales_to_pixels() {
        let page = PageRect::new(400.0, 600.0);
        let rect = FracRect::right_half().resolve(&page);
        assert!((rect.left - 200.0).abs() < f64::EPSILON);
        assert!((rect.right - 400.0).abs() < f64::EPSILON);
        assert!((rect.bottom - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contains_is_half_open() {
        let page = PageRect::new(100.0, 100.0);
        let rect = FracRect::left_half().resolve(&page);
        assert!(rect.contains(Point2::new(0.0, 0.0)));
        assert!(rect.contains(Point2::new(49.9, 99.9)));
        assert!(!rect.contains(Point2::new(50.0, 10.0)));
        assert!(!rect.contains(Point2::new(10.0, 100.0)));
    }

    #[test]
    fn validate_rejects_inverted() {
        assert!(FracRect::new(0.8, 0.0, 0.2, 1.0).validate("zone").is_err());
        assert!(FracRect::new(0.0, 0.0, 1.2, 1.0).validate("zone").is_err());
        assert!(FracRect::full().validate("zone").is_ok());
    }

    #[test]
    fn page_corners() {
        let page = PageRect::new(10.0, 20.0);
        assert_eq!(page.top_right(), Point2::new(10.0, 0.0));
        assert_eq!(page.bottom_left(), Point2::new(0.0, 20.0));
    }
}
