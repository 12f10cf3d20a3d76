//! The elliptical on-screen region a face has to occupy to qualify for capture.

use crate::rect::Rect;
use crate::resolution::Resolution;

/// The target ellipse's vertical center sits at `height / CENTER_Y_DIVISOR`,
/// placing it in the upper portion of the view where a selfie camera frames the
/// face.
const CENTER_Y_DIVISOR: f32 = 4.5;

/// The vertical radius is fixed rather than derived from the view size.
const RADIUS_Y: f32 = 350.0;

/// An ellipse in view coordinates.
///
/// The region is fixed per layout pass and recomputed from the view dimensions
/// on resize (see [`TargetRegion::from_view`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRegion {
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
}

impl TargetRegion {
    /// Creates an ellipse centered at `(cx, cy)` with radii `rx` and `ry`.
    pub fn new(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        Self { cx, cy, rx, ry }
    }

    /// Derives the region geometry from the view dimensions, matching the
    /// overlay's layout: centered horizontally, in the upper part of the view,
    /// with a horizontal radius of a quarter of the smaller view dimension.
    pub fn from_view(view: Resolution) -> Self {
        let w = view.width() as f32;
        let h = view.height() as f32;
        Self::new(w / 2.0, h / CENTER_Y_DIVISOR, f32::min(w, h) / 4.0, RADIUS_Y)
    }

    pub fn center(&self) -> [f32; 2] {
        [self.cx, self.cy]
    }

    pub fn radii(&self) -> [f32; 2] {
        [self.rx, self.ry]
    }

    /// Returns whether `(x, y)` lies on or inside the ellipse:
    /// `(x-cx)²/rx² + (y-cy)²/ry² <= 1`, boundary inclusive.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let dx = (x - self.cx) / self.rx;
        let dy = (y - self.cy) / self.ry;
        dx * dx + dy * dy <= 1.0
    }

    /// Returns whether `rect` lies inside the ellipse.
    ///
    /// A rectangle counts as inside iff **all four** of its corners pass
    /// [`contains_point`](Self::contains_point). This is the corner test the
    /// capture gate is specified against; do not substitute a different
    /// rectangle/ellipse intersection.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.corners()
            .iter()
            .all(|&[x, y]| self.contains_point(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn region() -> TargetRegion {
        TargetRegion::new(500.0, 222.0, 250.0, 350.0)
    }

    #[test]
    fn point_containment_boundary_inclusive() {
        let region = region();
        assert!(region.contains_point(500.0, 222.0));
        // Points exactly on the boundary are inside (`<=`).
        assert!(region.contains_point(750.0, 222.0));
        assert!(region.contains_point(500.0, 222.0 - 350.0));
        // Just past the boundary is outside.
        assert!(!region.contains_point(751.0, 222.0));
        assert!(!region.contains_point(0.0, 0.0));
    }

    #[test]
    fn rect_containment_uses_all_four_corners() {
        let region = region();

        // All corners within ±200 of the center.
        assert!(region.contains_rect(&Rect::from_center(500.0, 222.0, 400.0, 400.0)));

        // A degenerate rect whose corners all sit on the boundary.
        assert!(region.contains_rect(&Rect::from_center(500.0, -128.0, 0.0, 0.0)));

        // One corner at the origin fails the test even though the rest of the
        // box overlaps the ellipse.
        assert!(!region.contains_rect(&Rect::from_top_left(0.0, 0.0, 500.0, 222.0)));

        // Wide boxes fail on their left/right corners.
        assert!(!region.contains_rect(&Rect::from_center(500.0, 222.0, 600.0, 10.0)));
    }

    #[test]
    fn from_view_layout() {
        let region = TargetRegion::from_view(Resolution::new(1000, 1000));
        let [cx, cy] = region.center();
        let [rx, ry] = region.radii();
        assert_relative_eq!(cx, 500.0);
        assert_relative_eq!(cy, 1000.0 / 4.5);
        assert_relative_eq!(rx, 250.0);
        assert_relative_eq!(ry, 350.0);

        // The horizontal radius follows the smaller view dimension.
        let portrait = TargetRegion::from_view(Resolution::new(720, 1280));
        assert_relative_eq!(portrait.radii()[0], 180.0);
    }
}
