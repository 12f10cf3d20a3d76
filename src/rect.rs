//! Axis-aligned rectangles in float coordinates.
//!
//! Detectors report bounding boxes in source-frame pixel coordinates; the same
//! type is used after scaling them into view coordinates.

use std::fmt;

/// An axis-aligned rectangle, stored as center point plus size.
///
/// Rectangles are allowed to have zero width and/or height. Negative dimensions
/// are not allowed.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    xc: f32,
    yc: f32,
    w: f32,
    h: f32,
}

impl Rect {
    /// Creates a rectangle extending outwards from a center point.
    #[inline]
    pub fn from_center(xc: f32, yc: f32, w: f32, h: f32) -> Self {
        Self { xc, yc, w, h }
    }

    /// Creates a rectangle extending downwards and right from a point.
    #[inline]
    pub fn from_top_left(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_center(x + w * 0.5, y + h * 0.5, w, h)
    }

    /// Returns the X coordinate of the left side of the rectangle.
    #[inline]
    pub fn x(&self) -> f32 {
        self.xc - self.w * 0.5
    }

    /// Returns the Y coordinate of the top side of the rectangle.
    #[inline]
    pub fn y(&self) -> f32 {
        self.yc - self.h * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.h
    }

    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [self.xc, self.yc]
    }

    /// Returns the rectangle's corners as `[x, y]` pairs, in the order
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let [x, y] = [self.x(), self.y()];
        [
            [x, y],
            [x + self.w, y],
            [x + self.w, y + self.h],
            [x, y + self.h],
        ]
    }

    /// Multiplies all coordinates of `self` by `factor`.
    ///
    /// Unlike scaling around the center, this maps the rectangle between
    /// coordinate systems: a box reported in source-frame pixels becomes the
    /// corresponding box in view pixels when `factor` is the view's
    /// [`fit_scale`](crate::resolution::Resolution::fit_scale).
    #[must_use]
    pub fn scale_coords(&self, factor: f32) -> Self {
        Self {
            xc: self.xc * factor,
            yc: self.yc * factor,
            w: self.w * factor,
            h: self.h * factor,
        }
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect @ ({},{})/{}x{}", self.xc, self.yc, self.w, self.h)
    }
}
