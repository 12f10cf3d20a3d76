//! Types for representing image and view resolutions.

use std::fmt;

/// Resolution (`width x height`) of an image, view, camera, or display.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// Creates a new [`Resolution`] of `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width of this [`Resolution`].
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of this [`Resolution`].
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Computes the scale factor that maps coordinates in an `image`-sized
    /// frame onto `self` when the frame is displayed with its aspect ratio
    /// preserved and anchored to the top-left ("fit" display mode).
    ///
    /// The factor is `min(self.width / image.width, self.height / image.height)`,
    /// so the scaled frame never exceeds `self` in either dimension.
    pub fn fit_scale(&self, image: Resolution) -> f32 {
        f32::min(
            self.width as f32 / image.width as f32,
            self.height as f32 / image.height as f32,
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
