//! Pixel region structure
//!
//! A rectangular window in pixel coordinates where (0,0) is the
//! top-left corner of the image.

/// Rectangular pixel window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,
    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,
    /// Width of the region in pixels
    pub width: u32,
    /// Height of the region in pixels
    pub height: u32,
}

impl PixelRegion {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        PixelRegion { x, y, width, height }
    }

    /// X-coordinate immediately after the rightmost pixel
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Y-coordinate immediately below the bottom pixel
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
