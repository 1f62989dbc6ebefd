//! Screen-space geometry used by the window controller.
//!
//! Everything here is in physical (pixel) screen coordinates, the space both
//! `outer_position()` and the OS cursor report in. Conversion to the
//! webview's logical pixels only happens when forwarding pointer positions.

/// A cursor position on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to this point.
    pub fn offset_from(&self, origin: ScreenPoint) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Window rectangle: top-left origin plus size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowBounds {
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.x as f64, self.y as f64)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check if a point lies inside (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x as f64
            && point.y >= self.y as f64
            && point.x < self.x as f64 + self.width as f64
            && point.y < self.y as f64 + self.height as f64
    }
}
