//! Client coordinates to normalized device coordinates.

use glam::Vec2;

/// On-screen rectangle of the render canvas, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client position to NDC: x in [-1, 1] left to right, y in
    /// [-1, 1] bottom to top.
    ///
    /// Positions outside the rectangle map outside that range. A collapsed
    /// rectangle has no mapping.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let u = (client_x - self.left) / self.width;
        let v = (client_y - self.top) / self.height;
        Some(Vec2::new(u * 2.0 - 1.0, -(v * 2.0 - 1.0)))
    }
}

impl Default for ViewportRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 350.0, 350.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        let rect = ViewportRect::new(0.0, 0.0, 350.0, 350.0);
        assert_eq!(rect.to_ndc(0.0, 0.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(rect.to_ndc(350.0, 350.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(rect.to_ndc(175.0, 175.0), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn offset_canvas() {
        let rect = ViewportRect::new(10.0, 20.0, 100.0, 200.0);
        assert_eq!(rect.to_ndc(60.0, 120.0), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(rect.to_ndc(10.0, 220.0), Some(Vec2::new(-1.0, -1.0)));
    }

    #[test]
    fn collapsed_rect_has_no_mapping() {
        assert_eq!(ViewportRect::new(0.0, 0.0, 0.0, 100.0).to_ndc(0.0, 0.0), None);
        assert_eq!(ViewportRect::new(0.0, 0.0, 100.0, f32::NAN).to_ndc(0.0, 0.0), None);
    }
}
