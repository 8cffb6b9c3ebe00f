//! Content space ↔ screen space mapping.
//!
//! Content space is the unscaled coordinate system of the full image or document.
//! Screen space is the viewport's coordinate system after the zoom scale has been
//! applied and the scroll offset subtracted.

use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Maps a content-space point into screen space: `content * zoom_scale - content_offset`.
pub fn to_screen(content: &Point, zoom_scale: f64, content_offset: &Point) -> Point {
    content.multiply(zoom_scale).subtract(content_offset)
}

/// Inverse of [`to_screen`].
pub fn to_content(screen: &Point, zoom_scale: f64, content_offset: &Point) -> Point {
    screen.add(content_offset).divide(zoom_scale)
}

/// Zoom scale one or more power-of-two levels above `zoom_scale`, clamped to `maximum`.
pub fn zoom_scale_by_zooming_in(zoom_scale: f64, levels: f64, maximum: f64) -> f64 {
    2_f64.powf(zoom_scale.log2() + levels).min(maximum)
}

/// Zoom scale one or more power-of-two levels below `zoom_scale`, clamped to `minimum`.
pub fn zoom_scale_by_zooming_out(zoom_scale: f64, levels: f64, minimum: f64) -> f64 {
    2_f64.powf(zoom_scale.log2() - levels).max(minimum)
}

/// The zoom scale and scroll offset of a viewport at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub zoom_scale: f64,
    pub content_offset: Point,
}

impl ViewportTransform {
    pub fn new(zoom_scale: f64, content_offset: Point) -> Self {
        Self {
            zoom_scale,
            content_offset,
        }
    }

    pub fn to_screen(&self, content: &Point) -> Point {
        to_screen(content, self.zoom_scale, &self.content_offset)
    }

    pub fn to_content(&self, screen: &Point) -> Point {
        to_content(screen, self.zoom_scale, &self.content_offset)
    }

    /// Maps a screen-space rectangle into content space
    pub fn rect_to_content(&self, rect: &Bounds) -> Bounds {
        Bounds::new(self.to_content(&rect.min), self.to_content(&rect.max))
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(1.0, Point::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screen() {
        let screen = to_screen(&Point::new(1000.0, 1000.0), 0.3, &Point::zero());
        assert!((screen.x - 300.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);

        let screen = to_screen(&Point::new(100.0, 50.0), 2.0, &Point::new(50.0, 25.0));
        assert_eq!(screen, Point::new(150.0, 75.0));
    }

    #[test]
    fn test_to_content_inverts_to_screen() {
        let transform = ViewportTransform::new(2.0, Point::new(50.0, 25.0));
        let content = Point::new(123.0, 456.0);
        assert_eq!(transform.to_content(&transform.to_screen(&content)), content);
    }

    #[test]
    fn test_zoom_level_stepping() {
        assert_eq!(zoom_scale_by_zooming_in(1.0, 1.0, 4.0), 2.0);
        assert_eq!(zoom_scale_by_zooming_in(2.0, 1.0, 4.0), 4.0);
        assert_eq!(zoom_scale_by_zooming_in(4.0, 1.0, 4.0), 4.0);
        assert_eq!(zoom_scale_by_zooming_out(2.0, 1.0, 1.0), 1.0);
        assert_eq!(zoom_scale_by_zooming_out(1.0, 1.0, 1.0), 1.0);
        assert_eq!(zoom_scale_by_zooming_out(1.0, 1.0, 0.25), 0.5);
    }
}
