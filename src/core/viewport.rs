use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use crate::core::transform::ViewportTransform;
use serde::{Deserialize, Serialize};

/// The scrollable, zoomable surface the engine sits on.
///
/// The host toolkit owns scroll and zoom physics; the engine only reads the
/// current transform and issues requests. `content_offset` and every rect passed
/// to [`scroll_rect_to_visible`](Self::scroll_rect_to_visible) are in zoomed content
/// coordinates, the rect passed to [`zoom_to_rect`](Self::zoom_to_rect) and the
/// point passed to [`set_content_center`](Self::set_content_center) are in
/// unzoomed content space.
pub trait ScrollableSurface {
    fn zoom_scale(&self) -> f64;
    fn content_offset(&self) -> Point;
    /// Size of the visible viewport
    fn bounds_size(&self) -> Point;
    fn minimum_zoom_scale(&self) -> f64;
    fn maximum_zoom_scale(&self) -> f64;
    fn set_maximum_zoom_scale(&mut self, scale: f64);

    fn set_zoom_scale(&mut self, scale: f64, animated: bool);
    fn zoom_to_rect(&mut self, rect: Bounds, animated: bool);
    fn set_content_center(&mut self, center: Point, animated: bool);
    fn scroll_rect_to_visible(&mut self, rect: Bounds, animated: bool);

    /// Elastic overshoot past the zoom limits is animating back
    fn is_zoom_bouncing(&self) -> bool {
        false
    }

    /// A zoom gesture is in progress
    fn is_zooming(&self) -> bool {
        false
    }

    fn transform(&self) -> ViewportTransform {
        ViewportTransform::new(self.zoom_scale(), self.content_offset())
    }
}

/// Snapshot of a surface taken at the start of a reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    pub transform: ViewportTransform,
    pub size: Point,
    pub zoom_bouncing: bool,
    pub zooming: bool,
}

impl ViewportFrame {
    pub fn new(transform: ViewportTransform, size: Point) -> Self {
        Self {
            transform,
            size,
            zoom_bouncing: false,
            zooming: false,
        }
    }

    pub fn from_surface<S: ScrollableSurface + ?Sized>(surface: &S) -> Self {
        Self {
            transform: surface.transform(),
            size: surface.bounds_size(),
            zoom_bouncing: surface.is_zoom_bouncing(),
            zooming: surface.is_zooming(),
        }
    }

    /// Viewport bounds in screen space
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_and_size(Point::zero(), self.size)
    }

    /// Whether a screen-space point falls inside the bounds grown by `margin`
    pub fn is_within(&self, screen: &Point, margin: f64) -> bool {
        self.bounds().expanded(margin).contains(screen)
    }
}

/// A headless scroll surface: applies every request immediately.
///
/// Useful for tests, servers and hosts that run their own animation and only
/// need the resulting geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    zoom_scale: f64,
    content_offset: Point,
    bounds_size: Point,
    /// Unzoomed size of the full content
    content_size: Point,
    minimum_zoom_scale: f64,
    maximum_zoom_scale: f64,
    zoom_bouncing: bool,
    zooming: bool,
}

impl ScrollState {
    pub fn new(bounds_size: Point, content_size: Point) -> Self {
        Self {
            zoom_scale: 1.0,
            content_offset: Point::zero(),
            bounds_size,
            content_size,
            minimum_zoom_scale: 1.0,
            maximum_zoom_scale: 1.0,
            zoom_bouncing: false,
            zooming: false,
        }
    }

    pub fn with_zoom_limits(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_zoom_scale = minimum;
        self.maximum_zoom_scale = maximum.max(minimum);
        self.zoom_scale = self.zoom_scale.clamp(self.minimum_zoom_scale, self.maximum_zoom_scale);
        self
    }

    pub fn set_minimum_zoom_scale(&mut self, scale: f64) {
        self.minimum_zoom_scale = scale;
        self.maximum_zoom_scale = self.maximum_zoom_scale.max(scale);
    }

    pub fn content_size(&self) -> Point {
        self.content_size
    }

    /// Content size at the current zoom scale
    pub fn zoomed_content_size(&self) -> Point {
        self.content_size.multiply(self.zoom_scale)
    }

    pub fn set_bounds_size(&mut self, size: Point) {
        self.bounds_size = size;
        self.content_offset = self.clamp_offset(self.content_offset);
    }

    /// Scrolls to `offset`, clamped so the viewport never leaves the content
    pub fn set_content_offset(&mut self, offset: Point) {
        self.content_offset = self.clamp_offset(offset);
    }

    pub fn set_zoom_bouncing(&mut self, bouncing: bool) {
        self.zoom_bouncing = bouncing;
    }

    pub fn set_zooming(&mut self, zooming: bool) {
        self.zooming = zooming;
    }

    fn clamp_zoom(&self, scale: f64) -> f64 {
        scale.clamp(self.minimum_zoom_scale, self.maximum_zoom_scale)
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        let content = self.zoomed_content_size();
        let max_x = (content.x - self.bounds_size.x).max(0.0);
        let max_y = (content.y - self.bounds_size.y).max(0.0);
        Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
    }
}

impl ScrollableSurface for ScrollState {
    fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    fn content_offset(&self) -> Point {
        self.content_offset
    }

    fn bounds_size(&self) -> Point {
        self.bounds_size
    }

    fn minimum_zoom_scale(&self) -> f64 {
        self.minimum_zoom_scale
    }

    fn maximum_zoom_scale(&self) -> f64 {
        self.maximum_zoom_scale
    }

    fn set_maximum_zoom_scale(&mut self, scale: f64) {
        self.maximum_zoom_scale = scale.max(self.minimum_zoom_scale);
        self.zoom_scale = self.clamp_zoom(self.zoom_scale);
        self.content_offset = self.clamp_offset(self.content_offset);
    }

    fn set_zoom_scale(&mut self, scale: f64, _animated: bool) {
        self.zoom_scale = self.clamp_zoom(scale);
        self.content_offset = self.clamp_offset(self.content_offset);
    }

    fn zoom_to_rect(&mut self, rect: Bounds, _animated: bool) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let scale = (self.bounds_size.x / rect.width()).min(self.bounds_size.y / rect.height());
        self.zoom_scale = self.clamp_zoom(scale);
        let offset = rect
            .center()
            .multiply(self.zoom_scale)
            .subtract(&self.bounds_size.divide(2.0));
        self.content_offset = self.clamp_offset(offset);
    }

    fn set_content_center(&mut self, center: Point, _animated: bool) {
        let content = self.zoomed_content_size();
        let mut offset = self.content_offset;

        if content.x > self.bounds_size.x {
            offset.x = (center.x * self.zoom_scale - self.bounds_size.x / 2.0).max(0.0);
            offset.x = offset.x.min(content.x - self.bounds_size.x);
        }
        if content.y > self.bounds_size.y {
            offset.y = (center.y * self.zoom_scale - self.bounds_size.y / 2.0).max(0.0);
            offset.y = offset.y.min(content.y - self.bounds_size.y);
        }
        self.content_offset = offset;
    }

    fn scroll_rect_to_visible(&mut self, rect: Bounds, _animated: bool) {
        let mut offset = self.content_offset;

        if rect.min.x < offset.x {
            offset.x = rect.min.x;
        } else if rect.max.x > offset.x + self.bounds_size.x {
            offset.x = rect.max.x - self.bounds_size.x;
        }
        if rect.min.y < offset.y {
            offset.y = rect.min.y;
        } else if rect.max.y > offset.y + self.bounds_size.y {
            offset.y = rect.max.y - self.bounds_size.y;
        }
        self.content_offset = self.clamp_offset(offset);
    }

    fn is_zoom_bouncing(&self) -> bool {
        self.zoom_bouncing
    }

    fn is_zooming(&self) -> bool {
        self.zooming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> ScrollState {
        ScrollState::new(Point::new(500.0, 500.0), Point::new(2000.0, 2000.0))
            .with_zoom_limits(0.25, 4.0)
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut state = surface();
        state.set_zoom_scale(10.0, false);
        assert_eq!(state.zoom_scale(), 4.0);
        state.set_zoom_scale(0.1, false);
        assert_eq!(state.zoom_scale(), 0.25);
    }

    #[test]
    fn test_offset_stays_inside_content() {
        let mut state = surface();
        state.set_content_offset(Point::new(5000.0, -10.0));
        assert_eq!(state.content_offset(), Point::new(1500.0, 0.0));

        state.set_zoom_scale(0.5, false);
        assert_eq!(state.content_offset(), Point::new(500.0, 0.0));
    }

    #[test]
    fn test_set_content_center() {
        let mut state = surface();
        state.set_zoom_scale(2.0, false);
        state.set_content_center(Point::new(1000.0, 100.0), false);
        assert_eq!(state.content_offset(), Point::new(1750.0, 0.0));

        // Content narrower than the viewport keeps its offset
        state.set_zoom_scale(0.25, false);
        state.set_content_center(Point::new(1000.0, 1000.0), false);
        assert_eq!(state.content_offset(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_zoom_to_rect() {
        let mut state = surface();
        state.zoom_to_rect(Bounds::from_coords(500.0, 500.0, 750.0, 750.0), true);
        assert_eq!(state.zoom_scale(), 2.0);
        assert_eq!(state.content_offset(), Point::new(1000.0, 1000.0));
    }

    #[test]
    fn test_scroll_rect_to_visible() {
        let mut state = surface();
        state.scroll_rect_to_visible(Bounds::from_coords(900.0, 100.0, 950.0, 150.0), false);
        assert_eq!(state.content_offset(), Point::new(450.0, 0.0));

        state.scroll_rect_to_visible(Bounds::from_coords(10.0, 10.0, 20.0, 20.0), false);
        assert_eq!(state.content_offset(), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_frame_margin() {
        let frame = ViewportFrame::from_surface(&surface());
        assert!(frame.is_within(&Point::new(520.0, -20.0), 25.0));
        assert!(!frame.is_within(&Point::new(1000.0, 1000.0), 25.0));
    }
}
