//! Tiled drawing: maps drawn rects to tile addresses and paints what the
//! tile source returns.

use crate::core::{bounds::Bounds, config::TiledScrollConfig, geo::Point, geo::TileIndex};
use crate::tiles::source::TileImageSource;

/// Drawing seam for tile images
pub trait TileCanvas<I> {
    /// Draws `image` stretched over `rect` (content space)
    fn draw_image(&mut self, image: &I, rect: &Bounds);

    /// Debug overlay for a drawn tile
    fn annotate_rect(&mut self, _rect: &Bounds, _tile: TileIndex) {}
}

/// Counts from one [`TiledSurface::draw_visible`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawReport {
    pub requested: usize,
    pub drawn: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TiledSurface {
    tile_size: Point,
    /// Device pixels per point
    contents_scale: f64,
    levels_of_detail: u32,
    annotates_tiles: bool,
}

impl TiledSurface {
    pub fn new(tile_size: f64, levels_of_detail: u32) -> Self {
        Self {
            tile_size: Point::new(tile_size, tile_size),
            contents_scale: 1.0,
            levels_of_detail,
            annotates_tiles: false,
        }
    }

    pub fn from_config(config: &TiledScrollConfig) -> Self {
        let mut surface = Self::new(config.tile_size, config.levels_of_detail);
        surface.annotates_tiles = config.annotates_tiles;
        surface
    }

    pub fn with_contents_scale(mut self, contents_scale: f64) -> Self {
        self.contents_scale = contents_scale;
        self
    }

    pub fn tile_size(&self) -> Point {
        self.tile_size
    }

    pub fn set_tile_size(&mut self, tile_size: Point) {
        self.tile_size = tile_size;
    }

    pub fn contents_scale(&self) -> f64 {
        self.contents_scale
    }

    pub fn levels_of_detail(&self) -> u32 {
        self.levels_of_detail
    }

    pub fn set_levels_of_detail(&mut self, levels: u32) {
        if levels == 1 {
            log::warn!("levels_of_detail == 1 produces unspecified tile artifacts");
        }
        self.levels_of_detail = levels;
    }

    pub fn annotates_tiles(&self) -> bool {
        self.annotates_tiles
    }

    pub fn set_annotates_tiles(&mut self, annotates: bool) {
        self.annotates_tiles = annotates;
    }

    /// Level scale (1, 2, 4, ...) tiles are rendered at for a zoom scale
    pub fn level_scale_for_zoom(&self, zoom_scale: f64) -> u32 {
        if !zoom_scale.is_finite() || zoom_scale <= 0.0 {
            return 1;
        }
        let level = zoom_scale
            .log2()
            .ceil()
            .clamp(0.0, self.levels_of_detail as f64) as u32;
        1u32.checked_shl(level).unwrap_or(u32::MAX)
    }

    /// Tile address of a drawn rect under the context scale `ctm_scale`
    /// (level scale times contents scale).
    pub fn tile_index(&self, rect: &Bounds, ctm_scale: f64) -> TileIndex {
        let scale = ctm_scale / self.contents_scale;
        let column = (rect.min.x * scale / self.tile_size.x).floor() as i64;
        let row = (rect.min.y * scale / self.tile_size.y).floor() as i64;
        TileIndex::new(row, column, scale.round().max(1.0) as u32)
    }

    /// Content-space rects of the tiles covering `visible` at `level_scale`
    pub fn covering_rects(&self, visible: &Bounds, level_scale: u32) -> Vec<Bounds> {
        let scale = level_scale.max(1) as f64;
        let width = self.tile_size.x / scale;
        let height = self.tile_size.y / scale;
        if !visible.is_valid() || width <= 0.0 || height <= 0.0 {
            return Vec::new();
        }

        let first_column = (visible.min.x / width).floor() as i64;
        let last_column = (visible.max.x / width).ceil() as i64;
        let first_row = (visible.min.y / height).floor() as i64;
        let last_row = (visible.max.y / height).ceil() as i64;

        let mut rects = Vec::new();
        for row in first_row..last_row.max(first_row + 1) {
            for column in first_column..last_column.max(first_column + 1) {
                rects.push(Bounds::from_origin_and_size(
                    Point::new(column as f64 * width, row as f64 * height),
                    Point::new(width, height),
                ));
            }
        }
        rects
    }

    /// Draws one tile rect. Returns whether the source had an image for it.
    pub fn draw_rect<S, C>(
        &self,
        rect: &Bounds,
        ctm_scale: f64,
        source: &mut S,
        canvas: &mut C,
    ) -> bool
    where
        S: TileImageSource,
        C: TileCanvas<S::Image>,
    {
        let tile = self.tile_index(rect, ctm_scale);
        let drawn = match source.image_for(tile) {
            Some(image) => {
                canvas.draw_image(&image, rect);
                true
            }
            None => {
                log::trace!("tile {} left blank", tile);
                false
            }
        };

        if self.annotates_tiles {
            canvas.annotate_rect(rect, tile);
        }
        drawn
    }

    /// Draws every tile covering the content-space rect `visible` at `zoom_scale`
    pub fn draw_visible<S, C>(
        &self,
        visible: &Bounds,
        zoom_scale: f64,
        source: &mut S,
        canvas: &mut C,
    ) -> DrawReport
    where
        S: TileImageSource,
        C: TileCanvas<S::Image>,
    {
        let level_scale = self.level_scale_for_zoom(zoom_scale);
        let ctm_scale = level_scale as f64 * self.contents_scale;

        let mut report = DrawReport::default();
        for rect in self.covering_rects(visible, level_scale) {
            report.requested += 1;
            if self.draw_rect(&rect, ctm_scale, source, canvas) {
                report.drawn += 1;
            }
        }
        log::trace!(
            "drew {}/{} tiles at level scale {}",
            report.drawn,
            report.requested,
            level_scale
        );
        report
    }
}

impl Default for TiledSurface {
    fn default() -> Self {
        Self::from_config(&TiledScrollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::source::TileSet;

    #[derive(Default)]
    struct RecordingCanvas {
        drawn: Vec<(&'static str, Bounds)>,
        annotated: Vec<TileIndex>,
    }

    impl TileCanvas<&'static str> for RecordingCanvas {
        fn draw_image(&mut self, image: &&'static str, rect: &Bounds) {
            self.drawn.push((*image, *rect));
        }

        fn annotate_rect(&mut self, _rect: &Bounds, tile: TileIndex) {
            self.annotated.push(tile);
        }
    }

    #[test]
    fn test_level_scale_for_zoom() {
        let surface = TiledSurface::new(256.0, 2);
        assert_eq!(surface.level_scale_for_zoom(0.3), 1);
        assert_eq!(surface.level_scale_for_zoom(1.0), 1);
        assert_eq!(surface.level_scale_for_zoom(1.5), 2);
        assert_eq!(surface.level_scale_for_zoom(3.0), 4);
        assert_eq!(surface.level_scale_for_zoom(16.0), 4);
        assert_eq!(surface.level_scale_for_zoom(0.0), 1);
    }

    #[test]
    fn test_level_scale_saturates_for_deep_levels() {
        let surface = TiledSurface::new(256.0, 64);
        assert_eq!(surface.level_scale_for_zoom(2f64.powi(31)), 1u32 << 31);
        assert_eq!(surface.level_scale_for_zoom(2f64.powi(40)), u32::MAX);
        assert_eq!(surface.level_scale_for_zoom(f64::MAX), u32::MAX);
    }

    #[test]
    fn test_tile_index_accounts_for_contents_scale() {
        let surface = TiledSurface::new(256.0, 2).with_contents_scale(2.0);
        // Level 2 tiles are 128 points wide in content space
        let rect = Bounds::from_origin_and_size(Point::new(256.0, 128.0), Point::new(128.0, 128.0));
        assert_eq!(surface.tile_index(&rect, 4.0), TileIndex::new(1, 2, 2));
    }

    #[test]
    fn test_covering_rects() {
        let surface = TiledSurface::new(256.0, 2);
        let visible = Bounds::from_coords(100.0, 100.0, 600.0, 300.0);
        let rects = surface.covering_rects(&visible, 1);
        // columns 0..=2, rows 0..=1
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], Bounds::from_coords(0.0, 0.0, 256.0, 256.0));

        let rects = surface.covering_rects(&Bounds::from_coords(0.0, 0.0, 256.0, 256.0), 2);
        assert_eq!(rects.len(), 4);
    }

    #[test]
    fn test_draw_visible_skips_missing_tiles() {
        let mut surface = TiledSurface::new(256.0, 2);
        surface.set_annotates_tiles(true);
        let mut tiles = TileSet::new();
        tiles.insert(TileIndex::new(0, 0, 1), "origin");
        let mut canvas = RecordingCanvas::default();

        let report = surface.draw_visible(
            &Bounds::from_coords(0.0, 0.0, 500.0, 200.0),
            1.0,
            &mut tiles,
            &mut canvas,
        );

        assert_eq!(report, DrawReport { requested: 2, drawn: 1 });
        assert_eq!(canvas.drawn.len(), 1);
        assert_eq!(canvas.drawn[0].0, "origin");
        assert_eq!(canvas.annotated, vec![TileIndex::new(0, 0, 1), TileIndex::new(0, 1, 1)]);
    }
}
