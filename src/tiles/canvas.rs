use crate::core::{bounds::Bounds, geo::TileIndex};
use crate::tiles::surface::TileCanvas;
use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

const OUTLINE: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Decodes an encoded tile (PNG, JPEG, ...) into RGBA pixels
pub fn decode_tile(bytes: &[u8]) -> Option<RgbaImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            log::warn!("failed to decode tile image: {}", e);
            None
        }
    }
}

/// Raster canvas covering a content-space `region` at `pixels_per_unit`
#[derive(Debug, Clone)]
pub struct RgbaCanvas {
    image: RgbaImage,
    region: Bounds,
    pixels_per_unit: f64,
}

impl RgbaCanvas {
    pub fn new(region: Bounds, pixels_per_unit: f64) -> Self {
        let width = (region.width() * pixels_per_unit).round().max(1.0) as u32;
        let height = (region.height() * pixels_per_unit).round().max(1.0) as u32;
        Self {
            image: RgbaImage::new(width, height),
            region,
            pixels_per_unit,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn region(&self) -> Bounds {
        self.region
    }

    /// Pixel rect of a content rect as (x, y, width, height)
    fn pixel_rect(&self, rect: &Bounds) -> (i64, i64, u32, u32) {
        let x = ((rect.min.x - self.region.min.x) * self.pixels_per_unit).round() as i64;
        let y = ((rect.min.y - self.region.min.y) * self.pixels_per_unit).round() as i64;
        let width = (rect.width() * self.pixels_per_unit).round().max(0.0) as u32;
        let height = (rect.height() * self.pixels_per_unit).round().max(0.0) as u32;
        (x, y, width, height)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

impl TileCanvas<RgbaImage> for RgbaCanvas {
    fn draw_image(&mut self, image: &RgbaImage, rect: &Bounds) {
        let (x, y, width, height) = self.pixel_rect(rect);
        if width == 0 || height == 0 {
            return;
        }

        if image.dimensions() == (width, height) {
            imageops::overlay(&mut self.image, image, x, y);
        } else {
            let resized = imageops::resize(image, width, height, FilterType::Triangle);
            imageops::overlay(&mut self.image, &resized, x, y);
        }
    }

    fn annotate_rect(&mut self, rect: &Bounds, tile: TileIndex) {
        let (x, y, width, height) = self.pixel_rect(rect);
        if width == 0 || height == 0 {
            return;
        }
        let (right, bottom) = (x + width as i64 - 1, y + height as i64 - 1);
        for px in x..=right {
            self.put(px, y, OUTLINE);
            self.put(px, bottom, OUTLINE);
        }
        for py in y..=bottom {
            self.put(x, py, OUTLINE);
            self.put(right, py, OUTLINE);
        }
        log::trace!("outlined tile {}", tile);
    }
}
