#[cfg(feature = "render")]
pub mod canvas;
pub mod source;
pub mod surface;

// Re-exports for convenience
#[cfg(feature = "render")]
pub use canvas::{decode_tile, RgbaCanvas};
pub use source::{TileImageSource, TileSet};
pub use surface::{DrawReport, TileCanvas, TiledSurface};
