use crate::core::geo::TileIndex;
use crate::prelude::HashMap;

/// Anything that can hand out the image for a tile.
///
/// Returning `None` is normal while data loads; the tile is simply left blank
/// and asked for again on the next draw.
pub trait TileImageSource {
    type Image;

    fn image_for(&mut self, tile: TileIndex) -> Option<Self::Image>;
}

impl<F, I> TileImageSource for F
where
    F: FnMut(TileIndex) -> Option<I>,
{
    type Image = I;

    fn image_for(&mut self, tile: TileIndex) -> Option<I> {
        self(tile)
    }
}

/// In-memory tile store keyed by row, column and scale
#[derive(Debug, Clone)]
pub struct TileSet<I> {
    tiles: HashMap<TileIndex, I>,
}

impl<I> TileSet<I> {
    pub fn new() -> Self {
        Self {
            tiles: HashMap::default(),
        }
    }

    pub fn insert(&mut self, tile: TileIndex, image: I) -> Option<I> {
        self.tiles.insert(tile, image)
    }

    pub fn remove(&mut self, tile: &TileIndex) -> Option<I> {
        self.tiles.remove(tile)
    }

    pub fn contains(&self, tile: &TileIndex) -> bool {
        self.tiles.contains_key(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl<I> Default for TileSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Clone> TileImageSource for TileSet<I> {
    type Image = I;

    fn image_for(&mut self, tile: TileIndex) -> Option<I> {
        let image = self.tiles.get(&tile).cloned();
        if image.is_none() {
            log::trace!("no image for tile {}", tile);
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_set_lookup() {
        let mut tiles = TileSet::new();
        tiles.insert(TileIndex::new(0, 1, 2), "r0c1");
        assert_eq!(tiles.image_for(TileIndex::new(0, 1, 2)), Some("r0c1"));
        assert_eq!(tiles.image_for(TileIndex::new(0, 1, 1)), None);
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn test_closure_source() {
        let mut source = |tile: TileIndex| (tile.row == 0).then_some(tile.column);
        assert_eq!(source.image_for(TileIndex::new(0, 5, 1)), Some(5));
        assert_eq!(source.image_for(TileIndex::new(1, 5, 1)), None);
    }
}
