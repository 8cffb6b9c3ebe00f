use serde::{Deserialize, Serialize};

/// A point in content or screen coordinates.
///
/// Sizes are carried as points too (`x` = width, `y` = height), the same way the
/// viewport size is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide(&self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::zero()
    }
}

/// Address of a single tile as requested from a tile image source.
///
/// `scale` is the level-of-detail multiplier the tile was rendered for (1, 2, 4, ...),
/// `row` and `column` count tiles of that level from the content origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub row: i64,
    pub column: i64,
    pub scale: u32,
}

impl TileIndex {
    pub fn new(row: i64, column: i64, scale: u32) -> Self {
        Self { row, column, scale }
    }

    /// Level of detail as a power of two (`scale == 2^level`).
    pub fn level(&self) -> u32 {
        self.scale.max(1).trailing_zeros()
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}@{}x", self.row, self.column, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_math() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.add(&b), Point::new(14.0, 25.0));
        assert_eq!(a.subtract(&b), Point::new(6.0, 15.0));
        assert_eq!(a.multiply(0.5), Point::new(5.0, 10.0));
        assert_eq!(a.divide(2.0), Point::new(5.0, 10.0));
        assert_eq!(Point::new(3.0, 4.0).distance_to(&Point::zero()), 5.0);
    }

    #[test]
    fn test_tile_index_level() {
        assert_eq!(TileIndex::new(0, 0, 1).level(), 0);
        assert_eq!(TileIndex::new(3, 2, 4).level(), 2);
        assert_eq!(TileIndex::new(3, 2, 4).to_string(), "r3c2@4x");
    }
}
