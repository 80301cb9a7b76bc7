//! Rooms: one cell of the maze grid, subdivided into tiles.

use crate::grid::{self, GridError};
use crate::tile::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomType {
    #[default]
    Standard,
    Start,
    Exit,
}

/// A non-empty rectangle of tiles, indexed `tiles[y][x]` with `y` growing
/// upward.
#[derive(Clone, Debug)]
pub struct Room {
    kind: RoomType,
    tiles: Vec<Vec<Tile>>,
    height: usize,
    width: usize,
}

impl Room {
    pub fn new(kind: RoomType, tiles: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let (height, width) = grid::rectangle_dimensions(&tiles)?;
        Ok(Self {
            kind,
            tiles,
            height,
            width,
        })
    }

    pub fn kind(&self) -> RoomType {
        self.kind
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn inside_bounds(&self, x: i32, y: i32) -> bool {
        grid::index(x, y, self.width, self.height).is_some()
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        let (x, y) = grid::index(x, y, self.width, self.height)?;
        Some(&self.tiles[y][x])
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }
}
