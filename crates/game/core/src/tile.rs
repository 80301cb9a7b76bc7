//! Tiles: the smallest addressable cell inside a room.

use crate::door::{DoorState, DoorTile};

/// Render-facing identifier for a tile and, for doors, its current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileId {
    Empty,
    Wall,
    DoorUnanswered,
    DoorLocked,
    DoorOpen,
}

impl TileId {
    /// Single-character glyph used by text renderings of the maze.
    pub const fn glyph(self) -> char {
        match self {
            TileId::Empty => ' ',
            TileId::Wall => '#',
            TileId::DoorUnanswered => '?',
            TileId::DoorLocked => 'X',
            TileId::DoorOpen => '/',
        }
    }
}

#[derive(Clone, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Door(DoorTile),
}

impl Tile {
    /// Attempts to enter the tile. Doors may ask their question here.
    pub fn try_move_to(&self) -> bool {
        match self {
            Tile::Empty => true,
            Tile::Wall => false,
            Tile::Door(door) => door.try_move_to(),
        }
    }

    pub fn tile_id(&self) -> TileId {
        match self {
            Tile::Empty => TileId::Empty,
            Tile::Wall => TileId::Wall,
            Tile::Door(door) => door.tile_id(),
        }
    }

    pub fn as_door(&self) -> Option<&DoorTile> {
        match self {
            Tile::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn door_state(&self) -> Option<DoorState> {
        self.as_door().map(DoorTile::state)
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Tile::Door(_))
    }
}

impl From<DoorTile> for Tile {
    fn from(door: DoorTile) -> Self {
        Tile::Door(door)
    }
}
