//! Tile addressing and directional arithmetic.
//!
//! Coordinates use a "y grows upward" convention: moving [`Direction::Up`]
//! increments `y` both inside a room and across the room grid. Views that draw
//! row 0 at the top must flip vertically.

use std::fmt;

/// Address of a single tile: the room's cell in the maze grid plus the tile's
/// cell inside that room.
///
/// Values are immutable; moving produces a new `Coordinates`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    room_x: i32,
    room_y: i32,
    x: i32,
    y: i32,
}

impl Coordinates {
    pub const fn new(room_x: i32, room_y: i32, x: i32, y: i32) -> Self {
        Self {
            room_x,
            room_y,
            x,
            y,
        }
    }

    pub const fn room_x(&self) -> i32 {
        self.room_x
    }

    pub const fn room_y(&self) -> i32 {
        self.room_y
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    /// The `(room_x, room_y)` cell this tile belongs to.
    pub const fn room(&self) -> (i32, i32) {
        (self.room_x, self.room_y)
    }

    /// Same room, different tile.
    pub const fn with_tile(self, x: i32, y: i32) -> Self {
        Self::new(self.room_x, self.room_y, x, y)
    }

    /// Tile position one step away in `direction`, without room bounds
    /// checks. `None` if the step overflows `i32`.
    pub const fn move_within_room(&self, direction: Direction) -> Option<(i32, i32)> {
        direction.step(self.x, self.y)
    }

    /// True if both coordinates lie in the same room.
    pub const fn same_room(&self, other: &Coordinates) -> bool {
        self.room_x == other.room_x && self.room_y == other.room_y
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "room ({}, {}) tile ({}, {})",
            self.room_x, self.room_y, self.x, self.y
        )
    }
}

/// Movement intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// `(x, y)` moved one step; `None` on overflow.
    pub const fn step(self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (dx, dy) = self.delta();
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
