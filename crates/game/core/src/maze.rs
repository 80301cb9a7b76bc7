//! The maze: a rectangle of rooms joined by door controllers.

use std::fmt;

use crate::coordinates::{Coordinates, Direction};
use crate::door::{DoorController, DoorId};
use crate::grid::{self, GridError};
use crate::room::Room;
use crate::tile::Tile;

/// Rooms indexed `rooms[y][x]`, `y` growing upward. Cells may be empty, in
/// which case movement treats them as the edge of the maze.
pub struct Maze {
    rooms: Vec<Vec<Option<Room>>>,
    doors: Vec<DoorController>,
    start_room: (usize, usize),
    exit_room: (usize, usize),
    height: usize,
    width: usize,
}

impl Maze {
    /// Builds a fully populated maze.
    pub fn new(
        rooms: Vec<Vec<Room>>,
        doors: Vec<DoorController>,
        start_room: (usize, usize),
        exit_room: (usize, usize),
    ) -> Result<Self, GridError> {
        let rooms = rooms
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::with_layout(rooms, doors, start_room, exit_room)
    }

    /// Builds a maze whose grid may contain holes. The start and exit cells
    /// must hold a room.
    pub fn with_layout(
        rooms: Vec<Vec<Option<Room>>>,
        doors: Vec<DoorController>,
        start_room: (usize, usize),
        exit_room: (usize, usize),
    ) -> Result<Self, GridError> {
        let (height, width) = grid::rectangle_dimensions(&rooms)?;

        for (x, y) in [start_room, exit_room] {
            let present = rooms
                .get(y)
                .and_then(|row| row.get(x))
                .is_some_and(Option::is_some);
            if !present {
                return Err(GridError::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                });
            }
        }

        Ok(Self {
            rooms,
            doors,
            start_room,
            exit_room,
            height,
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn room(&self, x: i32, y: i32) -> Option<&Room> {
        let (x, y) = grid::index(x, y, self.width, self.height)?;
        self.rooms[y][x].as_ref()
    }

    pub fn rooms(&self) -> &[Vec<Option<Room>>] {
        &self.rooms
    }

    pub fn tile(&self, coordinates: Coordinates) -> Option<&Tile> {
        self.room(coordinates.room_x(), coordinates.room_y())?
            .tile(coordinates.x(), coordinates.y())
    }

    pub fn has_neighbor(&self, x: i32, y: i32, direction: Direction) -> bool {
        self.neighbor(x, y, direction).is_some()
    }

    pub fn neighbor(&self, x: i32, y: i32, direction: Direction) -> Option<&Room> {
        let (x, y) = direction.step(x, y)?;
        self.room(x, y)
    }

    /// Resolves a step from `from` toward `direction`.
    ///
    /// Steps stay inside the current room when they can; otherwise they cross
    /// into the neighbouring room, landing on its opposite edge. At the edge of
    /// the maze the original coordinates come back unchanged. Passability is
    /// not checked here.
    pub fn move_coordinates(&self, from: Coordinates, direction: Direction) -> Coordinates {
        let Some(room) = self.room(from.room_x(), from.room_y()) else {
            return from;
        };

        let Some((x, y)) = from.move_within_room(direction) else {
            return from;
        };
        if room.inside_bounds(x, y) {
            return from.with_tile(x, y);
        }

        let Some((room_x, room_y)) = direction.step(from.room_x(), from.room_y()) else {
            return from;
        };
        let Some(next) = self.room(room_x, room_y) else {
            return from;
        };

        let last_x = next.width() as i32 - 1;
        let last_y = next.height() as i32 - 1;
        let (x, y) = match direction {
            Direction::Up => (x, 0),
            Direction::Down => (x, last_y),
            Direction::Left => (last_x, y),
            Direction::Right => (0, y),
        };

        // Rooms of different sizes can leave the carried-over axis outside
        // the new room.
        if !next.inside_bounds(x, y) {
            return from;
        }
        Coordinates::new(room_x, room_y, x, y)
    }

    pub fn doors(&self) -> &[DoorController] {
        &self.doors
    }

    pub fn door(&self, id: DoorId) -> Option<&DoorController> {
        self.doors.iter().find(|door| door.id() == id)
    }

    pub fn start_room(&self) -> (usize, usize) {
        self.start_room
    }

    pub fn exit_room(&self) -> (usize, usize) {
        self.exit_room
    }

    pub fn is_exit_room(&self, coordinates: &Coordinates) -> bool {
        let (x, y) = self.exit_room;
        coordinates.room() == (x as i32, y as i32)
    }

    /// Centre tile of the start room, where a new player is placed.
    pub fn start_position(&self) -> Coordinates {
        let (x, y) = self.start_room;
        let (width, height) = self.rooms[y][x]
            .as_ref()
            .map(|room| (room.width(), room.height()))
            .unwrap_or((1, 1));
        Coordinates::new(x as i32, y as i32, (width / 2) as i32, (height / 2) as i32)
    }

    /// Draws the maze top row first, marking `player` with `@`.
    pub fn render(&self, player: Option<Coordinates>) -> String {
        let row_heights: Vec<usize> = self
            .rooms
            .iter()
            .map(|row| row.iter().flatten().map(Room::height).max().unwrap_or(0))
            .collect();
        let column_widths: Vec<usize> = (0..self.width)
            .map(|x| {
                self.rooms
                    .iter()
                    .filter_map(|row| row[x].as_ref())
                    .map(Room::width)
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for room_y in (0..self.height).rev() {
            for y in (0..row_heights[room_y]).rev() {
                for (room_x, &columns) in column_widths.iter().enumerate() {
                    for x in 0..columns {
                        let here =
                            Coordinates::new(room_x as i32, room_y as i32, x as i32, y as i32);
                        let glyph = if player == Some(here) {
                            '@'
                        } else {
                            self.tile(here).map_or(' ', |tile| tile.tile_id().glyph())
                        };
                        out.push(glyph);
                    }
                }
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Maze")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("doors", &self.doors.len())
            .field("start_room", &self.start_room)
            .field("exit_room", &self.exit_room)
            .finish()
    }
}
