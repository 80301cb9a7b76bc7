//! Plain-data snapshots of a game for save files.
//!
//! Door tiles are stored by the index of their controller and side, so the
//! pairing between rooms is rebuilt exactly on restore.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::GameSettings;
use crate::coordinates::Coordinates;
use crate::door::{DoorController, DoorId, DoorSide, DoorState};
use crate::error::{ErrorSeverity, GameError};
use crate::game_state::GamePhase;
use crate::grid::GridError;
use crate::maze::Maze;
use crate::question::TriviaQuestion;
use crate::room::{Room, RoomType};
use crate::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub settings: GameSettings,
    pub maze: MazeSnapshot,
    pub player: PlayerSnapshot,
    pub phase: GamePhase,
    pub stored_phase: GamePhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub position: Coordinates,
    pub score: i32,
    pub lives: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeSnapshot {
    /// `rooms[y][x]`, `None` for holes in the grid.
    pub rooms: Vec<Vec<Option<RoomSnapshot>>>,
    pub doors: Vec<DoorSnapshot>,
    pub start_room: (usize, usize),
    pub exit_room: (usize, usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSnapshot {
    pub kind: RoomType,
    pub tiles: Vec<Vec<TileSnapshot>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileSnapshot {
    Empty,
    Wall,
    Door { door: DoorId, side: DoorSide },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorSnapshot {
    pub id: DoorId,
    pub question: TriviaQuestion,
    pub state: DoorState,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("tile refers to unknown {0}")]
    UnknownDoor(DoorId),

    #[error("{0} is listed more than once")]
    DuplicateDoor(DoorId),

    #[error("{door} has {near} near and {far} far tiles, expected one of each")]
    UnpairedDoor { door: DoorId, near: usize, far: usize },

    #[error("player position {0} is not inside the maze")]
    PlayerOutOfBounds(Coordinates),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::UnknownDoor(_) => "SNAPSHOT_UNKNOWN_DOOR",
            SnapshotError::DuplicateDoor(_) => "SNAPSHOT_DUPLICATE_DOOR",
            SnapshotError::UnpairedDoor { .. } => "SNAPSHOT_UNPAIRED_DOOR",
            SnapshotError::PlayerOutOfBounds(_) => "SNAPSHOT_PLAYER_OUT_OF_BOUNDS",
            SnapshotError::Grid(_) => "SNAPSHOT_GRID",
        }
    }
}

impl MazeSnapshot {
    pub fn capture(maze: &Maze) -> Self {
        let rooms = maze
            .rooms()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|room| room.as_ref().map(RoomSnapshot::capture))
                    .collect()
            })
            .collect();
        let doors = maze
            .doors()
            .iter()
            .map(|door| DoorSnapshot {
                id: door.id(),
                question: door.question(),
                state: door.state(),
            })
            .collect();

        Self {
            rooms,
            doors,
            start_room: maze.start_room(),
            exit_room: maze.exit_room(),
        }
    }

    /// Rebuilds the maze, checking that every door has exactly one tile on
    /// each side.
    pub fn restore(self) -> Result<Maze, SnapshotError> {
        let mut controllers: HashMap<DoorId, DoorController> =
            HashMap::with_capacity(self.doors.len());
        let mut order = Vec::with_capacity(self.doors.len());
        for door in self.doors {
            if controllers.contains_key(&door.id) {
                return Err(SnapshotError::DuplicateDoor(door.id));
            }
            let controller = DoorController::new(door.id, door.question);
            controller.restore_state(door.state);
            order.push(door.id);
            controllers.insert(door.id, controller);
        }

        let mut placed: HashMap<DoorId, [usize; 2]> = HashMap::new();
        let mut rooms = Vec::with_capacity(self.rooms.len());
        for row in self.rooms {
            let mut restored = Vec::with_capacity(row.len());
            for room in row {
                let room = match room {
                    Some(room) => Some(room.restore(&controllers, &mut placed)?),
                    None => None,
                };
                restored.push(room);
            }
            rooms.push(restored);
        }

        for id in &order {
            let [near, far] = placed.get(id).copied().unwrap_or_default();
            if near != 1 || far != 1 {
                return Err(SnapshotError::UnpairedDoor { door: *id, near, far });
            }
        }

        let doors = order
            .iter()
            .filter_map(|id| controllers.remove(id))
            .collect();
        Ok(Maze::with_layout(rooms, doors, self.start_room, self.exit_room)?)
    }
}

impl RoomSnapshot {
    fn capture(room: &Room) -> Self {
        let tiles = room
            .tiles()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        Tile::Empty => TileSnapshot::Empty,
                        Tile::Wall => TileSnapshot::Wall,
                        Tile::Door(door) => TileSnapshot::Door {
                            door: door.door_id(),
                            side: door.side(),
                        },
                    })
                    .collect()
            })
            .collect();
        Self {
            kind: room.kind(),
            tiles,
        }
    }

    fn restore(
        self,
        controllers: &HashMap<DoorId, DoorController>,
        placed: &mut HashMap<DoorId, [usize; 2]>,
    ) -> Result<Room, SnapshotError> {
        let mut tiles = Vec::with_capacity(self.tiles.len());
        for row in self.tiles {
            let mut restored = Vec::with_capacity(row.len());
            for tile in row {
                restored.push(match tile {
                    TileSnapshot::Empty => Tile::Empty,
                    TileSnapshot::Wall => Tile::Wall,
                    TileSnapshot::Door { door, side } => {
                        let controller =
                            controllers.get(&door).ok_or(SnapshotError::UnknownDoor(door))?;
                        placed.entry(door).or_default()[side.index()] += 1;
                        Tile::Door(controller.door(side).clone())
                    }
                });
            }
            tiles.push(restored);
        }
        Ok(Room::new(self.kind, tiles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::generator::{MazeGenerator, RectangleMazeGenerator};
    use crate::question::{QuestionSource, QuestionType};

    struct Numbered(u32);

    impl QuestionSource for Numbered {
        fn next_question(&mut self) -> TriviaQuestion {
            self.0 += 1;
            TriviaQuestion::new(format!("question {}", self.0), self.0.to_string(), QuestionType::ShortAnswer)
        }
    }

    fn generated() -> Maze {
        RectangleMazeGenerator::new(MazeConfig::new(2, 3, 5, 5).with_start(0, 0).with_exit(2, 1), Numbered(0))
            .generate()
            .unwrap()
    }

    #[test]
    fn restore_keeps_layout_and_door_states() {
        let maze = generated();
        maze.doors()[1].restore_state(DoorState::Open);
        maze.doors()[2].restore_state(DoorState::Locked);

        let snapshot = MazeSnapshot::capture(&maze);
        let restored = snapshot.clone().restore().unwrap();

        assert_eq!(MazeSnapshot::capture(&restored), snapshot);
        assert_eq!(restored.to_string(), maze.to_string());
        assert_eq!(restored.doors()[1].state(), DoorState::Open);
        assert_eq!(restored.doors()[2].state(), DoorState::Locked);
    }

    #[test]
    fn restored_doors_stay_paired() {
        let restored = MazeSnapshot::capture(&generated()).restore().unwrap();
        let door = &restored.doors()[0];
        let near = restored.room(0, 0).unwrap().tile(2, 4).unwrap().as_door().unwrap();
        let far = restored.room(0, 1).unwrap().tile(2, 0).unwrap().as_door().unwrap();

        door.restore_state(DoorState::Open);
        assert_eq!(near.state(), DoorState::Open);
        assert_eq!(far.state(), DoorState::Open);
    }

    #[test]
    fn rejects_dangling_and_unpaired_doors() {
        let mut snapshot = MazeSnapshot::capture(&generated());
        let removed = snapshot.doors.remove(0);
        assert_eq!(snapshot.restore().unwrap_err(), SnapshotError::UnknownDoor(removed.id));

        let mut snapshot = MazeSnapshot::capture(&generated());
        if let Some(room) = snapshot.rooms[1][0].as_mut() {
            room.tiles[0][2] = TileSnapshot::Wall;
        }
        assert_eq!(
            snapshot.restore().unwrap_err(),
            SnapshotError::UnpairedDoor { door: DoorId(0), near: 1, far: 0 }
        );

        let mut snapshot = MazeSnapshot::capture(&generated());
        let copy = snapshot.doors[0].clone();
        snapshot.doors.push(copy);
        assert_eq!(snapshot.restore().unwrap_err(), SnapshotError::DuplicateDoor(DoorId(0)));
    }
}
