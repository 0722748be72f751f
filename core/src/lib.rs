#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the TOTS tile puzzle.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every title the experience presents.
pub const TITLE_PREFIX: &str = "TOTS: ";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Buffers a directional input on the player's movement queue.
    ///
    /// Rejected silently when the queue is full or when the direction repeats
    /// the most recent input.
    QueueMovement {
        /// Direction requested by the input collaborator.
        direction: Direction,
    },
    /// Advances the simulation by exactly one discrete step.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a direction was accepted into the movement queue.
    MovementQueued {
        /// Direction appended to the queue.
        direction: Direction,
    },
    /// Indicates that the simulation advanced by one tick.
    TimeAdvanced {
        /// Index of the tick that just completed, starting at one.
        tick: u64,
    },
    /// Reports that a queued direction was converted into active velocity.
    MovementConsolidated {
        /// Direction taken from the front of the queue.
        direction: Direction,
        /// Velocity after the direction was accumulated.
        velocity: Velocity,
    },
    /// Confirms that the player committed a step between two cells.
    PlayerMoved {
        /// Cell the player occupied before the step.
        from: CellCoord,
        /// Cell the player occupies after the step.
        to: CellCoord,
    },
    /// Reports that the player's destination was illegal and motion stopped.
    MovementHalted {
        /// Cell where the player came to rest.
        at: CellCoord,
        /// In-bounds cell that refused entry, or `None` when the destination left the grid.
        blocked: Option<CellCoord>,
    },
    /// Confirms that a collectible star was picked up.
    StarCollected {
        /// Cell that held the star and is now empty.
        cell: CellCoord,
        /// Number of stars collected so far, including this one.
        total: u32,
    },
    /// Announces that the player ran into a hazard.
    PlayerPerished {
        /// Hazard cell responsible for the death.
        hazard: CellCoord,
    },
    /// Announces that the player reached the goal tile.
    GoalReached {
        /// Goal cell the player entered.
        cell: CellCoord,
    },
}

/// Cardinal directions accepted by the movement queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector of the direction expressed as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Integer velocity measured in cells per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// Velocity of a resting entity.
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };

    /// Creates a velocity from explicit components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component; positive values point right.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component; positive values point down.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether both components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Returns the velocity with the direction's unit vector added on top.
    #[must_use]
    pub const fn accumulate(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            dx: self.dx.saturating_add(dx),
            dy: self.dy.saturating_add(dy),
        }
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        Velocity::ZERO.accumulate(direction)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Displaces the cell by `velocity`, returning `None` when the result
    /// falls outside a grid of `columns` by `rows` cells.
    #[must_use]
    pub fn offset(self, velocity: Velocity, columns: u32, rows: u32) -> Option<CellCoord> {
        let column = i64::from(self.column) + i64::from(velocity.dx());
        let row = i64::from(self.row) + i64::from(velocity.dy());
        if column < 0 || row < 0 || column >= i64::from(columns) || row >= i64::from(rows) {
            return None;
        }

        Some(CellCoord::new(
            u32::try_from(column).ok()?,
            u32::try_from(row).ok()?,
        ))
    }
}

/// Semantics attached to a single cell of the level map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Open floor.
    Empty,
    /// Impassable block.
    Wall,
    /// Deadly tile; stepping toward it kills the player.
    Hazard,
    /// Star that is picked up and cleared when entered.
    Collectible,
    /// Exit tile that wins the level.
    Goal,
    /// Code without a known meaning. Treated as a wall for collisions.
    Unrecognized(i64),
}

impl TileKind {
    /// Level file code for empty floor.
    pub const EMPTY_CODE: i64 = 0;
    /// Level file code for walls.
    pub const WALL_CODE: i64 = 2;
    /// Level file code for hazards.
    pub const HAZARD_CODE: i64 = 3;
    /// Level file code for collectible stars.
    pub const COLLECTIBLE_CODE: i64 = 4;
    /// Level file code for the goal.
    pub const GOAL_CODE: i64 = 5;

    /// Maps a level file code onto its tile kind.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::EMPTY_CODE => Self::Empty,
            Self::WALL_CODE => Self::Wall,
            Self::HAZARD_CODE => Self::Hazard,
            Self::COLLECTIBLE_CODE => Self::Collectible,
            Self::GOAL_CODE => Self::Goal,
            other => Self::Unrecognized(other),
        }
    }

    /// Level file code that produces this tile kind.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Empty => Self::EMPTY_CODE,
            Self::Wall => Self::WALL_CODE,
            Self::Hazard => Self::HAZARD_CODE,
            Self::Collectible => Self::COLLECTIBLE_CODE,
            Self::Goal => Self::GOAL_CODE,
            Self::Unrecognized(code) => code,
        }
    }

    /// Reports whether the player may occupy a cell of this kind.
    #[must_use]
    pub const fn permits_entry(self) -> bool {
        matches!(self, Self::Empty | Self::Collectible | Self::Goal)
    }
}

/// Read-only view into the level's tile grid.
#[derive(Clone, Copy, Debug)]
pub struct TileView<'a> {
    tiles: &'a [TileKind],
    columns: u32,
    rows: u32,
}

impl<'a> TileView<'a> {
    /// Captures a new tile view backed by the provided row-major slice.
    #[must_use]
    pub fn new(tiles: &'a [TileKind], columns: u32, rows: u32) -> Self {
        Self {
            tiles,
            columns,
            rows,
        }
    }

    /// Returns the tile stored at the provided cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileKind> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Provides the dimensions of the underlying grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Iterates over every cell in row-major order together with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, TileKind)> + 'a {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % columns, index / columns), *kind)
        })
    }

    /// Counts the cells holding the provided tile kind.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Resolver state of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Waiting for the next queued direction.
    #[default]
    Idle,
    /// Sliding one cell per tick along the current velocity.
    Moving,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    /// Grid cell currently occupied by the player.
    pub cell: CellCoord,
    /// Velocity applied on every tick while moving.
    pub velocity: Velocity,
    /// Current resolver state.
    pub motion: MotionState,
    /// Most recently accepted direction, used to debounce repeated input.
    pub last_movement: Option<Direction>,
    /// Number of directions waiting in the movement queue.
    pub queued: usize,
    /// Cleared once the player runs into a hazard.
    pub alive: bool,
    /// Set once the player enters the goal.
    pub won: bool,
    /// Stars picked up so far.
    pub stars_collected: u32,
}

impl PlayerSnapshot {
    /// Reports whether the player is currently sliding.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.motion, MotionState::Moving)
    }

    /// Reports whether the level has reached a terminal outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.alive || self.won
    }
}

/// Level description produced by an external loader.
///
/// Only the spawn point and the tile matrix are consumed. The serialized form
/// matches the level files: `{"playerSpawn": [x, y], "levelMap": [[0, 2], ...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    /// Column and row where the player starts.
    pub player_spawn: (i64, i64),
    /// Rows of tile codes, top row first.
    pub level_map: Vec<Vec<i64>>,
}

impl LevelData {
    /// Creates a level description from a spawn point and a tile matrix.
    #[must_use]
    pub fn new(player_spawn: (i64, i64), level_map: Vec<Vec<i64>>) -> Self {
        Self {
            player_spawn,
            level_map,
        }
    }
}

/// Reasons a level description cannot be turned into a playable world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The tile matrix has no rows or its first row has no cells.
    #[error("level map contains no tiles")]
    EmptyMap,
    /// A row is wider or narrower than the first row.
    #[error("level map row {row} has {found} tiles but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The spawn point does not lie on the map.
    #[error("player spawn ({x}, {y}) lies outside the {columns}x{rows} level map")]
    SpawnOutOfBounds {
        /// Requested spawn column.
        x: i64,
        /// Requested spawn row.
        y: i64,
        /// Width of the map.
        columns: usize,
        /// Height of the map.
        rows: usize,
    },
    /// The map does not fit the grid's coordinate range.
    #[error("level map of {columns}x{rows} tiles exceeds the supported grid size")]
    Oversized {
        /// Width of the map.
        columns: usize,
        /// Height of the map.
        rows: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, LevelData, TileKind, TileView, Velocity};

    #[test]
    fn tile_codes_map_onto_kinds() {
        assert_eq!(TileKind::from_code(0), TileKind::Empty);
        assert_eq!(TileKind::from_code(2), TileKind::Wall);
        assert_eq!(TileKind::from_code(3), TileKind::Hazard);
        assert_eq!(TileKind::from_code(4), TileKind::Collectible);
        assert_eq!(TileKind::from_code(5), TileKind::Goal);
        assert_eq!(TileKind::from_code(1), TileKind::Unrecognized(1));
        assert_eq!(TileKind::from_code(-7).code(), -7);
    }

    #[test]
    fn only_floor_stars_and_goal_permit_entry() {
        let passable: Vec<i64> = (-1..8)
            .filter(|code| TileKind::from_code(*code).permits_entry())
            .collect();
        assert_eq!(passable, vec![0, 4, 5]);
    }

    #[test]
    fn velocity_accumulates_unit_vectors() {
        let velocity = Velocity::ZERO.accumulate(Direction::Right);
        assert_eq!(velocity, Velocity::new(1, 0));
        assert_eq!(velocity.accumulate(Direction::Up), Velocity::new(1, -1));
        assert_eq!(Velocity::from(Direction::Down), Velocity::new(0, 1));
    }

    #[test]
    fn offset_rejects_destinations_outside_grid() {
        let origin = CellCoord::new(0, 2);
        assert_eq!(origin.offset(Direction::Left.into(), 3, 3), None);
        assert_eq!(origin.offset(Direction::Down.into(), 3, 3), None);
        assert_eq!(
            origin.offset(Direction::Right.into(), 3, 3),
            Some(CellCoord::new(1, 2))
        );
    }

    #[test]
    fn tile_view_iterates_in_row_major_order() {
        let tiles = [
            TileKind::Wall,
            TileKind::Empty,
            TileKind::Goal,
            TileKind::Collectible,
            TileKind::Empty,
            TileKind::Collectible,
        ];
        let view = TileView::new(&tiles, 3, 2);

        let cells: Vec<_> = view.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells[2], CellCoord::new(2, 0));
        assert_eq!(cells[3], CellCoord::new(0, 1));
        assert_eq!(view.tile(CellCoord::new(2, 1)), Some(TileKind::Collectible));
        assert_eq!(view.tile(CellCoord::new(3, 0)), None);
        assert_eq!(view.count(TileKind::Collectible), 2);
    }

    #[test]
    fn level_data_reads_level_file_field_names() {
        let json = r#"{"playerSpawn": [1, 2], "levelMap": [[2, 2], [0, 5], [4, 3]]}"#;
        let level: LevelData = serde_json::from_str(json).expect("level parses");
        assert_eq!(level.player_spawn, (1, 2));
        assert_eq!(level.level_map[1], vec![0, 5]);
    }
}
