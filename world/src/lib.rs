#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for TOTS.
//!
//! A [`World`] is the session object for a single level: it owns the tile grid
//! and the player together and is replaced wholesale when another level is
//! loaded. Adapters and systems never touch its fields directly. They mutate it
//! through [`apply`] and read it through the [`query`] module.

mod grid;
mod queue;
mod resolver;

use tots_core::{CellCoord, Command, Event, LevelData, LevelError};
use tracing::{debug, info};

use self::{grid::Grid, resolver::Player};

/// Number of directions the movement queue buffers unless configured otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1;

/// Tunables applied when a level is loaded into a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    queue_capacity: usize,
}

impl WorldConfig {
    /// Creates a configuration with the provided movement queue capacity.
    #[must_use]
    pub const fn new(queue_capacity: usize) -> Self {
        Self { queue_capacity }
    }

    /// Maximum number of directions buffered by the player's movement queue.
    #[must_use]
    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Represents the authoritative state of one loaded level.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    player: Player,
    tick_index: u64,
}

impl World {
    /// Builds the grid and spawns the player from externally loaded level data.
    pub fn from_level(level: &LevelData, config: WorldConfig) -> Result<Self, LevelError> {
        let grid = Grid::from_codes(&level.level_map)?;
        let (columns, rows) = grid.dimensions();
        let (x, y) = level.player_spawn;
        let spawn = spawn_cell(x, y, columns, rows).ok_or(LevelError::SpawnOutOfBounds {
            x,
            y,
            columns: level.level_map.first().map_or(0, Vec::len),
            rows: level.level_map.len(),
        })?;

        info!(
            columns,
            rows,
            spawn_column = spawn.column(),
            spawn_row = spawn.row(),
            "level loaded"
        );

        Ok(Self {
            grid,
            player: Player::spawn(spawn, config.queue_capacity()),
            tick_index: 0,
        })
    }
}

fn spawn_cell(x: i64, y: i64, columns: u32, rows: u32) -> Option<CellCoord> {
    let column = u32::try_from(x).ok()?;
    let row = u32::try_from(y).ok()?;
    (column < columns && row < rows).then(|| CellCoord::new(column, row))
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::QueueMovement { direction } => {
            if world.player.queue_mut().enqueue(direction) {
                out_events.push(Event::MovementQueued { direction });
            }
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });

            if world.player.is_terminal() {
                debug!(tick = world.tick_index, "level finished, tick ignored");
                return;
            }

            resolver::resolve_tick(&mut world.player, &mut world.grid, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tots_core::{CellCoord, PlayerSnapshot, TileKind, TileView};

    use super::World;

    /// Captures the player's position, motion and outcome flags.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Exposes a read-only view of the tile grid.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView<'_> {
        world.grid.view()
    }

    /// Returns the tile stored at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn tile(world: &World, cell: CellCoord) -> Option<TileKind> {
        world.grid.tile(cell)
    }

    /// Dimensions of the level as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Number of ticks processed since the level was loaded.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Number of stars still waiting to be collected.
    #[must_use]
    pub fn stars_remaining(world: &World) -> usize {
        world.grid.view().count(TileKind::Collectible)
    }

    /// Distinct tile codes the level used without a known meaning.
    #[must_use]
    pub fn unrecognized_codes(world: &World) -> &[i64] {
        world.grid.unrecognized_codes()
    }
}
