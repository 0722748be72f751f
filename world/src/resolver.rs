//! Per-tick movement state machine and tile effects.

use tots_core::{CellCoord, Event, MotionState, PlayerSnapshot, TileKind, Velocity};
use tracing::debug;

use crate::{grid::Grid, queue::MovementQueue};

/// Authoritative state of the controllable entity.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    cell: CellCoord,
    velocity: Velocity,
    motion: MotionState,
    queue: MovementQueue,
    alive: bool,
    won: bool,
    stars_collected: u32,
}

impl Player {
    /// Places a resting player on `cell` with an empty movement queue.
    pub(crate) fn spawn(cell: CellCoord, queue_capacity: usize) -> Self {
        Self {
            cell,
            velocity: Velocity::ZERO,
            motion: MotionState::Idle,
            queue: MovementQueue::with_capacity(queue_capacity),
            alive: true,
            won: false,
            stars_collected: 0,
        }
    }

    /// Mutable access to the movement queue for input commands.
    pub(crate) fn queue_mut(&mut self) -> &mut MovementQueue {
        &mut self.queue
    }

    /// Death and victory both end the level.
    pub(crate) const fn is_terminal(&self) -> bool {
        !self.alive || self.won
    }

    /// Captures an immutable copy of the player's state.
    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: self.cell,
            velocity: self.velocity,
            motion: self.motion,
            last_movement: self.queue.last_movement(),
            queued: self.queue.len(),
            alive: self.alive,
            won: self.won,
            stars_collected: self.stars_collected,
        }
    }
}

/// Runs one resolver step for `player` against `grid`.
///
/// An idle player consolidates at most one queued direction and, when it does,
/// attempts the first step in the same tick. A moving player ignores the queue
/// and keeps stepping along its velocity until the destination is illegal.
pub(crate) fn resolve_tick(player: &mut Player, grid: &mut Grid, out_events: &mut Vec<Event>) {
    if player.motion == MotionState::Idle {
        let Some(direction) = player.queue.dequeue() else {
            return;
        };

        player.velocity = player.velocity.accumulate(direction);
        player.motion = MotionState::Moving;
        out_events.push(Event::MovementConsolidated {
            direction,
            velocity: player.velocity,
        });
    }

    let (columns, rows) = grid.dimensions();
    let from = player.cell;
    let destination = from.offset(player.velocity, columns, rows);
    let tile = destination.and_then(|cell| grid.tile(cell));

    // Effects are evaluated before, and independently of, the legality check.
    if let (Some(cell), Some(kind)) = (destination, tile) {
        apply_tile_effect(player, grid, cell, kind, out_events);
    }

    match (destination, tile) {
        (Some(to), Some(kind)) if kind.permits_entry() => {
            player.cell = to;
            out_events.push(Event::PlayerMoved { from, to });
        }
        _ => {
            debug!(
                column = from.column(),
                row = from.row(),
                ?tile,
                "movement halted"
            );
            player.motion = MotionState::Idle;
            player.velocity = Velocity::ZERO;
            out_events.push(Event::MovementHalted {
                at: from,
                blocked: destination,
            });
        }
    }
}

fn apply_tile_effect(
    player: &mut Player,
    grid: &mut Grid,
    cell: CellCoord,
    kind: TileKind,
    out_events: &mut Vec<Event>,
) {
    match kind {
        TileKind::Collectible => {
            if grid.collect(cell) {
                player.stars_collected = player.stars_collected.saturating_add(1);
                out_events.push(Event::StarCollected {
                    cell,
                    total: player.stars_collected,
                });
            }
        }
        TileKind::Hazard => {
            player.alive = false;
            out_events.push(Event::PlayerPerished { hazard: cell });
        }
        TileKind::Goal => {
            player.won = true;
            out_events.push(Event::GoalReached { cell });
        }
        TileKind::Empty | TileKind::Wall | TileKind::Unrecognized(_) => {}
    }
}
