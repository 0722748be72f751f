//! Headless play loop driving the world one tick at a time.

use std::fmt;

use tots_core::{CellCoord, Command, Event};
use tots_system_controls::{Controls, InputSymbol};
use tots_system_outcome::{LevelOutcome, Outcome};
use tots_world::{self as world, query, World};
use tracing::{debug, warn};

use crate::script::ScriptStep;

/// Owns the world and the systems fed from its events.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    controls: Controls,
    outcome: Outcome,
    commands: Vec<Command>,
    events: Vec<Event>,
}

/// Final state reported once a session stops ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) outcome: LevelOutcome,
    pub(crate) cell: CellCoord,
    pub(crate) stars_collected: u32,
    pub(crate) stars_remaining: usize,
    pub(crate) ticks: u64,
}

impl Session {
    /// Wraps a freshly loaded world.
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            controls: Controls::new(),
            outcome: Outcome::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Plays the script, then lets the player settle, bounded by `max_ticks`.
    pub(crate) fn run(mut self, script: &[ScriptStep], max_ticks: u64) -> Summary {
        let mut ticks = 0_u64;

        for step in script {
            if self.outcome.is_finished() || ticks >= max_ticks {
                break;
            }
            self.step(step.symbol());
            ticks += 1;
        }

        while !self.outcome.is_finished() && ticks < max_ticks {
            let player = query::player(&self.world);
            if !player.is_moving() && player.queued == 0 {
                break;
            }
            self.step(None);
            ticks += 1;
        }

        if ticks >= max_ticks && !self.outcome.is_finished() {
            warn!(max_ticks, "tick limit reached before the level finished");
        }

        self.summary()
    }

    fn step(&mut self, symbol: Option<InputSymbol>) {
        self.commands.clear();
        self.events.clear();

        if let Some(symbol) = symbol {
            self.controls.handle(&[symbol], &mut self.commands);
        }
        self.commands.push(Command::Tick);

        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in &self.events {
            debug!(?event, "world event");
        }
        self.outcome.handle(&self.events);
    }

    fn summary(&self) -> Summary {
        let player = query::player(&self.world);
        Summary {
            outcome: self.outcome.outcome(),
            cell: player.cell,
            stars_collected: player.stars_collected,
            stars_remaining: query::stars_remaining(&self.world),
            ticks: query::tick_index(&self.world),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            LevelOutcome::InProgress => "unfinished",
            LevelOutcome::Won { .. } => "goal reached",
            LevelOutcome::Perished { .. } => "perished",
        };
        writeln!(f, "outcome: {outcome}")?;
        writeln!(
            f,
            "position: ({}, {})",
            self.cell.column(),
            self.cell.row()
        )?;
        writeln!(
            f,
            "stars: {} collected, {} remaining",
            self.stars_collected, self.stars_remaining
        )?;
        write!(f, "ticks: {}", self.ticks)
    }
}
