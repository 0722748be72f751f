#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Outcome system that watches world events and decides when play is over.
//!
//! The world never stops itself once the player dies or wins. The external
//! loop consults [`Outcome::is_finished`] after every tick instead.

use tots_core::Event;
use tracing::info;

/// Result of a level as observed through world events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LevelOutcome {
    /// Neither the goal nor a hazard has been reached yet.
    #[default]
    InProgress,
    /// The player entered the goal.
    Won {
        /// Stars collected before the goal was reached.
        stars: u32,
    },
    /// The player ran into a hazard.
    Perished {
        /// Stars collected before the player died.
        stars: u32,
    },
}

/// Pure system that folds world events into a level outcome.
#[derive(Debug, Default)]
pub struct Outcome {
    outcome: LevelOutcome,
    stars: u32,
    ticks: u64,
    steps: u64,
}

impl Outcome {
    /// Creates a tracker for a freshly loaded level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the events produced by one or more applied commands.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::TimeAdvanced { tick } => self.ticks = tick,
                Event::PlayerMoved { .. } => self.steps = self.steps.saturating_add(1),
                Event::StarCollected { total, .. } => self.stars = total,
                Event::PlayerPerished { hazard } if !self.is_finished() => {
                    info!(
                        column = hazard.column(),
                        row = hazard.row(),
                        "player perished"
                    );
                    self.outcome = LevelOutcome::Perished { stars: self.stars };
                }
                Event::GoalReached { cell } if !self.is_finished() => {
                    info!(
                        column = cell.column(),
                        row = cell.row(),
                        stars = self.stars,
                        "goal reached"
                    );
                    self.outcome = LevelOutcome::Won { stars: self.stars };
                }
                _ => {}
            }
        }
    }

    /// Current outcome of the level.
    #[must_use]
    pub const fn outcome(&self) -> LevelOutcome {
        self.outcome
    }

    /// Reports whether the external loop should stop ticking.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !matches!(self.outcome, LevelOutcome::InProgress)
    }

    /// Stars collected so far.
    #[must_use]
    pub const fn stars(&self) -> u32 {
        self.stars
    }

    /// Index of the most recent tick observed.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of committed steps observed.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }
}
