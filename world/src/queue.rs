//! Debounced input buffer attached to the player.

use std::collections::VecDeque;

use tots_core::Direction;

/// Bounded FIFO of pending directions.
///
/// The queue never holds more than `capacity` entries and refuses a direction
/// equal to the most recent input, so a held key produces a single step.
#[derive(Clone, Debug)]
pub(crate) struct MovementQueue {
    pending: VecDeque<Direction>,
    capacity: usize,
    last_movement: Option<Direction>,
}

impl MovementQueue {
    /// Creates an empty queue that holds at most `capacity` directions.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity,
            last_movement: None,
        }
    }

    /// Appends `direction` unless the queue is full or the input repeats
    /// [`peek_last`](Self::peek_last). Returns whether the direction was taken.
    pub(crate) fn enqueue(&mut self, direction: Direction) -> bool {
        if self.pending.len() >= self.capacity {
            return false;
        }

        if self.peek_last() == Some(direction) {
            return false;
        }

        self.last_movement = Some(direction);
        self.pending.push_back(direction);
        true
    }

    /// Removes and returns the oldest pending direction.
    pub(crate) fn dequeue(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Newest pending direction, falling back to the last accepted one once
    /// the queue has drained.
    pub(crate) fn peek_last(&self) -> Option<Direction> {
        self.pending.back().copied().or(self.last_movement)
    }

    /// Most recently accepted direction, even after it left the queue.
    pub(crate) const fn last_movement(&self) -> Option<Direction> {
        self.last_movement
    }

    /// Number of pending directions.
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
