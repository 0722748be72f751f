#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns raw input symbols into movement commands.
//!
//! The mapping is static and knows nothing about the player: every recognised
//! symbol becomes a [`Command::QueueMovement`], and debouncing is left to the
//! world's movement queue.

use tots_core::{Command, Direction};

/// Raw input symbols an adapter may observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    /// Up arrow key.
    ArrowUp,
    /// Down arrow key.
    ArrowDown,
    /// Left arrow key.
    ArrowLeft,
    /// Right arrow key.
    ArrowRight,
    /// `W` key.
    W,
    /// `A` key.
    A,
    /// `S` key.
    S,
    /// `D` key.
    D,
}

/// Static binding table from input symbols to directions.
pub const BINDINGS: [(InputSymbol, Direction); 8] = [
    (InputSymbol::ArrowUp, Direction::Up),
    (InputSymbol::ArrowDown, Direction::Down),
    (InputSymbol::ArrowLeft, Direction::Left),
    (InputSymbol::ArrowRight, Direction::Right),
    (InputSymbol::W, Direction::Up),
    (InputSymbol::S, Direction::Down),
    (InputSymbol::A, Direction::Left),
    (InputSymbol::D, Direction::Right),
];

impl InputSymbol {
    /// Direction bound to the symbol.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::ArrowUp | Self::W => Direction::Up,
            Self::ArrowDown | Self::S => Direction::Down,
            Self::ArrowLeft | Self::A => Direction::Left,
            Self::ArrowRight | Self::D => Direction::Right,
        }
    }

    /// Parses a scripted input character.
    ///
    /// `w`, `a`, `s` and `d` (either case) name the letter keys, while `^`,
    /// `v`, `<` and `>` name the arrow keys.
    #[must_use]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'w' | 'W' => Some(Self::W),
            'a' | 'A' => Some(Self::A),
            's' | 'S' => Some(Self::S),
            'd' | 'D' => Some(Self::D),
            '^' => Some(Self::ArrowUp),
            'v' => Some(Self::ArrowDown),
            '<' => Some(Self::ArrowLeft),
            '>' => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Pure system that translates observed symbols into world commands.
#[derive(Debug, Default)]
pub struct Controls;

impl Controls {
    /// Creates the controls system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one movement command per observed symbol, preserving input order.
    pub fn handle(&self, symbols: &[InputSymbol], out: &mut Vec<Command>) {
        out.extend(symbols.iter().map(|symbol| Command::QueueMovement {
            direction: symbol.direction(),
        }));
    }
}
