//! Parser for the `--moves` input script.
//!
//! Each character feeds one tick: a control symbol (`w a s d` in either case
//! or `^ v < >` for the arrow keys) or `.` for a tick without input.
//! Whitespace separates groups and is ignored.

use anyhow::{bail, Result};
use tots_system_controls::InputSymbol;

const WAIT_SYMBOL: char = '.';

/// Input delivered during a single scripted tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptStep {
    /// A control symbol pressed before the tick.
    Press(InputSymbol),
    /// The tick passes without input.
    Wait,
}

impl ScriptStep {
    /// Symbol pressed during this step, if any.
    pub(crate) const fn symbol(self) -> Option<InputSymbol> {
        match self {
            Self::Press(symbol) => Some(symbol),
            Self::Wait => None,
        }
    }
}

/// Parses a moves script into one step per tick.
pub(crate) fn parse(script: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::with_capacity(script.len());
    for (position, symbol) in script.chars().enumerate() {
        if symbol.is_whitespace() {
            continue;
        }
        if symbol == WAIT_SYMBOL {
            steps.push(ScriptStep::Wait);
            continue;
        }
        match InputSymbol::from_char(symbol) {
            Some(input) => steps.push(ScriptStep::Press(input)),
            None => bail!(
                "unknown move `{symbol}` at position {position}; expected one of w a s d ^ v < > ."
            ),
        }
    }
    Ok(steps)
}
