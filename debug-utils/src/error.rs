//! Errors reported by configuration calls and console commands.
//!
//! None of these are fatal. Each one is written to the output as a single
//! line and the call that produced it changes nothing.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugError {
    /// Module id outside the module table
    InvalidModule(usize),
    /// Module slot is labeled "NA"
    UnusedModule(usize),
    /// Level letter not one of v/d/i/w/e/n
    UnknownLevel(char),
    /// Single-character console command not recognized
    InvalidCommand(char),
}

impl fmt::Display for DebugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugError::InvalidModule(id) => write!(f, "Error: invalid module id {}", id),
            DebugError::UnusedModule(id) => write!(f, "Error: module {} is not in use (NA)", id),
            DebugError::UnknownLevel(c) => {
                write!(f, "Error: unknown debug level '{}', use one of v d i w e n", c)
            }
            DebugError::InvalidCommand(c) => write!(
                f,
                "Error: invalid command '{}', use one of v d i w e n ? s t c l m, <id><level> or A<level>",
                c
            ),
        }
    }
}

impl core::error::Error for DebugError {}
