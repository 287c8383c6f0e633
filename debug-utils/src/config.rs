//! Configuration constants and start-up defaults.

use crate::level::DebugLevel;

/// Number of module slots, including the global slot 0
pub const MAX_MODULES: usize = 16;
/// Module label storage size; one byte is reserved so at most 9 are kept
pub const MODULE_LABEL_SIZE: usize = 10;
/// Console line buffer size; at most `COMMAND_BUFFER_SIZE - 1` bytes are kept
pub const COMMAND_BUFFER_SIZE: usize = 16;
/// Bytes consumed from the input per poll, to keep the caller responsive
pub const MAX_BYTES_PER_POLL: usize = 16;

/// Module id used when no module is given
pub const GLOBAL_MODULE: usize = 0;
pub const GLOBAL_LABEL: &str = "GLOBAL";
/// Label marking an unused module slot
pub const UNUSED_LABEL: &str = "NA";

pub const DEFAULT_DEBUG_LEVEL: DebugLevel = DebugLevel::Info;

bitflags::bitflags! {
    /// Output decorations
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DisplayFlags: u8 {
        /// Prefix messages with the elapsed time
        const TIMESTAMP = 1 << 0;
        /// Render the timestamp as HH:MM:SS.mmm instead of raw milliseconds
        const FORMAT_TIMESTAMP = 1 << 1;
        /// Prefix messages with the level label
        const LEVEL_LABEL = 1 << 2;
        /// Prefix module-scoped messages with the module label
        const MODULE_LABEL = 1 << 3;
        /// Terminate every message with a newline
        const NEWLINE = 1 << 4;
    }
}

impl Default for DisplayFlags {
    fn default() -> Self {
        DisplayFlags::NEWLINE
    }
}

/// Which bytes end a console line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// Only `\n`; a stray `\r` is dropped
    #[default]
    Lf,
    /// Both `\r` and `\n`
    CrOrLf,
}

/// Runtime start-up settings for a [`crate::DebugUtils`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebugConfig {
    /// Threshold of the global module
    pub level: DebugLevel,
    pub flags: DisplayFlags,
    pub line_ending: LineEnding,
}

impl DebugConfig {
    pub const fn new() -> Self {
        Self {
            level: DEFAULT_DEBUG_LEVEL,
            flags: DisplayFlags::NEWLINE,
            line_ending: LineEnding::Lf,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self::new()
    }
}
