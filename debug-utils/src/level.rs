//! Debug levels
//!
//! Ordered from least to most verbose. A module threshold of `None`
//! silences the module; a message level of `None` is never printed.

use core::str::FromStr;

/// Message severity / module threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum DebugLevel {
    /// Nothing is printed
    None = -1,
    /// Error conditions
    Error = 0,
    /// Warning conditions
    Warning = 1,
    /// Informational
    Info = 2,
    /// Debug-level messages
    Debug = 3,
    /// Very chatty
    Verbose = 4,
}

impl DebugLevel {
    /// All levels that can be attached to a message, least verbose first.
    pub const PRINTABLE: [DebugLevel; 5] = [
        DebugLevel::Error,
        DebugLevel::Warning,
        DebugLevel::Info,
        DebugLevel::Debug,
        DebugLevel::Verbose,
    ];

    /// Convert a raw numeric level. Anything outside -1..=4 is rejected.
    pub const fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(DebugLevel::None),
            0 => Some(DebugLevel::Error),
            1 => Some(DebugLevel::Warning),
            2 => Some(DebugLevel::Info),
            3 => Some(DebugLevel::Debug),
            4 => Some(DebugLevel::Verbose),
            _ => None,
        }
    }

    /// Map a console command letter (case-insensitive) to a level.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'v' => Some(DebugLevel::Verbose),
            'd' => Some(DebugLevel::Debug),
            'i' => Some(DebugLevel::Info),
            'w' => Some(DebugLevel::Warning),
            'e' => Some(DebugLevel::Error),
            'n' => Some(DebugLevel::None),
            _ => None,
        }
    }

    /// Whether a message at this level can be printed at all.
    pub const fn is_printable(self) -> bool {
        (self as i8) >= (DebugLevel::Error as i8) && (self as i8) <= (DebugLevel::Verbose as i8)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DebugLevel::None => "NONE",
            DebugLevel::Error => "ERROR",
            DebugLevel::Warning => "WARNING",
            DebugLevel::Info => "INFO",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Verbose => "VERBOSE",
        }
    }

    /// Fixed-width prefix written before a message when level labels are on.
    /// `None` has no label.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            DebugLevel::None => None,
            DebugLevel::Error => Some("[DBG_ERROR  ] "),
            DebugLevel::Warning => Some("[DBG_WARNING] "),
            DebugLevel::Info => Some("[DBG_INFO   ] "),
            DebugLevel::Debug => Some("[DBG_DEBUG  ] "),
            DebugLevel::Verbose => Some("[DBG_VERBOSE] "),
        }
    }
}

impl core::fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no debug level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLevelError;

impl core::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "expected one of: none, error, warning, info, debug, verbose")
    }
}

impl core::error::Error for ParseLevelError {}

impl FromStr for DebugLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return DebugLevel::from_letter(c).ok_or(ParseLevelError);
        }

        for level in [DebugLevel::None].into_iter().chain(DebugLevel::PRINTABLE) {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }
        if s.eq_ignore_ascii_case("warn") {
            return Ok(DebugLevel::Warning);
        }
        Err(ParseLevelError)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
