//! Console line accumulator
//!
//! Bytes arrive one at a time from a polled input. They are collected into a
//! fixed buffer until a line terminator and the finished line is handed back
//! to the caller for interpretation.
//!
//! ## Overflow
//!
//! At most `COMMAND_BUFFER_SIZE - 1` bytes are kept. Anything after that is
//! dropped until the terminator arrives; the buffer is never written past its
//! end and the retained prefix is what gets interpreted.

use crate::config::{LineEnding, COMMAND_BUFFER_SIZE};

/// A completed console line
#[derive(Clone, Copy)]
pub struct Line {
    buffer: [u8; COMMAND_BUFFER_SIZE],
    len: usize,
}

impl Line {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for Line {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Line({:?})", core::str::from_utf8(self.as_bytes()).unwrap_or("<binary>"))
    }
}

/// Fixed-capacity line buffer with a write cursor
pub struct LineBuffer {
    buffer: [u8; COMMAND_BUFFER_SIZE],
    len: usize,
    line_ending: LineEnding,
}

impl LineBuffer {
    pub const fn new(line_ending: LineEnding) -> Self {
        Self {
            buffer: [0u8; COMMAND_BUFFER_SIZE],
            len: 0,
            line_ending,
        }
    }

    /// Consume one input byte. Returns the finished line on a terminator.
    ///
    /// The cursor is reset on every terminator, so an empty line comes back
    /// as an empty `Line`.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\n' => Some(self.take()),
            b'\r' => match self.line_ending {
                LineEnding::CrOrLf => Some(self.take()),
                LineEnding::Lf => None,
            },
            _ => {
                if self.len < COMMAND_BUFFER_SIZE - 1 {
                    self.buffer[self.len] = byte;
                    self.len += 1;
                }
                None
            }
        }
    }

    /// Bytes collected so far
    pub fn pending(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    fn take(&mut self) -> Line {
        let line = Line {
            buffer: self.buffer,
            len: self.len,
        };
        self.len = 0;
        line
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
