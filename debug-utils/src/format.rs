//! Message body formatting.
//!
//! The body is rendered in two passes: the first only measures the output,
//! the second writes into a buffer allocated at exactly that size. A message
//! is never cut short by a fixed buffer.

use alloc::string::String;
use core::fmt::{self, Write};

/// `fmt::Write` sink that only counts bytes
#[derive(Default)]
struct LengthCounter {
    len: usize,
}

impl Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += s.len();
        Ok(())
    }
}

/// Number of bytes `args` renders to.
pub fn formatted_len(args: fmt::Arguments<'_>) -> usize {
    let mut counter = LengthCounter::default();
    // LengthCounter never fails; an error here comes from a Display impl
    let _ = fmt::write(&mut counter, args);
    counter.len
}

/// Render `args` into an exactly-sized `String`.
pub fn format_message(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return String::from(s);
    }

    let len = formatted_len(args);
    let mut msg = String::with_capacity(len);
    let _ = msg.write_fmt(args);
    msg
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
