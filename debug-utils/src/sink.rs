//! Output helpers over any `embedded_io::Write`.
//!
//! Write errors are dropped: a write either lands or the sink decides what
//! happens, same as a bare UART.

use core::fmt;

use embedded_io::Write;

/// Adapter letting `core::fmt` machinery write straight into a sink
pub struct FmtSink<'a, W: Write>(pub &'a mut W);

impl<W: Write> fmt::Write for FmtSink<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Write a raw string.
pub fn write_str<W: Write>(out: &mut W, s: &str) {
    let _ = out.write_all(s.as_bytes());
}

/// Write a raw string followed by `\n`.
pub fn write_line<W: Write>(out: &mut W, s: &str) {
    let _ = out.write_all(s.as_bytes());
    let _ = out.write_all(b"\n");
}

/// Format into the sink without any intermediate buffer.
pub fn write_fmt<W: Write>(out: &mut W, args: fmt::Arguments<'_>) {
    let _ = fmt::write(&mut FmtSink(out), args);
}

/// Format into the sink and end the line.
pub fn write_fmt_line<W: Write>(out: &mut W, args: fmt::Arguments<'_>) {
    write_fmt(out, args);
    let _ = out.write_all(b"\n");
}
