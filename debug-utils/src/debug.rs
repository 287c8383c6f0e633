//! The debug context
//!
//! `DebugUtils` owns the output sink and the clock, holds the per-module
//! thresholds and display flags, and carries the console line buffer.
//! Everything runs to completion on the caller's thread.
//!
//! ## Message layout
//!
//! ```text
//! [MOTOR] [DBG_INFO   ] [ 00:01:02.003 ] message body
//! ^module ^level label  ^timestamp        ^body       ^newline (optional)
//! ```

use core::fmt;

use embedded_io::{Read, ReadReady, Write};

use crate::clock::Clock;
use crate::config::{DebugConfig, DisplayFlags, GLOBAL_MODULE, MAX_BYTES_PER_POLL};
use crate::console::LineBuffer;
use crate::error::DebugError;
use crate::format::format_message;
use crate::level::DebugLevel;
use crate::module::ModuleTable;
use crate::sink::{write_fmt, write_line, write_str};
use crate::timestamp::Timestamp;

/// Debug output context: gate, emitter and runtime console in one.
///
/// `W` is the output sink, `C` the elapsed-time source.
pub struct DebugUtils<W, C> {
    output: W,
    clock: C,
    pub(crate) modules: ModuleTable,
    pub(crate) flags: DisplayFlags,
    line: LineBuffer,
}

impl<W: Write, C: Clock> DebugUtils<W, C> {
    /// Create a context with the default configuration: global level Info,
    /// newline on, every other decoration off.
    pub fn new(output: W, clock: C) -> Self {
        Self::with_config(output, clock, DebugConfig::new())
    }

    pub fn with_config(output: W, clock: C, config: DebugConfig) -> Self {
        Self {
            output,
            clock,
            modules: ModuleTable::new(config.level),
            flags: config.flags,
            line: LineBuffer::new(config.line_ending),
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Levels
    // ───────────────────────────────────────────────────────────────────────

    /// Set the global threshold. Always succeeds.
    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.modules.set_level(GLOBAL_MODULE, level);
    }

    pub fn get_debug_level(&self) -> DebugLevel {
        self.modules.level(GLOBAL_MODULE).unwrap_or(DebugLevel::None)
    }

    /// Set one module's threshold.
    ///
    /// Out-of-range ids and unused ("NA") slots are rejected: the error is
    /// written to the output as one line and nothing changes. Module 0 is
    /// always accepted.
    pub fn set_module_level(&mut self, module: usize, level: DebugLevel) -> Result<(), DebugError> {
        let result = match self.modules.get(module) {
            None => Err(DebugError::InvalidModule(module)),
            Some(slot) if module != GLOBAL_MODULE && slot.label.is_unused() => {
                Err(DebugError::UnusedModule(module))
            }
            Some(_) => {
                self.modules.set_level(module, level);
                Ok(())
            }
        };
        if let Err(e) = result {
            self.report(e);
        }
        result
    }

    pub fn get_module_level(&self, module: usize) -> Option<DebugLevel> {
        self.modules.level(module)
    }

    /// Set every slot, unused ones included, to the same threshold.
    pub fn set_all_levels(&mut self, level: DebugLevel) {
        self.modules.set_all_levels(level);
    }

    /// Name a module slot. Registering a label other than "NA" makes the slot
    /// usable; its threshold is left as it was.
    pub fn set_module_label(&mut self, module: usize, label: &str) -> Result<(), DebugError> {
        if self.modules.set_label(module, label) {
            Ok(())
        } else {
            let e = DebugError::InvalidModule(module);
            self.report(e);
            Err(e)
        }
    }

    pub fn get_module_label(&self, module: usize) -> Option<&str> {
        self.modules.label(module)
    }

    pub fn find_module(&self, label: &str) -> Option<usize> {
        self.modules.find(label)
    }

    pub fn modules(&self) -> &ModuleTable {
        &self.modules
    }

    // ───────────────────────────────────────────────────────────────────────
    // Display flags
    // ───────────────────────────────────────────────────────────────────────

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: DisplayFlags) {
        self.flags = flags;
    }

    pub fn timestamp_on(&mut self) {
        self.flags.insert(DisplayFlags::TIMESTAMP);
    }

    pub fn timestamp_off(&mut self) {
        self.flags.remove(DisplayFlags::TIMESTAMP);
    }

    pub fn newline_on(&mut self) {
        self.flags.insert(DisplayFlags::NEWLINE);
    }

    pub fn newline_off(&mut self) {
        self.flags.remove(DisplayFlags::NEWLINE);
    }

    pub fn debug_label_on(&mut self) {
        self.flags.insert(DisplayFlags::LEVEL_LABEL);
    }

    pub fn debug_label_off(&mut self) {
        self.flags.remove(DisplayFlags::LEVEL_LABEL);
    }

    pub fn module_label_on(&mut self) {
        self.flags.insert(DisplayFlags::MODULE_LABEL);
    }

    pub fn module_label_off(&mut self) {
        self.flags.remove(DisplayFlags::MODULE_LABEL);
    }

    pub fn format_timestamp_on(&mut self) {
        self.flags.insert(DisplayFlags::FORMAT_TIMESTAMP);
    }

    pub fn format_timestamp_off(&mut self) {
        self.flags.remove(DisplayFlags::FORMAT_TIMESTAMP);
    }

    // ───────────────────────────────────────────────────────────────────────
    // Output
    // ───────────────────────────────────────────────────────────────────────

    /// Swap the output sink, returning the previous one.
    pub fn set_output(&mut self, output: W) -> W {
        core::mem::replace(&mut self.output, output)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Whether a message for `module` at `level` passes the gate.
    ///
    /// `level` must be a printable level (Error..=Verbose) no more verbose
    /// than the module's threshold. Unknown modules never emit.
    pub fn should_emit(&self, module: usize, level: DebugLevel) -> bool {
        match self.modules.level(module) {
            Some(threshold) => level.is_printable() && level <= threshold,
            None => false,
        }
    }

    /// Print a message gated on the global threshold.
    pub fn print(&mut self, level: DebugLevel, args: fmt::Arguments<'_>) {
        self.emit(None, level, args);
    }

    /// Print a message gated on `module`'s threshold.
    pub fn print_module(&mut self, module: usize, level: DebugLevel, args: fmt::Arguments<'_>) {
        self.emit(Some(module), level, args);
    }

    fn emit(&mut self, module: Option<usize>, level: DebugLevel, args: fmt::Arguments<'_>) {
        if !self.should_emit(module.unwrap_or(GLOBAL_MODULE), level) {
            return;
        }

        if self.flags.contains(DisplayFlags::MODULE_LABEL) {
            if let Some(label) = module.and_then(|m| self.modules.label(m)) {
                write_str(&mut self.output, "[");
                write_str(&mut self.output, label);
                write_str(&mut self.output, "] ");
            }
        }

        if self.flags.contains(DisplayFlags::LEVEL_LABEL) {
            if let Some(label) = level.label() {
                write_str(&mut self.output, label);
            }
        }

        if self.flags.contains(DisplayFlags::TIMESTAMP) {
            let timestamp = Timestamp {
                millis: self.clock.millis(),
                formatted: self.flags.contains(DisplayFlags::FORMAT_TIMESTAMP),
            };
            write_fmt(&mut self.output, format_args!("{}", timestamp));
        }

        let msg = format_message(args);
        write_str(&mut self.output, &msg);

        if self.flags.contains(DisplayFlags::NEWLINE) {
            write_str(&mut self.output, "\n");
        }
    }

    /// Write an error as a single line on the output.
    pub(crate) fn report(&mut self, error: DebugError) {
        crate::sink::write_fmt_line(&mut self.output, format_args!("{}", error));
    }

    pub(crate) fn reply(&mut self, text: &str) {
        write_line(&mut self.output, text);
    }

    pub(crate) fn reply_fmt(&mut self, args: fmt::Arguments<'_>) {
        crate::sink::write_fmt_line(&mut self.output, args);
    }

    // ───────────────────────────────────────────────────────────────────────
    // Console
    // ───────────────────────────────────────────────────────────────────────

    pub fn line_buffer(&self) -> &LineBuffer {
        &self.line
    }

    pub fn line_buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.line
    }

    /// Consume one console byte, running the command when a line completes.
    /// Returns true if a line was completed.
    pub fn feed(&mut self, byte: u8) -> bool {
        match self.line.feed(byte) {
            Some(line) => {
                self.run_line(line.as_bytes());
                true
            }
            None => false,
        }
    }

    /// Poll `input` for console bytes without blocking.
    ///
    /// Up to `MAX_BYTES_PER_POLL` bytes are consumed per call. Returns the
    /// number of lines completed.
    pub fn poll<R: Read + ReadReady>(&mut self, input: &mut R) -> usize {
        let mut lines = 0;
        for _ in 0..MAX_BYTES_PER_POLL {
            match input.read_ready() {
                Ok(true) => {}
                _ => break,
            }

            let mut byte = [0u8; 1];
            match input.read(&mut byte) {
                Ok(1) => {
                    if self.feed(byte[0]) {
                        lines += 1;
                    }
                }
                _ => break,
            }
        }
        lines
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
