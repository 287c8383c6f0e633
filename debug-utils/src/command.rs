//! Runtime console commands
//!
//! One command per line, command letters are case-insensitive:
//!
//! | Input            | Effect                                        |
//! |------------------|-----------------------------------------------|
//! | `v d i w e n`    | set the global level                          |
//! | `<id><level>`    | set module `<id>` level, e.g. `2v`            |
//! | `A<level>`       | set every module slot to `<level>`            |
//! | `?`              | help                                          |
//! | `s`              | status table                                  |
//! | `t` `c` `l` `m`  | toggle timestamp / newline / level / module   |
//!
//! Lines are matched against the `<id><level>` form first, then `A<level>`,
//! then as a single character. Longer input matching none of these is
//! ignored without a reply.

use embedded_io::Write;

use crate::clock::Clock;
use crate::config::{DisplayFlags, MAX_MODULES};
use crate::debug::DebugUtils;
use crate::error::DebugError;
use crate::level::DebugLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the global threshold
    SetLevel(DebugLevel),
    /// Set one module's threshold
    SetModuleLevel { module: usize, level: DebugLevel },
    /// Set every module slot's threshold
    SetAllLevels(DebugLevel),
    Help,
    Status,
    ToggleTimestamp,
    ToggleNewline,
    ToggleLevelLabel,
    ToggleModuleLabel,
}

const HELP_TEXT: &[&str] = &[
    "Debug console commands:",
    "  v d i w e n   set global level (verbose debug info warning error none)",
    "  <id><level>   set module level, e.g. 2v",
    "  A<level>      set level of all modules, e.g. Ae",
    "  ?             this help",
    "  s             show status",
    "  t             toggle timestamp",
    "  c             toggle newline after each message",
    "  l             toggle level label",
    "  m             toggle module label",
];

fn level_letter(byte: u8) -> Result<DebugLevel, DebugError> {
    let letter = byte as char;
    DebugLevel::from_letter(letter).ok_or(DebugError::UnknownLevel(letter))
}

/// Parse one console line.
///
/// `None` means the line is ignored: it is empty, or longer than one
/// character and matches neither multi-character form.
pub fn parse_command(line: &[u8]) -> Option<Result<Command, DebugError>> {
    let (last, prefix) = line.split_last()?;

    // <digits><letter>
    if !prefix.is_empty() && !last.is_ascii_digit() && prefix.iter().all(u8::is_ascii_digit) {
        let module = prefix.iter().fold(0usize, |acc, d| {
            acc.saturating_mul(10).saturating_add((d - b'0') as usize)
        });
        if module >= MAX_MODULES {
            return Some(Err(DebugError::InvalidModule(module)));
        }
        return Some(level_letter(*last).map(|level| Command::SetModuleLevel { module, level }));
    }

    // A<letter>
    if let [b'a' | b'A', letter] = line {
        return Some(level_letter(*letter).map(Command::SetAllLevels));
    }

    if !prefix.is_empty() {
        return None;
    }

    let letter = *last as char;
    let cmd = match letter.to_ascii_lowercase() {
        '?' => Command::Help,
        's' => Command::Status,
        't' => Command::ToggleTimestamp,
        'c' => Command::ToggleNewline,
        'l' => Command::ToggleLevelLabel,
        'm' => Command::ToggleModuleLabel,
        c => match DebugLevel::from_letter(c) {
            Some(level) => Command::SetLevel(level),
            None => return Some(Err(DebugError::InvalidCommand(letter))),
        },
    };
    Some(Ok(cmd))
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

impl<W: Write, C: Clock> DebugUtils<W, C> {
    /// Parse and run one console line. Errors are reported on the output.
    pub fn run_line(&mut self, line: &[u8]) {
        match parse_command(line) {
            Some(Ok(cmd)) => {
                let _ = self.execute(cmd);
            }
            Some(Err(e)) => self.report(e),
            None => {}
        }
    }

    /// Run a console command, writing a confirmation or an error line.
    pub fn execute(&mut self, cmd: Command) -> Result<(), DebugError> {
        match cmd {
            Command::SetLevel(level) => {
                self.set_debug_level(level);
                self.reply_fmt(format_args!("Debug level set to {}", level));
            }
            Command::SetModuleLevel { module, level } => {
                self.set_module_level(module, level)?;
                let label = self.modules.get(module).map(|slot| slot.label);
                if let Some(label) = label {
                    self.reply_fmt(format_args!(
                        "Module {} ({}) debug level set to {}",
                        module, label, level
                    ));
                }
            }
            Command::SetAllLevels(level) => {
                self.set_all_levels(level);
                self.reply_fmt(format_args!("All modules debug level set to {}", level));
            }
            Command::Help => {
                for line in HELP_TEXT {
                    self.reply(line);
                }
            }
            Command::Status => self.print_status(),
            Command::ToggleTimestamp => self.toggle(DisplayFlags::TIMESTAMP, "Timestamp"),
            Command::ToggleNewline => self.toggle(DisplayFlags::NEWLINE, "Newline"),
            Command::ToggleLevelLabel => self.toggle(DisplayFlags::LEVEL_LABEL, "Level label"),
            Command::ToggleModuleLabel => self.toggle(DisplayFlags::MODULE_LABEL, "Module label"),
        }
        Ok(())
    }

    fn toggle(&mut self, flag: DisplayFlags, name: &str) {
        self.flags.toggle(flag);
        let on = self.flags.contains(flag);
        self.reply_fmt(format_args!("{} {}", name, on_off(on)));
    }

    /// Status table of registered modules and the display flags.
    pub fn print_status(&mut self) {
        self.reply("Debug status:");
        self.reply_fmt(format_args!("  {:>3}  {:<10}{}", "ID", "MODULE", "LEVEL"));
        for module in 0..MAX_MODULES {
            let slot = match self.modules.get(module) {
                Some(slot) if !slot.label.is_unused() => *slot,
                _ => continue,
            };
            self.reply_fmt(format_args!(
                "  {:>3}  {:<10}{}",
                module,
                slot.label.as_str(),
                slot.level
            ));
        }

        let flags = self.flags;
        let style = if flags.contains(DisplayFlags::FORMAT_TIMESTAMP) {
            "formatted"
        } else {
            "raw"
        };
        self.reply_fmt(format_args!(
            "  Timestamp: {} ({})",
            on_off(flags.contains(DisplayFlags::TIMESTAMP)),
            style
        ));
        self.reply_fmt(format_args!("  Newline: {}", on_off(flags.contains(DisplayFlags::NEWLINE))));
        self.reply_fmt(format_args!(
            "  Level label: {}",
            on_off(flags.contains(DisplayFlags::LEVEL_LABEL))
        ));
        self.reply_fmt(format_args!(
            "  Module label: {}",
            on_off(flags.contains(DisplayFlags::MODULE_LABEL))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COMMAND_BUFFER_SIZE;
    use crate::testing::test_debug;

    fn feed_str<W: Write, C: Clock>(dbg: &mut DebugUtils<W, C>, input: &str) {
        for b in input.bytes() {
            dbg.feed(b);
        }
    }

    #[test]
    fn test_parse_single_letters() {
        assert_eq!(parse_command(b"v"), Some(Ok(Command::SetLevel(DebugLevel::Verbose))));
        assert_eq!(parse_command(b"N"), Some(Ok(Command::SetLevel(DebugLevel::None))));
        assert_eq!(parse_command(b"?"), Some(Ok(Command::Help)));
        assert_eq!(parse_command(b"S"), Some(Ok(Command::Status)));
        assert_eq!(parse_command(b"x"), Some(Err(DebugError::InvalidCommand('x'))));
        assert_eq!(parse_command(b""), None);
    }

    #[test]
    fn test_parse_module_prefix() {
        assert_eq!(
            parse_command(b"12D"),
            Some(Ok(Command::SetModuleLevel { module: 12, level: DebugLevel::Debug }))
        );
        assert_eq!(parse_command(b"2q"), Some(Err(DebugError::UnknownLevel('q'))));
        assert_eq!(parse_command(b"40v"), Some(Err(DebugError::InvalidModule(40))));
    }

    #[test]
    fn test_parse_all_prefix() {
        assert_eq!(parse_command(b"Ae"), Some(Ok(Command::SetAllLevels(DebugLevel::Error))));
        assert_eq!(parse_command(b"aw"), Some(Ok(Command::SetAllLevels(DebugLevel::Warning))));
        assert_eq!(parse_command(b"Az"), Some(Err(DebugError::UnknownLevel('z'))));
    }

    #[test]
    fn test_parse_unmatched_long_input_ignored() {
        assert_eq!(parse_command(b"hello"), None);
        assert_eq!(parse_command(b"12"), None);
        assert_eq!(parse_command(b"Avv"), None);
    }

    #[test]
    fn test_module_level_command() {
        let mut dbg = test_debug();
        dbg.set_module_label(2, "MOTOR").unwrap();
        feed_str(&mut dbg, "2v\n");

        assert_eq!(dbg.get_module_level(2), Some(DebugLevel::Verbose));
        let out = dbg.output().as_str();
        assert!(out.contains('2'));
        assert!(out.contains("MOTOR"));
        assert_eq!(dbg.output().lines().len(), 1);
    }

    #[test]
    fn test_module_level_command_on_unused_slot() {
        let mut dbg = test_debug();
        feed_str(&mut dbg, "4d\n");
        assert_eq!(dbg.get_module_level(4), Some(DebugLevel::None));
        assert_eq!(dbg.output().lines(), ["Error: module 4 is not in use (NA)"]);
    }

    #[test]
    fn test_all_levels_command() {
        let mut dbg = test_debug();
        dbg.set_module_label(1, "RADIO").unwrap();
        feed_str(&mut dbg, "Ae\n");
        for module in 0..MAX_MODULES {
            assert_eq!(dbg.get_module_level(module), Some(DebugLevel::Error));
        }
    }

    #[test]
    fn test_global_level_command() {
        let mut dbg = test_debug();
        feed_str(&mut dbg, "W\n");
        assert_eq!(dbg.get_debug_level(), DebugLevel::Warning);
        assert_eq!(dbg.output().lines(), ["Debug level set to WARNING"]);
    }

    #[test]
    fn test_invalid_command_reported() {
        let mut dbg = test_debug();
        feed_str(&mut dbg, "z\n");
        assert_eq!(dbg.output().lines().len(), 1);
        assert!(dbg.output().as_str().contains("invalid command"));
    }

    #[test]
    fn test_empty_and_long_lines_silent() {
        let mut dbg = test_debug();
        feed_str(&mut dbg, "\n\nverbose\n");
        assert_eq!(dbg.output().as_str(), "");
        assert_eq!(dbg.get_debug_level(), DebugLevel::Info);
    }

    #[test]
    fn test_toggles_round_trip() {
        let mut dbg = test_debug();
        let start = dbg.flags();
        for cmd in ["t", "c", "l", "m", "T", "C", "L", "M"] {
            feed_str(&mut dbg, cmd);
            feed_str(&mut dbg, "\n");
            assert_ne!(dbg.flags(), start);
            feed_str(&mut dbg, cmd);
            feed_str(&mut dbg, "\n");
            assert_eq!(dbg.flags(), start);
        }
    }

    #[test]
    fn test_help_lists_commands() {
        let mut dbg = test_debug();
        feed_str(&mut dbg, "?\n");
        assert_eq!(dbg.output().lines().len(), HELP_TEXT.len());
        assert!(dbg.output().as_str().contains("toggle timestamp"));
    }

    #[test]
    fn test_status_skips_unused_modules() {
        let mut dbg = test_debug();
        dbg.set_module_label(2, "MOTOR").unwrap();
        dbg.set_module_level(2, DebugLevel::Debug).unwrap();
        feed_str(&mut dbg, "s\n");

        let lines = dbg.output().lines();
        assert!(lines.iter().any(|l| l.contains("GLOBAL") && l.contains("INFO")));
        assert!(lines.iter().any(|l| l.contains("MOTOR") && l.contains("DEBUG")));
        assert!(!lines.iter().any(|l| l.contains("NA")));
        assert!(lines.iter().any(|l| l.contains("Newline: on")));
        assert!(lines.iter().any(|l| l.contains("Timestamp: off")));
    }

    #[test]
    fn test_overlong_line_uses_prefix() {
        let mut dbg = test_debug();
        // Prefix "v" followed by filler gets cut, but is still too long to match
        let mut line = alloc::string::String::from("v");
        line.push_str(&"x".repeat(COMMAND_BUFFER_SIZE * 2));
        line.push('\n');
        feed_str(&mut dbg, &line);
        assert_eq!(dbg.get_debug_level(), DebugLevel::Info);
        assert!(dbg.line_buffer().pending().is_empty());

        // A module command padded with leading zeros past capacity keeps
        // only the retained digits and loses its level letter
        let mut line = "0".repeat(COMMAND_BUFFER_SIZE - 1);
        line.push_str("v\n");
        feed_str(&mut dbg, &line);
        assert_eq!(dbg.get_debug_level(), DebugLevel::Info);
        assert_eq!(dbg.output().as_str(), "");
    }

    #[test]
    fn test_overlong_digits_then_letter_within_capacity() {
        let mut dbg = test_debug();
        let mut line = "0".repeat(COMMAND_BUFFER_SIZE - 2);
        line.push_str("d\n");
        feed_str(&mut dbg, &line);
        assert_eq!(dbg.get_debug_level(), DebugLevel::Debug);
    }
}
