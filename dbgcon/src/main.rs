use std::io;

use clap::Parser;
use debug_utils::{init_logger, DebugConfig, DebugLevel, DebugLogger, DisplayFlags, LineEnding};
use embedded_io::Write;
use log::LevelFilter;

mod host;

use host::{HostClock, StdinSource, StdoutSink};

static LOGGER: DebugLogger<StdoutSink, HostClock> = DebugLogger::new();

/// Sample levels written after each command in demo mode
const DEMO_LEVELS: [log::Level; 5] = [
    log::Level::Error,
    log::Level::Warn,
    log::Level::Info,
    log::Level::Debug,
    log::Level::Trace,
];

#[derive(Parser)]
#[command(about = "Debug console on stdin/stdout")]
struct Args {
    /// Initial level of the global module and of every --module
    #[arg(short, long, default_value = "info")]
    level: DebugLevel,

    /// Register a module, e.g. --module 2=MOTOR
    #[arg(short, long = "module", value_parser = parse_module_arg)]
    modules: Vec<(usize, String)>,

    /// Prefix messages with the elapsed time
    #[arg(short, long)]
    timestamp: bool,

    /// Show timestamps as HH:MM:SS.mmm
    #[arg(short, long)]
    formatted: bool,

    /// Prefix messages with the level label
    #[arg(long)]
    level_labels: bool,

    /// Prefix module messages with the module label
    #[arg(long)]
    module_labels: bool,

    /// Do not end messages with a newline
    #[arg(long)]
    no_newline: bool,

    /// Treat `\r` as a line terminator too
    #[arg(long)]
    cr_terminates: bool,

    /// After every command, log one sample message per level and module
    #[arg(long)]
    demo: bool,
}

impl Args {
    fn config(&self) -> DebugConfig {
        let mut flags = DisplayFlags::empty();
        flags.set(DisplayFlags::TIMESTAMP, self.timestamp);
        flags.set(DisplayFlags::FORMAT_TIMESTAMP, self.formatted);
        flags.set(DisplayFlags::LEVEL_LABEL, self.level_labels);
        flags.set(DisplayFlags::MODULE_LABEL, self.module_labels);
        flags.set(DisplayFlags::NEWLINE, !self.no_newline);

        DebugConfig {
            level: self.level,
            flags,
            line_ending: if self.cr_terminates {
                LineEnding::CrOrLf
            } else {
                LineEnding::Lf
            },
        }
    }
}

/// Parse `ID=LABEL`.
fn parse_module_arg(s: &str) -> Result<(usize, String), String> {
    let (id, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=LABEL, got '{}'", s))?;
    let id = id
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad module id '{}': {}", id, e))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(String::from("module label must not be empty"));
    }
    Ok((id, label.to_string()))
}

fn demo(targets: &[String]) {
    for target in targets {
        for level in DEMO_LEVELS {
            log::log!(target: target.as_str(), level, "sample {} message", level);
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut dbg = debug_utils::DebugUtils::with_config(StdoutSink::new(), HostClock::new(), args.config());
    for (id, label) in &args.modules {
        if dbg.set_module_label(*id, label).is_ok() {
            let _ = dbg.set_module_level(*id, args.level);
        }
    }
    LOGGER.install(dbg);
    init_logger(&LOGGER, LevelFilter::Trace).map_err(io::Error::other)?;

    log::info!("dbgcon ready, type ? for help");

    // Module labels double as log targets; the global one goes through "dbgcon"
    let targets: Vec<String> = LOGGER
        .with(|dbg| {
            dbg.modules()
                .registered()
                .map(|(id, slot)| {
                    if id == 0 {
                        String::from("dbgcon")
                    } else {
                        slot.label.to_string()
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let mut input = StdinSource::stdin();
    while !input.is_eof() {
        let lines = LOGGER.with(|dbg| dbg.poll(&mut input)).unwrap_or(0);
        // Logged only once the logger lock is released
        if let Some(e) = input.take_error() {
            log::warn!("stdin read failed: {}", e);
        }
        if lines > 0 && args.demo {
            demo(&targets);
        }
        LOGGER.with(|dbg| {
            let _ = dbg.output_mut().flush();
        });
    }

    Ok(())
}
