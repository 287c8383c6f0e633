//! `log` facade backend.
//!
//! Routes `log::error!` .. `log::trace!` through a shared [`DebugUtils`], so
//! records pass the same level gate and get the same decorations. A record
//! whose target names a registered module label (either the whole target or
//! its last `::` segment) is gated on that module; everything else goes
//! through the global module.

use embedded_io::Write;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::clock::Clock;
use crate::config::GLOBAL_MODULE;
use crate::debug::DebugUtils;
use crate::level::DebugLevel;
use crate::lock::Spinlock;

impl From<Level> for DebugLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => DebugLevel::Error,
            Level::Warn => DebugLevel::Warning,
            Level::Info => DebugLevel::Info,
            Level::Debug => DebugLevel::Debug,
            Level::Trace => DebugLevel::Verbose,
        }
    }
}

/// Process-wide slot for one debug context
pub struct DebugLogger<W, C> {
    inner: Spinlock<Option<DebugUtils<W, C>>>,
}

impl<W, C> DebugLogger<W, C> {
    pub const fn new() -> Self {
        Self {
            inner: Spinlock::new(None),
        }
    }
}

impl<W, C> Default for DebugLogger<W, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, C: Clock> DebugLogger<W, C> {
    /// Put a context in the slot, returning the one it replaces.
    pub fn install(&self, dbg: DebugUtils<W, C>) -> Option<DebugUtils<W, C>> {
        self.inner.lock().replace(dbg)
    }

    pub fn take(&self) -> Option<DebugUtils<W, C>> {
        self.inner.lock().take()
    }

    /// Run `f` on the installed context. `None` if nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut DebugUtils<W, C>) -> R) -> Option<R> {
        self.inner.lock().as_mut().map(f)
    }
}

fn module_for<W: Write, C: Clock>(dbg: &DebugUtils<W, C>, target: &str) -> Option<usize> {
    dbg.find_module(target).or_else(|| {
        target
            .rsplit("::")
            .next()
            .and_then(|segment| dbg.find_module(segment))
    })
}

impl<W, C> Log for DebugLogger<W, C>
where
    W: Write + Send,
    C: Clock + Send,
{
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.with(|dbg| {
            let module = module_for(dbg, metadata.target()).unwrap_or(GLOBAL_MODULE);
            dbg.should_emit(module, metadata.level().into())
        })
        .unwrap_or(false)
    }

    fn log(&self, record: &Record) {
        self.with(|dbg| {
            let level = DebugLevel::from(record.level());
            match module_for(dbg, record.target()) {
                Some(module) => dbg.print_module(module, level, *record.args()),
                None => dbg.print(level, *record.args()),
            }
        });
    }

    fn flush(&self) {
        self.with(|dbg| {
            let _ = dbg.output_mut().flush();
        });
    }
}

/// Register `logger` with the `log` facade.
///
/// `max_level` is the facade-side cut-off; the context's own thresholds
/// still apply below it.
pub fn init_logger<W, C>(
    logger: &'static DebugLogger<W, C>,
    max_level: LevelFilter,
) -> Result<(), SetLoggerError>
where
    W: Write + Send,
    C: Clock + Send,
{
    log::set_logger(logger)?;
    log::set_max_level(max_level);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_debug, TestSink};

    fn logger() -> DebugLogger<TestSink, fn() -> u64> {
        let logger = DebugLogger::new();
        let mut dbg = test_debug();
        dbg.set_module_label(2, "MOTOR").unwrap();
        dbg.set_module_level(2, DebugLevel::Verbose).unwrap();
        logger.install(dbg);
        logger
    }

    fn output(logger: &DebugLogger<TestSink, fn() -> u64>) -> alloc::string::String {
        logger
            .with(|dbg| alloc::string::String::from(dbg.output().as_str()))
            .unwrap()
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(DebugLevel::from(Level::Warn), DebugLevel::Warning);
        assert_eq!(DebugLevel::from(Level::Trace), DebugLevel::Verbose);
    }

    #[test]
    fn test_empty_logger_is_disabled() {
        let logger: DebugLogger<TestSink, fn() -> u64> = DebugLogger::new();
        let metadata = Metadata::builder().level(Level::Error).target("app").build();
        assert!(!logger.enabled(&metadata));
    }

    #[test]
    fn test_global_records_gated() {
        let logger = logger();
        logger.log(
            &Record::builder()
                .args(format_args!("kept {}", 1))
                .level(Level::Info)
                .target("app")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Debug)
                .target("app")
                .build(),
        );
        assert_eq!(output(&logger), "kept 1\n");
    }

    #[test]
    fn test_module_target_uses_module_gate() {
        let logger = logger();
        logger.with(|dbg| dbg.module_label_on());
        logger.log(
            &Record::builder()
                .args(format_args!("rpm {}", 900))
                .level(Level::Trace)
                .target("firmware::motor")
                .build(),
        );
        assert_eq!(output(&logger), "[MOTOR] rpm 900\n");

        let metadata = Metadata::builder().level(Level::Trace).target("MOTOR").build();
        assert!(logger.enabled(&metadata));
        let metadata = Metadata::builder().level(Level::Trace).target("other").build();
        assert!(!logger.enabled(&metadata));
    }

    #[test]
    fn test_install_replaces_context() {
        let logger = logger();
        let previous = logger.install(test_debug());
        assert!(previous.is_some());
        assert_eq!(logger.with(|dbg| dbg.get_module_label(2).map(|l| l == "NA")), Some(Some(true)));
        assert!(logger.take().is_some());
        assert!(logger.take().is_none());
    }
}
