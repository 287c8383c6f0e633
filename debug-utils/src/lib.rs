//! Debug utilities for serial consoles
//!
//! A small level-gated logger for targets that talk over a UART-like
//! stream:
//!
//! - per-module thresholds with short labels (module 0 is global)
//! - optional module label, level label and timestamp prefixes
//! - a runtime console that reads one-letter commands from the input
//!   stream and changes thresholds and decorations on the fly
//! - a `log` facade backend for code that logs through `log::info!` & co.
//!
//! ```ignore
//! let mut dbg = DebugUtils::new(uart, || clint::get_time_ms());
//! dbg.set_module_label(2, "MOTOR")?;
//! debug_info!(dbg, "boot ok");
//! loop {
//!     dbg.poll(&mut uart_rx);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod macros;

pub mod clock;
pub mod command;
pub mod config;
pub mod console;
pub mod debug;
pub mod error;
pub mod format;
pub mod level;
pub mod lock;
pub mod logger;
pub mod module;
pub mod sink;
pub mod timestamp;

#[cfg(test)]
mod testing;

pub use clock::Clock;
#[cfg(feature = "embassy-time")]
pub use clock::EmbassyClock;
pub use command::{parse_command, Command};
pub use config::{DebugConfig, DisplayFlags, LineEnding};
pub use debug::DebugUtils;
pub use error::DebugError;
pub use level::{DebugLevel, ParseLevelError};
pub use lock::{Spinlock, SpinlockGuard};
pub use logger::{init_logger, DebugLogger};
pub use module::{ModuleLabel, ModuleTable};
