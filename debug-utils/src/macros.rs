//! printf-style shorthands over [`crate::DebugUtils::print`].

/// Print at `level` through the global gate.
///
/// ```ignore
/// debug_print!(dbg, DebugLevel::Info, "speed = {}", speed);
/// ```
#[macro_export]
macro_rules! debug_print {
    ($dbg:expr, $level:expr, $($arg:tt)*) => {
        $dbg.print($level, ::core::format_args!($($arg)*))
    };
}

/// Print at `level` through `module`'s gate.
#[macro_export]
macro_rules! debug_module_print {
    ($dbg:expr, $module:expr, $level:expr, $($arg:tt)*) => {
        $dbg.print_module($module, $level, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_error {
    ($dbg:expr, $($arg:tt)*) => {
        $crate::debug_print!($dbg, $crate::DebugLevel::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_warning {
    ($dbg:expr, $($arg:tt)*) => {
        $crate::debug_print!($dbg, $crate::DebugLevel::Warning, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_info {
    ($dbg:expr, $($arg:tt)*) => {
        $crate::debug_print!($dbg, $crate::DebugLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_debug {
    ($dbg:expr, $($arg:tt)*) => {
        $crate::debug_print!($dbg, $crate::DebugLevel::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_verbose {
    ($dbg:expr, $($arg:tt)*) => {
        $crate::debug_print!($dbg, $crate::DebugLevel::Verbose, $($arg)*)
    };
}
