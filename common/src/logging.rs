//! # Status Lines
//!
//! Short `[+]`-style lines meant for the person running the tool. These are
//! separate from the `tracing` events: status lines always print, while
//! tracing output is filtered by the subscriber the binary installs.

use colored::{ColoredString, Colorize};

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[doc(hidden)]
pub fn emit(level: StatusLevel, message: String) {
    let symbol: ColoredString = match level {
        StatusLevel::Info => "[*]".blue(),
        StatusLevel::Success => "[+]".green().bold(),
        StatusLevel::Warn => "[!]".yellow().bold(),
        StatusLevel::Error => "[-]".red().bold(),
    };
    match level {
        StatusLevel::Error => eprintln!("{symbol} {message}"),
        _ => println!("{symbol} {message}"),
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::StatusLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::StatusLevel::Success, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::StatusLevel::Warn, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::StatusLevel::Error, format!($($arg)*))
    };
}
