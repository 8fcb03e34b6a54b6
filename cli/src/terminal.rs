//! # Terminal Output
//!
//! Everything the user sees: the tracing formatter, the spinner bridge,
//! the palette and the structured print helpers. All raw output funnels
//! through [`print::print`] so the spinner never clobbers a line.

pub mod banner;
pub mod colors;
pub mod format;
pub mod logging;
pub mod print;
pub mod spinner;
