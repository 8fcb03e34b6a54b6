//! # frontr-common
//!
//! Shared building blocks for the frontr workspace: the address-block and
//! endpoint models, runtime configuration, and the user-facing status
//! macros. Everything here is IO-free except for reading a range file.

pub mod config;
pub mod logging;
pub mod network;
