//! Library half of the `sba-convert` binary: logging setup and run
//! configuration, kept here so they can be tested without the binary.

pub mod config;
pub mod logging;
