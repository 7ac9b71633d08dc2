//! Support library for the `wilson` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive a sampling run without spawning a subprocess.

pub mod cli;
pub mod logging;
