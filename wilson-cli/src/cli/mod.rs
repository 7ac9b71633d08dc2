//! Command-line interface for sampling spanning trees.
//!
//! The `sample` command draws one tree for a lattice size, weight
//! configuration and seed, prints its statistics, and optionally exports it
//! as a Graphviz script and an SVG picture.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, SampleCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
