//! Argument parsing and execution of the `sample` command.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};
use wilson_core::{
    DEFAULT_SEED, DEFAULT_SIDE, EdgeWeights, ExperimentBuilder, ExperimentOutcome, LatticeError,
    LatticeErrorCode, SamplerBackend, SamplerErrorCode,
};
use wilson_export::{LayoutOptions, render_svg, write_dot_file};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wilson",
    about = "Sample weighted spanning trees on the periodic square lattice."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Draw one spanning tree and report its statistics.
    Sample(SampleCommand),
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleCommand {
    /// Seed for the random walk.
    #[arg(value_name = "SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Lattice side length `L`.
    #[arg(value_name = "L", default_value_t = DEFAULT_SIDE)]
    pub side: usize,

    /// `1` samples with Wilson's algorithm, `0` with Aldous-Broder.
    #[arg(
        value_name = "NATIVE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=1),
    )]
    pub native: u8,

    /// Probability that the walk moves on each step.
    #[arg(value_name = "P", default_value_t = 1.0)]
    pub move_probability: f64,

    /// Weight of interior horizontal edges.
    #[arg(long, default_value_t = EdgeWeights::default().horizontal())]
    pub horizontal_weight: f64,

    /// Weight of interior vertical edges.
    #[arg(long, default_value_t = EdgeWeights::default().vertical())]
    pub vertical_weight: f64,

    /// Weight of boundary-crossing edges; `0` gives an open grid.
    #[arg(long, default_value_t = EdgeWeights::default().wrapping())]
    pub wrapping_weight: f64,

    /// Directory receiving `stree_l{L}_s{SEED}.dot`.
    #[arg(long = "dot-dir", value_name = "DIR")]
    pub dot_dir: Option<PathBuf>,

    /// Destination of an SVG drawing of the tree.
    #[arg(long, value_name = "PATH")]
    pub plot: Option<PathBuf>,
}

impl SampleCommand {
    /// Returns the backend selected by the `NATIVE` flag.
    #[must_use]
    pub const fn backend(&self) -> SamplerBackend {
        if self.native == 0 {
            SamplerBackend::AldousBroder
        } else {
            SamplerBackend::Wilson
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Configuration or sampling failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

impl CliError {
    /// Returns the stable lattice code and, for sampler failures, the nested
    /// sampler code.
    #[must_use]
    pub const fn codes(&self) -> (Option<LatticeErrorCode>, Option<SamplerErrorCode>) {
        match self {
            Self::Lattice(lattice) => (Some(lattice.code()), lattice.sampler_code()),
        }
    }
}

/// Outcome of the `sample` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// The sampled tree with its statistics.
    pub outcome: ExperimentOutcome,
    /// Graphviz file written, if requested and successful.
    pub dot_path: Option<PathBuf>,
    /// SVG drawing written, if requested and successful.
    pub plot_path: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is rejected or sampling fails.
/// Export failures are logged and do not fail the command.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use wilson_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["wilson", "sample", "7", "5"]);
/// let summary = run_cli(cli).expect("sampling succeeds");
/// assert_eq!(summary.outcome.tree.len(), 24);
/// assert_eq!(summary.outcome.statistics.map(|s| s.wrapping_edges), Some(0));
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Sample(sample) => {
            Span::current().record("command", field::display("sample"));
            run_sample(sample)
        }
    }
}

#[instrument(
    name = "cli.sample",
    err,
    skip(command),
    fields(side = command.side, seed = command.seed, backend = field::Empty),
)]
pub(super) fn run_sample(command: SampleCommand) -> Result<ExecutionSummary, CliError> {
    let backend = command.backend();
    Span::current().record("backend", field::display(backend));

    let outcome = ExperimentBuilder::new()
        .with_side(command.side)
        .with_weights(
            command.horizontal_weight,
            command.vertical_weight,
            command.wrapping_weight,
        )
        .with_seed(command.seed)
        .with_move_probability(command.move_probability)
        .with_backend(backend)
        .build()?
        .run()?;

    let dot_path = command
        .dot_dir
        .as_deref()
        .and_then(|dir| match write_dot_file(dir, &outcome.tree, outcome.lattice, outcome.seed) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(error = %err, code = %err.code(), "graphviz export skipped");
                None
            }
        });

    let plot_path = command.plot.and_then(|path| {
        match render_svg(&path, &outcome.tree, outcome.lattice, LayoutOptions::default()) {
            Ok(()) => Some(path),
            Err(err) => {
                warn!(error = %err, code = %err.code(), "svg export skipped");
                None
            }
        }
    });

    info!(
        edges = outcome.tree.len(),
        root = outcome.tree.root(),
        "command completed"
    );
    Ok(ExecutionSummary {
        outcome,
        dot_path,
        plot_path,
    })
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// Wrapping edges are reported as `n/a` on lattices too small to classify.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use wilson_cli::cli::{Cli, render_summary, run_cli};
///
/// let summary = run_cli(Cli::parse_from(["wilson", "sample", "1", "3"]))
///     .expect("sampling succeeds");
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer).expect("writing to a Vec succeeds");
/// let text = String::from_utf8(buffer).expect("summary is UTF-8");
/// assert!(text.contains("edges: 8\n"));
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let outcome = &summary.outcome;
    let side = outcome.lattice.side();
    writeln!(writer, "lattice: {side}x{side}")?;
    writeln!(writer, "backend: {}", outcome.backend)?;
    writeln!(writer, "seed: {}", outcome.seed)?;
    writeln!(writer, "edges: {}", outcome.tree.len())?;
    match outcome.statistics {
        Some(statistics) => writeln!(writer, "wrapping edges: {}", statistics.wrapping_edges)?,
        None => writeln!(writer, "wrapping edges: n/a")?,
    }
    writeln!(writer, "root: {}", outcome.tree.root())?;
    if let Some(path) = &summary.dot_path {
        writeln!(writer, "dot: {}", path.display())?;
    }
    if let Some(path) = &summary.plot_path {
        writeln!(writer, "plot: {}", path.display())?;
    }
    Ok(())
}
