//! Unit tests for argument parsing and the `sample` command.

use super::commands::run_sample;
use super::test_helpers::{
    parse_sample, run_cli_expecting_error, sample_command, temp_dir, with_dot_dir,
};
use super::{Cli, CliError, Command, render_summary, run_cli};

use clap::Parser;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use wilson_core::{
    LatticeError, LatticeErrorCode, SamplerBackend, SamplerError, SamplerErrorCode,
};

use wilson_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn defaults_match_the_documented_invocation() {
    let command = parse_sample(&[]);
    assert_eq!(command.seed, 123_456);
    assert_eq!(command.side, 32);
    assert_eq!(command.native, 1);
    assert!((command.move_probability - 1.0).abs() < f64::EPSILON);
    assert!((command.horizontal_weight - 1.0).abs() < f64::EPSILON);
    assert!((command.vertical_weight - 1.0).abs() < f64::EPSILON);
    assert!(command.wrapping_weight.abs() < f64::EPSILON);
    assert!(command.dot_dir.is_none());
    assert!(command.plot.is_none());
    assert_eq!(command.backend(), SamplerBackend::Wilson);
}

#[test]
fn positionals_fill_seed_side_native_and_probability() {
    let command = parse_sample(&["42", "8", "0", "0.5", "--wrapping-weight", "2.5"]);
    assert_eq!(command.seed, 42);
    assert_eq!(command.side, 8);
    assert_eq!(command.backend(), SamplerBackend::AldousBroder);
    assert!((command.move_probability - 0.5).abs() < f64::EPSILON);
    assert!((command.wrapping_weight - 2.5).abs() < f64::EPSILON);
}

#[rstest]
#[case::native_out_of_range(&["1", "4", "2"])]
#[case::negative_side(&["1", "-4"])]
#[case::non_numeric_seed(&["seed"])]
fn parser_rejects_malformed_arguments(#[case] args: &[&str]) {
    let argv = ["wilson", "sample"].iter().chain(args);
    assert!(Cli::try_parse_from(argv).is_err());
}

#[rstest]
#[case::wilson_open(1, 0.0)]
#[case::wilson_torus(1, 1.0)]
#[case::aldous_broder_torus(0, 1.0)]
fn sample_draws_a_spanning_tree(#[case] native: u8, #[case] wrapping_weight: f64) -> TestResult {
    let mut command = sample_command(3, 6);
    command.native = native;
    command.wrapping_weight = wrapping_weight;
    let summary = run_sample(command)?;

    let outcome = &summary.outcome;
    assert_eq!(outcome.tree.len(), 35);
    outcome.tree.validate()?;
    let statistics = outcome.statistics.ok_or("6x6 trees must be classified")?;
    assert_eq!(statistics.edges, 35);
    if wrapping_weight == 0.0 {
        assert_eq!(statistics.wrapping_edges, 0);
    }
    Ok(())
}

#[test]
fn same_arguments_reproduce_the_tree() -> TestResult {
    let first = run_sample(sample_command(77, 5))?;
    let second = run_sample(sample_command(77, 5))?;
    assert_eq!(first.outcome.tree, second.outcome.tree);
    Ok(())
}

#[rstest]
#[case::side_too_small(&["1", "1"], LatticeErrorCode::InvalidLatticeSize)]
#[case::zero_probability(&["1", "4", "1", "0"], LatticeErrorCode::InvalidSamplingProbability)]
#[case::zero_interior_weight(
    &["1", "4", "--horizontal-weight", "0"],
    LatticeErrorCode::InvalidWeight,
)]
#[case::negative_wrapping_weight(
    &["1", "4", "--wrapping-weight=-1"],
    LatticeErrorCode::InvalidWeight,
)]
fn invalid_configuration_fails_with_a_stable_code(
    #[case] args: &[&str],
    #[case] expected: LatticeErrorCode,
) {
    let cli = Cli {
        command: Command::Sample(parse_sample(args)),
    };
    let err = run_cli_expecting_error(cli, "configuration must be rejected");
    match err {
        CliError::Lattice(lattice) => assert_eq!(lattice.code(), expected),
    }
}

#[test]
fn smallest_lattice_reports_no_wrapping_statistics() -> TestResult {
    let summary = run_sample(sample_command(5, 2))?;
    assert_eq!(summary.outcome.tree.len(), 3);
    assert!(summary.outcome.statistics.is_none());

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("wrapping edges: n/a\n"));
    Ok(())
}

#[test]
fn dot_export_lands_in_the_requested_directory() -> TestResult {
    let dir = temp_dir();
    let command = with_dot_dir(sample_command(9, 4), dir.path().to_path_buf());
    let summary = run_sample(command)?;

    let expected = dir.path().join("stree_l4_s9.dot");
    assert_eq!(summary.dot_path.as_deref(), Some(expected.as_path()));
    assert!(expected.is_file());
    Ok(())
}

#[test]
fn plot_export_writes_an_svg() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("tree.svg");
    let mut command = sample_command(9, 4);
    command.plot = Some(path.clone());
    let summary = run_sample(command)?;

    assert_eq!(summary.plot_path.as_deref(), Some(path.as_path()));
    assert!(std::fs::read_to_string(&path)?.contains("<svg"));
    Ok(())
}

#[test]
fn export_failures_are_logged_and_do_not_fail_the_run() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let dir = temp_dir();
    let missing = dir.path().join("absent");
    let mut command = with_dot_dir(sample_command(1, 4), missing.clone());
    command.plot = Some(missing.join("tree.svg"));

    let summary = tracing::subscriber::with_default(subscriber, || run_sample(command))?;

    assert!(summary.dot_path.is_none());
    assert!(summary.plot_path.is_none());
    assert_eq!(summary.outcome.tree.len(), 15);

    let warnings = layer.events_at(Level::WARN);
    let codes: Vec<&str> = warnings
        .iter()
        .filter_map(|event| event.fields.get("code").map(String::as_str))
        .collect();
    assert_eq!(codes, ["EXPORT_IO_FAILURE", "EXPORT_IO_FAILURE"]);
    Ok(())
}

#[test]
fn run_cli_records_command_span() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli::try_parse_from(["wilson", "sample", "4", "3", "0"])?;

    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let run = layer.span_named("cli.run").ok_or("cli.run span must close")?;
    assert_eq!(run.fields.get("command").map(String::as_str), Some("sample"));
    let sample = layer.span_named("cli.sample").ok_or("cli.sample span must close")?;
    assert_eq!(sample.fields.get("backend").map(String::as_str), Some("aldous-broder"));
    assert_eq!(sample.fields.get("side").map(String::as_str), Some("3"));
    Ok(())
}

#[test]
fn render_summary_lists_tree_statistics() -> TestResult {
    let dir = temp_dir();
    let summary = run_sample(with_dot_dir(sample_command(12, 3), dir.path().to_path_buf()))?;
    let statistics = summary
        .outcome
        .statistics
        .ok_or("3x3 trees must be classified")?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "lattice: 3x3");
    assert_eq!(lines[1], "backend: wilson");
    assert_eq!(lines[2], "seed: 12");
    assert_eq!(lines[3], "edges: 8");
    assert_eq!(lines[4], format!("wrapping edges: {}", statistics.wrapping_edges));
    assert_eq!(lines[5], format!("root: {}", summary.outcome.tree.root()));
    assert!(lines[6].starts_with("dot: ") && lines[6].ends_with("stree_l3_s12.dot"));
    Ok(())
}

#[test]
fn lattice_errors_convert_into_cli_errors() {
    let err: CliError = LatticeError::InvalidSamplingProbability { got: 2.0 }.into();
    assert!(err.to_string().contains('2'));
}

#[rstest]
#[case::configuration(
    LatticeError::InvalidLatticeSize { got: 1, minimum: 2 },
    Some(LatticeErrorCode::InvalidLatticeSize),
    None,
)]
#[case::sampler_failure(
    LatticeError::Sampler { backend: SamplerBackend::Wilson, error: SamplerError::EmptyTable },
    Some(LatticeErrorCode::SamplerFailure),
    Some(SamplerErrorCode::EmptyTable),
)]
fn cli_errors_expose_lattice_and_sampler_codes(
    #[case] source: LatticeError,
    #[case] expected_code: Option<LatticeErrorCode>,
    #[case] expected_sampler_code: Option<SamplerErrorCode>,
) {
    let err = CliError::from(source);
    assert_eq!(err.codes(), (expected_code, expected_sampler_code));
}
