//! Integration tests for the dot and SVG exporters.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;
use wilson_core::{ExperimentBuilder, ExperimentOutcome, WrapClassifier};
use wilson_export::{ExportError, ExportErrorCode, LayoutOptions, render_svg, write_dot_file};
use wilson_test_support::tracing::RecordingLayer;

fn outcome(side: usize, wrapping_weight: f64, seed: u64) -> ExperimentOutcome {
    ExperimentBuilder::new()
        .with_side(side)
        .with_weights(1.0, 1.0, wrapping_weight)
        .with_seed(seed)
        .build()
        .expect("configuration must be valid")
        .run()
        .expect("run must succeed")
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

const NODE_ATTRIBUTES: &str = "style=\"invisible\",label=\"\",width=\"0.001\", height=\"0.001\"";

fn node_line(vertex: usize, position: &str) -> String {
    format!("\t{vertex} [pos=\"{position}!\", {NODE_ATTRIBUTES}];")
}

#[test]
fn dot_file_lists_every_vertex_and_edge() {
    let dir = temp_dir();
    let outcome = outcome(4, 0.0, 11);
    let path = write_dot_file(dir.path(), &outcome.tree, outcome.lattice, outcome.seed)
        .expect("dot export must succeed");

    assert_eq!(path, dir.path().join("stree_l4_s11.dot"));
    let text = fs::read_to_string(&path).expect("dot file must be readable");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.first(), Some(&"graph G {"));
    assert_eq!(lines.last(), Some(&"}"));
    assert_eq!(
        lines.iter().filter(|line| line.contains("style=\"invisible\"")).count(),
        16
    );
    let origin = node_line(0, "0,0");
    let inner = node_line(6, "0.5,0.25");
    assert!(lines.contains(&origin.as_str()));
    assert!(lines.contains(&inner.as_str()));
    assert_eq!(lines.iter().filter(|line| line.contains(" -- ")).count(), 15);
    assert!(lines.iter().all(|line| !line.starts_with("//")));
    assert!(lines.contains(&"labelloc=\"t\";"));
    assert!(lines.contains(&"label=\"Spanning tree on 4x4 square lattice (seed = 11)\";"));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn dot_file_comments_out_exactly_the_wrapping_edges(#[case] seed: u64) {
    let dir = temp_dir();
    let outcome = outcome(5, 1.0, seed);
    let classifier = WrapClassifier::new(outcome.lattice).expect("side must be classifiable");
    let path = write_dot_file(dir.path(), &outcome.tree, outcome.lattice, outcome.seed)
        .expect("dot export must succeed");
    let text = fs::read_to_string(path).expect("dot file must be readable");

    let commented: Vec<&str> = text.lines().filter(|line| line.starts_with("// ")).collect();
    let expected: Vec<String> = outcome
        .tree
        .edges()
        .iter()
        .filter(|edge| classifier.is_wrapping_edge(**edge))
        .map(|edge| format!("// {} -- {} ;", edge.source(), edge.target()))
        .collect();
    assert_eq!(commented, expected);
}

#[test]
fn dot_export_into_missing_directory_is_an_io_failure() {
    let dir = temp_dir();
    let missing = dir.path().join("absent");
    let outcome = outcome(3, 0.0, 1);

    let err = write_dot_file(&missing, &outcome.tree, outcome.lattice, outcome.seed)
        .expect_err("missing directory must fail");
    assert_eq!(err.code(), ExportErrorCode::Io);
    assert_eq!(err.code().as_str(), "EXPORT_IO_FAILURE");
    match err {
        ExportError::Io { path, .. } => assert_eq!(path, missing.join("stree_l3_s1.dot")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn dot_export_records_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let dir = temp_dir();
    let outcome = outcome(3, 0.0, 9);

    tracing::subscriber::with_default(subscriber, || {
        write_dot_file(dir.path(), &outcome.tree, outcome.lattice, outcome.seed)
            .expect("dot export must succeed");
    });

    let span = layer.span_named("export.dot").expect("export.dot span must close");
    assert_eq!(span.fields.get("side").map(String::as_str), Some("3"));
    assert_eq!(span.fields.get("seed").map(String::as_str), Some("9"));
    assert!(span.fields.contains_key("path"));
}

#[test]
fn svg_export_writes_a_picture() {
    let dir = temp_dir();
    let path = dir.path().join("tree.svg");
    let outcome = outcome(6, 1.0, 4);

    render_svg(&path, &outcome.tree, outcome.lattice, LayoutOptions::default())
        .expect("svg export must succeed");

    let document = fs::read_to_string(&path).expect("svg must be readable");
    assert!(document.contains("<svg"));
    assert!(document.contains("<circle"));
}

#[test]
fn svg_export_into_missing_directory_is_an_io_failure() {
    let dir = temp_dir();
    let path = dir.path().join("absent").join("tree.svg");
    let outcome = outcome(3, 0.0, 2);

    let err = render_svg(&path, &outcome.tree, outcome.lattice, LayoutOptions::default())
        .expect_err("missing directory must fail");
    assert!(matches!(err, ExportError::Io { .. }));
    assert!(err.to_string().contains("tree.svg"));
}
