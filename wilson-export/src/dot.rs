//! Graphviz export with pinned vertex positions.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{Span, field, info, instrument};
use wilson_core::{Lattice, SpanningTree, WrapClassifier};

use crate::error::ExportError;

/// Distance between neighbouring vertices in the dot layout, in inches.
pub const DOT_SCALE: f64 = 0.25;

/// Returns the conventional file name for a tree drawn on an `L x L` lattice.
///
/// # Examples
/// ```
/// use wilson_export::dot_file_name;
///
/// assert_eq!(dot_file_name(32, 123_456), "stree_l32_s123456.dot");
/// ```
#[must_use]
pub fn dot_file_name(side: usize, seed: u64) -> String {
    format!("stree_l{side}_s{seed}.dot")
}

/// Writes `tree` to `writer` as an undirected Graphviz graph.
///
/// Every vertex becomes an invisible node pinned at `(0.25 x, 0.25 y)` so
/// `neato -n` reproduces the lattice geometry. Wrapping edges are emitted
/// behind a `//` comment. Lattices too small to classify (`L = 2`) keep every
/// edge.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use wilson_core::{Edge, Lattice, SpanningTree};
/// use wilson_export::write_dot;
///
/// let lattice = Lattice::new(2).expect("side is valid");
/// let tree = SpanningTree::from_parents(&[None, Some(0), Some(0), Some(1)], 0)
///     .expect("parents form a tree");
/// let mut buffer = Vec::new();
/// write_dot(&mut buffer, &tree, lattice, 7).expect("writing to a Vec succeeds");
/// let text = String::from_utf8(buffer).expect("dot output is UTF-8");
/// assert!(text.starts_with("graph G {"));
/// assert!(text.contains("label=\"Spanning tree on 2x2 square lattice (seed = 7)\";"));
/// ```
pub fn write_dot(
    mut writer: impl Write,
    tree: &SpanningTree,
    lattice: Lattice,
    seed: u64,
) -> io::Result<()> {
    let classifier = WrapClassifier::new(lattice).ok();
    let side = lattice.side();

    writeln!(writer, "graph G {{")?;
    for vertex in 0..lattice.vertex_count() {
        let (x, y) = lattice.coords(vertex);
        writeln!(
            writer,
            "\t{vertex} [pos=\"{},{}!\", style=\"invisible\",label=\"\",width=\"0.001\", height=\"0.001\"];",
            scaled(x),
            scaled(y),
        )?;
    }
    for edge in tree.edges() {
        let wraps = classifier.is_some_and(|classifier| classifier.is_wrapping_edge(*edge));
        let prefix = if wraps { "// " } else { "" };
        writeln!(writer, "{prefix}{} -- {} ;", edge.source(), edge.target())?;
    }
    writeln!(writer, "labelloc=\"t\";")?;
    writeln!(
        writer,
        "label=\"Spanning tree on {side}x{side} square lattice (seed = {seed})\";"
    )?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Writes `tree` to `dir/stree_l{L}_s{seed}.dot` and returns the path.
///
/// # Errors
/// Returns [`ExportError::Io`] when the file cannot be created or written.
#[instrument(
    name = "export.dot",
    err,
    skip(dir, tree, lattice),
    fields(side = lattice.side(), seed = seed, path = field::Empty),
)]
pub fn write_dot_file(
    dir: &Path,
    tree: &SpanningTree,
    lattice: Lattice,
    seed: u64,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(dot_file_name(lattice.side(), seed));
    Span::current().record("path", field::display(path.display()));

    let file = File::create(&path).map_err(|source| ExportError::io(&path, source))?;
    let mut writer = BufWriter::new(file);
    write_dot(&mut writer, tree, lattice, seed)
        .and_then(|()| writer.flush())
        .map_err(|source| ExportError::io(&path, source))?;

    info!(path = %path.display(), edges = tree.len(), "graphviz file written");
    Ok(path)
}

fn scaled(coordinate: usize) -> f64 {
    DOT_SCALE * coordinate as f64
}
