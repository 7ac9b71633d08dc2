//! SVG drawings of sampled trees at their lattice positions.

use std::{fmt, fs, path::Path};

use plotters::prelude::*;
use tracing::{debug, info, instrument};
use wilson_core::{Edge, Lattice, SpanningTree, WrapClassifier};

use crate::error::ExportError;

const WRAPPING_EDGE_ALPHA: f64 = 0.15;
const ROOT_RADIUS: i32 = 4;
const MARGIN: u32 = 16;

/// Appearance of an SVG tree drawing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutOptions {
    /// Picture width in pixels.
    pub width: u32,
    /// Picture height in pixels.
    pub height: u32,
    /// Marks the root vertex with a red dot when set.
    pub highlight_root: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            highlight_root: true,
        }
    }
}

/// Draws `tree` with each vertex at its `(x, y)` lattice coordinate and
/// returns the SVG document. `path` only labels errors.
///
/// Interior edges are solid black. Wrapping edges cross the whole picture,
/// so they are drawn faintly.
///
/// # Errors
/// Returns [`ExportError::Render`] when the drawing backend fails.
pub(crate) fn render_svg_document(
    path: &Path,
    tree: &SpanningTree,
    lattice: Lattice,
    options: LayoutOptions,
) -> Result<String, ExportError> {
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|err| render_failure(path, err))?;

        let extent = to_plot(lattice.side()) - 0.5;
        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .build_cartesian_2d(-0.5..extent, -0.5..extent)
            .map_err(|err| render_failure(path, err))?;

        let classifier = WrapClassifier::new(lattice).ok();
        let (wrapping, interior): (Vec<_>, Vec<_>) = tree.edges().iter().partition(|edge| {
            classifier.is_some_and(|classifier| classifier.is_wrapping_edge(**edge))
        });
        debug!(
            interior = interior.len(),
            wrapping = wrapping.len(),
            "drawing tree edges"
        );

        let segment = |edge: &&Edge| {
            vec![position(lattice, edge.source()), position(lattice, edge.target())]
        };
        chart
            .draw_series(
                wrapping
                    .iter()
                    .map(|edge| PathElement::new(segment(edge), BLACK.mix(WRAPPING_EDGE_ALPHA))),
            )
            .map_err(|err| render_failure(path, err))?;
        chart
            .draw_series(
                interior
                    .iter()
                    .map(|edge| PathElement::new(segment(edge), BLACK.stroke_width(1))),
            )
            .map_err(|err| render_failure(path, err))?;

        if options.highlight_root {
            chart
                .draw_series(std::iter::once(Circle::new(
                    position(lattice, tree.root()),
                    ROOT_RADIUS,
                    RED.filled(),
                )))
                .map_err(|err| render_failure(path, err))?;
        }

        root.present().map_err(|err| render_failure(path, err))?;
    }
    Ok(document)
}

/// Draws `tree` and saves the picture as an SVG file at `path`.
///
/// # Errors
/// Returns [`ExportError::Render`] when the drawing backend fails and
/// [`ExportError::Io`] when the file cannot be written.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use wilson_core::ExperimentBuilder;
/// use wilson_export::{LayoutOptions, render_svg};
///
/// let outcome = ExperimentBuilder::new()
///     .with_side(8)
///     .build()
///     .expect("configuration is valid")
///     .run()
///     .expect("run succeeds");
/// render_svg(
///     Path::new("tree.svg"),
///     &outcome.tree,
///     outcome.lattice,
///     LayoutOptions::default(),
/// )
/// .expect("picture is written");
/// ```
#[instrument(
    name = "export.svg",
    err,
    skip(tree, lattice, options),
    fields(side = lattice.side(), root = tree.root(), path = %path.display()),
)]
pub fn render_svg(
    path: &Path,
    tree: &SpanningTree,
    lattice: Lattice,
    options: LayoutOptions,
) -> Result<(), ExportError> {
    let document = render_svg_document(path, tree, lattice, options)?;
    fs::write(path, document).map_err(|source| ExportError::io(path, source))?;
    info!(path = %path.display(), "tree drawing written");
    Ok(())
}

fn position(lattice: Lattice, vertex: usize) -> (f64, f64) {
    let (x, y) = lattice.coords(vertex);
    (to_plot(x), to_plot(y))
}

fn to_plot(coordinate: usize) -> f64 {
    coordinate as f64
}

fn render_failure(path: &Path, err: impl fmt::Display) -> ExportError {
    ExportError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
