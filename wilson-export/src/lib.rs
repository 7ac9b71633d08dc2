//! File exporters for sampled spanning trees.
//!
//! [`write_dot`] renders a tree as a Graphviz `neato` script with every
//! vertex pinned to its lattice position; [`render_svg`] draws the same tree
//! as an SVG picture. Wrapping edges are commented out of the dot output and
//! muted in the picture so the planar structure stays readable.

mod dot;
mod error;
mod layout;

pub use crate::{
    dot::{DOT_SCALE, dot_file_name, write_dot, write_dot_file},
    error::{ExportError, ExportErrorCode},
    layout::{LayoutOptions, render_svg},
};
