//! Wrapping-edge classification and tree statistics.
//!
//! A lattice edge changes one coordinate by either `1` (interior) or `L - 1`
//! (wrapping). The two are only distinguishable when `L - 1 > 1`, so the
//! classifier refuses lattices with `L <= 2`.

use tracing::{debug, instrument};

use crate::{
    LatticeError, Result,
    topology::{Edge, Lattice},
    tree::SpanningTree,
    weights::EdgeClass,
};

/// Classifies edges of one lattice as wrapping or interior.
///
/// # Examples
/// ```
/// use wilson_core::{Edge, Lattice, WrapClassifier};
///
/// let lattice = Lattice::new(4).expect("side is valid");
/// let classifier = WrapClassifier::new(lattice).expect("side 4 is unambiguous");
/// assert!(classifier.is_wrapping_edge(Edge::new(0, 3)));
/// assert!(!classifier.is_wrapping_edge(Edge::new(0, 1)));
///
/// let small = Lattice::new(2).expect("side is valid");
/// assert!(WrapClassifier::new(small).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WrapClassifier {
    lattice: Lattice,
}

impl WrapClassifier {
    /// Smallest side length for which classification is unambiguous.
    pub const MIN_SIDE: usize = 3;

    /// Creates a classifier for `lattice`.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidLatticeSize`] when `L < 3`.
    pub const fn new(lattice: Lattice) -> Result<Self> {
        if lattice.side() < Self::MIN_SIDE {
            return Err(LatticeError::InvalidLatticeSize {
                got: lattice.side(),
                minimum: Self::MIN_SIDE,
            });
        }
        Ok(Self { lattice })
    }

    /// Returns the lattice being classified.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lattice(&self) -> Lattice { self.lattice }

    /// Returns `true` when the coordinate difference along either axis
    /// exceeds one.
    #[must_use]
    pub const fn is_wrapping_edge(&self, edge: Edge) -> bool {
        let (dx, dy) = self.deltas(edge);
        dx > 1 || dy > 1
    }

    /// Returns the weight class of a lattice edge.
    #[must_use]
    pub const fn class(&self, edge: Edge) -> EdgeClass {
        let (dx, dy) = self.deltas(edge);
        if dx > 1 || dy > 1 {
            EdgeClass::Wrapping
        } else if dy == 0 {
            EdgeClass::Horizontal
        } else {
            EdgeClass::Vertical
        }
    }

    /// Counts the wrapping edges among `edges`.
    #[must_use]
    pub fn count_wrapping_edges<'a>(&self, edges: impl IntoIterator<Item = &'a Edge>) -> usize {
        edges
            .into_iter()
            .filter(|edge| self.is_wrapping_edge(**edge))
            .count()
    }

    /// Summarises the edge classes of `tree`.
    #[must_use]
    #[instrument(
        name = "core.tree_statistics",
        skip(self, tree),
        fields(side = self.lattice.side(), edges = tree.len()),
    )]
    pub fn statistics(&self, tree: &SpanningTree) -> TreeStatistics {
        let mut statistics = TreeStatistics {
            edges: tree.len(),
            root: tree.root(),
            ..TreeStatistics::default()
        };
        for edge in tree.edges() {
            match self.class(*edge) {
                EdgeClass::Horizontal => statistics.horizontal_edges += 1,
                EdgeClass::Vertical => statistics.vertical_edges += 1,
                EdgeClass::Wrapping => statistics.wrapping_edges += 1,
            }
        }
        debug!(wrapping = statistics.wrapping_edges, "tree classified");
        statistics
    }

    const fn deltas(&self, edge: Edge) -> (usize, usize) {
        let (x1, y1) = self.lattice.coords(edge.source());
        let (x2, y2) = self.lattice.coords(edge.target());
        (x1.abs_diff(x2), y1.abs_diff(y2))
    }
}

/// Edge-class counts of one sampled tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TreeStatistics {
    /// Total number of tree edges.
    pub edges: usize,
    /// Edges realising the periodic wrap-around.
    pub wrapping_edges: usize,
    /// Interior edges along the x axis.
    pub horizontal_edges: usize,
    /// Interior edges along the y axis.
    pub vertical_edges: usize,
    /// Root vertex chosen by the sampler.
    pub root: usize,
}
