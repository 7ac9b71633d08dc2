//! Square-lattice index arithmetic.
//!
//! Vertices of an `L x L` lattice are numbered `id = x + y * L`. Neighbour
//! steps wrap modulo `L`, so every vertex has exactly four incident edges;
//! whether the wrapping ones carry any weight is decided later by
//! [`crate::EdgeWeights`].

use std::num::NonZeroUsize;

use crate::{LatticeError, Result};

/// An oriented `(source, target)` pair of vertex ids joined by a lattice
/// edge.
///
/// Samplers report edges as `(child, parent)`, so equality is orientation
/// sensitive. [`Edge::canonical`] gives the unordered form.
///
/// # Examples
/// ```
/// use wilson_core::Edge;
///
/// let edge = Edge::new(3, 7);
/// assert_eq!(edge.source(), 3);
/// assert_eq!(edge.target(), 7);
/// assert_ne!(edge, Edge::new(7, 3));
/// assert_eq!(edge.canonical(), Edge::new(7, 3).canonical());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge between `source` and `target`.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// Returns the first endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the edge with `source <= target`.
    #[must_use]
    pub const fn canonical(self) -> Self {
        if self.source <= self.target {
            self
        } else {
            Self::new(self.target, self.source)
        }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((source, target): (usize, usize)) -> Self {
        Self::new(source, target)
    }
}

/// Geometry of an `L x L` square lattice with wrap-around neighbour steps.
///
/// Construction rejects side lengths below [`Lattice::MIN_SIDE`]: a `1 x 1`
/// lattice collapses every edge into a self-loop and has no spanning tree
/// worth sampling.
///
/// # Examples
/// ```
/// use wilson_core::Lattice;
///
/// let lattice = Lattice::new(4).expect("side 4 is valid");
/// assert_eq!(lattice.vertex_count(), 16);
/// assert_eq!(lattice.idx(3, 2), 11);
/// assert_eq!(lattice.coords(11), (3, 2));
/// assert_eq!(lattice.dec(0), 3);
/// assert_eq!(lattice.inc(3), 0);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Lattice {
    side: NonZeroUsize,
    vertex_count: usize,
}

impl Lattice {
    /// Smallest side length accepted by [`Lattice::new`].
    pub const MIN_SIDE: usize = 2;

    /// Validates `side` and returns the lattice geometry.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidLatticeSize`] when `side < 2` and
    /// [`LatticeError::LatticeTooLarge`] when `2 * side²` overflows `usize`.
    pub fn new(side: usize) -> Result<Self> {
        let checked = NonZeroUsize::new(side)
            .filter(|value| value.get() >= Self::MIN_SIDE)
            .ok_or(LatticeError::InvalidLatticeSize {
                got: side,
                minimum: Self::MIN_SIDE,
            })?;
        let vertex_count = side
            .checked_mul(side)
            .filter(|count| count.checked_mul(2).is_some())
            .ok_or(LatticeError::LatticeTooLarge { side })?;
        Ok(Self {
            side: checked,
            vertex_count,
        })
    }

    /// Returns the side length `L`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn side(&self) -> usize { self.side.get() }

    /// Returns the number of vertices, `L²`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of lattice edges including wrapping ones, `2 L²`.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.vertex_count * 2
    }

    /// Maps a vertex id to its `(x, y)` coordinates.
    ///
    /// `vertex` must be below [`Self::vertex_count`].
    #[must_use]
    pub const fn coords(&self, vertex: usize) -> (usize, usize) {
        debug_assert!(vertex < self.vertex_count);
        let side = self.side.get();
        (vertex % side, vertex / side)
    }

    /// Maps `(x, y)` coordinates to a vertex id.
    ///
    /// Both coordinates must be below [`Self::side`].
    #[must_use]
    pub const fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.side.get() && y < self.side.get());
        x + y * self.side.get()
    }

    /// Steps a coordinate forwards, wrapping `L - 1` to `0`.
    #[must_use]
    pub const fn inc(&self, coordinate: usize) -> usize {
        (coordinate + 1) % self.side.get()
    }

    /// Steps a coordinate backwards, wrapping `0` to `L - 1`.
    #[must_use]
    pub const fn dec(&self, coordinate: usize) -> usize {
        let side = self.side.get();
        (coordinate + side - 1) % side
    }

    /// Iterates every lattice edge exactly once.
    ///
    /// Each vertex contributes its left and up edge, which covers the
    /// `2 L²` edges of the periodic lattice without duplicates.
    ///
    /// # Examples
    /// ```
    /// use wilson_core::Lattice;
    ///
    /// let lattice = Lattice::new(3).expect("side 3 is valid");
    /// assert_eq!(lattice.edges().count(), lattice.edge_count());
    /// ```
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.vertex_count).flat_map(move |vertex| {
            let (x, y) = self.coords(vertex);
            [
                Edge::new(vertex, self.idx(self.dec(x), y)),
                Edge::new(vertex, self.idx(x, self.dec(y))),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    fn rejects_degenerate_sides(#[case] side: usize) {
        let err = Lattice::new(side).expect_err("degenerate side must fail");
        assert_eq!(
            err,
            LatticeError::InvalidLatticeSize {
                got: side,
                minimum: 2
            }
        );
    }

    #[test]
    fn rejects_overflowing_sides() {
        let err = Lattice::new(usize::MAX).expect_err("overflow must fail");
        assert!(matches!(err, LatticeError::LatticeTooLarge { .. }));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(8)]
    fn coords_inverts_idx(#[case] side: usize) {
        let lattice = Lattice::new(side).expect("side must be valid");
        for vertex in 0..lattice.vertex_count() {
            let (x, y) = lattice.coords(vertex);
            assert!(x < side && y < side);
            assert_eq!(lattice.idx(x, y), vertex);
        }
    }

    #[rstest]
    #[case::lower_boundary(0, 1, 4)]
    #[case::upper_boundary(4, 0, 3)]
    #[case::interior(2, 3, 1)]
    fn steps_wrap_modulo_side(#[case] coordinate: usize, #[case] inc: usize, #[case] dec: usize) {
        let lattice = Lattice::new(5).expect("side must be valid");
        assert_eq!(lattice.inc(coordinate), inc);
        assert_eq!(lattice.dec(coordinate), dec);
    }

    #[test]
    fn edges_cover_each_lattice_edge_once() {
        let lattice = Lattice::new(4).expect("side must be valid");
        let mut edges: Vec<Edge> = lattice.edges().map(Edge::canonical).collect();
        edges.sort_unstable_by_key(|edge| (edge.source(), edge.target()));
        edges.dedup();
        assert_eq!(edges.len(), 32);
    }
}
