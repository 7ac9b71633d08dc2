//! Weighted adjacency construction for the periodic square lattice.
//!
//! Every vertex owns four slots ordered `left, right, up, down`. The builder
//! computes only the left and up neighbour of each vertex and writes the
//! shared edge weight into both endpoints at once, so each edge is weighted
//! exactly once and read identically from either side.

use tracing::{debug, instrument};

use crate::{
    topology::Lattice,
    weights::{EdgeClass, EdgeWeights},
};

/// Number of incident slots per vertex on the square lattice.
pub const SLOTS: usize = 4;

/// Fixed position of an incident edge within a vertex row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Slot {
    /// Edge towards `x - 1`.
    Left,
    /// Edge towards `x + 1`.
    Right,
    /// Edge towards `y - 1`.
    Up,
    /// Edge towards `y + 1`.
    Down,
}

impl Slot {
    /// All slots in row order.
    pub const ALL: [Self; SLOTS] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the column of this slot within a row.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }

    /// Returns the slot the same edge occupies at the other endpoint.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Raw `nv x 4` neighbour and weight tables, in slot order.
///
/// # Examples
/// ```
/// use wilson_core::{EdgeWeights, Lattice, RawAdjacency, Slot};
///
/// let lattice = Lattice::new(4).expect("side is valid");
/// let weights = EdgeWeights::new(1.0, 2.0, 0.5).expect("weights are valid");
/// let raw = RawAdjacency::build(lattice, &weights);
///
/// // Vertex 0 sits on both boundaries, so its left and up edges wrap.
/// assert_eq!(raw.slot(0, Slot::Left), Some((3, 0.5)));
/// assert_eq!(raw.slot(0, Slot::Up), Some((12, 0.5)));
/// assert_eq!(raw.slot(0, Slot::Right), Some((1, 1.0)));
/// assert_eq!(raw.slot(0, Slot::Down), Some((4, 2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RawAdjacency {
    lattice: Lattice,
    neighbours: Vec<[usize; SLOTS]>,
    weights: Vec<[f64; SLOTS]>,
}

impl RawAdjacency {
    /// Builds the slot tables for `lattice` under `weights`.
    ///
    /// Construction is deterministic: identical inputs yield bit-identical
    /// tables.
    #[must_use]
    #[instrument(
        name = "core.build_adjacency",
        skip(weights),
        fields(
            side = lattice.side(),
            vertices = lattice.vertex_count(),
            periodic = weights.is_periodic(),
        ),
    )]
    pub fn build(lattice: Lattice, weights: &EdgeWeights) -> Self {
        let vertex_count = lattice.vertex_count();
        let mut tables = Self {
            lattice,
            neighbours: vec![[usize::MAX; SLOTS]; vertex_count],
            weights: vec![[f64::NAN; SLOTS]; vertex_count],
        };

        for vertex in 0..vertex_count {
            let (x, y) = lattice.coords(vertex);

            let left = lattice.idx(lattice.dec(x), y);
            let class = if x == 0 {
                EdgeClass::Wrapping
            } else {
                EdgeClass::Horizontal
            };
            tables.link(vertex, left, Slot::Left, weights.weight(class));

            let up = lattice.idx(x, lattice.dec(y));
            let class = if y == 0 {
                EdgeClass::Wrapping
            } else {
                EdgeClass::Vertical
            };
            tables.link(vertex, up, Slot::Up, weights.weight(class));
        }

        debug_assert!(tables.is_fully_populated());
        debug!(edges = lattice.edge_count(), "adjacency tables built");
        tables
    }

    fn link(&mut self, vertex: usize, neighbour: usize, slot: Slot, weight: f64) {
        let near = slot.index();
        let far = slot.opposite().index();
        self.neighbours[vertex][near] = neighbour;
        self.weights[vertex][near] = weight;
        self.neighbours[neighbour][far] = vertex;
        self.weights[neighbour][far] = weight;
    }

    fn is_fully_populated(&self) -> bool {
        self.neighbours
            .iter()
            .flatten()
            .all(|&neighbour| neighbour < self.neighbours.len())
            && self.weights.iter().flatten().all(|weight| !weight.is_nan())
    }

    /// Returns the lattice the tables were built for.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lattice(&self) -> Lattice { self.lattice }

    /// Returns the number of vertex rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns `true` when the tables hold no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Returns the neighbour table in slot order.
    #[must_use]
    #[rustfmt::skip]
    pub fn neighbours(&self) -> &[[usize; SLOTS]] { &self.neighbours }

    /// Returns the weight table, aligned with [`Self::neighbours`].
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> &[[f64; SLOTS]] { &self.weights }

    /// Returns the neighbour and weight stored in `slot` of `vertex`.
    #[must_use]
    pub fn slot(&self, vertex: usize, slot: Slot) -> Option<(usize, f64)> {
        let neighbour = self.neighbours.get(vertex)?.get(slot.index())?;
        let weight = self.weights.get(vertex)?.get(slot.index())?;
        Some((*neighbour, *weight))
    }
}
