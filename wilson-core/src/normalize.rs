//! Transition distributions derived from the raw adjacency tables.
//!
//! Each row is sorted by ascending weight and rescaled to sum to one, so a
//! walker can pick its next vertex with a single cumulative scan. The
//! normaliser borrows the raw tables and builds a new [`TransitionTable`];
//! the raw weights stay untouched.

use tracing::{debug, instrument, warn};

use crate::{
    LatticeError, Result,
    adjacency::{RawAdjacency, SLOTS},
    topology::Lattice,
};

/// Absolute tolerance within which every normalised row sums to one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Sorted, normalised transition probabilities for one vertex.
///
/// `neighbours()[i]` is reached with probability `probabilities()[i]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRow {
    neighbours: [usize; SLOTS],
    probabilities: [f64; SLOTS],
}

impl TransitionRow {
    fn normalise(vertex: usize, neighbours: [usize; SLOTS], weights: [f64; SLOTS]) -> Result<Self> {
        let mut pairs = [(0_usize, 0.0_f64); SLOTS];
        for (pair, (&neighbour, &weight)) in pairs.iter_mut().zip(neighbours.iter().zip(&weights))
        {
            *pair = (neighbour, weight);
        }
        pairs.sort_by(|left, right| left.1.total_cmp(&right.1));

        let total: f64 = pairs.iter().map(|&(_, weight)| weight).sum();
        if !(total > 0.0 && total.is_finite()) {
            warn!(vertex, total, "weight row cannot be normalised");
            return Err(LatticeError::ZeroWeightRow { vertex });
        }

        Ok(Self {
            neighbours: pairs.map(|(neighbour, _)| neighbour),
            probabilities: pairs.map(|(_, weight)| weight / total),
        })
    }

    /// Returns the neighbours in ascending probability order.
    #[must_use]
    #[rustfmt::skip]
    pub const fn neighbours(&self) -> &[usize; SLOTS] { &self.neighbours }

    /// Returns the probabilities aligned with [`Self::neighbours`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn probabilities(&self) -> &[f64; SLOTS] { &self.probabilities }

    /// Returns the sum of the row's probabilities.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Picks the neighbour selected by a uniform draw `u` from `[0, 1)`.
    ///
    /// The result is the first neighbour whose cumulative probability
    /// exceeds `u`. Zero-probability slots can never be selected: their
    /// cumulative sum equals that of the preceding slot. Rounding that leaves
    /// the final cumulative sum below `u` resolves to the last (heaviest)
    /// slot.
    ///
    /// # Examples
    /// ```
    /// use wilson_core::{EdgeWeights, Lattice, RawAdjacency, TransitionTable};
    ///
    /// let lattice = Lattice::new(4).expect("side is valid");
    /// let raw = RawAdjacency::build(lattice, &EdgeWeights::default());
    /// let table = TransitionTable::from_adjacency(&raw).expect("rows normalise");
    /// let row = table.row(5).expect("vertex exists");
    /// assert_eq!(row.choose(0.0), row.neighbours()[0]);
    /// assert_eq!(row.choose(0.999_999), row.neighbours()[3]);
    /// ```
    #[must_use]
    pub fn choose(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        for (&neighbour, &probability) in self.neighbours.iter().zip(&self.probabilities) {
            cumulative += probability;
            if probability > 0.0 && u < cumulative {
                return neighbour;
            }
        }
        self.neighbours[SLOTS - 1]
    }
}

/// Immutable per-vertex transition distributions for the whole lattice.
///
/// # Examples
/// ```
/// use wilson_core::{EdgeWeights, Lattice, RawAdjacency, TransitionTable};
///
/// let lattice = Lattice::new(4).expect("side is valid");
/// let raw = RawAdjacency::build(lattice, &EdgeWeights::default());
/// let table = TransitionTable::from_adjacency(&raw).expect("rows normalise");
///
/// // Vertex 5 is interior: four unit edges, a uniform distribution.
/// assert_eq!(table.row(5).map(|row| *row.probabilities()), Some([0.25; 4]));
/// // Vertex 0 loses both wrapping edges on an open lattice.
/// assert_eq!(table.row(0).map(|row| *row.probabilities()), Some([0.0, 0.0, 0.5, 0.5]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable {
    lattice: Lattice,
    rows: Vec<TransitionRow>,
}

impl TransitionTable {
    /// Sorts and normalises every row of `raw`.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroWeightRow`] for the first vertex whose
    /// incident weights sum to zero. No partial table is returned.
    #[instrument(
        name = "core.normalise",
        err,
        skip(raw),
        fields(side = raw.lattice().side(), vertices = raw.len()),
    )]
    pub fn from_adjacency(raw: &RawAdjacency) -> Result<Self> {
        let rows = raw
            .neighbours()
            .iter()
            .zip(raw.weights())
            .enumerate()
            .map(|(vertex, (&neighbours, &weights))| {
                TransitionRow::normalise(vertex, neighbours, weights)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(rows = rows.len(), "transition table normalised");
        Ok(Self {
            lattice: raw.lattice(),
            rows,
        })
    }

    /// Returns the lattice the table describes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lattice(&self) -> Lattice { self.lattice }

    /// Returns the number of vertex rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row for `vertex`, if it exists.
    #[must_use]
    pub fn row(&self, vertex: usize) -> Option<&TransitionRow> {
        self.rows.get(vertex)
    }

    /// Returns all rows in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn rows(&self) -> &[TransitionRow] { &self.rows }
}
