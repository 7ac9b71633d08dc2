//! Lazy weighted random walk over a transition table.

use rand::{Rng, distributions::Standard, rngs::SmallRng};

use crate::{SamplerError, normalize::TransitionTable};

use super::{SamplerBackend, SamplingConfig, rng::backend_rng};

pub(super) struct LazyWalk<'a> {
    table: &'a TransitionTable,
    rng: SmallRng,
    move_probability: f64,
}

impl<'a> LazyWalk<'a> {
    pub(super) fn new(
        table: &'a TransitionTable,
        config: &SamplingConfig,
        backend: SamplerBackend,
    ) -> Result<Self, SamplerError> {
        if table.is_empty() {
            return Err(SamplerError::EmptyTable);
        }
        Ok(Self {
            table,
            rng: backend_rng(config.seed(), backend),
            move_probability: config.move_probability(),
        })
    }

    pub(super) fn vertex_count(&self) -> usize {
        self.table.len()
    }

    /// Draws a vertex uniformly at random.
    pub(super) fn uniform_vertex(&mut self) -> usize {
        self.rng.gen_range(0..self.table.len())
    }

    /// Advances the walk by one step from `from`.
    ///
    /// Returns `from` itself when the lazy walk holds.
    pub(super) fn step(&mut self, from: usize) -> Result<usize, SamplerError> {
        if self.move_probability < 1.0 && !self.rng.gen_bool(self.move_probability) {
            return Ok(from);
        }
        let row = self
            .table
            .row(from)
            .ok_or(SamplerError::InvariantViolation {
                invariant: "walk stays inside the transition table",
                vertex: from,
            })?;
        let draw: f64 = self.rng.sample(Standard);
        Ok(row.choose(draw))
    }
}
