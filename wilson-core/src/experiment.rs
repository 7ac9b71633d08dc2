//! Experiment configuration and orchestration.
//!
//! An [`Experiment`] is one lattice size, one weight configuration and one
//! seed. Running it builds fresh adjacency and transition tables, draws a
//! tree with the configured backend, and classifies the result. Nothing is
//! shared between runs, so several experiments can coexist in one process.

use tracing::{info, instrument, warn};

use crate::{
    LatticeError, Result,
    adjacency::RawAdjacency,
    classify::{TreeStatistics, WrapClassifier},
    normalize::TransitionTable,
    sampler::{SamplerBackend, SamplingConfig, SpanningTreeSampler, sample_with, sampler_for},
    topology::Lattice,
    tree::SpanningTree,
    weights::EdgeWeights,
};

/// Default seed used when none is configured.
pub const DEFAULT_SEED: u64 = 123_456;
/// Default lattice side length.
pub const DEFAULT_SIDE: usize = 32;

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use wilson_core::{ExperimentBuilder, SamplerBackend};
///
/// let experiment = ExperimentBuilder::new()
///     .with_side(8)
///     .with_weights(1.0, 1.0, 1.0)
///     .with_seed(7)
///     .with_backend(SamplerBackend::Wilson)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(experiment.lattice().side(), 8);
/// assert!(experiment.weights().is_periodic());
/// ```
#[derive(Clone, Debug)]
pub struct ExperimentBuilder {
    side: usize,
    horizontal_weight: f64,
    vertical_weight: f64,
    wrapping_weight: f64,
    seed: u64,
    move_probability: f64,
    backend: SamplerBackend,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        let weights = EdgeWeights::default();
        Self {
            side: DEFAULT_SIDE,
            horizontal_weight: weights.horizontal(),
            vertical_weight: weights.vertical(),
            wrapping_weight: weights.wrapping(),
            seed: DEFAULT_SEED,
            move_probability: 1.0,
            backend: SamplerBackend::default(),
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use wilson_core::ExperimentBuilder;
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.side(), 32);
    /// assert_eq!(builder.seed(), 123_456);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the lattice side length `L`.
    #[must_use]
    pub const fn with_side(mut self, side: usize) -> Self {
        self.side = side;
        self
    }

    /// Returns the configured side length.
    #[must_use]
    #[rustfmt::skip]
    pub const fn side(&self) -> usize { self.side }

    /// Overrides the horizontal, vertical and wrapping weights.
    #[must_use]
    pub const fn with_weights(mut self, horizontal: f64, vertical: f64, wrapping: f64) -> Self {
        self.horizontal_weight = horizontal;
        self.vertical_weight = vertical;
        self.wrapping_weight = wrapping;
        self
    }

    /// Overrides the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn seed(&self) -> u64 { self.seed }

    /// Overrides the walk move probability `p`.
    #[must_use]
    pub const fn with_move_probability(mut self, move_probability: f64) -> Self {
        self.move_probability = move_probability;
        self
    }

    /// Selects the sampler backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: SamplerBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidLatticeSize`] for `L < 2`,
    /// [`LatticeError::InvalidWeight`] for rejected weights, and
    /// [`LatticeError::InvalidSamplingProbability`] for `p` outside `(0, 1]`.
    pub fn build(self) -> Result<Experiment> {
        let lattice = Lattice::new(self.side)?;
        let weights = EdgeWeights::new(
            self.horizontal_weight,
            self.vertical_weight,
            self.wrapping_weight,
        )?;
        let sampling = SamplingConfig::new(self.seed, self.move_probability)?;
        Ok(Experiment {
            lattice,
            weights,
            sampling,
            backend: self.backend,
        })
    }
}

/// A validated experiment configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Experiment {
    lattice: Lattice,
    weights: EdgeWeights,
    sampling: SamplingConfig,
    backend: SamplerBackend,
}

/// The result of running an [`Experiment`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentOutcome {
    /// Lattice the tree spans.
    pub lattice: Lattice,
    /// Seed the tree was drawn with.
    pub seed: u64,
    /// Backend that drew the tree.
    pub backend: SamplerBackend,
    /// The sampled tree and its root.
    pub tree: SpanningTree,
    /// Edge-class counts; `None` when the lattice is too small to classify.
    pub statistics: Option<TreeStatistics>,
}

impl Experiment {
    /// Returns the lattice geometry.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lattice(&self) -> Lattice { self.lattice }

    /// Returns the edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weights(&self) -> EdgeWeights { self.weights }

    /// Returns the seed and move probability.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sampling(&self) -> SamplingConfig { self.sampling }

    /// Returns the selected backend.
    #[must_use]
    #[rustfmt::skip]
    pub const fn backend(&self) -> SamplerBackend { self.backend }

    /// Builds fresh raw and normalised tables for this configuration.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroWeightRow`] when a row cannot be
    /// normalised.
    pub fn transition_table(&self) -> Result<TransitionTable> {
        let raw = RawAdjacency::build(self.lattice, &self.weights);
        TransitionTable::from_adjacency(&raw)
    }

    /// Runs the experiment with the configured backend.
    ///
    /// # Errors
    /// Returns [`LatticeError::BackendUnavailable`] when the backend is not
    /// compiled in, [`LatticeError::ZeroWeightRow`] when normalisation fails,
    /// and [`LatticeError::Sampler`] when sampling fails.
    ///
    /// # Examples
    /// ```
    /// use wilson_core::ExperimentBuilder;
    ///
    /// let outcome = ExperimentBuilder::new()
    ///     .with_side(4)
    ///     .with_seed(1)
    ///     .build()
    ///     .expect("configuration is valid")
    ///     .run()
    ///     .expect("run succeeds");
    /// assert_eq!(outcome.tree.len(), 15);
    /// assert_eq!(outcome.statistics.map(|s| s.wrapping_edges), Some(0));
    /// ```
    pub fn run(&self) -> Result<ExperimentOutcome> {
        let sampler = sampler_for(self.backend)?;
        self.run_with(sampler.as_ref())
    }

    /// Runs the experiment with a caller-supplied sampler.
    ///
    /// # Errors
    /// Returns [`LatticeError::ZeroWeightRow`] when normalisation fails and
    /// [`LatticeError::Sampler`] when sampling fails.
    #[instrument(
        name = "core.run",
        err,
        skip(self, sampler),
        fields(
            side = self.lattice.side(),
            seed = self.sampling.seed(),
            backend = %sampler.backend(),
            periodic = self.weights.is_periodic(),
        ),
    )]
    pub fn run_with<S: SpanningTreeSampler + ?Sized>(
        &self,
        sampler: &S,
    ) -> Result<ExperimentOutcome> {
        let table = self.transition_table()?;
        let tree = sample_with(sampler, &table, &self.sampling)?;
        let statistics = match WrapClassifier::new(self.lattice) {
            Ok(classifier) => Some(classifier.statistics(&tree)),
            Err(LatticeError::InvalidLatticeSize { got, minimum }) => {
                warn!(side = got, minimum, "lattice too small to classify wrapping edges");
                None
            }
            Err(other) => return Err(other),
        };
        if let Some(statistics) = statistics {
            info!(
                edges = statistics.edges,
                wrapping_edges = statistics.wrapping_edges,
                root = statistics.root,
                "experiment completed"
            );
        }
        Ok(ExperimentOutcome {
            lattice: self.lattice,
            seed: self.sampling.seed(),
            backend: sampler.backend(),
            tree,
            statistics,
        })
    }
}
