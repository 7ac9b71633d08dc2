//! Weighted spanning-tree samplers.
//!
//! A sampler consumes a [`TransitionTable`], a seed, and a move probability
//! `p`, and returns a [`SpanningTree`] with its root. Trees are drawn with
//! probability proportional to the product of their edge weights. The same
//! seed always reproduces the same tree.
//!
//! `p` makes the walk lazy: at each step the walker moves with probability
//! `p` and otherwise holds its position. Holding never changes the law of
//! the sampled tree, it only thins the walk.

mod rng;
mod walk;
mod wilson;

#[cfg(feature = "aldous-broder")]
mod aldous_broder;

use std::fmt;

use tracing::{info, instrument};

use crate::{LatticeError, Result, SamplerError, normalize::TransitionTable, tree::SpanningTree};

#[cfg(feature = "aldous-broder")]
pub use self::aldous_broder::AldousBroder;
pub use self::wilson::Wilson;

/// Selects the random-walk procedure used to draw a tree.
///
/// # Examples
/// ```
/// use wilson_core::SamplerBackend;
///
/// assert_eq!(SamplerBackend::default(), SamplerBackend::Wilson);
/// assert_eq!(SamplerBackend::AldousBroder.as_str(), "aldous-broder");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SamplerBackend {
    /// Wilson's loop-erased random walk.
    #[default]
    Wilson,
    /// Aldous-Broder first-entrance random walk.
    AldousBroder,
}

impl SamplerBackend {
    /// Returns a stable lowercase label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wilson => "wilson",
            Self::AldousBroder => "aldous-broder",
        }
    }

    const fn stream(self) -> usize {
        match self {
            Self::Wilson => 0,
            Self::AldousBroder => 1,
        }
    }
}

impl fmt::Display for SamplerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated seed and move probability for one sampling call.
///
/// # Examples
/// ```
/// use wilson_core::SamplingConfig;
///
/// let config = SamplingConfig::new(123_456, 0.5).expect("probability is valid");
/// assert_eq!(config.seed(), 123_456);
/// assert!(SamplingConfig::new(1, 0.0).is_err());
/// assert!(SamplingConfig::new(1, 1.5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    seed: u64,
    move_probability: f64,
}

impl SamplingConfig {
    /// Validates `move_probability` and stores the configuration.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidSamplingProbability`] unless
    /// `0 < move_probability <= 1`.
    pub fn new(seed: u64, move_probability: f64) -> Result<Self> {
        if !(move_probability > 0.0 && move_probability <= 1.0) {
            return Err(LatticeError::InvalidSamplingProbability {
                got: move_probability,
            });
        }
        Ok(Self {
            seed,
            move_probability,
        })
    }

    /// Returns the seed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn seed(&self) -> u64 { self.seed }

    /// Returns the per-step move probability `p`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn move_probability(&self) -> f64 { self.move_probability }
}

/// Draws weighted spanning trees from a transition table.
pub trait SpanningTreeSampler {
    /// Returns the backend implemented by this sampler.
    fn backend(&self) -> SamplerBackend;

    /// Draws one spanning tree.
    ///
    /// # Errors
    /// Returns [`SamplerError`] when the table is empty or an internal
    /// invariant fails.
    fn sample(
        &self,
        table: &TransitionTable,
        config: &SamplingConfig,
    ) -> core::result::Result<SpanningTree, SamplerError>;
}

/// Returns the sampler implementing `backend`.
///
/// # Errors
/// Returns [`LatticeError::BackendUnavailable`] when the backend was not
/// compiled into this build.
pub fn sampler_for(backend: SamplerBackend) -> Result<Box<dyn SpanningTreeSampler>> {
    match backend {
        SamplerBackend::Wilson => Ok(Box::new(Wilson)),
        #[cfg(feature = "aldous-broder")]
        SamplerBackend::AldousBroder => Ok(Box::new(AldousBroder)),
        #[cfg(not(feature = "aldous-broder"))]
        SamplerBackend::AldousBroder => Err(LatticeError::BackendUnavailable {
            requested: SamplerBackend::AldousBroder,
        }),
    }
}

/// Draws a tree with `sampler`, wrapping failures into [`LatticeError`].
///
/// # Errors
/// Returns [`LatticeError::Sampler`] when the sampler fails.
#[instrument(
    name = "core.sample",
    err,
    skip(sampler, table, config),
    fields(
        backend = %sampler.backend(),
        vertices = table.len(),
        seed = config.seed(),
        p = config.move_probability(),
    ),
)]
pub fn sample_with<S: SpanningTreeSampler + ?Sized>(
    sampler: &S,
    table: &TransitionTable,
    config: &SamplingConfig,
) -> Result<SpanningTree> {
    let backend = sampler.backend();
    let tree = sampler
        .sample(table, config)
        .map_err(|error| LatticeError::Sampler { backend, error })?;
    info!(edges = tree.len(), root = tree.root(), "spanning tree sampled");
    Ok(tree)
}
