//! Weighted spanning trees on the periodic square lattice.
//!
//! The crate builds the weighted adjacency of an `L x L` lattice whose
//! boundary edges may wrap around (a torus) or be switched off (an open
//! grid), normalises each vertex's incident weights into a sorted transition
//! distribution, and draws spanning trees with probability proportional to
//! the product of their edge weights.
//!
//! ```
//! use wilson_core::{ExperimentBuilder, SamplerBackend};
//!
//! let outcome = ExperimentBuilder::new()
//!     .with_side(16)
//!     .with_weights(1.0, 1.0, 1.0)
//!     .with_seed(2024)
//!     .with_backend(SamplerBackend::Wilson)
//!     .build()?
//!     .run()?;
//! assert_eq!(outcome.tree.len(), 16 * 16 - 1);
//! # Ok::<(), wilson_core::LatticeError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adjacency;
mod classify;
mod error;
mod experiment;
mod normalize;
mod sampler;
mod topology;
mod tree;
mod weights;

#[cfg(test)]
mod property;

#[cfg(feature = "aldous-broder")]
#[cfg_attr(docsrs, doc(cfg(feature = "aldous-broder")))]
pub use crate::sampler::AldousBroder;
pub use crate::{
    adjacency::{RawAdjacency, SLOTS, Slot},
    classify::{TreeStatistics, WrapClassifier},
    error::{LatticeError, LatticeErrorCode, Result, SamplerError, SamplerErrorCode},
    experiment::{DEFAULT_SEED, DEFAULT_SIDE, Experiment, ExperimentBuilder, ExperimentOutcome},
    normalize::{ROW_SUM_TOLERANCE, TransitionRow, TransitionTable},
    sampler::{
        SamplerBackend, SamplingConfig, SpanningTreeSampler, Wilson, sample_with, sampler_for,
    },
    topology::{Edge, Lattice},
    tree::{SpanningTree, TreeError, TreeErrorCode},
    weights::{EdgeClass, EdgeWeights},
};
