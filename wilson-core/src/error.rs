//! Error types for the lattice core.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{sampler::SamplerBackend, weights::EdgeClass};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced by a [`crate::SpanningTreeSampler`] while walking the lattice.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SamplerError {
    /// The transition table contained no vertices.
    #[error("transition table contains no vertices")]
    EmptyTable,
    /// An internal invariant was violated, indicating a logic error.
    #[error("sampler invariant violated at vertex {vertex}: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// Vertex at which the violation was detected.
        vertex: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplerError`] variants.
    enum SamplerErrorCode for SamplerError {
        /// The transition table contained no vertices.
        EmptyTable => EmptyTable => "SAMPLER_EMPTY_TABLE",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "SAMPLER_INVARIANT_VIOLATION",
    }
}

/// Error type produced while configuring lattices, normalising weights, or
/// running an experiment.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LatticeError {
    /// The lattice side length is too small for the requested operation.
    #[error("lattice side length must be at least {minimum} (got {got})")]
    InvalidLatticeSize {
        /// Side length supplied by the caller.
        got: usize,
        /// Smallest side length the operation accepts.
        minimum: usize,
    },
    /// The lattice would hold more vertices or edges than `usize` can index.
    #[error("lattice side length {side} overflows the vertex index space")]
    LatticeTooLarge {
        /// Side length supplied by the caller.
        side: usize,
    },
    /// An edge weight violated its class constraint.
    #[error("{class} edge weight {weight} is invalid: {constraint}")]
    InvalidWeight {
        /// Edge class the weight was supplied for.
        class: EdgeClass,
        /// The rejected weight.
        weight: f64,
        /// Human-readable description of the violated constraint.
        constraint: &'static str,
    },
    /// A vertex's incident weights summed to zero during normalisation.
    #[error("incident weights of vertex {vertex} sum to zero; cannot normalise")]
    ZeroWeightRow {
        /// Vertex whose row could not be normalised.
        vertex: usize,
    },
    /// The walk move probability was outside `(0, 1]`.
    #[error("sampling probability must lie in (0, 1] (got {got})")]
    InvalidSamplingProbability {
        /// The rejected probability.
        got: f64,
    },
    /// The requested sampler backend is unavailable in the current build.
    #[error("the requested sampler backend {requested} is not available in this build")]
    BackendUnavailable {
        /// Backend that could not be satisfied by the current build.
        requested: SamplerBackend,
    },
    /// A sampler failed while drawing a spanning tree.
    #[error("{backend} sampler failed: {error}")]
    Sampler {
        /// Backend that produced the error.
        backend: SamplerBackend,
        #[source]
        /// Underlying sampler error.
        error: SamplerError,
    },
}

define_error_codes! {
    /// Stable codes describing [`LatticeError`] variants.
    enum LatticeErrorCode for LatticeError {
        /// The lattice side length is too small.
        InvalidLatticeSize => InvalidLatticeSize { .. } => "LATTICE_INVALID_SIZE",
        /// The lattice overflows the index space.
        LatticeTooLarge => LatticeTooLarge { .. } => "LATTICE_TOO_LARGE",
        /// An edge weight violated its class constraint.
        InvalidWeight => InvalidWeight { .. } => "LATTICE_INVALID_WEIGHT_CONFIGURATION",
        /// A weight row summed to zero.
        ZeroWeightRow => ZeroWeightRow { .. } => "LATTICE_ZERO_WEIGHT_ROW",
        /// The walk move probability was outside `(0, 1]`.
        InvalidSamplingProbability => InvalidSamplingProbability { .. } => "LATTICE_INVALID_SAMPLING_PROBABILITY",
        /// The requested backend is not compiled in.
        BackendUnavailable => BackendUnavailable { .. } => "LATTICE_BACKEND_UNAVAILABLE",
        /// A sampler failed while drawing a tree.
        SamplerFailure => Sampler { .. } => "LATTICE_SAMPLER_FAILURE",
    }
}

impl LatticeError {
    /// Returns `true` for errors caused by the weight configuration.
    ///
    /// Both rejected weights and zero-sum rows fall in this category.
    #[must_use]
    pub const fn is_weight_configuration(&self) -> bool {
        matches!(self, Self::InvalidWeight { .. } | Self::ZeroWeightRow { .. })
    }

    /// Retrieve the inner [`SamplerErrorCode`] when the error originated in a sampler.
    #[must_use]
    pub const fn sampler_code(&self) -> Option<SamplerErrorCode> {
        match self {
            Self::Sampler { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LatticeError>;
