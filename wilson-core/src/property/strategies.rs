//! Strategy builders for lattice property tests.

use proptest::prelude::*;

use crate::SamplerBackend;

/// Smallest side length exercised by the suites.
const MIN_SIDE: usize = 3;
/// Largest side length exercised by the suites.
const MAX_SIDE: usize = 12;

/// A randomly drawn lattice configuration.
#[derive(Clone, Debug)]
pub(super) struct LatticeFixture {
    pub(super) side: usize,
    pub(super) horizontal: f64,
    pub(super) vertical: f64,
    pub(super) wrapping: f64,
}

fn interior_weight() -> impl Strategy<Value = f64> {
    0.01_f64..10.0
}

/// Wrapping weights are zero about a third of the time so open lattices
/// stay well represented.
fn wrapping_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        2 => 0.001_f64..10.0,
    ]
}

pub(super) fn lattice_fixture_strategy() -> impl Strategy<Value = LatticeFixture> {
    (
        MIN_SIDE..=MAX_SIDE,
        interior_weight(),
        interior_weight(),
        wrapping_weight(),
    )
        .prop_map(|(side, horizontal, vertical, wrapping)| LatticeFixture {
            side,
            horizontal,
            vertical,
            wrapping,
        })
}

/// Draws from the backends compiled into this build.
pub(super) fn backend_strategy() -> impl Strategy<Value = SamplerBackend> {
    let backends = vec![
        SamplerBackend::Wilson,
        #[cfg(feature = "aldous-broder")]
        SamplerBackend::AldousBroder,
    ];
    proptest::sample::select(backends)
}
