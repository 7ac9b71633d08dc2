//! Seed derivation for sampler random streams.

use rand::{SeedableRng, rngs::SmallRng};

use super::SamplerBackend;

/// SplitMix64 increment (the 64-bit golden ratio) used to space backend
/// streams.
const STREAM_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
fn mix_stream_seed(base_seed: u64, stream: usize) -> u64 {
    splitmix64(base_seed ^ ((stream as u64 + 1).wrapping_mul(STREAM_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(STREAM_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Returns the generator a backend uses for `seed`.
///
/// Each backend draws from its own stream so switching backends under one
/// seed does not replay the same walk.
pub(super) fn backend_rng(seed: u64, backend: SamplerBackend) -> SmallRng {
    SmallRng::seed_from_u64(mix_stream_seed(seed, backend.stream()))
}
