//! Property-based suites for adjacency construction, normalisation and
//! sampling.
//!
//! Case counts follow the shared run profile so CI can scale every suite
//! through `PROPTEST_CASES`.

mod strategies;

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use wilson_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{
    EdgeWeights, Lattice, ROW_SUM_TOLERANCE, RawAdjacency, SamplingConfig, Slot, TransitionTable,
    WrapClassifier, sampler_for,
};

use self::strategies::{LatticeFixture, backend_strategy, lattice_fixture_strategy};

fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

fn raw_tables(fixture: &LatticeFixture) -> Result<RawAdjacency, TestCaseError> {
    let lattice = Lattice::new(fixture.side).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let weights = EdgeWeights::new(fixture.horizontal, fixture.vertical, fixture.wrapping)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    Ok(RawAdjacency::build(lattice, &weights))
}

fn transition_table(fixture: &LatticeFixture) -> Result<TransitionTable, TestCaseError> {
    let raw = raw_tables(fixture)?;
    TransitionTable::from_adjacency(&raw).map_err(|err| TestCaseError::fail(err.to_string()))
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn normalised_rows_sum_to_one(fixture in lattice_fixture_strategy()) {
        let table = transition_table(&fixture)?;
        prop_assert_eq!(table.len(), fixture.side * fixture.side);
        for row in table.rows() {
            prop_assert!((row.total() - 1.0).abs() <= ROW_SUM_TOLERANCE);
            prop_assert!(row.probabilities().windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn adjacency_is_symmetric(fixture in lattice_fixture_strategy()) {
        let raw = raw_tables(&fixture)?;
        for vertex in 0..raw.len() {
            for slot in Slot::ALL {
                let (neighbour, weight) = raw.slot(vertex, slot)
                    .ok_or_else(|| TestCaseError::fail("slot missing"))?;
                let (back, back_weight) = raw.slot(neighbour, slot.opposite())
                    .ok_or_else(|| TestCaseError::fail("opposite slot missing"))?;
                prop_assert_eq!(back, vertex);
                prop_assert_eq!(back_weight.to_bits(), weight.to_bits());
            }
        }
    }

    #[test]
    fn rebuilding_is_deterministic(fixture in lattice_fixture_strategy()) {
        let first = transition_table(&fixture)?;
        let second = transition_table(&fixture)?;
        for (left, right) in first.rows().iter().zip(second.rows()) {
            prop_assert_eq!(left.neighbours(), right.neighbours());
            let left_bits = left.probabilities().map(f64::to_bits);
            let right_bits = right.probabilities().map(f64::to_bits);
            prop_assert_eq!(left_bits, right_bits);
        }
    }
}

proptest! {
    #![proptest_config(suite_proptest_config(32))]

    #[test]
    fn sampled_trees_are_spanning_and_respect_open_boundaries(
        fixture in lattice_fixture_strategy(),
        backend in backend_strategy(),
        seed in any::<u64>(),
    ) {
        let table = transition_table(&fixture)?;
        let sampler = sampler_for(backend).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let config = SamplingConfig::new(seed, 1.0)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let tree = sampler.sample(&table, &config)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert!(tree.validate().is_ok());
        prop_assert_eq!(tree.len(), fixture.side * fixture.side - 1);

        let classifier = WrapClassifier::new(table.lattice())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        if fixture.wrapping == 0.0 {
            prop_assert_eq!(classifier.count_wrapping_edges(tree.edges()), 0);
        }
    }
}
