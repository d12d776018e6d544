//! End-to-end ensemble construction scenarios.

use std::collections::HashSet;

use nearwell_core::{DistributionKind, ParamValue, RunSpecs, VariableSpec};
use nearwell_sampler::{create_ensemble, SampleError, SamplingConfig};
use nearwell_test_utils::specs::{layered_permeability_specs, three_variable_specs};
use proptest::prelude::*;

const NAMES: [&str; 3] = ["TEMP", "RATE", "PRESSURE"];

fn combination(member: &nearwell_core::EnsembleMember) -> [u64; 3] {
    NAMES.map(|n| member.get_f64(n).expect("sampled").to_bits())
}

#[test]
fn full_request_covers_every_combination_once() {
    let specs = three_variable_specs(Some(12));
    let e = create_ensemble(&specs, &SamplingConfig::seeded(7)).unwrap();
    assert_eq!(e.len(), 12);

    let combos: HashSet<[u64; 3]> = e.iter().map(combination).collect();
    assert_eq!(combos.len(), 12);
    for (i, n) in NAMES.iter().enumerate() {
        let distinct: HashSet<u64> = combos.iter().map(|c| c[i]).collect();
        assert_eq!(distinct.len(), specs.variables[i].npoints, "variable {n}");
    }
}

#[test]
fn unspecified_size_means_full_product() {
    let specs = three_variable_specs(None);
    let e = create_ensemble(&specs, &SamplingConfig::seeded(7)).unwrap();
    assert_eq!(e.len(), 12);
}

#[test]
fn partial_request_draws_distinct_valid_combinations() {
    let full = create_ensemble(&three_variable_specs(Some(12)), &SamplingConfig::seeded(3)).unwrap();
    let all: HashSet<[u64; 3]> = full.iter().map(combination).collect();

    let e = create_ensemble(&three_variable_specs(Some(8)), &SamplingConfig::seeded(3)).unwrap();
    assert_eq!(e.len(), 8);
    let picked: HashSet<[u64; 3]> = e.iter().map(combination).collect();
    assert_eq!(picked.len(), 8);
    // Same seed, same per-variable samples: every pick is one of the 12.
    assert!(picked.is_subset(&all));
}

#[test]
fn oversized_request_is_rejected() {
    let specs = three_variable_specs(Some(200));
    match create_ensemble(&specs, &SamplingConfig::seeded(1)) {
        Err(SampleError::TooManyMembers {
            requested,
            available,
        }) => {
            assert_eq!(requested, 200);
            assert_eq!(available, 12);
        }
        other => panic!("expected TooManyMembers, got {other:?}"),
    }
}

#[test]
fn constants_are_merged_into_every_member() {
    let specs = three_variable_specs(Some(5));
    let e = create_ensemble(&specs, &SamplingConfig::seeded(11)).unwrap();
    for m in &e {
        assert_eq!(m.get("FLOW"), Some(&ParamValue::from("flow")));
        assert_eq!(m.len(), specs.constants.len() + NAMES.len());
    }
}

#[test]
fn same_seed_same_ensemble() {
    let specs = three_variable_specs(Some(6));
    let a = create_ensemble(&specs, &SamplingConfig::seeded(42)).unwrap();
    let b = create_ensemble(&specs, &SamplingConfig::seeded(42)).unwrap();
    let c = create_ensemble(&specs, &SamplingConfig::seeded(43)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn efficient_sampling_avoids_the_full_mesh() {
    // 10 layers x 10 points each: a 10^10 mesh that is never built.
    let specs = layered_permeability_specs(10, 10, Some(50));
    let config = SamplingConfig::seeded(5)
        .with_efficient_sampling((0..10).map(|i| format!("PERM_{i}")));
    let e = create_ensemble(&specs, &config).unwrap();
    assert_eq!(e.len(), 50);

    for m in &e {
        for i in 0..10 {
            let k = m.get_f64(&format!("PERM_{i}")).unwrap();
            assert!((1e-14..=1e-12).contains(&k));
        }
        let t = m.get_f64("TEMP").unwrap();
        assert!((20.0..=60.0).contains(&t));
    }
}

#[test]
fn efficient_sampling_needs_explicit_size() {
    let specs = layered_permeability_specs(2, 3, None);
    let config = SamplingConfig::seeded(5).with_efficient_sampling(["PERM_0"]);
    assert!(matches!(
        create_ensemble(&specs, &config),
        Err(SampleError::MissingMemberCount)
    ));
}

#[test]
fn unknown_efficient_variable_is_rejected() {
    let specs = three_variable_specs(Some(4));
    let config = SamplingConfig::seeded(5).with_efficient_sampling(["PERM_99"]);
    match create_ensemble(&specs, &config) {
        Err(SampleError::UnknownVariable { name }) => assert_eq!(name, "PERM_99"),
        other => panic!("expected UnknownVariable, got {other:?}"),
    }
}

#[test]
fn invalid_spec_is_rejected() {
    let specs = RunSpecs {
        variables: vec![VariableSpec::inferred("PERM", -1.0, 1.0, 2)],
        ..RunSpecs::default()
    };
    assert!(matches!(
        create_ensemble(&specs, &SamplingConfig::seeded(1)),
        Err(SampleError::Spec(_))
    ));
}

proptest! {
    #[test]
    fn samples_respect_bounds(
        lo in 1e-3f64..10.0,
        width in 0.0f64..100.0,
        npoints in 1usize..6,
        seed in any::<u64>(),
    ) {
        let hi = lo + width;
        let specs = RunSpecs {
            variables: vec![
                VariableSpec::new("LOGK", lo, hi, npoints, DistributionKind::LogUniform),
                VariableSpec::new("X", lo, hi, npoints, DistributionKind::UniformFloat),
                VariableSpec::new("N", lo, hi + 1.0, npoints, DistributionKind::UniformInt),
            ],
            ..RunSpecs::default()
        };
        let e = create_ensemble(&specs, &SamplingConfig::seeded(seed)).unwrap();
        prop_assert_eq!(e.len(), npoints * npoints * npoints);
        for m in &e {
            let k = m.get_f64("LOGK").unwrap();
            prop_assert!(k > 0.0 && k >= lo && k <= hi);
            let x = m.get_f64("X").unwrap();
            prop_assert!(x >= lo && x <= hi);
            let n = m.get_f64("N").unwrap();
            prop_assert!(n >= lo && n <= hi + 1.0);
        }
    }

    #[test]
    fn ensemble_size_is_min_of_request_and_space(request in 0usize..=12, seed in any::<u64>()) {
        let e = create_ensemble(&three_variable_specs(Some(request)), &SamplingConfig::seeded(seed)).unwrap();
        prop_assert_eq!(e.len(), request.min(12));
    }
}
