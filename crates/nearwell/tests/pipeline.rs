//! Sampling, a scripted ensemble run, extraction and upscaling end to end.

#![cfg(unix)]

use std::f64::consts::PI;

use indexmap::IndexMap;
use ndarray::{arr1, s, Array1, Axis, Ix3, Ix4};
use nearwell::extract::Scaling;
use nearwell::prelude::*;
use nearwell_test_utils::assert_close;
use nearwell_test_utils::files::write_script_deck;
use nearwell_test_utils::output::{FakeOutput, FakeReader};
use nearwell_test_utils::specs::three_variable_specs;

const MEMBERS: usize = 4;
const STEPS: usize = 3;
const ZCELLS: usize = 2;
const XCELLS: usize = 4;

/// Pressure falls off with the radial index and is uniform in z.
fn member_output(j: usize) -> FakeOutput {
    let pressure = ndarray::Array2::from_shape_fn((STEPS, ZCELLS * XCELLS), |(t, cell)| {
        200.0 + j as f64 + t as f64 - 10.0 * (cell % XCELLS) as f64
    });
    FakeOutput::new(STEPS)
        .with_field("PRESSURE", pressure)
        .with_summary("FGIR", Array1::from_elem(STEPS, 5.0))
}

#[test]
fn ensemble_to_upscaled_well_index() {
    // 1. Sample.
    let specs = three_variable_specs(Some(MEMBERS));
    let ensemble = create_ensemble(&specs, &SamplingConfig::seeded(9)).unwrap();
    assert_eq!(ensemble.len(), MEMBERS);

    // 2. Run.
    let dir = tempfile::tempdir().unwrap();
    let mut reader = FakeReader::default();
    for j in 0..MEMBERS {
        write_script_deck(dir.path(), "RUN", j, "exit 0").unwrap();
        reader = reader.with_member(j, member_output(j));
    }
    let config = RunConfig {
        executable: "sh".into(),
        npruns: 2,
        poll_interval_ms: 5,
        ..RunConfig::default()
    };
    let keywords = Keywords {
        field: vec!["PRESSURE".into()],
        summary: vec!["FGIR".into()],
        ..Keywords::default()
    };
    let results = run_ensemble(
        &reader,
        dir.path(),
        MEMBERS,
        &keywords,
        &config,
        &CancelToken::new(),
    )
    .unwrap();
    assert_eq!(results.usable_members().len(), MEMBERS);

    let pressure = results.stacked("PRESSURE").unwrap();
    let rates = results
        .stacked("FGIR")
        .unwrap()
        .into_dimensionality::<ndarray::Ix2>()
        .unwrap();
    assert_eq!(pressure.shape(), &[MEMBERS, STEPS, ZCELLS * XCELLS]);

    // 3. Well index on the top z-row, soft policy.
    let top_row = pressure
        .view()
        .into_dimensionality::<Ix3>()
        .unwrap()
        .slice_move(s![.., .., ..XCELLS]);
    let wi = calculate_wi(top_row, rates.view()).unwrap();
    assert!(wi.failed.is_empty());
    assert_eq!(wi.values.dim(), (MEMBERS, STEPS, XCELLS - 1));
    assert_close(wi.values[[0, 0, 1]], 5.0 / 20.0, 1e-12);

    // 4. Features: per-cell pressure and per-member temperature.
    let temps = Array1::from(ensemble.column("TEMP"))
        .into_shape_with_order((MEMBERS, 1, 1))
        .unwrap();
    let mut data = IndexMap::new();
    data.insert("PRESSURE".to_string(), pressure.clone());
    data.insert("TEMP".to_string(), temps.clone().into_dyn());
    let scalings = KeywordScalings::new().with("TEMP", Scaling::Shift(273.15));
    let features = extract_features(&data, &["PRESSURE", "TEMP"], &scalings)
        .unwrap()
        .into_dimensionality::<Ix4>()
        .unwrap();
    assert_eq!(features.dim(), (MEMBERS, STEPS, ZCELLS * XCELLS, 2));

    // 5. Upscale.
    let grid = RadialGrid::new(arr1(&[0.0, 1.0, 3.0, 7.0, 15.0])).unwrap();
    let up = Upscaler::new(
        UpscaleConfig {
            num_members: MEMBERS,
            num_timesteps: STEPS,
            num_layers: 1,
            num_zcells: ZCELLS,
            num_xcells: XCELLS,
            angle: PI / 3.0,
            well_radius: 0.1,
            block_sidelengths: vec![10.0],
        },
        grid,
    )
    .unwrap();

    let block_temp = up
        .horizontally_integrated_values(features.view(), 1)
        .unwrap();
    for j in 0..MEMBERS {
        assert_close(block_temp[[j, 0, 0, 0]], temps[[j, 0, 0]] + 273.15, 1e-9);
    }
    let block_pressure = up
        .horizontally_integrated_values(features.view(), 0)
        .unwrap();
    assert!(block_pressure.iter().all(|&p| (170.0..=205.0).contains(&p)));

    // 6. Data well index agrees with the soft per-member result, scaled to
    //    the full circle.
    let bhp = pressure
        .view()
        .into_dimensionality::<Ix3>()
        .unwrap()
        .slice_move(s![.., .., ..;XCELLS])
        .to_owned();
    let layer_pressure = up.vertically_averaged_values(features.view(), 0).unwrap();
    let blocks = layer_pressure.slice(s![.., .., .., 1..]);
    let per_zcell_rates = rates
        .view()
        .insert_axis(Axis(2))
        .broadcast((MEMBERS, STEPS, ZCELLS))
        .unwrap()
        .mapv(|q| q / ZCELLS as f64);
    let data_wi = up
        .data_wi(bhp.view(), blocks, per_zcell_rates.view())
        .unwrap();
    for ((j, t, _, c), &v) in data_wi.indexed_iter() {
        assert_close(v, 6.0 * wi.values[[j, t, c]], 1e-12);
    }
}
