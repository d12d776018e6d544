//! Grid files and well-index data flowing into a saved dataset.

use std::f64::consts::PI;

use indexmap::IndexMap;
use ndarray::{Array, Array2, Axis};
use nearwell_extract::{
    calculate_radii, calculate_wi, extract_features, load_dataset, save_dataset, Dataset,
    ExtractError, KeywordScalings, RadiiOptions, Scalings, ValueRange,
};
use nearwell_test_utils::assert_close;
use nearwell_test_utils::files::write_grid_file;

#[test]
fn grid_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grid_file(dir.path(), &[0.1, 0.5, 1.5, 4.5]).unwrap();

    let grid = calculate_radii(&path, 3, RadiiOptions::default()).unwrap();
    assert_eq!(grid.num_cells(), 3);
    assert_close(grid.cell_center_radii()[2], 3.0, 1e-12);

    let tri = calculate_radii(
        &path,
        3,
        RadiiOptions {
            triangle_grid: true,
            angle: PI / 3.0,
        },
    )
    .unwrap();
    // 2·tan(π/6)/(π/3) ≈ 1.10: altitudes stretch to equal-area radii.
    assert_close(tri.max_radius(), 4.5 * 1.1026577908435840, 1e-9);
}

#[test]
fn grid_file_with_wrong_cell_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_grid_file(dir.path(), &[0.1, 0.5, 1.5]).unwrap();
    assert!(matches!(
        calculate_radii(&path, 5, RadiiOptions::default()),
        Err(ExtractError::GridRows {
            expected: 6,
            found: 3
        })
    ));
    assert!(matches!(
        calculate_radii(&dir.path().join("missing.txt"), 2, RadiiOptions::default()),
        Err(ExtractError::GridFile { .. })
    ));
}

#[test]
fn features_and_well_index_to_dataset() {
    let (members, steps, cells) = (4, 3, 5);
    // Well pressure rises with the member index, blocks fall off radially.
    let pressures = Array::from_shape_fn((members, steps, cells), |(j, t, c)| {
        200.0 + 10.0 * j as f64 + t as f64 - 5.0 * c as f64
    });
    let rates = Array2::from_elem((members, steps), 50.0);
    let temperature = Array::from_shape_fn((members, 1, 1), |(j, _, _)| 30.0 + j as f64);

    let wi = calculate_wi(pressures.view(), rates.view()).unwrap();
    assert!(wi.failed.is_empty());
    assert_eq!(wi.values.dim(), (members, steps, cells - 1));

    let mut data = IndexMap::new();
    let blocks = pressures.slice_axis(Axis(2), (1..).into()).to_owned();
    data.insert("PRESSURE".to_string(), blocks.into_dyn());
    data.insert("TEMP".to_string(), temperature.into_dyn());
    let features = extract_features(
        &data,
        &["PRESSURE", "TEMP"],
        &KeywordScalings::metric_to_si(),
    )
    .unwrap();
    assert_eq!(features.shape(), &[members, steps, cells - 1, 2]);
    assert_close(features[[2, 0, 0, 1]], 32.0 + 273.15, 1e-12);

    let targets = wi.values.into_dyn();
    let scalings = Scalings::fit(
        features.view(),
        &["PRESSURE", "TEMP"],
        targets.view(),
        ValueRange::new(-1.0, 1.0),
        ValueRange::new(-1.0, 1.0),
    )
    .unwrap();
    assert_close(scalings.inputs["TEMP"].max, 33.0 + 273.15, 1e-12);

    let dir = tempfile::tempdir().unwrap();
    scalings.save(&dir.path().join("scalings.csv")).unwrap();
    assert_eq!(
        Scalings::load(&dir.path().join("scalings.csv")).unwrap(),
        scalings
    );

    let dataset = Dataset { features, targets };
    save_dataset(dir.path(), &dataset).unwrap();
    assert_eq!(load_dataset(dir.path()).unwrap(), dataset);
}
