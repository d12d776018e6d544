//! Run-spec scenarios shared by sampler and pipeline tests.

use indexmap::IndexMap;
use nearwell_core::{DistributionKind, ParamValue, RunSpecs, VariableSpec};

/// `TEMP` (3 points), `RATE` (2) and `PRESSURE` (2): a 12-point mesh.
///
/// All three are uniform floats. Constants `FLOW = "flow"` and
/// `NUM_ZCELLS = 5` are merged into every member.
pub fn three_variable_specs(npoints: Option<usize>) -> RunSpecs {
    let mut constants = IndexMap::new();
    constants.insert("FLOW".to_string(), ParamValue::from("flow"));
    constants.insert("NUM_ZCELLS".to_string(), ParamValue::Int(5));
    RunSpecs {
        variables: vec![
            VariableSpec::new("TEMP", 20.0, 80.0, 3, DistributionKind::UniformFloat),
            VariableSpec::new("RATE", 1e3, 1e5, 2, DistributionKind::UniformFloat),
            VariableSpec::new("PRESSURE", 50.0, 150.0, 2, DistributionKind::UniformFloat),
        ],
        constants,
        npoints,
    }
}

/// `layers` log-uniform permeabilities `PERM_0..` in `[1e-14, 1e-12]` with
/// `points` samples each, followed by `TEMP` in `[20, 60]` with 3 points.
pub fn layered_permeability_specs(layers: usize, points: usize, npoints: Option<usize>) -> RunSpecs {
    let mut variables: Vec<VariableSpec> = (0..layers)
        .map(|i| VariableSpec::inferred(format!("PERM_{i}"), 1e-14, 1e-12, points))
        .collect();
    variables.push(VariableSpec::new(
        "TEMP",
        20.0,
        60.0,
        3,
        DistributionKind::UniformFloat,
    ));
    RunSpecs {
        variables,
        constants: IndexMap::new(),
        npoints,
    }
}
