//! Per-variable sample draws.

use nearwell_core::{DistributionKind, ParamValue, VariableSpec};
use rand::Rng;

/// Draw `spec.npoints` values from the variable's distribution.
///
/// Every value lies in `[spec.min, spec.max]`. Log-uniform values are
/// strictly positive. The spec is assumed valid (see
/// [`VariableSpec::validate`]).
pub fn sample_variable<R: Rng>(spec: &VariableSpec, rng: &mut R) -> Vec<ParamValue> {
    (0..spec.npoints)
        .map(|_| draw_one(spec, rng))
        .collect()
}

fn draw_one<R: Rng>(spec: &VariableSpec, rng: &mut R) -> ParamValue {
    match spec.distribution {
        DistributionKind::LogUniform => {
            let (lo, hi) = (spec.min.ln(), spec.max.ln());
            let u: f64 = rng.random();
            // exp(ln x) can round just outside the bounds.
            ParamValue::Float((lo + u * (hi - lo)).exp().clamp(spec.min, spec.max))
        }
        DistributionKind::UniformInt => {
            let (lo, hi) = spec.integer_bounds();
            ParamValue::Int(rng.random_range(lo..=hi))
        }
        DistributionKind::UniformFloat => {
            let u: f64 = rng.random();
            ParamValue::Float(spec.min + u * (spec.max - spec.min))
        }
    }
}
