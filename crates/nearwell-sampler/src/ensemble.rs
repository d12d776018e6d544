//! Ensemble construction: meshing, subsampling and efficient draws.

use std::collections::HashSet;

use nearwell_core::{Ensemble, EnsembleMember, ParamValue, RunSpecs};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SamplingConfig;
use crate::distribution::sample_variable;
use crate::efficient::draw_indices;
use crate::error::SampleError;

/// Size of the full Cartesian product of all variables, `∏ npoints`.
///
/// `None` if the product overflows `usize`.
pub fn parameter_space_size(specs: &RunSpecs) -> Option<usize> {
    specs
        .variables
        .iter()
        .try_fold(1usize, |acc, v| acc.checked_mul(v.npoints))
}

/// Build an ensemble from run specs.
///
/// 1. Each variable draws `npoints` samples.
/// 2. Variables in [`SamplingConfig::efficient_sampling`] draw one sample
///    index per member, with replacement.
/// 3. The remaining variables are meshed. Mesh combinations are decoded
///    from flat indices on demand, first variable slowest, so only the
///    selected combinations are ever built.
/// 4. If fewer members are requested than the mesh holds, a uniform
///    subsample without replacement is taken. A mesh too large to index
///    with a `usize` is subsampled by drawing distinct combinations
///    directly.
///
/// Each member carries the run-spec constants followed by the sampled
/// values, in variable declaration order.
///
/// # Errors
///
/// - [`SampleError::Spec`] if a variable spec is invalid.
/// - [`SampleError::UnknownVariable`] for unknown efficient-sampling names.
/// - [`SampleError::TooManyMembers`] if `npoints` exceeds `∏ npoints`.
/// - [`SampleError::MissingMemberCount`] if efficient sampling is requested
///   without an explicit `npoints`.
/// - [`SampleError::SpaceTooLarge`] if `npoints` is `None` and `∏ npoints`
///   overflows `usize`.
pub fn create_ensemble(specs: &RunSpecs, config: &SamplingConfig) -> Result<Ensemble, SampleError> {
    specs.validate()?;
    for name in &config.efficient_sampling {
        if specs.variable(name).is_none() {
            return Err(SampleError::UnknownVariable { name: name.clone() });
        }
    }

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    debug!(seed, "seeding ensemble sampler");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let samples: Vec<Vec<ParamValue>> = specs
        .variables
        .iter()
        .map(|v| sample_variable(v, &mut rng))
        .collect();

    let full_size = parameter_space_size(specs);
    let requested = match (specs.npoints, full_size) {
        (Some(n), _) => n,
        (None, _) if !config.efficient_sampling.is_empty() => {
            return Err(SampleError::MissingMemberCount)
        }
        (None, Some(size)) => size,
        (None, None) => return Err(SampleError::SpaceTooLarge),
    };
    if let Some(available) = full_size {
        if requested > available {
            return Err(SampleError::TooManyMembers {
                requested,
                available,
            });
        }
    }

    let (meshed, efficient): (Vec<usize>, Vec<usize>) = (0..specs.variables.len())
        .partition(|&i| !config.is_efficient(&specs.variables[i].name));
    let radices: Vec<usize> = meshed
        .iter()
        .map(|&i| specs.variables[i].npoints)
        .collect();
    let mesh_size = radices
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n));
    let mesh_digits: Vec<Vec<usize>> = match mesh_size {
        Some(size) => select_mesh_indices(&mut rng, size, requested)
            .into_iter()
            .map(|flat| {
                let mut digits = vec![0usize; radices.len()];
                decode_mixed_radix(flat, &radices, &mut digits);
                digits
            })
            .collect(),
        None => draw_distinct_digits(&mut rng, &radices, requested),
    };
    let efficient_draws: Vec<Vec<usize>> = efficient
        .iter()
        .map(|&i| draw_indices(&mut rng, specs.variables[i].npoints, requested))
        .collect();

    let mut choice = vec![0usize; specs.variables.len()];
    let mut members = Vec::with_capacity(requested);
    for (j, digits) in mesh_digits.iter().enumerate() {
        for (&var, &digit) in meshed.iter().zip(digits) {
            choice[var] = digit;
        }
        for (&var, draws) in efficient.iter().zip(&efficient_draws) {
            choice[var] = draws[j];
        }
        let sampled = specs
            .variables
            .iter()
            .zip(&samples)
            .zip(&choice)
            .map(|((spec, values), &c)| (spec.name.clone(), values[c].clone()));
        members.push(EnsembleMember::new(&specs.constants, sampled));
    }

    info!(
        members = members.len(),
        meshed = meshed.len(),
        efficient = efficient.len(),
        mesh_size = ?mesh_size,
        "ensemble created"
    );
    Ok(Ensemble::new(members))
}

/// Flat mesh indices for `requested` members.
///
/// Every index when the mesh is exhausted exactly, a sorted uniform
/// subsample when it is larger, and whole passes plus a subsample when it
/// is smaller (only reachable with efficient variables).
fn select_mesh_indices<R: Rng>(rng: &mut R, mesh_size: usize, requested: usize) -> Vec<usize> {
    let passes = requested / mesh_size;
    let remainder = requested % mesh_size;
    let mut indices: Vec<usize> = (0..passes * mesh_size).map(|j| j % mesh_size).collect();
    if remainder > 0 {
        let mut tail = index::sample(rng, mesh_size, remainder).into_vec();
        tail.sort_unstable();
        indices.extend(tail);
    }
    indices
}

/// `requested` distinct mesh combinations drawn digit by digit, sorted with
/// the first variable slowest.
///
/// Used when the mesh is too large for flat indices. `requested` is then far
/// below the mesh size, so rejected duplicates are rare.
fn draw_distinct_digits<R: Rng>(
    rng: &mut R,
    radices: &[usize],
    requested: usize,
) -> Vec<Vec<usize>> {
    let mut seen: HashSet<Vec<usize>> = HashSet::with_capacity(requested);
    while seen.len() < requested {
        seen.insert(radices.iter().map(|&r| rng.random_range(0..r)).collect());
    }
    let mut picked: Vec<Vec<usize>> = seen.into_iter().collect();
    picked.sort_unstable();
    picked
}

/// Decode `flat` into per-variable indices, last variable fastest.
fn decode_mixed_radix(mut flat: usize, radices: &[usize], digits: &mut [usize]) {
    for (digit, &radix) in digits.iter_mut().zip(radices).rev() {
        *digit = flat % radix;
        flat /= radix;
    }
}
