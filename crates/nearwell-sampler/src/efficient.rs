//! Memory-efficient per-member sampling.

use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SampleError;

/// Draw `num_members` values per row of `variables`, with replacement.
///
/// `variables` has shape `(k, n)`: `k` variables with `n` candidate values
/// each. Row `i` of the `(k, num_members)` result only contains elements of
/// `variables.row(i)`. Rows are drawn independently, so no `n^k` grid is
/// ever built.
///
/// # Errors
///
/// [`SampleError::EmptyVariable`] if `n == 0` while `num_members > 0`.
pub fn memory_efficient_sample<R: Rng>(
    variables: ArrayView2<'_, f64>,
    num_members: usize,
    rng: &mut R,
) -> Result<Array2<f64>, SampleError> {
    let (k, n) = variables.dim();
    let mut out = Array2::<f64>::zeros((k, num_members));
    if num_members == 0 {
        return Ok(out);
    }
    if n == 0 && k > 0 {
        return Err(SampleError::EmptyVariable { row: 0 });
    }
    for (row, mut out_row) in out.outer_iter_mut().enumerate() {
        for (slot, index) in out_row.iter_mut().zip(draw_indices(rng, n, num_members)) {
            *slot = variables[[row, index]];
        }
    }
    Ok(out)
}

/// [`memory_efficient_sample`] with its own ChaCha8 generator.
pub fn memory_efficient_sample_seeded(
    variables: ArrayView2<'_, f64>,
    num_members: usize,
    seed: Option<u64>,
) -> Result<Array2<f64>, SampleError> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::rng().random()),
    };
    memory_efficient_sample(variables, num_members, &mut rng)
}

/// `count` independent indices in `0..n`.
pub(crate) fn draw_indices<R: Rng>(rng: &mut R, n: usize, count: usize) -> Vec<usize> {
    (0..count).map(|_| rng.random_range(0..n)).collect()
}
