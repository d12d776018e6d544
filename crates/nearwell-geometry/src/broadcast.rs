//! Numpy-style shape broadcasting.

/// Compute the shape two arrays broadcast to.
///
/// Shapes are aligned at their trailing axes; each pair of extents must be
/// equal or one of them must be 1. Returns `None` if the shapes are
/// incompatible.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Option<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut out = vec![0; ndim];
    for i in 0..ndim {
        let a = extent_from_back(lhs, ndim - 1 - i);
        let b = extent_from_back(rhs, ndim - 1 - i);
        out[i] = match (a, b) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return None,
        };
    }
    Some(out)
}

fn extent_from_back(shape: &[usize], from_back: usize) -> usize {
    if from_back < shape.len() {
        shape[shape.len() - 1 - from_back]
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_shapes() {
        assert_eq!(broadcast_shape(&[2, 3], &[2, 3]), Some(vec![2, 3]));
    }

    #[test]
    fn trailing_alignment() {
        assert_eq!(broadcast_shape(&[4, 1, 3], &[5, 1]), Some(vec![4, 5, 3]));
        assert_eq!(broadcast_shape(&[], &[3]), Some(vec![3]));
    }

    #[test]
    fn incompatible() {
        assert_eq!(broadcast_shape(&[2, 3], &[4]), None);
    }
}
