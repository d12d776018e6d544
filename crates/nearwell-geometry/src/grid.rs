//! Radial grids: concentric ring boundaries around the well.

use std::f64::consts::PI;

use ndarray::{s, Array1, ArrayView1};

use crate::area::check_length;
use crate::error::GeometryError;

/// Concentric rings described by `N + 1` strictly increasing boundary radii.
///
/// Cell `i` spans `[boundary[i], boundary[i + 1])`; its centre is the
/// midpoint of the two.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGrid {
    boundaries: Array1<f64>,
}

impl RadialGrid {
    /// Build a grid from boundary radii.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two boundaries are given, if any radius is
    /// negative or non-finite, or if the radii are not strictly increasing.
    pub fn new(boundaries: impl Into<Array1<f64>>) -> Result<Self, GeometryError> {
        let boundaries = boundaries.into();
        if boundaries.len() < 2 {
            return Err(GeometryError::EmptyGrid {
                boundaries: boundaries.len(),
            });
        }
        for &r in boundaries.iter() {
            check_length("radius", r)?;
        }
        check_strictly_increasing(boundaries.view())?;
        Ok(Self { boundaries })
    }

    /// Multiplier turning triangle-sector altitudes into equivalent radii
    /// for a sector of `angle` radians: `2·tan(θ/2)/θ`.
    pub fn triangle_correction_factor(angle: f64) -> Result<f64, GeometryError> {
        if !angle.is_finite() || angle <= 0.0 || angle > 2.0 * PI {
            return Err(GeometryError::InvalidAngle { angle });
        }
        Ok(2.0 * (angle / 2.0).tan() / angle)
    }

    /// Rescale every radius of a triangle-sector grid with
    /// [`triangle_correction_factor`](Self::triangle_correction_factor).
    pub fn with_triangle_correction(self, angle: f64) -> Result<Self, GeometryError> {
        let factor = Self::triangle_correction_factor(angle)?;
        Self::new(self.boundaries * factor)
    }

    /// Number of cells (rings).
    pub fn num_cells(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// The `N + 1` boundary radii.
    pub fn boundary_radii(&self) -> ArrayView1<'_, f64> {
        self.boundaries.view()
    }

    /// Inner boundary of each cell.
    pub fn inner_radii(&self) -> ArrayView1<'_, f64> {
        self.boundaries.slice(s![..-1])
    }

    /// Outer boundary of each cell.
    pub fn outer_radii(&self) -> ArrayView1<'_, f64> {
        self.boundaries.slice(s![1..])
    }

    /// Midpoint radius of each cell.
    pub fn cell_center_radii(&self) -> Array1<f64> {
        (&self.inner_radii() + &self.outer_radii()) * 0.5
    }

    /// Full-circle annulus area of each cell.
    pub fn ring_areas(&self) -> Array1<f64> {
        let outer = self.outer_radii().mapv(|r| r * r);
        let inner = self.inner_radii().mapv(|r| r * r);
        (outer - inner) * PI
    }

    /// Outermost radius.
    pub fn max_radius(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }
}

pub(crate) fn check_strictly_increasing(radii: ArrayView1<'_, f64>) -> Result<(), GeometryError> {
    for (index, pair) in radii.windows(2).into_iter().enumerate() {
        if pair[1] <= pair[0] {
            return Err(GeometryError::NonMonotonicRadii { index: index + 1 });
        }
    }
    Ok(())
}
