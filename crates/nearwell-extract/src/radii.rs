//! Cell radii from grid-geometry files.
//!
//! The grid generator writes a fixed layout: nine header lines, then one
//! row per ring boundary whose first whitespace-separated token is the
//! radius. For a triangle-sector grid the rows hold sector altitudes
//! instead, which are rescaled to equal-area radii.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nearwell_geometry::RadialGrid;

use crate::error::ExtractError;

/// Header lines preceding the radius rows.
pub const GRID_HEADER_LINES: usize = 9;

/// How to interpret the radius rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiiOptions {
    /// Rows are triangle-sector altitudes; apply
    /// [`RadialGrid::triangle_correction_factor`]. Default: false.
    pub triangle_grid: bool,
    /// Sector angle in radians. Default: π/3.
    pub angle: f64,
}

impl Default for RadiiOptions {
    fn default() -> Self {
        Self {
            triangle_grid: false,
            angle: PI / 3.0,
        }
    }
}

/// Read a grid-geometry file with `num_cells` rings.
pub fn calculate_radii(
    path: &Path,
    num_cells: usize,
    options: RadiiOptions,
) -> Result<RadialGrid, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::GridFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_radii(BufReader::new(file), num_cells, options)
}

/// Parse grid-geometry text from any reader.
///
/// Exactly `num_cells + 1` rows must follow the header. Blank lines at the
/// end are ignored.
pub fn parse_radii<R: BufRead>(
    reader: R,
    num_cells: usize,
    options: RadiiOptions,
) -> Result<RadialGrid, ExtractError> {
    let mut rows: Vec<String> = reader
        .lines()
        .skip(GRID_HEADER_LINES)
        .collect::<Result<_, _>>()?;
    while rows.last().is_some_and(|l| l.trim().is_empty()) {
        rows.pop();
    }
    let expected = num_cells + 1;
    if rows.len() != expected {
        return Err(ExtractError::GridRows {
            expected,
            found: rows.len(),
        });
    }

    let boundaries = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.split_whitespace()
                .next()
                .and_then(|token| token.parse::<f64>().ok())
                .ok_or_else(|| ExtractError::BadRadius {
                    line: GRID_HEADER_LINES + i + 1,
                    text: row.clone(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let grid = RadialGrid::new(boundaries)?;
    if options.triangle_grid {
        Ok(grid.with_triangle_correction(options.angle)?)
    } else {
        Ok(grid)
    }
}
