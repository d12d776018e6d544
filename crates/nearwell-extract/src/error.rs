//! Error types for extraction.

use std::io;
use std::path::PathBuf;

use nearwell_geometry::GeometryError;
use thiserror::Error;

/// Errors from feature extraction, grid parsing and dataset I/O.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A requested keyword is absent from the data.
    #[error("keyword '{keyword}' not present in data")]
    MissingKeyword {
        /// The missing keyword.
        keyword: String,
    },
    /// No keywords were requested.
    #[error("at least one keyword is required")]
    NoKeywords,
    /// A keyword's array cannot be broadcast to the common shape.
    #[error("keyword '{keyword}' with shape {shape:?} does not broadcast with {target:?}")]
    IncompatibleShapes {
        /// The offending keyword.
        keyword: String,
        /// Its shape.
        shape: Vec<usize>,
        /// The common shape accumulated so far.
        target: Vec<usize>,
    },
    /// The grid file could not be read.
    #[error("failed to read grid file {path}: {source}")]
    GridFile {
        /// The grid file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The grid file has the wrong number of radius rows.
    #[error("grid file has {found} radius rows, expected {expected}")]
    GridRows {
        /// `num_cells + 1`.
        expected: usize,
        /// Rows found after the header.
        found: usize,
    },
    /// A radius row does not start with a number.
    #[error("grid file line {line}: cannot parse radius from '{text}'")]
    BadRadius {
        /// One-based line number in the file.
        line: usize,
        /// The line contents.
        text: String,
    },
    /// The parsed radii do not form a valid grid.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// A scalings file is missing a required row.
    #[error("scalings file has no '{row}' row")]
    MissingScaling {
        /// The row tag.
        row: String,
    },
    /// Scalings cannot be fitted to empty or misshaped data.
    #[error("cannot fit scalings: {reason}")]
    Fit {
        /// What was wrong with the data.
        reason: String,
    },
    /// CSV encoding or decoding failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Writing a `.npy` file failed.
    #[error(transparent)]
    WriteNpy(#[from] ndarray_npy::WriteNpyError),
    /// Reading a `.npy` file failed.
    #[error(transparent)]
    ReadNpy(#[from] ndarray_npy::ReadNpyError),
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors from the per-member well-index primitive.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WiError {
    /// The well index is NaN or infinite, typically a zero pressure
    /// differential.
    #[error("non-finite well index at step {step}, cell {cell}")]
    NonFinite {
        /// Report step.
        step: usize,
        /// Grid-block cell index (1-based among pressure columns).
        cell: usize,
    },
    /// Pressure and rate arrays disagree on the number of steps or members.
    #[error("pressures {pressures:?} do not match rates {rates:?}")]
    ShapeMismatch {
        /// Pressure shape.
        pressures: Vec<usize>,
        /// Rate shape.
        rates: Vec<usize>,
    },
    /// Fewer than two pressure columns: there is no grid block.
    #[error("need a well column and at least one grid-block column, got {cells}")]
    TooFewCells {
        /// Number of pressure columns.
        cells: usize,
    },
}
