//! Fixtures and fake simulator output for nearwell tests.
//!
//! - [`specs`]: small [`RunSpecs`](nearwell_core::RunSpecs) scenarios.
//! - [`output`]: an in-memory [`ResultReader`](nearwell_runner::ResultReader).
//! - [`files`]: grid-geometry files and scripted member decks on disk.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod files;
pub mod output;
pub mod specs;

/// Assert two floats agree to a relative tolerance.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, rel: f64) {
    let scale = expected.abs().max(1e-300);
    assert!(
        (actual - expected).abs() <= rel * scale,
        "expected {expected}, got {actual} (rel tol {rel})"
    );
}
