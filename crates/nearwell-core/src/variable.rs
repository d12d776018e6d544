//! Variable specifications: a named range, a sample count, and the
//! distribution the samples are drawn from.

use serde::Deserialize;

use crate::error::SpecError;

/// Distribution a [`VariableSpec`] is sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionKind {
    /// `exp(U(ln min, ln max))`. Requires `min > 0`.
    LogUniform,
    /// Uniform over the integers in `[min, max]`.
    UniformInt,
    /// `U(min, max)`.
    UniformFloat,
}

impl DistributionKind {
    /// Infer the distribution from the legacy naming convention.
    ///
    /// Names starting with `PERM` or `LOG` are log-distributed, names
    /// starting with `INT` are integers, everything else is a float.
    pub fn infer_from_name(name: &str) -> Self {
        if name.starts_with("PERM") || name.starts_with("LOG") {
            Self::LogUniform
        } else if name.starts_with("INT") {
            Self::UniformInt
        } else {
            Self::UniformFloat
        }
    }
}

/// A sampled variable: `npoints` draws from `distribution` over `[min, max]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "VariableEntry")]
pub struct VariableSpec {
    /// Variable name, used as the key in every ensemble member.
    pub name: String,
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Number of samples drawn for this variable.
    pub npoints: usize,
    /// Sampling distribution.
    pub distribution: DistributionKind,
}

impl VariableSpec {
    /// Create a spec with an explicit distribution.
    pub fn new(
        name: impl Into<String>,
        min: f64,
        max: f64,
        npoints: usize,
        distribution: DistributionKind,
    ) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            npoints,
            distribution,
        }
    }

    /// Create a spec whose distribution follows the name prefix convention
    /// (see [`DistributionKind::infer_from_name`]).
    pub fn inferred(name: impl Into<String>, min: f64, max: f64, npoints: usize) -> Self {
        let name = name.into();
        let distribution = DistributionKind::infer_from_name(&name);
        Self::new(name, min, max, npoints, distribution)
    }

    /// Inclusive integer bounds `(ceil(min), floor(max))` for integer sampling.
    pub fn integer_bounds(&self) -> (i64, i64) {
        (self.min.ceil() as i64, self.max.floor() as i64)
    }

    /// Check the structural invariants of the spec.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SpecError::NonFiniteBound {
                name: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(SpecError::InvertedRange {
                name: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if self.npoints == 0 {
            return Err(SpecError::ZeroPoints {
                name: self.name.clone(),
            });
        }
        match self.distribution {
            DistributionKind::LogUniform if self.min <= 0.0 => {
                Err(SpecError::NonPositiveLogBound {
                    name: self.name.clone(),
                    min: self.min,
                })
            }
            DistributionKind::UniformInt => {
                let (lo, hi) = self.integer_bounds();
                if lo > hi {
                    Err(SpecError::EmptyIntegerRange {
                        name: self.name.clone(),
                        min: self.min,
                        max: self.max,
                    })
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

/// On-disk form of a [`VariableSpec`]; `distribution` may be omitted.
#[derive(Deserialize)]
struct VariableEntry {
    name: String,
    min: f64,
    max: f64,
    npoints: usize,
    #[serde(default)]
    distribution: Option<DistributionKind>,
}

impl From<VariableEntry> for VariableSpec {
    fn from(e: VariableEntry) -> Self {
        let distribution = e
            .distribution
            .unwrap_or_else(|| DistributionKind::infer_from_name(&e.name));
        Self {
            name: e.name,
            min: e.min,
            max: e.max,
            npoints: e.npoints,
            distribution,
        }
    }
}
