//! Feature tensor assembly.

use indexmap::IndexMap;
use ndarray::{ArrayD, ArrayViewD, Axis};
use nearwell_geometry::broadcast_shape;
use serde::Deserialize;

use crate::error::ExtractError;

/// Unit conversion applied to one keyword before stacking.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// Add a constant, e.g. Celsius to Kelvin.
    Shift(f64),
    /// Multiply by a constant, e.g. bar to Pa.
    Scale(f64),
}

impl Default for Scaling {
    fn default() -> Self {
        Self::Scale(1.0)
    }
}

impl Scaling {
    /// Apply the conversion to one value.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Shift(offset) => value + offset,
            Self::Scale(factor) => value * factor,
        }
    }
}

/// Per-keyword [`Scaling`]s. Keywords without an entry are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct KeywordScalings(IndexMap<String, Scaling>);

impl KeywordScalings {
    /// No conversions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversions from the simulator's metric output to SI:
    /// `TEMP` in °C shifted to K and `PRESSURE` in bar scaled to Pa.
    pub fn metric_to_si() -> Self {
        Self::new()
            .with("TEMP", Scaling::Shift(273.15))
            .with("PRESSURE", Scaling::Scale(1e5))
    }

    /// Add or replace the conversion for `keyword`.
    pub fn with(mut self, keyword: impl Into<String>, scaling: Scaling) -> Self {
        self.0.insert(keyword.into(), scaling);
        self
    }

    /// Conversion for `keyword`, [`Scaling::default`] if none is set.
    pub fn get(&self, keyword: &str) -> Scaling {
        self.0.get(keyword).copied().unwrap_or_default()
    }
}

/// Stack the arrays of `keywords` into one tensor with a trailing feature
/// axis, in `keywords` order.
///
/// Each array is converted with its [`Scaling`] and broadcast to the common
/// shape of all requested arrays (numpy rules), so per-member scalars and
/// per-cell fields can be mixed. The result has shape
/// `common_shape + [keywords.len()]`.
///
/// # Errors
///
/// [`ExtractError::NoKeywords`], [`ExtractError::MissingKeyword`], or
/// [`ExtractError::IncompatibleShapes`] when shapes do not broadcast.
pub fn extract_features<S: AsRef<str>>(
    data: &IndexMap<String, ArrayD<f64>>,
    keywords: &[S],
    scalings: &KeywordScalings,
) -> Result<ArrayD<f64>, ExtractError> {
    if keywords.is_empty() {
        return Err(ExtractError::NoKeywords);
    }

    let mut shape: Vec<usize> = Vec::new();
    let mut scaled = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.as_ref();
        let array = data.get(keyword).ok_or_else(|| ExtractError::MissingKeyword {
            keyword: keyword.to_string(),
        })?;
        shape = broadcast_shape(&shape, array.shape()).ok_or_else(|| {
            ExtractError::IncompatibleShapes {
                keyword: keyword.to_string(),
                shape: array.shape().to_vec(),
                target: shape.clone(),
            }
        })?;
        let scaling = scalings.get(keyword);
        scaled.push((keyword, array.mapv(|v| scaling.apply(v))));
    }

    let views = scaled
        .iter()
        .map(|(keyword, array)| {
            array
                .broadcast(shape.as_slice())
                .ok_or_else(|| ExtractError::IncompatibleShapes {
                    keyword: keyword.to_string(),
                    shape: array.shape().to_vec(),
                    target: shape.clone(),
                })
        })
        .collect::<Result<Vec<ArrayViewD<'_, f64>>, _>>()?;

    ndarray::stack(Axis(shape.len()), &views).map_err(|_| ExtractError::IncompatibleShapes {
        keyword: keywords[0].as_ref().to_string(),
        shape: shape.clone(),
        target: shape.clone(),
    })
}
