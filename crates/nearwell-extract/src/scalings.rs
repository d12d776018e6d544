//! Min/max normalisation ranges and their CSV form.
//!
//! A trained surrogate is only usable together with the ranges its inputs
//! and output were normalised with. They are stored as
//!
//! ```text
//! variable,min,max
//! input_PRESSURE,50.0,150.0
//! input_TEMP,20.0,80.0
//! output_WI,1e-13,4e-12
//! feature_range,-1.0,1.0
//! target_range,-1.0,1.0
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use ndarray::{ArrayViewD, Axis};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

const INPUT_PREFIX: &str = "input_";
const OUTPUT_ROW: &str = "output_WI";
const FEATURE_RANGE_ROW: &str = "feature_range";
const TARGET_RANGE_ROW: &str = "target_range";

/// A closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl ValueRange {
    /// `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The smallest range holding every value of `values`.
    fn of<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, &v| {
            Some(match acc {
                None => Self::new(v, v),
                Some(r) => Self::new(r.min.min(v), r.max.max(v)),
            })
        })
    }

    fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// Linear map from a data range onto a normalised range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    /// Range of the raw data.
    pub data: ValueRange,
    /// Range the data is mapped onto.
    pub scaled: ValueRange,
}

impl MinMax {
    /// Normalise a raw value. A degenerate data range maps to `scaled.min`.
    pub fn transform(&self, value: f64) -> f64 {
        let width = self.data.width();
        if width == 0.0 {
            return self.scaled.min;
        }
        (value - self.data.min) / width * self.scaled.width() + self.scaled.min
    }

    /// Map a normalised value back to raw units.
    pub fn inverse(&self, value: f64) -> f64 {
        let width = self.scaled.width();
        if width == 0.0 {
            return self.data.min;
        }
        (value - self.scaled.min) / width * self.data.width() + self.data.min
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    variable: String,
    min: f64,
    max: f64,
}

/// Normalisation ranges of a feature/target dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Scalings {
    /// Data range of each input feature, in feature order.
    pub inputs: IndexMap<String, ValueRange>,
    /// Data range of the well index.
    pub output: ValueRange,
    /// Range features are normalised to.
    pub feature_range: ValueRange,
    /// Range targets are normalised to.
    pub target_range: ValueRange,
}

impl Scalings {
    /// Fit data ranges to `features` (trailing axis = feature, named by
    /// `names`) and `targets`.
    pub fn fit<S: AsRef<str>>(
        features: ArrayViewD<'_, f64>,
        names: &[S],
        targets: ArrayViewD<'_, f64>,
        feature_range: ValueRange,
        target_range: ValueRange,
    ) -> Result<Self, ExtractError> {
        let last = features.ndim().checked_sub(1).ok_or_else(|| ExtractError::Fit {
            reason: "features have no feature axis".to_string(),
        })?;
        if features.len_of(Axis(last)) != names.len() {
            return Err(ExtractError::Fit {
                reason: format!(
                    "{} feature names for {} features",
                    names.len(),
                    features.len_of(Axis(last))
                ),
            });
        }
        let empty = |what: &str| ExtractError::Fit {
            reason: format!("no {what} values"),
        };

        let mut inputs = IndexMap::with_capacity(names.len());
        for (name, column) in names.iter().zip(features.axis_iter(Axis(last))) {
            let range = ValueRange::of(column.iter()).ok_or_else(|| empty(name.as_ref()))?;
            inputs.insert(name.as_ref().to_string(), range);
        }
        let output = ValueRange::of(targets.iter()).ok_or_else(|| empty("target"))?;
        Ok(Self {
            inputs,
            output,
            feature_range,
            target_range,
        })
    }

    /// Transform for input `name`.
    pub fn input(&self, name: &str) -> Option<MinMax> {
        self.inputs.get(name).map(|&data| MinMax {
            data,
            scaled: self.feature_range,
        })
    }

    /// Transform for the well index.
    pub fn target(&self) -> MinMax {
        MinMax {
            data: self.output,
            scaled: self.target_range,
        }
    }

    /// Write the CSV form.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExtractError> {
        let mut csv = csv::Writer::from_writer(writer);
        let mut emit = |variable: String, range: ValueRange| {
            csv.serialize(Row {
                variable,
                min: range.min,
                max: range.max,
            })
        };
        for (name, &range) in &self.inputs {
            emit(format!("{INPUT_PREFIX}{name}"), range)?;
        }
        emit(OUTPUT_ROW.to_string(), self.output)?;
        emit(FEATURE_RANGE_ROW.to_string(), self.feature_range)?;
        emit(TARGET_RANGE_ROW.to_string(), self.target_range)?;
        csv.flush()?;
        Ok(())
    }

    /// Read the CSV form. Unknown rows are ignored.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, ExtractError> {
        let mut inputs = IndexMap::new();
        let mut output = None;
        let mut feature_range = None;
        let mut target_range = None;
        for row in csv::Reader::from_reader(reader).deserialize::<Row>() {
            let row = row?;
            let range = ValueRange::new(row.min, row.max);
            match row.variable.as_str() {
                OUTPUT_ROW => output = Some(range),
                FEATURE_RANGE_ROW => feature_range = Some(range),
                TARGET_RANGE_ROW => target_range = Some(range),
                other => {
                    if let Some(name) = other.strip_prefix(INPUT_PREFIX) {
                        inputs.insert(name.to_string(), range);
                    }
                }
            }
        }
        let missing = |row: &str| ExtractError::MissingScaling {
            row: row.to_string(),
        };
        Ok(Self {
            inputs,
            output: output.ok_or_else(|| missing(OUTPUT_ROW))?,
            feature_range: feature_range.ok_or_else(|| missing(FEATURE_RANGE_ROW))?,
            target_range: target_range.ok_or_else(|| missing(TARGET_RANGE_ROW))?,
        })
    }

    /// Write to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ExtractError> {
        self.write_csv(File::create(path)?)
    }

    /// Read from `path`.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        Self::read_csv(File::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn fitted() -> Scalings {
        let features = arr2(&[[1.0, 20.0], [3.0, 60.0], [2.0, 40.0]]);
        let targets = arr1(&[0.5, 1.5, 1.0]);
        Scalings::fit(
            features.view().into_dyn(),
            &["PRESSURE", "TEMP"],
            targets.view().into_dyn(),
            ValueRange::new(-1.0, 1.0),
            ValueRange::new(0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn fit_takes_per_feature_extremes() {
        let s = fitted();
        assert_eq!(s.inputs["PRESSURE"], ValueRange::new(1.0, 3.0));
        assert_eq!(s.inputs["TEMP"], ValueRange::new(20.0, 60.0));
        assert_eq!(s.output, ValueRange::new(0.5, 1.5));
    }

    #[test]
    fn csv_layout() {
        let mut buf = Vec::new();
        fitted().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "variable,min,max");
        assert_eq!(lines[1], "input_PRESSURE,1.0,3.0");
        assert_eq!(lines[3], "output_WI,0.5,1.5");
        assert_eq!(lines[5], "target_range,0.0,1.0");
    }

    #[test]
    fn csv_read_restores_ranges() {
        let mut buf = Vec::new();
        fitted().write_csv(&mut buf).unwrap();
        assert_eq!(Scalings::read_csv(buf.as_slice()).unwrap(), fitted());
    }

    #[test]
    fn missing_row_fails() {
        let text = "variable,min,max\ninput_TEMP,0,1\noutput_WI,0,1\nfeature_range,-1,1\n";
        match Scalings::read_csv(text.as_bytes()) {
            Err(ExtractError::MissingScaling { row }) => assert_eq!(row, "target_range"),
            other => panic!("expected MissingScaling, got {other:?}"),
        }
    }

    #[test]
    fn transform_and_inverse() {
        let s = fitted();
        let t = s.input("TEMP").unwrap();
        assert_eq!(t.transform(20.0), -1.0);
        assert_eq!(t.transform(60.0), 1.0);
        assert_eq!(t.transform(40.0), 0.0);
        assert_eq!(t.inverse(0.0), 40.0);
        assert_eq!(s.target().transform(1.0), 0.5);
        assert!(s.input("SGAS").is_none());
    }

    #[test]
    fn mismatched_names_fail_to_fit() {
        let features = arr2(&[[1.0, 2.0]]);
        assert!(matches!(
            Scalings::fit(
                features.view().into_dyn(),
                &["ONLY"],
                arr1(&[1.0]).view().into_dyn(),
                ValueRange::default(),
                ValueRange::default(),
            ),
            Err(ExtractError::Fit { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn transform_stays_inside_scaled_range(
                lo in -1e3f64..1e3,
                width in 1e-3f64..1e3,
                t in 0.0f64..=1.0,
            ) {
                let m = MinMax {
                    data: ValueRange::new(lo, lo + width),
                    scaled: ValueRange::default(),
                };
                let x = m.transform(lo + t * width);
                prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&x));
                prop_assert!((m.inverse(x) - (lo + t * width)).abs() <= 1e-9 * width.max(lo.abs()).max(1.0));
            }
        }
    }
}
