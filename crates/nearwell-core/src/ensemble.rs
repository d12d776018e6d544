//! Ensemble members and ensembles.

use std::ops::Index;

use indexmap::IndexMap;

use crate::value::ParamValue;

/// One concrete parameter assignment, simulated independently.
///
/// Holds the constants followed by the sampled values, in insertion order.
/// A sampled value overrides a constant of the same name. Members are
/// immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleMember {
    values: IndexMap<String, ParamValue>,
}

impl EnsembleMember {
    /// Merge `constants` with `sampled` into a member.
    pub fn new<I>(constants: &IndexMap<String, ParamValue>, sampled: I) -> Self
    where
        I: IntoIterator<Item = (String, ParamValue)>,
    {
        let mut values = constants.clone();
        values.extend(sampled);
        Self { values }
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Numeric value of `name`, if present and numeric.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_f64)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries (constants plus sampled values).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the member holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<String, ParamValue> {
        &self.values
    }
}

/// Ordered sequence of [`EnsembleMember`]s.
///
/// Member `j` is simulated in `runfiles_j` / `results_j`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ensemble {
    members: Vec<EnsembleMember>,
}

impl Ensemble {
    /// Wrap an ordered list of members.
    pub fn new(members: Vec<EnsembleMember>) -> Self {
        Self { members }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the ensemble is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`, if in range.
    pub fn member(&self, index: usize) -> Option<&EnsembleMember> {
        self.members.get(index)
    }

    /// Iterate members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, EnsembleMember> {
        self.members.iter()
    }

    /// Collect the numeric values of `name` across all members.
    ///
    /// Members without a numeric `name` are skipped.
    pub fn column(&self, name: &str) -> Vec<f64> {
        self.members.iter().filter_map(|m| m.get_f64(name)).collect()
    }

    /// Consume the ensemble, returning its members.
    pub fn into_members(self) -> Vec<EnsembleMember> {
        self.members
    }
}

impl Index<usize> for Ensemble {
    type Output = EnsembleMember;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl FromIterator<EnsembleMember> for Ensemble {
    fn from_iter<T: IntoIterator<Item = EnsembleMember>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a EnsembleMember;
    type IntoIter = std::slice::Iter<'a, EnsembleMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> IndexMap<String, ParamValue> {
        let mut c = IndexMap::new();
        c.insert("FLOW".to_string(), ParamValue::from("flow"));
        c.insert("TEMP".to_string(), ParamValue::Float(40.0));
        c
    }

    #[test]
    fn sampled_values_override_constants() {
        let m = EnsembleMember::new(
            &constants(),
            [
                ("TEMP".to_string(), ParamValue::Float(55.0)),
                ("PERM".to_string(), ParamValue::Float(1e-13)),
            ],
        );
        assert_eq!(m.len(), 3);
        assert_eq!(m.get_f64("TEMP"), Some(55.0));
        assert_eq!(m.get("FLOW").and_then(ParamValue::as_str), Some("flow"));
        let names: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["FLOW", "TEMP", "PERM"]);
    }

    #[test]
    fn column_collects_numeric_values() {
        let e: Ensemble = (0..3)
            .map(|i| EnsembleMember::new(&constants(), [("X".to_string(), ParamValue::Int(i))]))
            .collect();
        assert_eq!(e.len(), 3);
        assert_eq!(e.column("X"), vec![0.0, 1.0, 2.0]);
        assert!(e.column("FLOW").is_empty());
        assert_eq!(e[2].get_f64("X"), Some(2.0));
    }
}
