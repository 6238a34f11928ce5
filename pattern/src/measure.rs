//! Named-value measurement store.
//!
//! A [`MeasurementSet`] maps measurement names (`"start_stitches"`,
//! `"around_foot"`, …) to values and carries a set of *vital* names that must
//! be present for the set to be valid. Every name ever written is tracked in
//! [`MeasurementSet::all_measures`]; values are never removed.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PatternError, Result};
use crate::resolver::IncreaseRate;

/// A single stored measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MeasureValue {
    /// A stitch count, row count, or length.
    Scalar(f64),
    /// A net stitch change over a row interval.
    Rate(IncreaseRate),
}

impl MeasureValue {
    /// Returns the scalar value, or `None` for a rate.
    #[must_use]
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            MeasureValue::Scalar(v) => Some(v),
            MeasureValue::Rate(_) => None,
        }
    }

    /// Returns the rate, or `None` for a scalar.
    #[must_use]
    pub fn as_rate(self) -> Option<IncreaseRate> {
        match self {
            MeasureValue::Rate(r) => Some(r),
            MeasureValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for MeasureValue {
    fn from(v: f64) -> Self {
        MeasureValue::Scalar(v)
    }
}

impl From<IncreaseRate> for MeasureValue {
    fn from(r: IncreaseRate) -> Self {
        MeasureValue::Rate(r)
    }
}

/// A store of named measurements with a required ("vital") subset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementSet {
    values: BTreeMap<String, MeasureValue>,
    vital: BTreeSet<String>,
    all_measures: BTreeSet<String>,
}

impl MeasurementSet {
    /// Builds a set from its vital names and an initial mapping.
    ///
    /// # Errors
    ///
    /// - [`PatternError::InvalidMeasureName`] if any name is empty.
    /// - [`PatternError::EmptyMeasurement`] if both `vital` and `values` are
    ///   empty.
    /// - [`PatternError::IncompleteMeasurement`] if a vital name has no value.
    pub fn new<K, V>(
        vital: &[&str],
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<MeasureValue>,
    {
        let mut set = MeasurementSet::default();
        for name in vital {
            if name.is_empty() {
                return Err(PatternError::InvalidMeasureName);
            }
            set.vital.insert((*name).to_owned());
            set.all_measures.insert((*name).to_owned());
        }
        for (name, value) in values {
            set.set(name, value)?;
        }
        set.check()?;
        Ok(set)
    }

    /// Builds a set with no vital names.
    ///
    /// # Errors
    ///
    /// Same as [`MeasurementSet::new`]; an empty mapping is rejected with
    /// [`PatternError::EmptyMeasurement`].
    pub fn from_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<MeasureValue>,
    {
        Self::new(&[], values)
    }

    fn check(&self) -> Result<()> {
        if self.vital.is_empty() && self.values.is_empty() {
            return Err(PatternError::EmptyMeasurement);
        }
        let missing = self.missing(self.vital.iter());
        if !missing.is_empty() {
            return Err(PatternError::IncompleteMeasurement { missing });
        }
        Ok(())
    }

    /// Stores `value` under `name`. Repeat writes overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidMeasureName`] if `name` is empty.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<MeasureValue>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(PatternError::InvalidMeasureName);
        }
        self.all_measures.insert(name.clone());
        self.values.insert(name, value.into());
        Ok(())
    }

    pub(crate) fn put(&mut self, name: &'static str, value: MeasureValue) {
        self.all_measures.insert(name.to_owned());
        self.values.insert(name.to_owned(), value);
    }

    /// Returns the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownMeasurement`] if `name` was never set.
    pub fn get(&self, name: &str) -> Result<MeasureValue> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| PatternError::UnknownMeasurement {
                name: name.to_owned(),
            })
    }

    /// Returns the scalar stored under `name`.
    ///
    /// # Errors
    ///
    /// [`PatternError::UnknownMeasurement`] if absent,
    /// [`PatternError::MeasurementKindMismatch`] if the value is a rate.
    pub fn scalar(&self, name: &str) -> Result<f64> {
        self.get(name)?
            .as_scalar()
            .ok_or_else(|| PatternError::MeasurementKindMismatch {
                name: name.to_owned(),
                expected: "scalar",
            })
    }

    /// Returns the rate stored under `name`.
    ///
    /// # Errors
    ///
    /// [`PatternError::UnknownMeasurement`] if absent,
    /// [`PatternError::MeasurementKindMismatch`] if the value is a scalar.
    pub fn rate(&self, name: &str) -> Result<IncreaseRate> {
        self.get(name)?
            .as_rate()
            .ok_or_else(|| PatternError::MeasurementKindMismatch {
                name: name.to_owned(),
                expected: "rate",
            })
    }

    /// Returns `true` if `name` has a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns `true` iff every name in `names` has a value.
    pub fn has_all<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().all(|n| self.contains(n.as_ref()))
    }

    /// Returns the names in `names` that have no value, sorted.
    pub fn missing<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut missing: Vec<String> = names
            .into_iter()
            .filter(|n| !self.contains(n.as_ref()))
            .map(|n| n.as_ref().to_owned())
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Names that currently have a value.
    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names that must be present.
    pub fn vital(&self) -> impl Iterator<Item = &str> {
        self.vital.iter().map(String::as_str)
    }

    /// Every name ever written or declared vital.
    pub fn all_measures(&self) -> impl Iterator<Item = &str> {
        self.all_measures.iter().map(String::as_str)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MeasureValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        let err = MeasurementSet::from_values(Vec::<(&str, f64)>::new()).unwrap_err();
        assert_eq!(err, PatternError::EmptyMeasurement);
    }

    #[test]
    fn values_without_vital_names() {
        let set =
            MeasurementSet::from_values([("start_stitches", 1.0), ("end_stitches", 11.0)]).unwrap();
        assert_eq!(set.vital().count(), 0);
        let all: Vec<&str> = set.all_measures().collect();
        assert_eq!(all, vec!["end_stitches", "start_stitches"]);
    }

    #[test]
    fn missing_vital_name_is_reported() {
        let err = MeasurementSet::new(
            &["n_rows"],
            [("start_stitches", 1.0), ("end_stitches", 11.0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PatternError::IncompleteMeasurement {
                missing: vec!["n_rows".to_owned()]
            }
        );
    }

    #[test]
    fn vital_names_only_is_incomplete_not_empty() {
        let err = MeasurementSet::new(&["around_foot"], Vec::<(&str, f64)>::new()).unwrap_err();
        assert!(matches!(err, PatternError::IncompleteMeasurement { .. }));
    }

    #[test]
    fn set_tracks_names_and_last_write_wins() {
        let mut set = MeasurementSet::new(&["start_stitches"], [("start_stitches", 2.0)]).unwrap();
        set.set("n_rows", 6.0).unwrap();
        set.set("n_rows", 8.0).unwrap();
        assert_eq!(set.scalar("n_rows").unwrap(), 8.0);
        assert!(set.has_all(["start_stitches", "n_rows"]));
        assert!(!set.has_all(["end_stitches"]));
        assert_eq!(set.all_measures().count(), 2);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut set = MeasurementSet::from_values([("a", 1.0)]).unwrap();
        assert_eq!(set.set("", 1.0), Err(PatternError::InvalidMeasureName));
    }

    #[test]
    fn unknown_and_mismatched_reads() {
        let mut set = MeasurementSet::from_values([("start_stitches", 12.0)]).unwrap();
        set.set("increase_rate", IncreaseRate::new(4.0, 2.0)).unwrap();
        assert_eq!(
            set.get("end_stitches"),
            Err(PatternError::UnknownMeasurement {
                name: "end_stitches".to_owned()
            })
        );
        assert!(matches!(
            set.scalar("increase_rate"),
            Err(PatternError::MeasurementKindMismatch { .. })
        ));
        assert_eq!(set.rate("increase_rate").unwrap(), IncreaseRate::new(4.0, 2.0));
    }

    #[test]
    fn missing_is_sorted_and_deduplicated() {
        let set = MeasurementSet::from_values([("b", 1.0)]).unwrap();
        assert_eq!(set.missing(["z", "a", "b", "a"]), vec!["a", "z"]);
    }
}
