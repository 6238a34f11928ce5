//! Resolver for a linear increase or decrease over a run of rows.
//!
//! Four quantities describe every shaped section of a sock:
//!
//! ```text
//! end_stitches = start_stitches + (delta / interval) * n_rows
//! ```
//!
//! `start_stitches` is always required. Of the other three, any two determine
//! the third. [`IncreaseResolver::resolve`] works out which one is missing,
//! derives it, and rejects inputs that are underdetermined or contradictory.
//!
//! ```
//! use sock_pattern::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver};
//!
//! let toe = IncreaseResolver::resolve(
//!     IncreaseInput::starting_at(12.0).with_end(32.0).with_rows(10.0),
//! )?;
//! assert_eq!(toe.increase_rate(), IncreaseRate::new(2.0, 1.0));
//! # Ok::<(), sock_pattern::PatternError>(())
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{PatternError, Result};
use crate::measure::{MeasureValue, MeasurementSet};

/// Measurement name of the starting stitch count.
pub const START_STITCHES: &str = "start_stitches";
/// Measurement name of the ending stitch count.
pub const END_STITCHES: &str = "end_stitches";
/// Measurement name of the row count.
pub const N_ROWS: &str = "n_rows";
/// Measurement name of the increase rate.
pub const INCREASE_RATE: &str = "increase_rate";

/// Relative tolerance used when comparing stitch counts.
pub const STITCH_TOLERANCE: f64 = 1e-9;

/// Returns `true` if two stitch or row counts agree within
/// [`STITCH_TOLERANCE`].
#[must_use]
pub fn same_count(a: f64, b: f64) -> bool {
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= STITCH_TOLERANCE * scale
}

/// Net change of `delta` stitches every `interval` rows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncreaseRate {
    /// Stitches gained (negative: lost) per interval.
    pub delta: f64,
    /// Rows per interval. Always positive.
    pub interval: f64,
}

impl IncreaseRate {
    /// No shaping: zero stitches every row.
    pub const FLAT: IncreaseRate = IncreaseRate::new(0.0, 1.0);

    /// Creates a rate of `delta` stitches every `interval` rows.
    #[must_use]
    pub const fn new(delta: f64, interval: f64) -> Self {
        Self { delta, interval }
    }

    /// Net stitches gained per single row.
    #[must_use]
    pub fn per_row(self) -> f64 {
        self.delta / self.interval
    }

    /// Returns `true` if the rate neither increases nor decreases.
    #[must_use]
    pub fn is_flat(self) -> bool {
        self.delta == 0.0
    }

    fn check(self) -> Result<Self> {
        if !self.delta.is_finite() {
            return Err(PatternError::invalid(
                INCREASE_RATE,
                self.delta,
                "stitch delta must be finite",
            ));
        }
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(PatternError::invalid(
                INCREASE_RATE,
                self.interval,
                "row interval must be positive",
            ));
        }
        Ok(self)
    }
}

impl fmt::Display for IncreaseRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flat() {
            return f.write_str("no shaping");
        }
        if self.interval == 1.0 {
            write!(f, "{:+} every row", self.delta)
        } else {
            write!(f, "{:+} every {} rows", self.delta, self.interval)
        }
    }
}

/// The quantity a resolver had to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// `n_rows` was derived from start, end and rate.
    Rows,
    /// `end_stitches` was derived from start, rows and rate.
    EndStitches,
    /// `increase_rate` was derived from start, end and rows.
    Rate,
}

impl Missing {
    /// Measurement name of the derived quantity.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Missing::Rows => N_ROWS,
            Missing::EndStitches => END_STITCHES,
            Missing::Rate => INCREASE_RATE,
        }
    }
}

/// Raw, partially known input to an [`IncreaseResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IncreaseInput {
    /// Stitches at the start of the section. Required.
    pub start_stitches: Option<f64>,
    /// Stitches at the end of the section.
    pub end_stitches: Option<f64>,
    /// Rows worked in the section.
    pub n_rows: Option<f64>,
    /// Shaping rate.
    pub increase_rate: Option<IncreaseRate>,
}

impl IncreaseInput {
    /// Input with only the start stitch count known.
    #[must_use]
    pub fn starting_at(start_stitches: f64) -> Self {
        Self {
            start_stitches: Some(start_stitches),
            ..Self::default()
        }
    }

    /// Sets the end stitch count.
    #[must_use]
    pub fn with_end(mut self, end_stitches: f64) -> Self {
        self.end_stitches = Some(end_stitches);
        self
    }

    /// Sets the row count.
    #[must_use]
    pub fn with_rows(mut self, n_rows: f64) -> Self {
        self.n_rows = Some(n_rows);
        self
    }

    /// Sets the shaping rate.
    #[must_use]
    pub fn with_rate(mut self, rate: IncreaseRate) -> Self {
        self.increase_rate = Some(rate);
        self
    }

    /// Reads the four canonical names out of a string-keyed set. Absent
    /// names stay `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MeasurementKindMismatch`] if a stitch or row
    /// count is stored as a rate, or the rate as a scalar.
    pub fn from_measurements(set: &MeasurementSet) -> Result<Self> {
        let scalar = |name: &str| -> Result<Option<f64>> {
            if set.contains(name) {
                set.scalar(name).map(Some)
            } else {
                Ok(None)
            }
        };
        Ok(Self {
            start_stitches: scalar(START_STITCHES)?,
            end_stitches: scalar(END_STITCHES)?,
            n_rows: scalar(N_ROWS)?,
            increase_rate: if set.contains(INCREASE_RATE) {
                Some(set.rate(INCREASE_RATE)?)
            } else {
                None
            },
        })
    }
}

/// Which quantities were supplied, carrying their values.
enum Supplied {
    All {
        end: f64,
        n_rows: f64,
        rate: IncreaseRate,
    },
    NoRows {
        end: f64,
        rate: IncreaseRate,
    },
    NoEnd {
        n_rows: f64,
        rate: IncreaseRate,
    },
    NoRate {
        end: f64,
        n_rows: f64,
    },
}

impl Supplied {
    fn detect(input: &IncreaseInput) -> Result<Self> {
        match (input.end_stitches, input.n_rows, input.increase_rate) {
            (Some(end), Some(n_rows), Some(rate)) => Ok(Supplied::All { end, n_rows, rate }),
            (Some(end), None, Some(rate)) => Ok(Supplied::NoRows { end, rate }),
            (None, Some(n_rows), Some(rate)) => Ok(Supplied::NoEnd { n_rows, rate }),
            (Some(end), Some(n_rows), None) => Ok(Supplied::NoRate { end, n_rows }),
            _ => {
                let present = [
                    (END_STITCHES, input.end_stitches.is_some()),
                    (N_ROWS, input.n_rows.is_some()),
                    (INCREASE_RATE, input.increase_rate.is_some()),
                ]
                .into_iter()
                .filter_map(|(name, known)| known.then_some(name))
                .collect();
                Err(PatternError::UnderdeterminedMeasurement { present })
            }
        }
    }

    fn missing(&self) -> Option<Missing> {
        match self {
            Supplied::All { .. } => None,
            Supplied::NoRows { .. } => Some(Missing::Rows),
            Supplied::NoEnd { .. } => Some(Missing::EndStitches),
            Supplied::NoRate { .. } => Some(Missing::Rate),
        }
    }
}

/// A fully resolved linear increase/decrease.
///
/// All four quantities are known once construction succeeds. The resolver
/// also owns a [`MeasurementSet`] mirroring them under their canonical names,
/// which sections use for auxiliary derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct IncreaseResolver {
    start_stitches: f64,
    end_stitches: f64,
    n_rows: f64,
    increase_rate: IncreaseRate,
    derived: Option<Missing>,
    measurements: MeasurementSet,
}

impl IncreaseResolver {
    /// Resolves a partially known increase.
    ///
    /// # Errors
    ///
    /// - [`PatternError::IncompleteMeasurement`] without `start_stitches`.
    /// - [`PatternError::UnderdeterminedMeasurement`] if fewer than two of
    ///   `end_stitches`, `n_rows`, `increase_rate` are known.
    /// - [`PatternError::DivisionByZero`] when deriving `n_rows` from a flat
    ///   rate.
    /// - [`PatternError::InconsistentMeasurement`] if all four are supplied
    ///   and disagree.
    /// - [`PatternError::InvalidMeasurement`] for negative stitch counts,
    ///   non-positive row counts or intervals, and non-finite values, whether
    ///   supplied or derived.
    pub fn resolve(input: IncreaseInput) -> Result<Self> {
        let start = input
            .start_stitches
            .ok_or_else(|| PatternError::IncompleteMeasurement {
                missing: vec![START_STITCHES.to_owned()],
            })?;
        check_stitches(START_STITCHES, start)?;
        if let Some(end) = input.end_stitches {
            check_stitches(END_STITCHES, end)?;
        }
        if let Some(n_rows) = input.n_rows {
            check_rows(n_rows)?;
        }
        if let Some(rate) = input.increase_rate {
            rate.check()?;
        }

        let supplied = Supplied::detect(&input)?;
        let derived = supplied.missing();
        let (end, n_rows, rate) = match supplied {
            Supplied::All { end, n_rows, rate } => {
                let expected_end = start + rate.per_row() * n_rows;
                if !same_count(expected_end, end) {
                    return Err(PatternError::InconsistentMeasurement {
                        start,
                        end,
                        n_rows,
                        per_row: rate.per_row(),
                        expected_end,
                    });
                }
                (end, n_rows, rate)
            }
            Supplied::NoRows { end, rate } => {
                if rate.is_flat() {
                    return Err(PatternError::DivisionByZero { start, end });
                }
                let n_rows = (end - start) / rate.per_row();
                check_derived_rows(n_rows)?;
                (end, n_rows, rate)
            }
            Supplied::NoEnd { n_rows, rate } => {
                let end = start + rate.per_row() * n_rows;
                check_stitches(END_STITCHES, end)?;
                (end, n_rows, rate)
            }
            Supplied::NoRate { end, n_rows } => {
                (end, n_rows, IncreaseRate::new((end - start) / n_rows, 1.0))
            }
        };

        if let Some(missing) = derived {
            debug!(
                derived = missing.key(),
                start,
                end,
                n_rows,
                per_row = rate.per_row(),
                "resolved increase"
            );
        }

        let mut measurements = MeasurementSet::new(&[START_STITCHES], [(START_STITCHES, start)])?;
        measurements.put(END_STITCHES, MeasureValue::Scalar(end));
        measurements.put(N_ROWS, MeasureValue::Scalar(n_rows));
        measurements.put(INCREASE_RATE, MeasureValue::Rate(rate));

        Ok(Self {
            start_stitches: start,
            end_stitches: end,
            n_rows,
            increase_rate: rate,
            derived,
            measurements,
        })
    }

    /// Resolves from a string-keyed measurement set.
    ///
    /// # Errors
    ///
    /// As [`IncreaseInput::from_measurements`] and
    /// [`IncreaseResolver::resolve`].
    pub fn from_measurements(set: &MeasurementSet) -> Result<Self> {
        Self::resolve(IncreaseInput::from_measurements(set)?)
    }

    /// Stitches at the start.
    #[must_use]
    pub fn start_stitches(&self) -> f64 {
        self.start_stitches
    }

    /// Stitches at the end.
    #[must_use]
    pub fn end_stitches(&self) -> f64 {
        self.end_stitches
    }

    /// Rows worked.
    #[must_use]
    pub fn n_rows(&self) -> f64 {
        self.n_rows
    }

    /// Shaping rate.
    #[must_use]
    pub fn increase_rate(&self) -> IncreaseRate {
        self.increase_rate
    }

    /// The quantity derived at construction, or `None` if all four were
    /// supplied.
    #[must_use]
    pub fn derived(&self) -> Option<Missing> {
        self.derived
    }

    /// Overwrites the start stitch count. No re-validation.
    pub fn set_start_stitches(&mut self, v: f64) {
        self.start_stitches = v;
        self.measurements.put(START_STITCHES, MeasureValue::Scalar(v));
    }

    /// Overwrites the end stitch count. No re-validation.
    pub fn set_end_stitches(&mut self, v: f64) {
        self.end_stitches = v;
        self.measurements.put(END_STITCHES, MeasureValue::Scalar(v));
    }

    /// Overwrites the row count. No re-validation.
    pub fn set_n_rows(&mut self, v: f64) {
        self.n_rows = v;
        self.measurements.put(N_ROWS, MeasureValue::Scalar(v));
    }

    /// Overwrites the shaping rate. No re-validation.
    pub fn set_increase_rate(&mut self, rate: IncreaseRate) {
        self.increase_rate = rate;
        self.measurements.put(INCREASE_RATE, MeasureValue::Rate(rate));
    }

    /// Every value held, including auxiliary section values.
    #[must_use]
    pub fn measurements(&self) -> &MeasurementSet {
        &self.measurements
    }

    /// Stores an auxiliary value alongside the four resolved quantities.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidMeasureName`] if `name` is empty.
    pub fn set_value(&mut self, name: &str, value: impl Into<MeasureValue>) -> Result<()> {
        self.measurements.set(name, value)
    }

    /// Reads an auxiliary scalar value.
    ///
    /// # Errors
    ///
    /// As [`MeasurementSet::scalar`].
    pub fn value(&self, name: &str) -> Result<f64> {
        self.measurements.scalar(name)
    }
}

fn check_stitches(name: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(PatternError::invalid(name, v, "stitch count must be non-negative"))
    }
}

fn check_rows(v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(PatternError::invalid(N_ROWS, v, "row count must be positive"))
    }
}

fn check_derived_rows(v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(PatternError::invalid(
            N_ROWS,
            v,
            "rate runs away from end_stitches; derived row count must be positive",
        ))
    }
}
