//! Gauge and foot measurements: the plain numeric inputs of a sock pattern.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{PatternError, Result};
use crate::measure::MeasurementSet;

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Socks are knit about 10% smaller than the foot.
pub const EASE_FACTOR: f64 = 0.9;

/// Measurement name of the foot circumference.
pub const AROUND_FOOT: &str = "around_foot";
/// Measurement name of the foot length from toe tip to back of heel.
pub const TOE_TO_HEEL: &str = "toe_to_heel";
/// Measurement name of the optional leg length above the heel.
pub const LEG_LENGTH: &str = "leg_length";

/// Unit system for lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Units {
    /// Inches (`"in"`).
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Inches,
    /// Centimetres (`"cm"`).
    #[cfg_attr(feature = "serde", serde(rename = "cm"))]
    Centimeters,
}

impl Units {
    /// Returns the short unit string (`"in"` or `"cm"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Inches => "in",
            Units::Centimeters => "cm",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Units::Inches),
            "cm" => Ok(Units::Centimeters),
            other => Err(PatternError::InvalidUnits(other.to_owned())),
        }
    }
}

/// `count` stitches or rows per `length` units, e.g. 30 stitches per 4 in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerLength {
    /// Stitches or rows counted.
    pub count: f64,
    /// Length they span.
    pub length: f64,
}

impl PerLength {
    /// Creates a ratio of `count` per `length`.
    #[must_use]
    pub const fn new(count: f64, length: f64) -> Self {
        Self { count, length }
    }

    /// Count per single unit of length.
    #[must_use]
    pub fn per_unit(self) -> f64 {
        self.count / self.length
    }

    fn check(self, name: &'static str) -> Result<()> {
        for v in [self.count, self.length] {
            if !(v.is_finite() && v > 0.0) {
                return Err(PatternError::invalid(name, v, "gauge terms must be positive"));
            }
        }
        Ok(())
    }
}

/// Stitches and rows a knitter gets per unit of fabric.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gauge {
    /// Stitches per length.
    pub stitches: PerLength,
    /// Rows per length.
    pub rows: PerLength,
    /// Units the lengths are measured in.
    pub units: Units,
}

impl Gauge {
    /// Creates a checked gauge.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidMeasurement`] if any term is not a
    /// positive finite number.
    pub fn new(stitches: PerLength, rows: PerLength, units: Units) -> Result<Self> {
        let gauge = Self {
            stitches,
            rows,
            units,
        };
        gauge.check()?;
        Ok(gauge)
    }

    /// Re-checks a gauge built field by field or deserialized.
    ///
    /// # Errors
    ///
    /// As [`Gauge::new`].
    pub fn check(&self) -> Result<()> {
        self.stitches.check("gauge.stitches")?;
        self.rows.check("gauge.rows")
    }

    /// Stitches across `length`.
    #[must_use]
    pub fn stitches(&self, length: f64) -> f64 {
        self.stitches.per_unit() * length
    }

    /// Rows along `length`.
    #[must_use]
    pub fn rows(&self, length: f64) -> f64 {
        self.rows.per_unit() * length
    }

    /// Length covered by `n` stitches.
    #[must_use]
    pub fn length_for_stitches(&self, n: f64) -> f64 {
        self.stitches.length / self.stitches.count * n
    }

    /// Length covered by `n` rows.
    #[must_use]
    pub fn length_for_rows(&self, n: f64) -> f64 {
        self.rows.length / self.rows.count * n
    }

    /// Whole rows per inch, whatever the gauge's units.
    #[must_use]
    pub fn rows_per_inch(&self) -> f64 {
        let per_unit = self.rows.per_unit().round();
        match self.units {
            Units::Inches => per_unit,
            Units::Centimeters => (per_unit * CM_PER_INCH).round(),
        }
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stitches and {} rows per {} {}",
            self.stitches.count, self.rows.count, self.stitches.length, self.units
        )
    }
}

/// Whether foot lengths already include negative ease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ease {
    /// Lengths are the bare foot; ease still has to be taken off.
    #[default]
    Raw,
    /// Lengths are already reduced for ease.
    Applied,
}

/// Physical foot measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootMeasurement {
    /// Circumference around the ball of the foot.
    pub around_foot: f64,
    /// Length from the tip of the toe to the back of the heel.
    pub toe_to_heel: f64,
    /// Plain leg knit between heel and cuff, if any.
    pub leg_length: Option<f64>,
    /// Units of every length.
    pub units: Units,
    /// Whether ease has been taken off `around_foot` and `toe_to_heel`.
    pub ease: Ease,
}

impl FootMeasurement {
    /// Creates a checked foot measurement.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidMeasurement`] if a length is not a
    /// positive finite number.
    pub fn new(around_foot: f64, toe_to_heel: f64, units: Units, ease: Ease) -> Result<Self> {
        let foot = Self {
            around_foot,
            toe_to_heel,
            leg_length: None,
            units,
            ease,
        };
        foot.check()?;
        Ok(foot)
    }

    /// Reads `around_foot`, `toe_to_heel` and, if present, `leg_length` from
    /// a string-keyed set.
    ///
    /// # Errors
    ///
    /// [`PatternError::IncompleteMeasurement`] if either foot length is
    /// missing, plus the errors of [`FootMeasurement::new`].
    pub fn from_measurements(set: &MeasurementSet, units: Units, ease: Ease) -> Result<Self> {
        let missing = set.missing([AROUND_FOOT, TOE_TO_HEEL]);
        if !missing.is_empty() {
            return Err(PatternError::IncompleteMeasurement { missing });
        }
        let mut foot = Self::new(
            set.scalar(AROUND_FOOT)?,
            set.scalar(TOE_TO_HEEL)?,
            units,
            ease,
        )?;
        if set.contains(LEG_LENGTH) {
            foot.leg_length = Some(set.scalar(LEG_LENGTH)?);
            foot.check()?;
        }
        Ok(foot)
    }

    /// Adds a leg section of `length` between heel and cuff.
    #[must_use]
    pub fn with_leg_length(mut self, length: f64) -> Self {
        self.leg_length = Some(length);
        self
    }

    /// Re-checks a measurement built field by field or deserialized.
    ///
    /// # Errors
    ///
    /// As [`FootMeasurement::new`].
    pub fn check(&self) -> Result<()> {
        let lengths = [
            (AROUND_FOOT, Some(self.around_foot)),
            (TOE_TO_HEEL, Some(self.toe_to_heel)),
            (LEG_LENGTH, self.leg_length),
        ];
        for (name, value) in lengths {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(PatternError::invalid(name, v, "lengths must be positive"));
                }
            }
        }
        Ok(())
    }

    /// Returns the measurement with ease taken off. Applying twice is a
    /// no-op.
    #[must_use]
    pub fn ease_adjusted(self) -> Self {
        if self.ease == Ease::Applied {
            debug!(foot = %self, "measurements already ease adjusted");
            return self;
        }
        Self {
            around_foot: self.around_foot * EASE_FACTOR,
            toe_to_heel: self.toe_to_heel * EASE_FACTOR,
            ease: Ease::Applied,
            ..self
        }
    }
}

impl fmt::Display for FootMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Foot measurements {} {units} around and {} {units} long",
            self.around_foot,
            self.toe_to_heel,
            units = self.units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge_in() -> Gauge {
        Gauge::new(PerLength::new(30.0, 4.0), PerLength::new(30.0, 4.0), Units::Inches).unwrap()
    }

    #[test]
    fn gauge_conversions() {
        let g = gauge_in();
        let cm = Gauge::new(
            PerLength::new(30.0, 4.0 * CM_PER_INCH),
            PerLength::new(30.0, 4.0 * CM_PER_INCH),
            Units::Centimeters,
        )
        .unwrap();
        assert_eq!(g.stitches(4.0), 30.0);
        assert_eq!(g.rows(4.0), 30.0);
        assert!((g.rows(4.0) - cm.rows(4.0 * CM_PER_INCH)).abs() < 1e-9);
        assert!((g.length_for_rows(30.0) - 4.0).abs() < 1e-12);
        assert!((g.length_for_stitches(30.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rows_per_inch_rounds() {
        assert_eq!(gauge_in().rows_per_inch(), 8.0);
        let cm = Gauge::new(PerLength::new(3.0, 1.0), PerLength::new(3.0, 1.0), Units::Centimeters)
            .unwrap();
        assert_eq!(cm.rows_per_inch(), 8.0);
    }

    #[test]
    fn non_positive_gauge_is_rejected() {
        let err = Gauge::new(PerLength::new(0.0, 4.0), PerLength::new(30.0, 4.0), Units::Inches)
            .unwrap_err();
        assert!(matches!(err, PatternError::InvalidMeasurement { .. }));
    }

    #[test]
    fn units_parse() {
        assert_eq!("in".parse::<Units>().unwrap(), Units::Inches);
        assert_eq!("cm".parse::<Units>().unwrap(), Units::Centimeters);
        assert_eq!(
            "ft".parse::<Units>().unwrap_err(),
            PatternError::InvalidUnits("ft".to_owned())
        );
    }

    #[test]
    fn ease_is_applied_once() {
        let foot = FootMeasurement::new(8.2, 9.5, Units::Inches, Ease::Raw).unwrap();
        let once = foot.ease_adjusted();
        let twice = once.ease_adjusted();
        assert_eq!(once.ease, Ease::Applied);
        assert!((once.around_foot - 8.2 * 0.9).abs() < 1e-12);
        assert!((once.toe_to_heel - 9.5 * 0.9).abs() < 1e-12);
        assert_eq!(once, twice);
    }

    #[test]
    fn pre_adjusted_lengths_are_left_alone() {
        let foot = FootMeasurement::new(7.38, 8.55, Units::Inches, Ease::Applied).unwrap();
        assert_eq!(foot.ease_adjusted().around_foot, 7.38);
    }

    #[test]
    fn foot_from_measurement_set() {
        let set = MeasurementSet::from_values([(AROUND_FOOT, 21.0), (TOE_TO_HEEL, 24.0)]).unwrap();
        let foot = FootMeasurement::from_measurements(&set, Units::Centimeters, Ease::Raw).unwrap();
        assert_eq!(foot.toe_to_heel, 24.0);
        assert_eq!(foot.leg_length, None);

        let partial = MeasurementSet::from_values([(AROUND_FOOT, 21.0)]).unwrap();
        assert_eq!(
            FootMeasurement::from_measurements(&partial, Units::Centimeters, Ease::Raw).unwrap_err(),
            PatternError::IncompleteMeasurement {
                missing: vec![TOE_TO_HEEL.to_owned()]
            }
        );
    }

    #[test]
    fn display() {
        let foot = FootMeasurement::new(8.0, 9.5, Units::Inches, Ease::Raw).unwrap();
        assert_eq!(foot.to_string(), "Foot measurements 8 in around and 9.5 in long");
        assert_eq!(gauge_in().to_string(), "30 stitches and 30 rows per 4 in");
    }
}
