//! TOML pattern requests.
//!
//! A request file names a gauge and a foot:
//!
//! ```toml
//! [gauge]
//! stitches = 30
//! rows = 30
//! per = 4
//! units = "in"
//!
//! [foot]
//! around_foot = 8.2
//! toe_to_heel = 9.5
//! leg_length = 4
//! ```
//!
//! `per` defaults to 4 and `units` to inches. `leg_length` and
//! `ease_applied` are optional.

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, Result};
use crate::gauge::{Ease, FootMeasurement, Gauge, PerLength, Units};
use crate::sock::SockPattern;

/// Length gauge swatches are usually measured over.
pub const DEFAULT_PER: f64 = 4.0;

/// Gauge table of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSpec {
    /// Stitches counted over `per`.
    pub stitches: f64,
    /// Rows counted over `per`.
    pub rows: f64,
    /// Swatch length.
    #[serde(default = "default_per")]
    pub per: f64,
    /// Units of `per` and of the foot.
    #[serde(default = "default_units")]
    pub units: Units,
}

/// Foot table of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootSpec {
    /// Circumference around the ball of the foot.
    pub around_foot: f64,
    /// Toe tip to back of heel.
    pub toe_to_heel: f64,
    /// Plain leg above the heel.
    #[serde(default)]
    pub leg_length: Option<f64>,
    /// Lengths already include negative ease.
    #[serde(default)]
    pub ease_applied: bool,
}

/// A complete pattern request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRequest {
    /// Gauge table.
    pub gauge: GaugeSpec,
    /// Foot table.
    pub foot: FootSpec,
}

fn default_per() -> f64 {
    DEFAULT_PER
}

fn default_units() -> Units {
    Units::Inches
}

impl PatternRequest {
    /// Parses a request from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::ConfigParse`] for malformed TOML, missing
    /// keys, or unknown units.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PatternError::ConfigParse(e.to_string()))
    }

    /// The checked gauge.
    ///
    /// # Errors
    ///
    /// As [`Gauge::new`].
    pub fn gauge(&self) -> Result<Gauge> {
        let g = &self.gauge;
        Gauge::new(
            PerLength::new(g.stitches, g.per),
            PerLength::new(g.rows, g.per),
            g.units,
        )
    }

    /// The checked foot, in the gauge's units.
    ///
    /// # Errors
    ///
    /// As [`FootMeasurement::new`].
    pub fn foot(&self) -> Result<FootMeasurement> {
        let f = &self.foot;
        let ease = if f.ease_applied { Ease::Applied } else { Ease::Raw };
        let mut foot = FootMeasurement::new(f.around_foot, f.toe_to_heel, self.gauge.units, ease)?;
        if let Some(length) = f.leg_length {
            foot = foot.with_leg_length(length);
            foot.check()?;
        }
        Ok(foot)
    }

    /// Builds the validated pattern.
    ///
    /// # Errors
    ///
    /// As [`PatternRequest::gauge`], [`PatternRequest::foot`] and
    /// [`SockPattern::new`].
    pub fn build(&self) -> Result<SockPattern> {
        SockPattern::new(self.gauge()?, self.foot()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sock::Slot;

    const REQUEST: &str = r#"
        [gauge]
        stitches = 30
        rows = 30
        units = "in"

        [foot]
        around_foot = 8.2
        toe_to_heel = 9.5
        leg_length = 4
    "#;

    #[test]
    fn parses_with_defaults() {
        let req = PatternRequest::from_toml_str(REQUEST).unwrap();
        assert_eq!(req.gauge.per, DEFAULT_PER);
        assert_eq!(req.foot.leg_length, Some(4.0));
        assert!(!req.foot.ease_applied);
    }

    #[test]
    fn builds_a_pattern() {
        let pattern = PatternRequest::from_toml_str(REQUEST).unwrap().build().unwrap();
        assert!(pattern.section(Slot::Leg).is_some());
        assert_eq!(pattern.start_stitches(Slot::Toe), Some(28.0));
    }

    #[test]
    fn bad_units_are_a_parse_error() {
        let text = REQUEST.replace("\"in\"", "\"ft\"");
        assert!(matches!(
            PatternRequest::from_toml_str(&text),
            Err(PatternError::ConfigParse(_))
        ));
    }

    #[test]
    fn missing_table_is_a_parse_error() {
        assert!(matches!(
            PatternRequest::from_toml_str("[gauge]\nstitches = 30\nrows = 30\n"),
            Err(PatternError::ConfigParse(_))
        ));
    }

    #[test]
    fn negative_leg_is_rejected() {
        let text = REQUEST.replace("leg_length = 4", "leg_length = -1");
        let req = PatternRequest::from_toml_str(&text).unwrap();
        assert!(matches!(
            req.foot(),
            Err(PatternError::InvalidMeasurement { .. })
        ));
    }
}
