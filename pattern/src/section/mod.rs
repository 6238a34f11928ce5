//! Pattern sections: a resolved measurement coupled to written directions.
//!
//! The set of sections is closed. Each [`SectionKind`] owns a
//! [`SectionRecipe`] holding its default label, the defaulting step that turns
//! raw input into an [`IncreaseResolver`], and the template that writes its
//! directions. Sections are listed in the order a toe-up sock is knitted:
//! `toe → instep → gusset → heel turn → cuff`.

pub mod cuff;
pub mod gusset;
pub mod heel;
pub mod instep;
pub mod toe;

use std::fmt;

use crate::error::{PatternError, Result};
use crate::measure::MeasureValue;
use crate::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver};

/// The closed set of section variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SectionKind {
    /// Toe-up toe: increases from a small cast-on to the full foot.
    Toe,
    /// Flat tube over the top of the foot.
    Instep,
    /// Increases on the sole needle ahead of the heel.
    Gusset,
    /// Short-row heel turn worked on the sole needle.
    HeelTurn,
    /// Flat K1 P1 ribbing and bind-off.
    Cuff,
}

impl SectionKind {
    /// Every variant in knitting order.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Toe,
        SectionKind::Instep,
        SectionKind::Gusset,
        SectionKind::HeelTurn,
        SectionKind::Cuff,
    ];

    /// The variant's recipe.
    #[must_use]
    pub fn recipe(self) -> &'static SectionRecipe {
        match self {
            SectionKind::Toe => &toe::RECIPE,
            SectionKind::Instep => &instep::RECIPE,
            SectionKind::Gusset => &gusset::RECIPE,
            SectionKind::HeelTurn => &heel::RECIPE,
            SectionKind::Cuff => &cuff::RECIPE,
        }
    }

    /// Display name used when no label is given.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        self.recipe().label
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

/// Behavior of one section variant, held as data.
pub struct SectionRecipe {
    /// Default display label.
    pub label: &'static str,
    /// Applies the variant's defaults and resolves the measurement.
    pub make_measure: fn(IncreaseInput) -> Result<IncreaseResolver>,
    /// Writes the variant's directions from resolved values.
    pub write_directions: fn(&IncreaseResolver) -> Vec<String>,
}

impl fmt::Debug for SectionRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRecipe")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// One section of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSection {
    kind: SectionKind,
    label: String,
    held_stitches: f64,
    measurements: IncreaseResolver,
    instructions: Vec<String>,
}

impl PatternSection {
    /// Builds a section, resolving its measurements immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MissingMeasurement`] if the variant's
    /// mandatory input is absent, or any resolver error.
    pub fn new(kind: SectionKind, input: IncreaseInput) -> Result<Self> {
        let measurements = (kind.recipe().make_measure)(input)?;
        Ok(Self {
            kind,
            label: kind.default_label().to_owned(),
            held_stitches: 0.0,
            measurements,
            instructions: Vec::new(),
        })
    }

    /// Shorthand for `PatternSection::new(SectionKind::Toe, input)`.
    ///
    /// # Errors
    ///
    /// As [`PatternSection::new`].
    pub fn toe(input: IncreaseInput) -> Result<Self> {
        Self::new(SectionKind::Toe, input)
    }

    /// Shorthand for `PatternSection::new(SectionKind::Instep, input)`.
    ///
    /// # Errors
    ///
    /// As [`PatternSection::new`].
    pub fn instep(input: IncreaseInput) -> Result<Self> {
        Self::new(SectionKind::Instep, input)
    }

    /// Shorthand for `PatternSection::new(SectionKind::Gusset, input)`.
    ///
    /// # Errors
    ///
    /// As [`PatternSection::new`].
    pub fn gusset(input: IncreaseInput) -> Result<Self> {
        Self::new(SectionKind::Gusset, input)
    }

    /// Shorthand for `PatternSection::new(SectionKind::HeelTurn, input)`.
    ///
    /// # Errors
    ///
    /// As [`PatternSection::new`].
    pub fn heel_turn(input: IncreaseInput) -> Result<Self> {
        Self::new(SectionKind::HeelTurn, input)
    }

    /// Shorthand for `PatternSection::new(SectionKind::Cuff, input)`.
    ///
    /// # Errors
    ///
    /// As [`PatternSection::new`].
    pub fn cuff(input: IncreaseInput) -> Result<Self> {
        Self::new(SectionKind::Cuff, input)
    }

    /// Replaces the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Records stitches parked on the other needle while this section works.
    #[must_use]
    pub fn with_held_stitches(mut self, held: f64) -> Self {
        self.held_stitches = held;
        self
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the display label in place.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Resolved measurements.
    #[must_use]
    pub fn measurements(&self) -> &IncreaseResolver {
        &self.measurements
    }

    /// Stitches worked at the start of the section.
    #[must_use]
    pub fn start_stitches(&self) -> f64 {
        self.measurements.start_stitches()
    }

    /// Stitches worked at the end of the section.
    #[must_use]
    pub fn end_stitches(&self) -> f64 {
        self.measurements.end_stitches()
    }

    /// Rows worked.
    #[must_use]
    pub fn n_rows(&self) -> f64 {
        self.measurements.n_rows()
    }

    /// Shaping rate.
    #[must_use]
    pub fn increase_rate(&self) -> IncreaseRate {
        self.measurements.increase_rate()
    }

    /// Stitches left unworked on the other needle.
    #[must_use]
    pub fn held_stitches(&self) -> f64 {
        self.held_stitches
    }

    /// Total stitches on the needles when the section begins.
    #[must_use]
    pub fn entry_stitches(&self) -> f64 {
        self.start_stitches() + self.held_stitches
    }

    /// Total stitches on the needles when the section ends.
    #[must_use]
    pub fn exit_stitches(&self) -> f64 {
        self.end_stitches() + self.held_stitches
    }

    /// Reads an auxiliary value the section derived (e.g. the heel's
    /// `first_turn`).
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownMeasurement`] if the section holds no
    /// such value.
    pub fn value(&self, name: &str) -> Result<f64> {
        self.measurements.value(name)
    }

    /// Regenerates the directions from the resolved measurements, replacing
    /// any previously written ones.
    pub fn write_directions(&mut self) -> &[String] {
        self.instructions = (self.kind.recipe().write_directions)(&self.measurements);
        &self.instructions
    }

    /// Directions written so far; empty until [`write_directions`] is called.
    ///
    /// [`write_directions`]: PatternSection::write_directions
    #[must_use]
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }
}

impl fmt::Display for PatternSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} stitches to {} stitches over {} rows",
            self.label,
            whole(self.start_stitches()),
            whole(self.end_stitches()),
            whole(self.n_rows())
        )
    }
}

/// Rounds a stitch or row count for display.
#[must_use]
pub fn whole(v: f64) -> i64 {
    v.round() as i64
}

fn require(section: SectionKind, value: Option<f64>, key: &'static str) -> Result<f64> {
    value.ok_or(PatternError::MissingMeasurement { section, key })
}

fn aux(m: &IncreaseResolver, name: &str, fallback: f64) -> f64 {
    match m.measurements().get(name) {
        Ok(MeasureValue::Scalar(v)) => v,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::START_STITCHES;

    #[test]
    fn default_labels() {
        let labels: Vec<&str> = SectionKind::ALL.iter().map(|k| k.default_label()).collect();
        assert_eq!(labels, vec!["Toe", "Instep", "Gusset", "Heel Turn", "Cuff"]);
    }

    #[test]
    fn directions_are_regenerated_not_appended() {
        let mut instep =
            PatternSection::instep(IncreaseInput::starting_at(60.0).with_rows(40.0)).unwrap();
        assert!(instep.instructions().is_empty());
        let first = instep.write_directions().len();
        let second = instep.write_directions().len();
        assert_eq!(first, second);
        assert_eq!(instep.instructions().len(), first);
    }

    #[test]
    fn relabel_and_held_stitches() {
        let leg = PatternSection::instep(IncreaseInput::starting_at(60.0).with_rows(10.0))
            .unwrap()
            .with_label("Leg")
            .with_held_stitches(4.0);
        assert_eq!(leg.label(), "Leg");
        assert_eq!(leg.kind(), SectionKind::Instep);
        assert_eq!(leg.entry_stitches(), 64.0);
        assert_eq!(leg.exit_stitches(), 64.0);
    }

    #[test]
    fn every_variant_requires_start() {
        for kind in SectionKind::ALL {
            let input = IncreaseInput::default().with_end(20.0).with_rows(10.0);
            assert_eq!(
                PatternSection::new(kind, input).unwrap_err(),
                PatternError::MissingMeasurement {
                    section: kind,
                    key: START_STITCHES
                },
                "{kind}"
            );
        }
    }

    #[test]
    fn summary_line() {
        let toe = PatternSection::toe(IncreaseInput::starting_at(28.0).with_end(56.0)).unwrap();
        assert_eq!(toe.to_string(), "Toe: 28 stitches to 56 stitches over 14 rows");
    }
}
