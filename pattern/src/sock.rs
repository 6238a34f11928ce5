//! Whole-sock pipeline: derive every section from a gauge and a foot, check
//! that the chain closes, and render the directions.
//!
//! Sections are knitted toe-up in slot order
//! `toe → instep → gusset → heel → leg → cuff`. Each boundary compares the
//! total stitches on the needles, so the heel's parked top-of-foot stitches
//! count on both sides of it.

use std::fmt;

use tracing::{debug, info};

use crate::error::{PatternError, Result};
use crate::gauge::{FootMeasurement, Gauge};
use crate::resolver::{same_count, IncreaseInput};
use crate::section::heel::HEEL_RATE;
use crate::section::toe::TOE_RATE;
use crate::section::PatternSection;

/// Position of a section in the knitting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    /// Toe.
    Toe,
    /// Instep.
    Instep,
    /// Gusset.
    Gusset,
    /// Heel turn.
    Heel,
    /// Optional plain leg.
    Leg,
    /// Cuff.
    Cuff,
}

impl Slot {
    /// Every slot in knitting order.
    pub const ALL: [Slot; 6] = [
        Slot::Toe,
        Slot::Instep,
        Slot::Gusset,
        Slot::Heel,
        Slot::Leg,
        Slot::Cuff,
    ];
}

/// The six section slots of a sock; any may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SockSections {
    /// Toe slot.
    pub toe: Option<PatternSection>,
    /// Instep slot.
    pub instep: Option<PatternSection>,
    /// Gusset slot.
    pub gusset: Option<PatternSection>,
    /// Heel slot.
    pub heel: Option<PatternSection>,
    /// Leg slot.
    pub leg: Option<PatternSection>,
    /// Cuff slot.
    pub cuff: Option<PatternSection>,
}

impl SockSections {
    /// The section in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&PatternSection> {
        match slot {
            Slot::Toe => self.toe.as_ref(),
            Slot::Instep => self.instep.as_ref(),
            Slot::Gusset => self.gusset.as_ref(),
            Slot::Heel => self.heel.as_ref(),
            Slot::Leg => self.leg.as_ref(),
            Slot::Cuff => self.cuff.as_ref(),
        }
    }

    /// Mutable access to the section in `slot`.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut PatternSection> {
        match slot {
            Slot::Toe => self.toe.as_mut(),
            Slot::Instep => self.instep.as_mut(),
            Slot::Gusset => self.gusset.as_mut(),
            Slot::Heel => self.heel.as_mut(),
            Slot::Leg => self.leg.as_mut(),
            Slot::Cuff => self.cuff.as_mut(),
        }
    }

    /// Present sections in knitting order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &PatternSection)> {
        [
            (Slot::Toe, &self.toe),
            (Slot::Instep, &self.instep),
            (Slot::Gusset, &self.gusset),
            (Slot::Heel, &self.heel),
            (Slot::Leg, &self.leg),
            (Slot::Cuff, &self.cuff),
        ]
        .into_iter()
        .filter_map(|(slot, section)| section.as_ref().map(|s| (slot, s)))
    }

    /// Present sections in knitting order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut PatternSection)> {
        [
            (Slot::Toe, &mut self.toe),
            (Slot::Instep, &mut self.instep),
            (Slot::Gusset, &mut self.gusset),
            (Slot::Heel, &mut self.heel),
            (Slot::Leg, &mut self.leg),
            (Slot::Cuff, &mut self.cuff),
        ]
        .into_iter()
        .filter_map(|(slot, section)| section.as_mut().map(|s| (slot, s)))
    }

    /// Number of present sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stitch and row statistics of an ease-adjusted foot at a given gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SockStitches {
    /// Stitches around the foot.
    pub around_foot: f64,
    /// Rows from toe tip to the back of the heel.
    pub toe_to_heel_rows: f64,
    /// Whole rows per inch.
    pub rows_per_inch: f64,
}

impl SockStitches {
    /// Converts `foot` to stitches and rows at `gauge`. The foot is used as
    /// given; callers ease-adjust first.
    #[must_use]
    pub fn from_gauge(gauge: &Gauge, foot: &FootMeasurement) -> Self {
        Self {
            around_foot: gauge.stitches(foot.around_foot),
            toe_to_heel_rows: gauge.rows(foot.toe_to_heel),
            rows_per_inch: gauge.rows_per_inch(),
        }
    }

    /// Toe cast-on: half the stitches around, rounded.
    #[must_use]
    pub fn toe_start(&self) -> f64 {
        (self.around_foot / 2.0).round()
    }

    /// Rows budgeted for the toe when sizing the instep.
    #[must_use]
    pub fn toe_rows(&self) -> f64 {
        (self.around_foot / 2.0).round()
    }

    /// Straight rows between toe and gusset.
    #[must_use]
    pub fn instep_rows(&self) -> f64 {
        self.toe_to_heel_rows - self.toe_rows() - 2.0 * self.rows_per_inch
    }

    /// Stitches the gusset adds: a quarter of the foot.
    #[must_use]
    pub fn gusset_increase(&self) -> f64 {
        self.around_foot / 4.0
    }

    /// Top-of-foot stitches parked while the heel turns.
    #[must_use]
    pub fn heel_held(&self) -> f64 {
        self.around_foot - self.toe_start()
    }
}

/// A complete, validated toe-up sock pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct SockPattern {
    gauge: Gauge,
    foot: FootMeasurement,
    stitches: SockStitches,
    sections: SockSections,
}

impl SockPattern {
    /// Derives and validates every section for `foot` at `gauge`.
    ///
    /// # Errors
    ///
    /// - [`PatternError::UnitMismatch`] if gauge and foot units differ.
    /// - [`PatternError::InvalidMeasurement`] for non-positive inputs or a
    ///   foot too short for its toe and heel.
    /// - Any section or continuity error; no partial pattern is returned.
    pub fn new(gauge: Gauge, foot: FootMeasurement) -> Result<Self> {
        let sections = Self::derive_sections(&gauge, &foot)?;
        Self::from_sections(gauge, foot, sections)
    }

    /// Builds the section chain for `foot` at `gauge` without validating it.
    ///
    /// # Errors
    ///
    /// As [`SockPattern::new`], minus the continuity checks.
    pub fn derive_sections(gauge: &Gauge, foot: &FootMeasurement) -> Result<SockSections> {
        check_inputs(gauge, foot)?;
        let foot = foot.ease_adjusted();
        let st = SockStitches::from_gauge(gauge, &foot);
        let around = st.around_foot;
        let toe_start = st.toe_start();
        debug!(
            around,
            toe_start,
            toe_to_heel_rows = st.toe_to_heel_rows,
            rows_per_inch = st.rows_per_inch,
            "deriving sock sections"
        );

        let toe = PatternSection::toe(
            IncreaseInput::starting_at(toe_start)
                .with_end(around)
                .with_rate(TOE_RATE),
        )?;
        let instep = PatternSection::instep(
            IncreaseInput::starting_at(around)
                .with_end(around)
                .with_rows(st.instep_rows()),
        )?;
        let gusset = PatternSection::gusset(
            IncreaseInput::starting_at(around).with_end(around + st.gusset_increase()),
        )?;
        let heel = PatternSection::heel_turn(
            IncreaseInput::starting_at(toe_start + st.gusset_increase())
                .with_end(toe_start)
                .with_rate(HEEL_RATE),
        )?
        .with_held_stitches(st.heel_held());
        let leg = foot
            .leg_length
            .map(|length| {
                PatternSection::instep(
                    IncreaseInput::starting_at(around).with_rows(gauge.rows(length)),
                )
                .map(|s| s.with_label("Leg"))
            })
            .transpose()?;
        let cuff = PatternSection::cuff(
            IncreaseInput::starting_at(around)
                .with_end(around)
                .with_rows(st.rows_per_inch),
        )?;

        Ok(SockSections {
            toe: Some(toe),
            instep: Some(instep),
            gusset: Some(gusset),
            heel: Some(heel),
            leg,
            cuff: Some(cuff),
        })
    }

    /// Wraps a hand-built chain and validates it against `foot` at `gauge`.
    ///
    /// # Errors
    ///
    /// [`PatternError::UnitMismatch`], [`PatternError::PatternDiscontinuity`]
    /// or [`PatternError::HeelMismatch`].
    pub fn from_sections(gauge: Gauge, foot: FootMeasurement, sections: SockSections) -> Result<Self> {
        check_inputs(&gauge, &foot)?;
        let foot = foot.ease_adjusted();
        let pattern = Self {
            stitches: SockStitches::from_gauge(&gauge, &foot),
            gauge,
            foot,
            sections,
        };
        pattern.validate()?;
        info!(
            sections = pattern.sections.len(),
            around = pattern.stitches.around_foot,
            "sock closes without holes"
        );
        Ok(pattern)
    }

    /// Checks that every boundary lines up and that the heel finishes on half
    /// the stitches around the foot.
    ///
    /// # Errors
    ///
    /// [`PatternError::PatternDiscontinuity`] on the first mismatched
    /// boundary, then [`PatternError::HeelMismatch`].
    pub fn validate(&self) -> Result<()> {
        let mut prev: Option<&PatternSection> = None;
        for (_, next) in self.sections.iter() {
            if let Some(before) = prev {
                let end = before.exit_stitches();
                let start = next.entry_stitches();
                if !same_count(end, start) {
                    return Err(PatternError::PatternDiscontinuity {
                        before: before.label().to_owned(),
                        after: next.label().to_owned(),
                        end,
                        start,
                    });
                }
            }
            prev = Some(next);
        }
        if let Some(heel) = &self.sections.heel {
            let expected = self.stitches.toe_start();
            let actual = heel.end_stitches();
            if !same_count(expected, actual) {
                return Err(PatternError::HeelMismatch { expected, actual });
            }
        }
        Ok(())
    }

    /// Regenerates every section's directions and returns them in order, each
    /// block headed by its section label.
    pub fn render(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for (_, section) in self.sections.iter_mut() {
            lines.push(section.label().to_owned());
            lines.extend(section.write_directions().iter().cloned());
        }
        lines
    }

    /// The section in `slot`.
    #[must_use]
    pub fn section(&self, slot: Slot) -> Option<&PatternSection> {
        self.sections.get(slot)
    }

    /// Stitches at the start of `slot`, if present.
    #[must_use]
    pub fn start_stitches(&self, slot: Slot) -> Option<f64> {
        self.section(slot).map(PatternSection::start_stitches)
    }

    /// Stitches at the end of `slot`, if present.
    #[must_use]
    pub fn end_stitches(&self, slot: Slot) -> Option<f64> {
        self.section(slot).map(PatternSection::end_stitches)
    }

    /// Gauge the pattern was sized with.
    #[must_use]
    pub fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Ease-adjusted foot measurement.
    #[must_use]
    pub fn foot(&self) -> &FootMeasurement {
        &self.foot
    }

    /// Stitch statistics.
    #[must_use]
    pub fn stitches(&self) -> &SockStitches {
        &self.stitches
    }

    /// All section slots.
    #[must_use]
    pub fn sections(&self) -> &SockSections {
        &self.sections
    }
}

impl fmt::Display for SockPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toe-up sock with gusset heel for: {}.", self.foot)
    }
}

fn check_inputs(gauge: &Gauge, foot: &FootMeasurement) -> Result<()> {
    gauge.check()?;
    foot.check()?;
    if gauge.units != foot.units {
        return Err(PatternError::UnitMismatch {
            gauge: gauge.units.as_str(),
            foot: foot.units.as_str(),
        });
    }
    Ok(())
}
