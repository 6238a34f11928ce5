//! Toe-up sock patterns computed from a gauge and a foot.
//!
//! The `sock-pattern` crate sizes a magic-loop, toe-up sock with a gusset
//! heel: toe, instep, gusset, heel turn, optional leg, and cuff. Every shaped
//! section is a linear increase or decrease, resolved by
//! [`IncreaseResolver`] from any two of end stitches, row count and rate.
//! [`SockPattern`] chains the sections and checks that the sock closes.
//!
//! # Entry Point
//!
//! ```
//! use sock_pattern::{Ease, FootMeasurement, Gauge, PerLength, Slot, SockPattern, Units};
//!
//! let gauge = Gauge::new(PerLength::new(30.0, 4.0), PerLength::new(30.0, 4.0), Units::Inches)?;
//! let foot = FootMeasurement::new(8.2, 9.5, Units::Inches, Ease::Raw)?;
//! let mut pattern = SockPattern::new(gauge, foot)?;
//! assert_eq!(pattern.start_stitches(Slot::Toe), Some(28.0));
//! let lines = pattern.render();
//! assert_eq!(lines[0], "Toe");
//! # Ok::<(), sock_pattern::PatternError>(())
//! ```
//!
//! # Serialization
//!
//! ```
//! # use sock_pattern::{Ease, FootMeasurement, Gauge, PerLength, SockPattern, Units};
//! # let gauge = Gauge::new(PerLength::new(30.0, 4.0), PerLength::new(30.0, 4.0), Units::Inches)?;
//! # let foot = FootMeasurement::new(8.2, 9.5, Units::Inches, Ease::Raw)?;
//! let pattern = SockPattern::new(gauge, foot)?;
//! let json = sock_pattern::serializer::json::to_json(&pattern);
//! assert_eq!(json["gauge"]["units"], "in");
//! # Ok::<(), sock_pattern::PatternError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod gauge;
pub mod measure;
pub mod resolver;
pub mod section;
pub mod sock;

#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "serializers")]
pub mod serializer;

pub use error::{PatternError, Result};
pub use gauge::{Ease, FootMeasurement, Gauge, PerLength, Units};
pub use measure::{MeasureValue, MeasurementSet};
pub use resolver::{IncreaseInput, IncreaseRate, IncreaseResolver, Missing};
pub use section::{PatternSection, SectionKind, SectionRecipe};
pub use sock::{Slot, SockPattern, SockSections, SockStitches};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_kinds_cover_every_slot_but_leg() {
        assert_eq!(SectionKind::ALL.len(), Slot::ALL.len() - 1);
    }

    #[test]
    fn reexports_resolve_a_toe() {
        let toe = PatternSection::toe(IncreaseInput::starting_at(12.0).with_end(32.0)).unwrap();
        assert_eq!(toe.n_rows(), 10.0);
        assert_eq!(toe.increase_rate(), IncreaseRate::new(4.0, 2.0));
    }
}
