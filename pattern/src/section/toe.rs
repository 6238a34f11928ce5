//! Toe-up toe worked on magic loop.
//!
//! Cast on a small number of stitches split over two needles, then increase
//! at both ends of both needles every other round until the full foot
//! circumference is reached.

use tracing::warn;

use super::{require, whole, SectionKind, SectionRecipe};
use crate::error::Result;
use crate::resolver::{same_count, IncreaseInput, IncreaseRate, IncreaseResolver, START_STITCHES};

/// Toe recipe.
pub static RECIPE: SectionRecipe = SectionRecipe {
    label: "Toe",
    make_measure,
    write_directions,
};

/// Four stitches gained every two rounds: one increase at each end of each
/// needle, then a plain round.
pub const TOE_RATE: IncreaseRate = IncreaseRate::new(4.0, 2.0);

fn make_measure(mut input: IncreaseInput) -> Result<IncreaseResolver> {
    let start = require(SectionKind::Toe, input.start_stitches, START_STITCHES)?;
    if input.increase_rate.is_none() {
        if let Some(end) = input.end_stitches {
            let repeats = (end - start) / TOE_RATE.delta;
            if same_count(repeats, repeats.round()) {
                input.increase_rate = Some(TOE_RATE);
            }
        }
    }
    IncreaseResolver::resolve(input)
}

fn write_directions(m: &IncreaseResolver) -> Vec<String> {
    let cast_on = whole(m.start_stitches());
    if cast_on % 2 != 0 {
        warn!(cast_on, "odd cast-on count; the two needles will not hold equal stitches");
    }
    let end = m.end_stitches();
    let mut lines = vec![
        format!(
            "Cast on {cast_on} stitches ({} per needle) in preferred style (Figure 8, crochet, etc).",
            whole(m.start_stitches() / 2.0)
        ),
        "Knit all stitches around.".to_owned(),
        "Row 1: Needle 1: K1, M1R, knit to last stitch, M1L, K1. \
         Needle 2: K1, M1R, knit to last stitch, M1L, K1."
            .to_owned(),
        "Row 2: Knit all stitches around.".to_owned(),
    ];
    if m.increase_rate() != TOE_RATE {
        lines.push(format!(
            "Space the increase rounds so the toe grows by {}.",
            m.increase_rate()
        ));
    }
    lines.push(format!(
        "Repeat Rows 1 and 2 until there are {} stitches total on your two needles ({} on each needle).",
        whole(end),
        whole(end / 2.0)
    ));
    lines.push(format!("You will have knitted {} rows.", whole(m.n_rows())));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatternError;
    use crate::section::PatternSection;

    #[test]
    fn defaults_to_four_every_two_rows() {
        let toe = PatternSection::toe(IncreaseInput::starting_at(32.0).with_end(64.0)).unwrap();
        assert_eq!(toe.increase_rate(), TOE_RATE);
        assert_eq!(toe.n_rows(), 16.0);
    }

    #[test]
    fn no_default_when_not_a_multiple_of_four() {
        let err = PatternSection::toe(IncreaseInput::starting_at(32.0).with_end(62.0)).unwrap_err();
        assert!(matches!(err, PatternError::UnderdeterminedMeasurement { .. }));
    }

    #[test]
    fn explicit_rate_is_kept() {
        let toe = PatternSection::toe(
            IncreaseInput::starting_at(28.0)
                .with_end(55.35)
                .with_rate(TOE_RATE),
        )
        .unwrap();
        assert!((toe.n_rows() - 13.675).abs() < 1e-9);
    }

    #[test]
    fn directions() {
        let mut toe = PatternSection::toe(IncreaseInput::starting_at(24.0).with_end(60.0)).unwrap();
        let lines = toe.write_directions();
        assert_eq!(
            lines[0],
            "Cast on 24 stitches (12 per needle) in preferred style (Figure 8, crochet, etc)."
        );
        assert_eq!(
            lines[4],
            "Repeat Rows 1 and 2 until there are 60 stitches total on your two needles (30 on each needle)."
        );
        assert_eq!(lines[5], "You will have knitted 18 rows.");
    }

    #[test]
    fn other_rates_are_called_out() {
        let mut toe = PatternSection::toe(
            IncreaseInput::starting_at(24.0)
                .with_end(60.0)
                .with_rate(IncreaseRate::new(2.0, 1.0)),
        )
        .unwrap();
        assert!(toe
            .write_directions()
            .iter()
            .any(|l| l.contains("+2 every row")));
    }
}
