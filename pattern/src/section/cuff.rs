//! K1 P1 ribbed cuff and bind-off.

use super::{require, whole, SectionKind, SectionRecipe};
use crate::error::Result;
use crate::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver, N_ROWS, START_STITCHES};

/// Cuff recipe.
pub static RECIPE: SectionRecipe = SectionRecipe {
    label: "Cuff",
    make_measure,
    write_directions,
};

fn make_measure(mut input: IncreaseInput) -> Result<IncreaseResolver> {
    require(SectionKind::Cuff, input.start_stitches, START_STITCHES)?;
    require(SectionKind::Cuff, input.n_rows, N_ROWS)?;
    if input.increase_rate.is_none() {
        input.increase_rate = Some(IncreaseRate::FLAT);
    }
    IncreaseResolver::resolve(input)
}

fn write_directions(m: &IncreaseResolver) -> Vec<String> {
    vec![
        format!(
            "Row 1: K1, P1 for all {} stitches around.",
            whole(m.start_stitches())
        ),
        format!("Repeat Row 1 for {} rows.", whole(m.n_rows())),
        "Bind off LOOSELY (or you won't be able to get the sock onto your foot).".to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatternError;
    use crate::section::PatternSection;

    #[test]
    fn start_and_rows_suffice() {
        let cuff = PatternSection::cuff(IncreaseInput::starting_at(64.0).with_rows(8.0)).unwrap();
        assert_eq!(cuff.end_stitches(), 64.0);
        assert_eq!(cuff.label(), "Cuff");
    }

    #[test]
    fn rows_are_mandatory() {
        assert_eq!(
            PatternSection::cuff(IncreaseInput::starting_at(64.0)).unwrap_err(),
            PatternError::MissingMeasurement {
                section: SectionKind::Cuff,
                key: N_ROWS
            }
        );
    }

    #[test]
    fn directions() {
        let mut cuff = PatternSection::cuff(IncreaseInput::starting_at(64.0).with_rows(8.0)).unwrap();
        let lines = cuff.write_directions();
        assert_eq!(lines[0], "Row 1: K1, P1 for all 64 stitches around.");
        assert_eq!(lines[1], "Repeat Row 1 for 8 rows.");
    }
}
