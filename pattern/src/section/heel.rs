//! Short-row heel turn on magic loop.
//!
//! The top-of-foot stitches rest on the cable while the sole stitches are
//! worked back and forth, losing one stitch per row until half the foot
//! circumference remains on the working needle.

use super::{aux, require, whole, SectionKind, SectionRecipe};
use crate::error::Result;
use crate::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver, START_STITCHES};

/// Heel turn recipe.
pub static RECIPE: SectionRecipe = SectionRecipe {
    label: "Heel Turn",
    make_measure,
    write_directions,
};

/// One stitch lost per row.
pub const HEEL_RATE: IncreaseRate = IncreaseRate::new(-1.0, 1.0);

/// Name of the stitch count before the first turn.
pub const FIRST_TURN: &str = "first_turn";
/// Name of the stitch count worked before the second turn.
pub const SECOND_TURN: &str = "second_turn";
/// Heels don't vary much: the second turn always comes after 7 stitches.
pub const SECOND_TURN_STITCHES: f64 = 7.0;
/// Short rows written out after row 1.
pub const SHORT_ROWS: u32 = 10;

fn make_measure(mut input: IncreaseInput) -> Result<IncreaseResolver> {
    let start = require(SectionKind::HeelTurn, input.start_stitches, START_STITCHES)?;
    if input.increase_rate.is_none() {
        input.increase_rate = Some(HEEL_RATE);
    }
    let mut m = IncreaseResolver::resolve(input)?;
    m.set_value(FIRST_TURN, start - 1.0)?;
    m.set_value(SECOND_TURN, SECOND_TURN_STITCHES)?;
    Ok(m)
}

fn write_directions(m: &IncreaseResolver) -> Vec<String> {
    let end = m.end_stitches();
    let second_turn = whole(aux(m, SECOND_TURN, SECOND_TURN_STITCHES));
    let mut lines = vec![
        "Knit across needle 1. Leave all top-of-foot stitches on the cable and work back \
         and forth on the gusset stitches as follows:"
            .to_owned(),
        format!("Row 1: Knit {}, ssk, k1, turn.", whole(end - 1.0)),
    ];
    for i in 1..=SHORT_ROWS {
        let row = i + 1;
        let worked = second_turn + i64::from(i) - 1;
        if row % 2 == 0 {
            lines.push(format!("Row {row}: S1, p{worked}, p2tog, p1, turn."));
        } else {
            lines.push(format!("Row {row}: S1, k{worked}, ssk, k1, turn."));
        }
    }
    lines.push(format!(
        "Continue until there are {} stitches on the working needle.",
        whole(end)
    ));
    lines.push("Knit 1 row around.".to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::PatternSection;

    fn heel() -> PatternSection {
        PatternSection::heel_turn(IncreaseInput::starting_at(45.0).with_end(30.0)).unwrap()
    }

    #[test]
    fn loses_one_stitch_per_row() {
        let heel = heel();
        assert_eq!(heel.increase_rate(), HEEL_RATE);
        assert_eq!(heel.n_rows(), 15.0);
    }

    #[test]
    fn turn_helpers() {
        let heel = heel();
        assert_eq!(heel.value(FIRST_TURN).unwrap(), 44.0);
        assert_eq!(heel.value(SECOND_TURN).unwrap(), 7.0);
    }

    #[test]
    fn ten_short_rows_alternate_purl_and_knit() {
        let mut heel = heel();
        let lines = heel.write_directions().to_vec();
        assert_eq!(lines.len(), 2 + SHORT_ROWS as usize + 2);
        assert_eq!(lines[1], "Row 1: Knit 29, ssk, k1, turn.");
        assert_eq!(lines[2], "Row 2: S1, p7, p2tog, p1, turn.");
        assert_eq!(lines[3], "Row 3: S1, k8, ssk, k1, turn.");
        assert_eq!(lines[11], "Row 11: S1, k16, ssk, k1, turn.");
        assert_eq!(
            lines[12],
            "Continue until there are 30 stitches on the working needle."
        );
    }
}
