//! Gusset for a toe-up sock on magic loop.
//!
//! Increases happen only on needle 2 (the sole), one at each end every other
//! round, so the rate averages one stitch per row. Stitch counts are totals
//! across both needles; needle 1 keeps half the starting stitches throughout.

use super::{require, whole, SectionKind, SectionRecipe};
use crate::error::Result;
use crate::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver, START_STITCHES};

/// Gusset recipe.
pub static RECIPE: SectionRecipe = SectionRecipe {
    label: "Gusset",
    make_measure,
    write_directions,
};

/// One stitch gained per row on average.
pub const GUSSET_RATE: IncreaseRate = IncreaseRate::new(1.0, 1.0);

fn make_measure(mut input: IncreaseInput) -> Result<IncreaseResolver> {
    require(SectionKind::Gusset, input.start_stitches, START_STITCHES)?;
    if input.increase_rate.is_none() {
        input.increase_rate = Some(GUSSET_RATE);
    }
    IncreaseResolver::resolve(input)
}

fn write_directions(m: &IncreaseResolver) -> Vec<String> {
    let needle_1 = m.start_stitches() / 2.0;
    let needle_2 = m.end_stitches() - needle_1;
    vec![
        "Row 1: Needle 1: Knit all stitches across. \
         Needle 2: K1, M1R, knit across to last stitch, M1L, K1."
            .to_owned(),
        "Row 2: Knit all stitches around.".to_owned(),
        format!(
            "Repeat Rows 1 and 2 until there are {} stitches on Needle 1 and {} stitches on Needle 2.",
            whole(needle_1),
            whole(needle_2)
        ),
    ]
}
