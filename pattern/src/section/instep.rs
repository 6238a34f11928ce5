//! Instep: knit straight around, no shaping. Toe-up or cuff-down, the
//! directions are the same. Also used for the leg.

use super::{require, whole, SectionKind, SectionRecipe};
use crate::error::Result;
use crate::resolver::{IncreaseInput, IncreaseRate, IncreaseResolver, N_ROWS, START_STITCHES};

/// Instep recipe.
pub static RECIPE: SectionRecipe = SectionRecipe {
    label: "Instep",
    make_measure,
    write_directions,
};

fn make_measure(mut input: IncreaseInput) -> Result<IncreaseResolver> {
    require(SectionKind::Instep, input.start_stitches, START_STITCHES)?;
    require(SectionKind::Instep, input.n_rows, N_ROWS)?;
    if input.increase_rate.is_none() {
        input.increase_rate = Some(IncreaseRate::FLAT);
    }
    IncreaseResolver::resolve(input)
}

fn write_directions(m: &IncreaseResolver) -> Vec<String> {
    vec![format!(
        "Knit all stitches around for {} rows.",
        whole(m.n_rows())
    )]
}
