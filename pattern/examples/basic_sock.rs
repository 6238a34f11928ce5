//! Builds the basic sock sections by hand, then sizes a whole sock from a
//! gauge and a foot and prints its directions.
//!
//! Run with: `cargo run --example basic_sock -p sock-pattern`

use sock_pattern::{
    Ease, FootMeasurement, Gauge, IncreaseInput, IncreaseRate, PatternSection, PerLength,
    SockPattern, Units,
};

fn main() -> Result<(), sock_pattern::PatternError> {
    println!("Basic Sock Elements");
    let mut sections = vec![
        PatternSection::toe(
            IncreaseInput::starting_at(32.0)
                .with_end(64.0)
                .with_rate(IncreaseRate::new(4.0, 2.0)),
        )?,
        PatternSection::instep(
            IncreaseInput::starting_at(64.0)
                .with_end(64.0)
                .with_rows(24.0),
        )?,
        PatternSection::gusset(
            IncreaseInput::starting_at(64.0)
                .with_end(88.0)
                .with_rate(IncreaseRate::new(2.0, 2.0)),
        )?,
        PatternSection::heel_turn(IncreaseInput::starting_at(56.0).with_end(32.0))?,
        PatternSection::cuff(IncreaseInput::starting_at(64.0).with_rows(12.0))?,
    ];

    println!();
    println!("----Pattern Directions------");
    for section in &mut sections {
        println!();
        println!("{section}");
        for line in section.write_directions() {
            println!("  {line}");
        }
    }

    let gauge = Gauge::new(PerLength::new(32.0, 4.0), PerLength::new(32.0, 4.0), Units::Inches)?;
    let foot = FootMeasurement::new(8.0, 9.5, Units::Inches, Ease::Raw)?;
    let mut pattern = SockPattern::new(gauge, foot)?;

    println!();
    println!("{pattern}");
    println!("Gauge: {}", pattern.gauge());
    for line in pattern.render() {
        println!("  {line}");
    }
    Ok(())
}
