//! `sock-pattern`: sizes a toe-up sock and prints its directions.
//!
//! Measurements come from flags, from a TOML request file, or both; flags
//! override the file.
//!
//! **Usage:**
//! ```
//! sock-pattern --around-foot 8.2 --toe-to-heel 9.5 --stitches 30 --rows 30 [--per 4] [--units in]
//! sock-pattern --config sock.toml [--leg-length 5] [--json] [--verbose]
//! ```
//!
//! Exits non-zero if the measurements do not make a sock that closes.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sock_pattern::config::{FootSpec, GaugeSpec, PatternRequest, DEFAULT_PER};
use sock_pattern::serializer::json::to_json;
use sock_pattern::Units;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Generate toe-up sock knitting directions.
#[derive(Parser, Debug)]
#[command(
    name = "sock-pattern",
    about = "Generate toe-up sock knitting directions from a gauge and a foot"
)]
struct Args {
    /// TOML pattern request with `[gauge]` and `[foot]` tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Circumference around the ball of the foot.
    #[arg(long)]
    around_foot: Option<f64>,

    /// Length from the tip of the toe to the back of the heel.
    #[arg(long)]
    toe_to_heel: Option<f64>,

    /// Plain leg knit between heel and cuff.
    #[arg(long)]
    leg_length: Option<f64>,

    /// Stitches counted over the gauge swatch.
    #[arg(long)]
    stitches: Option<f64>,

    /// Rows counted over the gauge swatch.
    #[arg(long)]
    rows: Option<f64>,

    /// Swatch length the gauge was counted over (default 4).
    #[arg(long)]
    per: Option<f64>,

    /// Units of every length: `in` or `cm` (default `in`).
    #[arg(long)]
    units: Option<Units>,

    /// Foot lengths already have ease taken off.
    #[arg(long)]
    ease_applied: bool,

    /// Print the pattern as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log every derivation.
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let request = merge_request(args)?;
    debug!(?request, "pattern request");
    let mut pattern = request.build().context("failed to size the sock")?;

    if args.json {
        pattern.render();
        let doc = to_json(&pattern);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{pattern}");
    println!("Gauge: {}", pattern.gauge());
    for line in pattern.render() {
        println!("{line}");
    }
    Ok(())
}

/// Reads the request file, if any, and lays the explicit flags over it.
fn merge_request(args: &Args) -> Result<PatternRequest> {
    let base = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Some(
                PatternRequest::from_toml_str(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?,
            )
        }
        None => None,
    };

    let gauge = GaugeSpec {
        stitches: pick(args.stitches, base.as_ref().map(|b| b.gauge.stitches), "--stitches")?,
        rows: pick(args.rows, base.as_ref().map(|b| b.gauge.rows), "--rows")?,
        per: args
            .per
            .or(base.as_ref().map(|b| b.gauge.per))
            .unwrap_or(DEFAULT_PER),
        units: args
            .units
            .or(base.as_ref().map(|b| b.gauge.units))
            .unwrap_or(Units::Inches),
    };
    let foot = FootSpec {
        around_foot: pick(
            args.around_foot,
            base.as_ref().map(|b| b.foot.around_foot),
            "--around-foot",
        )?,
        toe_to_heel: pick(
            args.toe_to_heel,
            base.as_ref().map(|b| b.foot.toe_to_heel),
            "--toe-to-heel",
        )?,
        leg_length: args
            .leg_length
            .or(base.as_ref().and_then(|b| b.foot.leg_length)),
        ease_applied: args.ease_applied || base.as_ref().is_some_and(|b| b.foot.ease_applied),
    };
    Ok(PatternRequest { gauge, foot })
}

fn pick(flag: Option<f64>, file: Option<f64>, name: &str) -> Result<f64> {
    flag.or(file)
        .ok_or_else(|| anyhow!("missing {name} (pass it as a flag or in --config)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_alone_make_a_request() {
        let args = Args::try_parse_from([
            "sock-pattern",
            "--around-foot",
            "8.2",
            "--toe-to-heel",
            "9.5",
            "--stitches",
            "30",
            "--rows",
            "30",
            "--units",
            "in",
        ])
        .unwrap();
        let req = merge_request(&args).unwrap();
        assert_eq!(req.gauge.per, DEFAULT_PER);
        assert_eq!(req.gauge.units, Units::Inches);
        assert_eq!(req.foot.leg_length, None);
        req.build().unwrap();
    }

    #[test]
    fn missing_flag_is_named() {
        let args = Args::try_parse_from(["sock-pattern", "--around-foot", "8.2"]).unwrap();
        let err = merge_request(&args).unwrap_err();
        assert!(err.to_string().contains("--stitches"));
    }

    #[test]
    fn bad_units_are_rejected_by_clap() {
        assert!(Args::try_parse_from(["sock-pattern", "--units", "ft"]).is_err());
    }
}
