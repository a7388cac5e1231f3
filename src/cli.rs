// src/cli.rs
//
// Command-line contract:
//
//   capacitor-relax --N <grid size> --t <tolerance> --L <capacitor size>
//
// - exactly three flag/value pairs, in any order
// - any other argument count, or an unknown/repeated flag, is a usage error
// - a value that does not parse is taken as 0 (with a warning), not rejected

use std::str::FromStr;

use crate::error::{CapacitorError, Result};

/// Arguments after the program name.
pub const EXPECTED_ARGS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliArgs {
    /// Grid linear extent N.
    pub n: usize,
    /// Convergence tolerance on the sweep delta.
    pub tolerance: f64,
    /// Physical capacitor extent L.
    pub l: usize,
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} --N <grid linear size (N x N)> --t <tolerance> --L <capacitor linear size (L x L)>"
    )
}

fn parse_or_zero<T: FromStr + Default>(flag: &str, raw: &str) -> T {
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        log::warn!("could not parse value '{raw}' for {flag}, using 0");
        T::default()
    })
}

/// Parse the full argv (program name first).
pub fn parse_args(argv: &[String]) -> Result<CliArgs> {
    let rest = argv.get(1..).unwrap_or(&[]);
    if rest.len() != EXPECTED_ARGS {
        return Err(CapacitorError::Usage(format!(
            "expected {EXPECTED_ARGS} arguments, got {}",
            rest.len()
        )));
    }

    let mut n: Option<usize> = None;
    let mut tolerance: Option<f64> = None;
    let mut l: Option<usize> = None;

    for pair in rest.chunks_exact(2) {
        let (flag, value) = (pair[0].as_str(), pair[1].as_str());
        let slot_taken = match flag {
            "--N" => n.replace(parse_or_zero(flag, value)).is_some(),
            "--t" => tolerance.replace(parse_or_zero(flag, value)).is_some(),
            "--L" => l.replace(parse_or_zero(flag, value)).is_some(),
            other => {
                return Err(CapacitorError::Usage(format!("unrecognised flag '{other}'")));
            }
        };
        if slot_taken {
            return Err(CapacitorError::Usage(format!("flag '{flag}' given twice")));
        }
    }

    match (n, tolerance, l) {
        (Some(n), Some(tolerance), Some(l)) => Ok(CliArgs { n, tolerance, l }),
        // Three distinct known flags were seen, so all slots are filled.
        _ => Err(CapacitorError::Usage("missing flag".to_string())),
    }
}
