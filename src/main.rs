// src/main.rs
//
// Command-line driver: relax a parallel-plate capacitor on an N x N grid and report
// the sweep count, worker threads and wall-clock time of the solve loop.
//
// Examples:
//
//   cargo run --release -- --N 100 --t 1e-5 --L 10
//       -> plates at columns 20 and 80, rows 20..80, Jacobi until delta <= 1e-5.
//
//   RUST_LOG=debug cargo run --release -- --N 200 --t 1e-6 --L 10
//       -> same, with the run config (JSON) and periodic sweep deltas on stderr.
//
//   RAYON_NUM_THREADS=4 cargo run --release -- --N 400 --t 1e-6 --L 10
//       -> pin the worker pool size.

use std::env;
use std::process::ExitCode;

use capacitor_relax::cli::{parse_args, usage};
use capacitor_relax::config::RunConfig;
use capacitor_relax::plates::PlateSpec;
use capacitor_relax::relax::{RelaxSettings, relax_capacitor};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("capacitor-relax");

    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            log::debug!("{e}");
            eprintln!("{}", usage(program));
            return ExitCode::from(1);
        }
    };

    println!("Welcome.");
    println!("Solving the Laplace equation for the given parameters...");

    let spec = PlateSpec::default();
    let settings = RelaxSettings::with_tolerance(args.tolerance);

    match RunConfig::new(args.n, args.l, &spec, &settings).to_json() {
        Ok(json) => log::debug!("run config:\n{json}"),
        Err(e) => log::warn!("could not serialise run config: {e}"),
    }

    let (_field, report) = match relax_capacitor(args.n, args.l, &spec, &settings) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Reached tolerance after {} iterations.", report.sweeps);
    println!("Number of Threads: {}", report.threads);
    println!("Time to complete loop: {}", report.elapsed.as_secs_f64());
    ExitCode::SUCCESS
}
