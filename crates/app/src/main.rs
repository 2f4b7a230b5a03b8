//! cmpr: compress and decompress files with the cmpr-core codecs.

mod config;
mod input_gen;
mod workfile;

use config::{Config, Mode};
use workfile::{RunReport, WorkFileError};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            config::print_help();
            std::process::exit(2);
        }
    };

    if let Err(error) = run(&config) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), WorkFileError> {
    match &config.mode {
        Mode::Compress { input } => {
            let report =
                workfile::compress_file(input, config.algorithm, config.output.as_deref())?;
            if !config.quiet {
                print_report("compressed", &report);
            }
        }

        Mode::Decompress { input } => {
            let report = workfile::decompress_file(input, config.output.as_deref())?;
            if !config.quiet {
                print_report("decompressed", &report);
            }
        }

        Mode::GenSample { output } => {
            input_gen::write_sample_file(output, config.seed, config.sample_bytes).map_err(
                |source| WorkFileError::Io {
                    path: output.clone(),
                    source,
                },
            )?;
            if !config.quiet {
                println!(
                    "wrote {} sample bytes to {} (seed {})",
                    config.sample_bytes,
                    output.display(),
                    config.seed
                );
            }
        }
    }

    Ok(())
}

fn print_report(verb: &str, report: &RunReport) {
    println!(
        "{} {} bytes -> {} bytes ({:.1}% of original) in {} ms",
        verb,
        report.input_bytes,
        report.output_bytes,
        report.ratio() * 100.0,
        report.elapsed.as_millis()
    );
    println!("output: {}", report.output_path.display());
}
