use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rb_core::{shannon_entropy, EntropyProfile, ReduceOptions, Reducer, DEFAULT_BLOCK_LEN};

mod mapped_file;
mod report;

use mapped_file::MappedFile;
use report::{output_path, EntropyReport, FileInfo, ReductionReport};

/// Remove junk bytes from a large binary sample.
#[derive(Parser, Debug)]
#[command(name = "reducebin", version)]
struct Args {
    /// Sample to reduce
    file: PathBuf,
    /// Calculate the entropy and exit
    #[arg(short, long)]
    entropy: bool,
    /// Block length in bytes
    #[arg(long = "len", default_value_t = DEFAULT_BLOCK_LEN)]
    length: usize,
    /// Write the reduced sample here instead of <FILE>.reduced
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<rb_core::Error>() {
            Some(rb_core::Error::NotReducible(reason)) => {
                log::info!("{}: {}", args.file.display(), reason);
                println!("The file cannot be reduced.");
                ExitCode::FAILURE
            }
            _ => {
                eprintln!("error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Run one invocation and return the report to print.
fn run(args: &Args) -> Result<String> {
    let started = Instant::now();
    let input = MappedFile::open(&args.file)?;
    let data = input.bytes();
    log::info!("Opened: {} ({} bytes)", args.file.display(), input.len());
    if input.is_empty() {
        log::warn!("{} is empty", args.file.display());
    }

    if args.entropy {
        // The whole-file figure does not depend on the block length.
        let entropy = shannon_entropy(data);
        let profile = match args.length {
            0 => None,
            len => Some(EntropyProfile::compute(data, len)?),
        };
        let report = EntropyReport::new(&args.file, entropy, profile);
        return if args.json {
            Ok(serde_json::to_string_pretty(&report)? + "\n")
        } else {
            Ok(report.to_string())
        };
    }

    let reducer = Reducer::new(ReduceOptions::default().block_len(args.length));
    let result = reducer.reduce(data)?;

    let out = args.out.clone().unwrap_or_else(|| output_path(&args.file));
    fs::write(&out, &result.output)
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("Wrote {} ({} bytes)", out.display(), result.reduced_size);

    let report = ReductionReport::new(
        FileInfo::new(&args.file, data),
        FileInfo::new(&out, &result.output),
        &result,
        started.elapsed(),
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&report)? + "\n")
    } else {
        Ok(report.to_string())
    }
}
