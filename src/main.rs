use anyhow::{Context, Result, anyhow};
use clap::Parser;
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use whoisnorm::config::{Args, Settings};
use whoisnorm::processed::ProcessedTargets;
use whoisnorm::record::NormalizedRecord;
use whoisnorm::scope::ScopeFilter;
use whoisnorm::{normalize, output, parsers};

enum Input {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Input::Mapped(mmap) => mmap,
            Input::Buffered(buf) => buf,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::from_args(args).context("invalid configuration")?;
    let start_time = Instant::now();

    let input = read_input(&settings)?;
    let total_lines = memchr_iter(b'\n', &input).count();
    let batches = parsers::batches(&settings.preset, &input, settings.batch_size)?;
    info!(
        file = %settings.file,
        preset = %settings.preset,
        batches = batches.len(),
        "normalizing lookup results"
    );

    let processed = ProcessedTargets::new();

    // channel for sending normalized batches to writer
    let (tx, rx) = crossbeam::channel::unbounded::<Vec<NormalizedRecord>>();

    let output_arg = settings.output.clone();
    let writer_handle = std::thread::spawn(move || -> Result<()> {
        let mut writer = output::create_writer(&output_arg)?;
        for batch in rx {
            writer.write_batch(&batch)?;
        }
        writer.finish()
    });

    #[cfg(feature = "parallel")]
    let batch_iter = batches.par_iter();
    #[cfg(not(feature = "parallel"))]
    let batch_iter = batches.iter();

    let total_records: usize = batch_iter
        .map(|batch| {
            let records =
                match process_batch(&settings.preset, batch, &processed, &settings.scope) {
                    Ok(records) => records,
                    Err(err) => {
                        error!(error = %err, "dropping batch");
                        return 0;
                    }
                };
            let len = records.len();
            if tx.send(records).is_err() {
                warn!("writer stopped, discarding batch");
                return 0;
            }
            len
        })
        .sum();

    // close channel so writer thread can finish
    drop(tx);
    writer_handle
        .join()
        .map_err(|_| anyhow!("writer thread panicked"))?
        .context("writing records")?;

    info!(records = total_records, "done");
    if settings.benchmark {
        print_benchmark_results(
            input.len() as u64,
            total_lines,
            total_records,
            start_time.elapsed(),
        );
    }

    Ok(())
}

fn read_input(settings: &Settings) -> Result<Input> {
    if settings.reads_stdin() {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(Input::Buffered(buf));
    }
    let file = File::open(&settings.file).with_context(|| format!("opening {}", settings.file))?;
    if file.metadata()?.len() == 0 {
        // zero-length files cannot be mapped
        return Ok(Input::Buffered(Vec::new()));
    }
    // SAFETY: the file is only read, and is expected not to be truncated while mapped
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Input::Mapped(mmap))
}

fn process_batch(
    preset: &str,
    batch: &[u8],
    processed: &ProcessedTargets,
    scope: &ScopeFilter,
) -> Result<Vec<NormalizedRecord>> {
    let text = std::str::from_utf8(batch).map_err(whoisnorm::error::InputError::from)?;
    let mut records = Vec::new();
    for raw in parsers::parse(preset, text)? {
        let normalized = normalize(&raw);
        if normalized.len() == 0 {
            warn!("lookup result has no domain name, nothing to emit");
            continue;
        }
        for record in normalized {
            if !processed.set_add(&record.name) {
                continue;
            }
            if scope.is_in_scope(&record.name) {
                info!(domain = %record.name, "emitting results");
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn print_benchmark_results(
    input_size: u64,
    total_lines: usize,
    total_records: usize,
    duration: std::time::Duration,
) {
    let duration_secs = duration.as_secs_f64();
    let input_size_mb = input_size as f64 / (1024.0 * 1024.0);

    eprintln!("\n=== BENCHMARK RESULTS ===");
    eprintln!("Input size: {:.2} MB", input_size_mb);
    eprintln!("Total lines: {}", total_lines);
    eprintln!("Emitted records: {}", total_records);
    eprintln!("Processing time: {:.3}s", duration_secs);
    eprintln!("Throughput: {:.2} MB/s", input_size_mb / duration_secs);
    eprintln!("Throughput: {:.0} lines/s", total_lines as f64 / duration_secs);
    eprintln!(
        "Throughput: {:.0} records/s",
        total_records as f64 / duration_secs
    );
}
