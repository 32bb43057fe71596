use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use stations::{AggregateOptions, OverflowPolicy};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Fixed-capacity open-addressing table.
    Table,
    /// General purpose hash map, kept for comparison.
    Naive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Reader {
    Mmap,
    Buffered,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OnOverflow {
    /// Panic as soon as the table is full.
    Abort,
    /// Stop and report the error.
    Error,
}

impl From<OnOverflow> for OverflowPolicy {
    fn from(v: OnOverflow) -> Self {
        match v {
            OnOverflow::Abort => OverflowPolicy::Abort,
            OnOverflow::Error => OverflowPolicy::Error,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Input file name under ./data/.
    #[arg(long, default_value = "measurements.txt")]
    name: String,

    /// Explicit input path, overrides --name.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Distinct stations the table must hold. Rounded up to a power of two.
    #[arg(long, default_value_t = stations::driver::DEFAULT_CAPACITY)]
    capacity: usize,

    #[arg(long, value_enum, default_value_t = OnOverflow::Abort)]
    on_overflow: OnOverflow,

    #[arg(long, value_enum, default_value_t = Reader::Mmap)]
    reader: Reader,

    #[arg(long, value_enum, default_value_t = Variant::Table)]
    variant: Variant,

    /// Write a flamegraph of the run to this file.
    #[arg(long, default_value = "")]
    cpuprofile: String,

    /// Log the wall time of the run.
    #[arg(long)]
    timing: bool,
}

fn run(args: &Args, input_path: &Path) -> Result<String> {
    let options = AggregateOptions {
        overflow: args.on_overflow.into(),
        ..AggregateOptions::with_capacity(args.capacity)
    };

    let out = match (args.variant, args.reader) {
        (Variant::Table, Reader::Mmap) => stations::solve(input_path, options),
        (Variant::Table, Reader::Buffered) => stations::solve_buffered(input_path, options),
        (Variant::Naive, Reader::Mmap) => naive::solve(input_path),
        (Variant::Naive, Reader::Buffered) => naive::solve_buffered(input_path),
    };
    out.map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("aggregating {}", input_path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if args.path.is_none() && args.name.is_empty() {
        bail!("Filename param is missing");
    }
    let input_path = match &args.path {
        Some(p) => p.clone(),
        None => PathBuf::from(format!("./data/{}", args.name)),
    };

    let profiler = if args.cpuprofile.is_empty() {
        None
    } else {
        Some(
            pprof::ProfilerGuardBuilder::default()
                .frequency(1000)
                .blocklist(&["libc", "libgcc", "pthread", "vdso"])
                .build()
                .context("starting profiler")?,
        )
    };

    let start = Instant::now();
    let report = run(&args, &input_path)?;
    let elapsed = start.elapsed();

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    if args.timing {
        log::info!("Finished in: {:?}", elapsed);
    }

    if let Some(guard) = profiler {
        let report = guard.report().build().context("building profile")?;
        let file = File::create(&args.cpuprofile)
            .with_context(|| format!("creating {}", args.cpuprofile))?;
        report.flamegraph(file).context("writing flamegraph")?;
        log::info!("wrote cpu profile to {}", args.cpuprofile);
    }

    Ok(())
}
