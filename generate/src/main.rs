use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Station names with their mean annual temperature.
const STATIONS: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Abidjan", 26.0),
    ("Abéché", 29.4),
    ("Accra", 26.4),
    ("Addis Ababa", 16.0),
    ("Adelaide", 17.3),
    ("Aden", 29.1),
    ("Albuquerque", 14.0),
    ("Alexandria", 20.0),
    ("Alice Springs", 21.0),
    ("Almaty", 10.0),
    ("Amsterdam", 10.2),
    ("Anadyr", -6.9),
    ("Anchorage", 2.8),
    ("Ankara", 12.0),
    ("Arkhangelsk", 1.3),
    ("Athens", 19.2),
    ("Auckland", 15.2),
    ("Baghdad", 22.77),
    ("Bangkok", 28.6),
    ("Barcelona", 18.2),
    ("Beijing", 12.9),
    ("Berlin", 10.3),
    ("Bergen", 7.7),
    ("Bulawayo", 18.9),
    ("Cracow", 9.3),
    ("Dakar", 24.0),
    ("Dubai", 26.9),
    ("Hamburg", 9.7),
    ("Honolulu", 25.4),
    ("Istanbul", 13.9),
    ("İzmir", 17.9),
    ("Kraków", 8.3),
    ("Lagos", 26.8),
    ("Napoli", 15.9),
    ("Oslo", 5.7),
    ("Palembang", 27.3),
    ("Reykjavík", 4.3),
    ("São Paulo", 19.0),
    ("St. John's", 5.0),
    ("Tromsø", 2.9),
    ("Ürümqi", 7.4),
    ("Vladivostok", 4.9),
    ("Washington, D.C.", 14.6),
    ("Yakutsk", -8.8),
    ("Zürich", 9.3),
];

#[derive(Parser, Debug)]
struct Args {
    /// Number of records to write.
    #[arg(long, default_value_t = 1_000_000)]
    rows: u64,

    #[arg(long, default_value = "./data/measurements.txt")]
    output: PathBuf,

    /// Seed for reproducible output. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Standard deviation of each station's temperatures.
    #[arg(long, default_value_t = 10.0)]
    spread: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    if args.spread <= 0.0 {
        bail!("--spread must be positive, got {}", args.spread);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let distributions = STATIONS
        .iter()
        .map(|&(name, mean)| {
            Normal::new(mean, args.spread)
                .map(|dist| (name, dist))
                .map_err(|e| anyhow!("temperature distribution for {name}: {e}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::with_capacity(1 << 20, file);

    log::info!("writing {} rows to {}", args.rows, args.output.display());
    for i in 0..args.rows {
        let (name, dist) = &distributions[rng.random_range(0..distributions.len())];
        let temp = dist.sample(&mut rng).clamp(-99.9, 99.9);
        writeln!(out, "{name};{temp:.1}")?;

        if (i + 1) % 100_000_000 == 0 {
            log::info!("  {} rows written", i + 1);
        }
    }
    out.flush()?;
    log::info!("done");

    Ok(())
}
