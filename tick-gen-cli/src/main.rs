use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::debug;
use rand::{thread_rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tick_gen::catalog::Catalog;
use tick_gen::clock::SimClock;
use tick_gen::generator::{
    generate_to_path, GeneratorConfig, DEFAULT_PROGRESS_INTERVAL, DEFAULT_ROWS,
};

#[derive(Parser)]
#[clap(author, version, about = "Writes simulated stock ticks to a CSV file", long_about = None)]
struct Cli {
    /// Destination CSV file, created or overwritten
    #[clap(default_value = "data/large_test.csv")]
    pub(crate) output_file: PathBuf,

    /// Number of ticks to generate
    #[clap(short = 'n', long, default_value_t = DEFAULT_ROWS)]
    pub(crate) rows: u64,

    /// Seed for a reproducible run; unseeded runs differ every time
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,

    /// Clock value before the first tick, as `YYYY-MM-DD HH:MM:SS`
    #[clap(long, default_value = "2023-09-15 09:30:00")]
    pub(crate) start: String,

    /// CSV file of `symbol,base_price` rows replacing the built-in equities
    #[clap(long)]
    pub(crate) catalog: Option<PathBuf>,

    /// Log progress every N rows, 0 to disable
    #[clap(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub(crate) progress_every: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_csv_path(path)?,
        None => Catalog::default(),
    };
    let clock = SimClock::parse(&cli.start)?;
    let config = GeneratorConfig {
        rows: cli.rows,
        progress_interval: cli.progress_every,
    };
    debug!("Seed: {:?}, catalog: {:?}", cli.seed, catalog);

    match cli.seed {
        Some(seed) => generate_to_path(
            &cli.output_file,
            &catalog,
            clock,
            ChaCha8Rng::seed_from_u64(seed),
            config,
        )?,
        None => generate_to_path(&cli.output_file, &catalog, clock, thread_rng(), config)?,
    };

    Ok(())
}
