use std::error::Error;
use std::io;
use std::time::Instant;

use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tick_gen::catalog::Catalog;
use tick_gen::clock::SimClock;
use tick_gen::generator::{generate_to_path, GeneratorConfig, TickGenerator};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let catalog = Catalog::default();
    let config = GeneratorConfig {
        rows: 1_000_000,
        progress_interval: 0,
    };

    let start = Instant::now();
    TickGenerator::new(&catalog, SimClock::default(), ChaCha8Rng::seed_from_u64(0))
        .write_ticks(io::sink(), config)?;
    warn!("Generating took: {:.2?}", start.elapsed());

    let start_writing = Instant::now();
    let path = std::env::temp_dir().join("tick-gen-benchmark.csv");
    generate_to_path(
        &path,
        &catalog,
        SimClock::default(),
        ChaCha8Rng::seed_from_u64(0),
        config,
    )?;
    warn!("Generating to {} took: {:.2?}", path.display(), start_writing.elapsed());

    warn!("Total took: {:.2?}", start.elapsed());

    Ok(())
}
