use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::clock::SimClock;
use crate::error::GenError;
use crate::tick::{perturbed_price, TickRecord};

pub const DEFAULT_ROWS: u64 = 5_000_000;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 500_000;

/// Largest fractional move away from the base price, in either direction.
pub const MAX_PERTURBATION: f64 = 0.005;
pub const MIN_VOLUME: u32 = 100;
pub const MAX_VOLUME: u32 = 5000;
pub const MAX_STEP_SECONDS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of ticks to write
    pub rows: u64,
    /// Log a progress line every `progress_interval` rows, `0` to stay quiet
    pub progress_interval: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            rows: DEFAULT_ROWS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Draws ticks from a [`Catalog`], moving its own [`SimClock`] forward one
/// step per tick.
#[derive(Debug)]
pub struct TickGenerator<'c, R> {
    catalog: &'c Catalog,
    clock: SimClock,
    rng: R,
}

impl<'c, R: Rng> TickGenerator<'c, R> {
    #[must_use]
    pub fn new(catalog: &'c Catalog, clock: SimClock, rng: R) -> Self {
        TickGenerator {
            catalog,
            clock,
            rng,
        }
    }

    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Every tick perturbs the instrument's base price, never the last price
    /// drawn for it, so prices do not drift over a run.
    ///
    /// # Errors
    /// Errors when the clock overflows or the price cannot be represented.
    pub fn next_tick(&mut self) -> Result<TickRecord<'c>, GenError> {
        let catalog = self.catalog;
        let instrument = catalog
            .instruments()
            .choose(&mut self.rng)
            .ok_or(GenError::EmptyCatalog)?;
        let perturbation = self.rng.gen_range(-MAX_PERTURBATION..=MAX_PERTURBATION);
        let price = perturbed_price(instrument.base_price, perturbation)?;
        let volume = self.rng.gen_range(MIN_VOLUME..=MAX_VOLUME);
        let step = self.rng.gen_range(1..=MAX_STEP_SECONDS);
        let timestamp = self.clock.advance(step)?;

        Ok(TickRecord::new(timestamp, &instrument.symbol, price, volume))
    }

    /// Streams `config.rows` ticks into `writer` as headerless CSV and returns
    /// the number of rows written.
    ///
    /// # Errors
    /// Errors on the first tick that cannot be generated or written; rows
    /// already written are left in `writer`.
    pub fn write_ticks<W: io::Write>(
        &mut self,
        writer: W,
        config: GeneratorConfig,
    ) -> Result<u64, GenError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        for i in 0..config.rows {
            let tick = self.next_tick()?;
            writer.serialize(&tick)?;
            if reports_progress(i, config.progress_interval) {
                info!("Generated {} rows...", i);
            }
        }
        writer.flush()?;

        Ok(config.rows)
    }
}

/// Whether row `row` (zero based) gets a progress line: the first row, then
/// every `interval` rows. An `interval` of `0` never reports.
fn reports_progress(row: u64, interval: u64) -> bool {
    interval > 0 && row % interval == 0
}

/// Creates (or truncates) `path` and fills it with `config.rows` ticks.
///
/// # Errors
/// Errors with [`GenError::Destination`] when `path` cannot be created, in
/// which case nothing is written. Later write failures are returned as-is and
/// leave a partial file behind.
pub fn generate_to_path<R: Rng>(
    path: impl AsRef<Path>,
    catalog: &Catalog,
    clock: SimClock,
    rng: R,
    config: GeneratorConfig,
) -> Result<u64, GenError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GenError::Destination {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Writing {} rows over {} instruments to {}",
        config.rows,
        catalog.len(),
        path.display()
    );

    let rows = TickGenerator::new(catalog, clock, rng).write_ticks(file, config)?;
    info!("Generated {} rows in {}", rows, path.display());

    Ok(rows)
}
