use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::GenError;
use crate::generator::MAX_PERTURBATION;
use crate::tick::perturbed_price;

/// Equities and base prices used when no catalog file is given.
const DEFAULT_INSTRUMENTS: [(&str, u32); 10] = [
    ("AAPL", 150),
    ("MSFT", 285),
    ("GOOGL", 136),
    ("AMZN", 95),
    ("TSLA", 240),
    ("META", 180),
    ("NVDA", 210),
    ("JPM", 140),
    ("JNJ", 160),
    ("V", 230),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
}

/// The fixed set of instruments a run draws ticks from.
///
/// A `Catalog` is always non-empty and every base price in it stays above
/// zero after the largest downward perturbation is rounded to cents, so the
/// generator never has to re-check either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    instruments: Vec<Instrument>,
}

impl Instrument {
    #[must_use]
    pub fn new(symbol: impl Into<String>, base_price: Decimal) -> Self {
        Instrument {
            symbol: symbol.into(),
            base_price,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            instruments: DEFAULT_INSTRUMENTS
                .iter()
                .map(|&(symbol, price)| Instrument::new(symbol, Decimal::from(price)))
                .collect(),
        }
    }
}

impl Catalog {
    /// # Errors
    /// Errors when the catalog is not usable for generation:
    /// 1. `instruments` is empty
    /// 2. a symbol is empty or contains a comma, quote or whitespace
    /// 3. a symbol appears twice
    /// 4. a base price would round to `0.00` once perturbed downwards
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, GenError> {
        if instruments.is_empty() {
            return Err(GenError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(instruments.len());
        for instrument in &instruments {
            let symbol = &instrument.symbol;
            if symbol.is_empty()
                || symbol
                    .chars()
                    .any(|c| c == ',' || c == '"' || c.is_whitespace())
            {
                return Err(GenError::InvalidSymbol(symbol.clone()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(GenError::DuplicateSymbol(symbol.clone()));
            }
            if !prices_stay_positive(instrument.base_price) {
                return Err(GenError::InvalidBasePrice {
                    symbol: symbol.clone(),
                    price: instrument.base_price,
                });
            }
        }

        Ok(Catalog { instruments })
    }

    /// Loads a catalog from a CSV file with a `symbol,base_price` header.
    ///
    /// # Errors
    /// Errors when the file cannot be read, a record is malformed, or the
    /// resulting catalog fails the checks of [`Catalog::new`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path.as_ref())?;
        let instruments = reader
            .deserialize()
            .collect::<Result<Vec<Instrument>, csv::Error>>()?;
        Catalog::new(instruments)
    }

    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    #[must_use]
    pub fn base_price(&self, symbol: &str) -> Option<Decimal> {
        self.instruments
            .iter()
            .find(|instrument| instrument.symbol == symbol)
            .map(|instrument| instrument.base_price)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Always `false` for a catalog built through [`Catalog::new`] or `Default`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

fn prices_stay_positive(base_price: Decimal) -> bool {
    base_price > Decimal::ZERO
        && perturbed_price(base_price, -MAX_PERTURBATION).is_ok_and(|p| p > Decimal::ZERO)
}
