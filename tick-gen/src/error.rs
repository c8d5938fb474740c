use std::io;
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Cannot create destination {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),
    #[error("The catalog has no instruments")]
    EmptyCatalog,
    #[error("Invalid symbol {0:?}")]
    InvalidSymbol(String),
    #[error("Symbol {0} appears more than once in the catalog")]
    DuplicateSymbol(String),
    #[error("Base price of {symbol} must be at least 0.01, got {price}")]
    InvalidBasePrice { symbol: String, price: Decimal },
    #[error("Perturbed price is not representable as a decimal")]
    InvalidPrice,
    #[error("Invalid timestamp, expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(#[from] chrono::ParseError),
    #[error("Simulation clock overflowed")]
    ClockOverflow,
}
