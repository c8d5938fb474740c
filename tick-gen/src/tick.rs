use chrono::NaiveDateTime;
use rust_decimal::prelude::*;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::clock::TIMESTAMP_FORMAT;
use crate::error::GenError;

pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// One simulated trade. Serializes as `timestamp,symbol,price,volume`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickRecord<'a> {
    pub timestamp: NaiveDateTime,
    pub symbol: &'a str,
    pub price: Decimal,
    pub volume: u32,
}

impl<'a> TickRecord<'a> {
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, symbol: &'a str, price: Decimal, volume: u32) -> Self {
        TickRecord {
            timestamp,
            symbol,
            price,
            volume,
        }
    }
}

impl Serialize for TickRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TickRecord", 4)?;
        state.serialize_field(
            "timestamp",
            &self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        )?;
        state.serialize_field("symbol", self.symbol)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("volume", &self.volume)?;
        state.end()
    }
}

/// Applies `perturbation` (a fraction of the base, e.g. `0.002` for +0.2%) to
/// `base_price` and rounds to cents. The result always carries two decimal
/// places, so `150` becomes `150.00`.
///
/// # Errors
/// Errors when `perturbation` is not finite or the product overflows
pub fn perturbed_price(base_price: Decimal, perturbation: f64) -> Result<Decimal, GenError> {
    let factor = Decimal::from_f64(perturbation)
        .and_then(|p| Decimal::ONE.checked_add(p))
        .ok_or(GenError::InvalidPrice)?;
    let mut price = base_price
        .checked_mul(factor)
        .ok_or(GenError::InvalidPrice)?
        .round_dp(PRICE_DECIMAL_PLACES);
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimClock;

    #[test]
    fn test_perturbed_price() {
        let base = Decimal::from(150);
        assert_eq!(perturbed_price(base, 0.0).unwrap().to_string(), "150.00");
        assert_eq!(perturbed_price(base, 0.002).unwrap().to_string(), "150.30");

        let price = perturbed_price(Decimal::from(95), 0.004_9).unwrap();
        assert_eq!(price.to_string(), "95.47");

        let price = perturbed_price(Decimal::from(285), -0.002).unwrap();
        assert_eq!(price.to_string(), "284.43");

        assert!(perturbed_price(base, f64::NAN).is_err());
        assert!(perturbed_price(Decimal::MAX, 0.005).is_err());
    }

    #[test]
    fn test_tick_record_serialize() {
        let timestamp = SimClock::parse("2023-09-15 09:30:02").unwrap().now();
        let price = perturbed_price(Decimal::from(150), 0.002).unwrap();
        let record = TickRecord::new(timestamp, "AAPL", price, 3421);

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.serialize(&record).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "2023-09-15 09:30:02,AAPL,150.30,3421\n"
        );
    }
}
