use crate::error::{Result, ShwaryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a batch file: `country, amount, phone, callback_url`.
///
/// Values are taken as written; validation happens when the payment is
/// initiated.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentInstruction {
    pub country: String,
    pub amount: Decimal,
    pub phone: String,
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Reads payment instructions from a CSV source.
///
/// Whitespace is trimmed and the `callback_url` column may be left out.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields each row, so a malformed line only fails that item.
    pub fn instructions(self) -> impl Iterator<Item = Result<PaymentInstruction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ShwaryError::from))
    }
}
