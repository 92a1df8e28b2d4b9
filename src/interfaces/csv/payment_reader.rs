use crate::application::engine::PaymentRequest;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct PaymentRow {
    payer: String,
    payee: String,
    amount: Decimal,
}

/// Reads payment requests from a CSV source with a `payer,payee,amount` header.
///
/// Whitespace around fields is trimmed. Amounts are not validated here; the
/// engine rejects and records non-positive ones.
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

    /// Lazily deserializes one request per row.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader.into_deserialize().map(|row| {
            row.map(|r: PaymentRow| PaymentRequest::new(r.payer, r.payee, r.amount))
                .map_err(LedgerError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "payer, payee, amount\n1, 2, 500.0\n3, 1, 0.25";
        let results: Vec<Result<PaymentRequest>> =
            PaymentReader::new(data.as_bytes()).requests().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.payer_id, "1");
        assert_eq!(first.payee_id, "2");
        assert_eq!(first.amount, dec!(500.0));
    }

    #[test]
    fn test_reader_keeps_non_positive_amounts() {
        let data = "payer,payee,amount\n1,2,-4";
        let results: Vec<Result<PaymentRequest>> =
            PaymentReader::new(data.as_bytes()).requests().collect();
        assert_eq!(results[0].as_ref().unwrap().amount, dec!(-4));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "payer,payee,amount\n1,2,lots";
        let results: Vec<Result<PaymentRequest>> =
            PaymentReader::new(data.as_bytes()).requests().collect();
        assert!(matches!(results[0], Err(LedgerError::Csv(_))));
    }
}
