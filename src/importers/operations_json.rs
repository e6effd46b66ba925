//! JSON operations format
//!
//! Each request is a JSON array of `{"operation", "unit-cost", "quantity"}`
//! objects. Input ends at EOF or at the first blank line.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::BufRead;
use std::str::FromStr;
use tracing::debug;

use crate::error::CapitalGainsError;

/// One operation exactly as it appears in the input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationRecord {
    pub operation: String,
    #[serde(rename = "unit-cost", deserialize_with = "deserialize_decimal")]
    pub unit_cost: Decimal,
    pub quantity: i64,
}

/// A batch of operations evaluated independently of every other batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// First input line of this request (1-indexed)
    pub line: usize,
    pub operations: Vec<OperationRecord>,
}

/// Parse one JSON array of operations
pub fn parse_operations(payload: &str) -> Result<Vec<OperationRecord>, serde_json::Error> {
    serde_json::from_str(payload.trim())
}

/// Read every request from `reader`
///
/// If everything up to the terminating blank line is a single JSON array it
/// becomes one request, which allows pretty-printed input. Otherwise every
/// line must hold its own array.
pub fn read_requests<R: BufRead>(reader: R) -> Result<Vec<Request>, CapitalGainsError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(operations) = parse_operations(&lines.join("\n")) {
        debug!("Read {} operations as a single request", operations.len());
        return Ok(vec![Request { line: 1, operations }]);
    }

    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            parse_operations(line)
                .map(|operations| Request {
                    line: idx + 1,
                    operations,
                })
                .map_err(|e| CapitalGainsError::ParseError {
                    line: idx + 1,
                    message: format!("expected a JSON array of operations ({})", e),
                })
        })
        .collect()
}

/// Read a decimal from the textual form of a JSON number
///
/// serde_json's `arbitrary_precision` feature keeps the digits exactly as
/// written, so no value ever passes through `f64`.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(serde::de::Error::custom)
}
