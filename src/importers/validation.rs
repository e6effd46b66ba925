//! Operation record validation
//!
//! Financial input is never repaired or skipped: the first invalid record
//! aborts the whole run.

use rust_decimal::Decimal;

use super::operations_json::OperationRecord;
use crate::commands::OperationKind;
use crate::error::CapitalGainsError;

/// Check one record and resolve its operation kind
///
/// `line` is the input line of the request and `index` the 1-based position
/// of the record inside it, both used only for error messages.
pub fn validate_record(
    record: &OperationRecord,
    line: usize,
    index: usize,
) -> Result<OperationKind, CapitalGainsError> {
    let kind: OperationKind = record.operation.parse()?;

    if record.quantity < 0 {
        return Err(CapitalGainsError::ValidationError(format!(
            "line {}, operation {}: quantity must not be negative (got {})",
            line, index, record.quantity
        )));
    }

    if record.unit_cost < Decimal::ZERO {
        return Err(CapitalGainsError::ValidationError(format!(
            "line {}, operation {}: unit-cost must not be negative (got {})",
            line, index, record.unit_cost
        )));
    }

    Ok(kind)
}
