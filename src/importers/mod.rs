// Import module - JSON operation requests

pub mod operations_json;
pub mod validation;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use crate::commands::{Command, OperationKind};
use crate::error::CapitalGainsError;
use crate::tax::{Amount, Quantity};

pub use operations_json::{parse_operations, read_requests, OperationRecord, Request};
pub use validation::validate_record;

/// Read all requests from a file
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Vec<Request>> {
    let path = path.as_ref();
    info!("Reading operations from {:?}", path);

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let requests = read_requests(BufReader::new(file))
        .with_context(|| format!("failed to read operations from {}", path.display()))?;

    Ok(requests)
}

/// Turn every record of a request into a register command
pub fn to_commands(request: &Request) -> Result<Vec<Command>, CapitalGainsError> {
    request
        .operations
        .iter()
        .enumerate()
        .map(|(idx, record)| -> Result<Command, CapitalGainsError> {
            let kind = validate_record(record, request.line, idx + 1)?;
            let quantity = Quantity::new(record.quantity);
            let unit_price = Amount::of(record.unit_cost);

            Ok(match kind {
                OperationKind::Buy => Command::RegisterBuy {
                    quantity,
                    unit_price,
                },
                OperationKind::Sell => Command::RegisterSell {
                    quantity,
                    unit_price,
                },
            })
        })
        .collect()
}
