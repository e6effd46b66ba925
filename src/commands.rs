//! Command model
//!
//! Input requests are turned into a sequence of register commands followed by
//! a single `Calculate`, which the dispatcher executes against a session.

use std::str::FromStr;

use crate::error::CapitalGainsError;
use crate::tax::{Amount, Quantity, Trade};

/// Kind of operation named in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Buy,
    Sell,
}

impl FromStr for OperationKind {
    type Err = CapitalGainsError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(OperationKind::Buy),
            "sell" => Ok(OperationKind::Sell),
            _ => Err(CapitalGainsError::UnknownOperation(s.to_string())),
        }
    }
}

/// Command executed by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a buy for the next calculation
    RegisterBuy { quantity: Quantity, unit_price: Amount },
    /// Register a sell for the next calculation
    RegisterSell { quantity: Quantity, unit_price: Amount },
    /// Evaluate all registered trades and store the outcomes
    Calculate,
}

impl Command {
    /// The trade a register command records, `None` for `Calculate`
    pub fn trade(&self) -> Option<Trade> {
        match *self {
            Command::RegisterBuy {
                quantity,
                unit_price,
            } => Some(Trade::buy(quantity, unit_price)),
            Command::RegisterSell {
                quantity,
                unit_price,
            } => Some(Trade::sell(quantity, unit_price)),
            Command::Calculate => None,
        }
    }
}
