use std::fmt;

use super::amount::Amount;
use super::quantity::Quantity;

/// A single buy or sell of the tracked asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trade {
    Buy { quantity: Quantity, unit_price: Amount },
    Sell { quantity: Quantity, unit_price: Amount },
}

impl Trade {
    pub fn buy(quantity: Quantity, unit_price: Amount) -> Self {
        Trade::Buy { quantity, unit_price }
    }

    pub fn sell(quantity: Quantity, unit_price: Amount) -> Self {
        Trade::Sell { quantity, unit_price }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            Trade::Buy { quantity, .. } | Trade::Sell { quantity, .. } => *quantity,
        }
    }

    pub fn unit_price(&self) -> Amount {
        match self {
            Trade::Buy { unit_price, .. } | Trade::Sell { unit_price, .. } => *unit_price,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trade::Buy { .. } => "buy",
            Trade::Sell { .. } => "sell",
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.as_str(), self.quantity(), self.unit_price())
    }
}

/// Tax result of applying one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No tax due
    Exempt,
    /// Tax due, always strictly positive
    Taxed(Amount),
}

impl Outcome {
    /// Tax amount owed, zero for exempt trades
    pub fn tax(&self) -> Amount {
        match self {
            Outcome::Exempt => Amount::zero(),
            Outcome::Taxed(amount) => *amount,
        }
    }

    pub fn is_exempt(&self) -> bool {
        matches!(self, Outcome::Exempt)
    }
}
