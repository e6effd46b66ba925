// Tax module - weighted average cost, loss carryforward and per-trade tax

pub mod amount;
pub mod ledger;
pub mod position;
pub mod quantity;
pub mod trade;

pub use amount::Amount;
pub use ledger::{evaluate, evaluate_checked, evaluate_detailed, evaluate_with, Ledger, LedgerEntry};
pub use position::{ArithmeticOverflow, Position, PositionSnapshot, TaxRules};
pub use quantity::Quantity;
pub use trade::{Outcome, Trade};
