use tracing::debug;

use crate::error::CapitalGainsError;

use super::position::{Position, PositionSnapshot, TaxRules};
use super::trade::{Outcome, Trade};

/// One evaluated trade with the position state right after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub trade: Trade,
    pub outcome: Outcome,
    pub position: PositionSnapshot,
}

/// Applies trades in order to a single fresh position, recording one outcome each
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    position: Position,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: TaxRules) -> Self {
        Self {
            position: Position::with_rules(rules),
            entries: Vec::new(),
        }
    }

    /// Apply the next trade and record its outcome
    ///
    /// Only arithmetic overflow can fail; the ledger is left untouched then.
    pub fn apply(&mut self, trade: &Trade) -> Result<Outcome, CapitalGainsError> {
        let applied = match *trade {
            Trade::Buy { quantity, unit_price } => self.position.apply_buy(quantity, unit_price),
            Trade::Sell { quantity, unit_price } => self.position.apply_sell(quantity, unit_price),
        };
        let outcome = applied.map_err(|_| CapitalGainsError::Overflow {
            trade: self.entries.len() + 1,
            detail: trade.to_string(),
        })?;

        debug!(
            "{} -> tax {} (held {}, avg {}, loss {})",
            trade,
            outcome.tax(),
            self.position.held_quantity(),
            self.position.average_unit_cost(),
            self.position.carried_loss()
        );

        self.entries.push(LedgerEntry {
            trade: *trade,
            outcome,
            position: self.position.snapshot(),
        });
        Ok(outcome)
    }

    /// Apply the next trade unless it sells more than is currently held
    ///
    /// A rejected trade leaves the ledger untouched. Trade numbers in the
    /// error are 1-based.
    pub fn try_apply(&mut self, trade: &Trade) -> Result<Outcome, CapitalGainsError> {
        if let Trade::Sell { quantity, .. } = trade {
            let held = self.position.held_quantity();
            if *quantity > held {
                return Err(CapitalGainsError::Oversell {
                    trade: self.entries.len() + 1,
                    requested: quantity.value(),
                    held: held.value(),
                });
            }
        }
        self.apply(trade)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.entries.iter().map(|entry| entry.outcome).collect()
    }

    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }

    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes()
    }
}

/// Evaluate trades under the default tax rules
pub fn evaluate(trades: &[Trade]) -> Result<Vec<Outcome>, CapitalGainsError> {
    evaluate_with(TaxRules::default(), trades)
}

/// Evaluate trades under the given rules, one outcome per trade in input order
pub fn evaluate_with(rules: TaxRules, trades: &[Trade]) -> Result<Vec<Outcome>, CapitalGainsError> {
    let mut ledger = Ledger::with_rules(rules);
    for trade in trades {
        ledger.apply(trade)?;
    }
    Ok(ledger.into_outcomes())
}

/// Like [`evaluate_with`], but rejects any sell larger than the current holdings
pub fn evaluate_checked(
    rules: TaxRules,
    trades: &[Trade],
) -> Result<Vec<Outcome>, CapitalGainsError> {
    let mut ledger = Ledger::with_rules(rules);
    for trade in trades {
        ledger.try_apply(trade)?;
    }
    Ok(ledger.into_outcomes())
}

/// Evaluate trades keeping a snapshot of the position after each one
pub fn evaluate_detailed(
    rules: TaxRules,
    trades: &[Trade],
) -> Result<Vec<LedgerEntry>, CapitalGainsError> {
    let mut ledger = Ledger::with_rules(rules);
    for trade in trades {
        ledger.apply(trade)?;
    }
    Ok(ledger.into_entries())
}
