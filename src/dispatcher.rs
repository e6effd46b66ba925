//! Command dispatcher
//!
//! A [`Session`] is the in-memory store behind the commands: register commands
//! append trades, and `Calculate` evaluates them on a fresh ledger, stores the
//! result and clears the registered trades so the next request starts flat.

use tracing::{debug, info};

use crate::commands::Command;
use crate::error::CapitalGainsError;
use crate::tax::{Amount, Ledger, LedgerEntry, Outcome, TaxRules, Trade};

/// Result of one `Calculate` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub entries: Vec<LedgerEntry>,
    pub total_tax: Amount,
}

impl Calculation {
    /// Wrap evaluated entries, summing their taxes
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Result<Self, CapitalGainsError> {
        let mut total_tax = Amount::zero();
        for (idx, entry) in entries.iter().enumerate() {
            total_tax = total_tax.checked_add(entry.outcome.tax()).ok_or_else(|| {
                CapitalGainsError::Overflow {
                    trade: idx + 1,
                    detail: "total tax".to_string(),
                }
            })?;
        }
        Ok(Self { entries, total_tax })
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.entries.iter().map(|entry| entry.outcome).collect()
    }
}

/// Registered trades and produced calculations for one run
#[derive(Debug, Clone, Default)]
pub struct Session {
    rules: TaxRules,
    strict: bool,
    trades: Vec<Trade>,
    calculations: Vec<Calculation>,
}

impl Session {
    pub fn new(rules: TaxRules, strict: bool) -> Self {
        Self {
            rules,
            strict,
            trades: Vec::new(),
            calculations: Vec::new(),
        }
    }

    /// Route a command to its handler
    pub fn dispatch(&mut self, command: Command) -> Result<(), CapitalGainsError> {
        match command {
            Command::RegisterBuy { .. } | Command::RegisterSell { .. } => {
                if let Some(trade) = command.trade() {
                    debug!("Registered {}", trade);
                    self.trades.push(trade);
                }
                Ok(())
            }
            Command::Calculate => self.calculate(),
        }
    }

    /// Dispatch every command in order, stopping at the first error
    pub fn dispatch_all<I>(&mut self, commands: I) -> Result<(), CapitalGainsError>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.dispatch(command)?;
        }
        Ok(())
    }

    fn calculate(&mut self) -> Result<(), CapitalGainsError> {
        let trades = std::mem::take(&mut self.trades);
        let mut ledger = Ledger::with_rules(self.rules);

        for trade in &trades {
            if self.strict {
                ledger.try_apply(trade)?;
            } else {
                ledger.apply(trade)?;
            }
        }

        let calculation = Calculation::from_entries(ledger.into_entries())?;
        info!(
            "Calculated {} trades, {} taxed, total tax {}",
            calculation.entries.len(),
            calculation
                .entries
                .iter()
                .filter(|entry| !entry.outcome.is_exempt())
                .count(),
            calculation.total_tax
        );
        self.calculations.push(calculation);
        Ok(())
    }

    /// Hand over all calculations produced so far
    pub fn take_calculations(&mut self) -> Vec<Calculation> {
        std::mem::take(&mut self.calculations)
    }
}
