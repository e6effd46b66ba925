use rust_decimal::Decimal;
use thiserror::Error;

use super::amount::Amount;
use super::quantity::Quantity;
use super::trade::Outcome;

/// Flat rate applied to net gains
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Sale proceeds at or below this value are exempt
pub const DEFAULT_EXEMPTION_THRESHOLD: Decimal = Decimal::from_parts(2_000_000, 0, 0, false, 2);

/// Parameters of the capital gains regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRules {
    pub rate: Decimal,
    pub exemption_threshold: Amount,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            rate: DEFAULT_TAX_RATE,
            exemption_threshold: Amount::of(DEFAULT_EXEMPTION_THRESHOLD),
        }
    }
}

/// Point-in-time copy of a position's running state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionSnapshot {
    pub held_quantity: Quantity,
    pub average_unit_cost: Amount,
    pub carried_loss: Amount,
}

/// A position update whose arithmetic left the decimal or `i64` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arithmetic overflow")]
pub struct ArithmeticOverflow;

/// Running cost basis and loss state for one asset
///
/// Buys move the weighted average cost; sells realize a gain or loss against
/// it. Losses accumulate in `carried_loss` and are consumed by later taxable
/// gains. The average cost resets to zero whenever holdings reach zero.
///
/// Every value is computed before any field changes, so an update that
/// overflows leaves the position as it was.
#[derive(Debug, Clone)]
pub struct Position {
    held_quantity: Quantity,
    average_unit_cost: Amount,
    carried_loss: Amount,
    rules: TaxRules,
}

impl Position {
    pub fn new() -> Self {
        Self::with_rules(TaxRules::default())
    }

    pub fn with_rules(rules: TaxRules) -> Self {
        Self {
            held_quantity: Quantity::ZERO,
            average_unit_cost: Amount::zero(),
            carried_loss: Amount::zero(),
            rules,
        }
    }

    /// Add units at `unit_price`, recomputing the weighted average cost
    pub fn apply_buy(
        &mut self,
        quantity: Quantity,
        unit_price: Amount,
    ) -> Result<Outcome, ArithmeticOverflow> {
        let combined = self
            .held_quantity
            .checked_add(quantity)
            .ok_or(ArithmeticOverflow)?;

        let average_unit_cost = if combined.is_zero() {
            Amount::zero()
        } else {
            let held_cost = self
                .average_unit_cost
                .value()
                .checked_mul(Decimal::from(self.held_quantity.value()));
            let bought_cost = unit_price
                .value()
                .checked_mul(Decimal::from(quantity.value()));
            held_cost
                .zip(bought_cost)
                .and_then(|(held, bought)| held.checked_add(bought))
                .and_then(|total| total.checked_div(Decimal::from(combined.value())))
                .map(Amount::of)
                .ok_or(ArithmeticOverflow)?
        };

        self.average_unit_cost = average_unit_cost;
        self.held_quantity = combined;

        Ok(Outcome::Exempt)
    }

    /// Remove units at `unit_price` and work out the tax on the realized gain
    ///
    /// Quantity is not checked against holdings; an oversell drives
    /// `held_quantity` negative.
    pub fn apply_sell(
        &mut self,
        quantity: Quantity,
        unit_price: Amount,
    ) -> Result<Outcome, ArithmeticOverflow> {
        let proceeds = unit_price
            .checked_times(quantity)
            .ok_or(ArithmeticOverflow)?;
        let gross_gain = unit_price
            .checked_sub(self.average_unit_cost)
            .and_then(|margin| margin.checked_times(quantity))
            .ok_or(ArithmeticOverflow)?;
        let held_quantity = self
            .held_quantity
            .checked_sub(quantity)
            .ok_or(ArithmeticOverflow)?;
        let (outcome, carried_loss) = self.realize(proceeds, gross_gain)?;

        self.held_quantity = held_quantity;
        if held_quantity.is_zero() {
            self.average_unit_cost = Amount::zero();
        }
        self.carried_loss = carried_loss;

        Ok(outcome)
    }

    /// Tax due on a sale and the carried loss left after it
    fn realize(
        &self,
        proceeds: Amount,
        gross_gain: Amount,
    ) -> Result<(Outcome, Amount), ArithmeticOverflow> {
        // Losses accrue whether or not the sale is above the threshold
        if gross_gain.is_negative() {
            let carried_loss = self
                .carried_loss
                .checked_add(gross_gain.abs())
                .ok_or(ArithmeticOverflow)?;
            return Ok((Outcome::Exempt, carried_loss));
        }

        // Exempt profits leave the carried loss for a later taxable sale
        if proceeds <= self.rules.exemption_threshold || gross_gain.is_zero() {
            return Ok((Outcome::Exempt, self.carried_loss));
        }

        if self.carried_loss >= gross_gain {
            return Ok((Outcome::Exempt, self.carried_loss - gross_gain));
        }

        let net_gain = gross_gain - self.carried_loss;
        let tax = net_gain
            .checked_scale_by(self.rules.rate)
            .ok_or(ArithmeticOverflow)?;
        let outcome = if tax.is_positive() {
            Outcome::Taxed(tax)
        } else {
            Outcome::Exempt
        };

        Ok((outcome, Amount::zero()))
    }

    pub fn held_quantity(&self) -> Quantity {
        self.held_quantity
    }

    pub fn average_unit_cost(&self) -> Amount {
        self.average_unit_cost
    }

    pub fn carried_loss(&self) -> Amount {
        self.carried_loss
    }

    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            held_quantity: self.held_quantity,
            average_unit_cost: self.average_unit_cost,
            carried_loss: self.carried_loss,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
