//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of tax calculation from presentation.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::value::RawValue;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use capital_gains::dispatcher::Calculation;
use capital_gains::tax::{Amount, Outcome};
use capital_gains::utils::{format_amount, format_quantity};

/// Format outcomes as a single JSON line: `[{"tax":0.00},{"tax":10000.00}]`
///
/// Taxes are written as JSON numbers with exactly two decimals.
pub fn format_outcomes_json(outcomes: &[Outcome]) -> Result<String> {
    #[derive(Serialize)]
    struct JsonTax {
        tax: Box<RawValue>,
    }

    let taxes = outcomes
        .iter()
        .map(|outcome| {
            RawValue::from_string(outcome.tax().to_string()).map(|tax| JsonTax { tax })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(serde_json::to_string(&taxes)?)
}

/// Format a calculation as a per-trade breakdown table
pub fn format_calculation_table(calculation: &Calculation, request_line: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} Request on line {}\n\n",
        "■".cyan().bold(),
        request_line
    ));

    if calculation.entries.is_empty() {
        output.push_str("No operations.\n");
        return output;
    }

    #[derive(Tabled)]
    struct TradeRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Operation")]
        operation: String,
        #[tabled(rename = "Quantity")]
        quantity: String,
        #[tabled(rename = "Unit Cost")]
        unit_cost: String,
        #[tabled(rename = "Tax")]
        tax: String,
        #[tabled(rename = "Held")]
        held: String,
        #[tabled(rename = "Avg Cost")]
        avg_cost: String,
        #[tabled(rename = "Carried Loss")]
        carried_loss: String,
    }

    let rows: Vec<TradeRow> = calculation
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let tax = match entry.outcome {
                Outcome::Exempt => format_amount(Amount::zero()).bright_black().to_string(),
                Outcome::Taxed(amount) => format_amount(amount).red().to_string(),
            };

            TradeRow {
                index: idx + 1,
                operation: entry.trade.as_str().to_string(),
                quantity: format_quantity(entry.trade.quantity()),
                unit_cost: format_amount(entry.trade.unit_price()),
                tax,
                held: format_quantity(entry.position.held_quantity),
                avg_cost: format_amount(entry.position.average_unit_cost),
                carried_loss: format_amount(entry.position.carried_loss),
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    // Right-align everything except # (0) and Operation (1)
    table.modify(Columns::new(2..), Alignment::right());

    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n{:<20} {}\n",
        "Total Tax:".bold(),
        format_amount(calculation.total_tax).green()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use capital_gains::tax::{evaluate_detailed, Quantity, TaxRules, Trade};
    use rust_decimal_macros::dec;

    #[test]
    fn test_json_line() {
        let outcomes = vec![
            Outcome::Exempt,
            Outcome::Taxed(Amount::of(dec!(10000))),
            Outcome::Exempt,
        ];
        assert_eq!(
            format_outcomes_json(&outcomes).unwrap(),
            r#"[{"tax":0.00},{"tax":10000.00},{"tax":0.00}]"#
        );
    }

    #[test]
    fn test_json_line_empty() {
        assert_eq!(format_outcomes_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_json_keeps_cents() {
        let outcomes = vec![Outcome::Taxed(Amount::of(dec!(7998.5)))];
        assert_eq!(
            format_outcomes_json(&outcomes).unwrap(),
            r#"[{"tax":7998.50}]"#
        );
    }

    #[test]
    fn test_table_contains_breakdown() {
        colored::control::set_override(false);

        let trades = vec![
            Trade::buy(Quantity::new(10000), Amount::of(dec!(10))),
            Trade::sell(Quantity::new(5000), Amount::of(dec!(20))),
        ];
        let calculation =
            Calculation::from_entries(evaluate_detailed(TaxRules::default(), &trades).unwrap())
                .unwrap();

        let table = format_calculation_table(&calculation, 1);
        assert!(table.contains("Request on line 1"));
        assert!(table.contains("10,000"));
        assert!(table.contains("10,000.00"));
        assert!(table.contains("Total Tax:"));
        assert!(table.lines().any(|line| line.starts_with("Total Tax:") && line.ends_with("10,000.00")));
        assert!(!table.contains("\u{001b}["));
    }

    #[test]
    fn test_table_without_operations() {
        let calculation = Calculation::from_entries(vec![]).unwrap();
        assert!(format_calculation_table(&calculation, 3).contains("No operations."));
    }
}
