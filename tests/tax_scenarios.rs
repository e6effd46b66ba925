use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use capital_gains::commands::Command;
use capital_gains::dispatcher::Session;
use capital_gains::error::CapitalGainsError;
use capital_gains::importers::{read_requests, to_commands};
use capital_gains::tax::{evaluate, evaluate_with, Amount, Outcome, Quantity, TaxRules, Trade};

fn buy(quantity: i64, unit_price: Decimal) -> Trade {
    Trade::buy(Quantity::new(quantity), Amount::of(unit_price))
}

fn sell(quantity: i64, unit_price: Decimal) -> Trade {
    Trade::sell(Quantity::new(quantity), Amount::of(unit_price))
}

fn taxes(outcomes: &[Outcome]) -> Vec<Decimal> {
    outcomes.iter().map(|outcome| outcome.tax().value()).collect()
}

#[test]
fn test_loss_partially_offsets_later_gain() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(5000, dec!(5.00)),
        sell(3000, dec!(20.00)),
    ];

    // gain 30000 less the 25000 carried loss
    assert_eq!(
        taxes(&evaluate(&trades).unwrap()),
        vec![dec!(0), dec!(0), dec!(1000.00)]
    );
}

#[test]
fn test_sell_at_average_cost_then_profit() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        buy(5000, dec!(25.00)),
        sell(10000, dec!(15.00)),
        sell(5000, dec!(25.00)),
    ];

    assert_eq!(
        taxes(&evaluate(&trades).unwrap()),
        vec![dec!(0), dec!(0), dec!(0), dec!(10000.00)]
    );
}

#[test]
fn test_loss_exhausted_across_several_sells_then_new_cycle() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(5000, dec!(2.00)),
        sell(2000, dec!(20.00)),
        sell(2000, dec!(20.00)),
        sell(1000, dec!(25.00)),
        buy(10000, dec!(20.00)),
        sell(5000, dec!(15.00)),
        sell(4350, dec!(30.00)),
        sell(650, dec!(30.00)),
    ];

    assert_eq!(
        taxes(&evaluate(&trades).unwrap()),
        vec![
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(0),
            dec!(3000.00),
            dec!(0),
            dec!(0),
            dec!(3700.00),
            dec!(0),
        ]
    );
}

#[test]
fn test_new_cycle_starts_from_fresh_cost_basis() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(10000, dec!(50.00)),
        buy(10000, dec!(20.00)),
        sell(10000, dec!(50.00)),
    ];

    assert_eq!(
        taxes(&evaluate(&trades).unwrap()),
        vec![dec!(0), dec!(80000.00), dec!(0), dec!(60000.00)]
    );
}

#[test]
fn test_exempt_profit_keeps_loss_for_taxable_sale() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(2000, dec!(5.00)),
        sell(1000, dec!(15.00)),
        sell(5000, dec!(20.00)),
    ];

    // 10000 loss survives the exempt sale and offsets the 50000 gain
    assert_eq!(
        taxes(&evaluate(&trades).unwrap()),
        vec![dec!(0), dec!(0), dec!(0), dec!(8000.00)]
    );
}

#[test]
fn test_zero_quantity_buy_changes_nothing() {
    let with_noop = vec![
        buy(100, dec!(10.00)),
        buy(0, dec!(99.00)),
        sell(100, dec!(300.00)),
    ];
    let without_noop = vec![buy(100, dec!(10.00)), sell(100, dec!(300.00))];

    let with_taxes = taxes(&evaluate(&with_noop).unwrap());
    assert_eq!(with_taxes.len(), 3);
    assert_eq!(with_taxes[2], taxes(&evaluate(&without_noop).unwrap())[1]);
    assert_eq!(with_taxes[2], dec!(5800.00));
}

#[test]
fn test_one_outcome_per_trade_in_order() {
    let trades = vec![
        sell(10, dec!(1.00)),
        buy(1000, dec!(30.00)),
        buy(1000, dec!(30.00)),
        sell(1000, dec!(40.00)),
        sell(500, dec!(10.00)),
    ];

    let outcomes = evaluate(&trades).unwrap();
    assert_eq!(outcomes.len(), trades.len());
    for (trade, outcome) in trades.iter().zip(&outcomes) {
        if matches!(trade, Trade::Buy { .. }) {
            assert_eq!(*outcome, Outcome::Exempt);
        }
    }
}

#[test]
fn test_evaluation_is_repeatable_and_isolated() {
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(5000, dec!(5.00)),
        sell(5000, dec!(20.00)),
    ];

    let first = evaluate(&trades).unwrap();
    let second = evaluate(&trades).unwrap();
    assert_eq!(first, second);

    let shared = &trades;
    let parallel: Vec<Vec<Outcome>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || evaluate(shared).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("evaluation thread panicked"))
            .collect()
    });
    assert!(parallel.iter().all(|outcomes| *outcomes == first));
}

#[test]
fn test_custom_rules_change_rate_and_threshold() {
    let rules = TaxRules {
        rate: dec!(0.15),
        exemption_threshold: Amount::of(dec!(50000)),
    };
    let trades = vec![
        buy(10000, dec!(10.00)),
        sell(2000, dec!(20.00)),
        sell(8000, dec!(20.00)),
    ];

    // 40000 proceeds fall under the higher threshold
    assert_eq!(
        taxes(&evaluate_with(rules, &trades).unwrap()),
        vec![dec!(0), dec!(0), dec!(12000.00)]
    );
}

#[test]
fn test_json_requests_through_session() -> Result<()> {
    let input = concat!(
        r#"[{"operation":"buy", "unit-cost":10.00, "quantity": 1000},{"operation":"buy", "unit-cost":20.00, "quantity": 2000},{"operation":"sell", "unit-cost":30.00, "quantity": 3000}]"#,
        "\n",
        r#"[{"operation":"sell", "unit-cost":30.00, "quantity": 3000}]"#,
        "\n",
    );

    let requests = read_requests(input.as_bytes())?;
    assert_eq!(requests.len(), 2);

    let mut session = Session::default();
    for request in &requests {
        session.dispatch_all(to_commands(request)?)?;
        session.dispatch(Command::Calculate)?;
    }

    let calculations = session.take_calculations();
    assert_eq!(calculations.len(), 2);
    assert_eq!(
        taxes(&calculations[0].outcomes()),
        vec![dec!(0), dec!(0), dec!(7998.00)]
    );
    // The second request starts flat, so the sell has no cost basis
    assert_eq!(taxes(&calculations[1].outcomes()), vec![dec!(18000.00)]);
    Ok(())
}

#[test]
fn test_oversized_trades_are_errors() {
    // cost of the buy leaves the decimal range
    let err = evaluate(&[buy(10_000_000_000, dec!(100000000000000000000.00))]).unwrap_err();
    assert!(matches!(err, CapitalGainsError::Overflow { trade: 1, .. }));

    // held quantity leaves the i64 range
    let err = evaluate(&[buy(i64::MAX, dec!(1.00)), buy(1, dec!(1.00))]).unwrap_err();
    assert!(matches!(err, CapitalGainsError::Overflow { trade: 2, .. }));
}

#[test]
fn test_repeated_buys_after_oversell_stay_within_range() {
    // each buy out of a short position inflates the average cost
    let mut trades = vec![buy(1, dec!(1000000000000.00))];
    for _ in 0..4 {
        trades.push(sell(1_000_000_000_000, dec!(1.00)));
        trades.push(buy(1_000_000_000_000, dec!(1000000000000.00)));
    }

    match evaluate(&trades) {
        Ok(outcomes) => assert_eq!(outcomes.len(), trades.len()),
        Err(err) => assert!(matches!(err, CapitalGainsError::Overflow { .. })),
    }
}
