//! End-to-end checks of the engine and ledger through the public API.

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use afford_core::calculations::common::round_half_up;
use afford_core::ledger::CSV_HEADERS;
use afford_core::{EvaluationInput, HistoryLedger, Session, evaluate, evaluate_at};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
}

// =========================================================================
// Worked scenarios
// =========================================================================

#[test]
fn scenario_surplus_and_balance_both_cover_purchase() {
    let input = EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120));

    let result = evaluate(&input).unwrap();

    assert_eq!(result.monthly_leftover, dec!(880));
    assert_eq!(result.monthly_installment, dec!(0));
    assert!(result.affordable);
}

#[test]
fn scenario_neither_surplus_nor_balance_covers_purchase() {
    let input = EvaluationInput::one_time(dec!(1000), dec!(1000), dec!(0), dec!(500));

    let result = evaluate(&input).unwrap();

    assert_eq!(result.monthly_leftover, dec!(-500));
    assert!(!result.affordable);
}

#[test]
fn scenario_interest_free_emi() {
    let input =
        EvaluationInput::one_time(dec!(2500), dec!(1800), dec!(0), dec!(1200)).with_emi(12, dec!(0));

    let result = evaluate(&input).unwrap();

    assert_eq!(result.monthly_installment, dec!(100.00));
    assert_eq!(result.monthly_leftover, dec!(2500) - dec!(1800) - dec!(100));
}

#[test]
fn scenario_twelve_percent_emi() {
    let input = EvaluationInput::one_time(dec!(1000), dec!(950), dec!(100000), dec!(1200))
        .with_emi(12, dec!(12));

    let result = evaluate(&input).unwrap();

    assert_eq!(round_half_up(result.monthly_installment), dec!(106.62));
    // Leftover is negative; the large balance does not matter for EMI
    assert!(!result.affordable);
}

// =========================================================================
// Properties over a small grid of inputs
// =========================================================================

#[test]
fn one_time_decision_matches_surplus_or_balance_rule() {
    let amounts = [dec!(0), dec!(100), dec!(499.99), dec!(500), dec!(2500)];

    for income in amounts {
        for expenses in amounts {
            for balance in amounts {
                for purchase in amounts {
                    let input = EvaluationInput::one_time(income, expenses, balance, purchase);
                    let result = evaluate_at(&input, noon()).unwrap();

                    let expected = income - expenses >= purchase || balance >= purchase;
                    assert_eq!(result.monthly_installment, Decimal::ZERO);
                    assert_eq!(result.affordable, expected, "{input:?}");
                }
            }
        }
    }
}

#[test]
fn emi_fields_never_affect_one_time_result() {
    let lump = EvaluationInput::one_time(dec!(1200), dec!(900), dec!(50), dec!(400));
    let lump_result = evaluate_at(&lump, noon()).unwrap();

    // Toggling EMI on and back off drops the term and rate entirely
    let mut toggled = lump.clone().with_emi(36, dec!(24));
    toggled.payment_plan = Default::default();
    let toggled_result = evaluate_at(&toggled, noon()).unwrap();

    assert_eq!(lump_result, toggled_result);
}

#[test]
fn zero_rate_installment_is_exact_division() {
    for (purchase, months) in [(dec!(1200), 12_u32), (dec!(1000), 3), (dec!(99.99), 7)] {
        let input = EvaluationInput::one_time(dec!(0), dec!(0), dec!(0), purchase).with_emi(months, dec!(0));

        let result = evaluate_at(&input, noon()).unwrap();

        assert_eq!(result.monthly_installment, purchase / Decimal::from(months));
    }
}

#[test]
fn positive_rate_installment_properties() {
    for rate in [dec!(0.5), dec!(5), dec!(12), dec!(29.99)] {
        let mut previous: Option<Decimal> = None;
        for months in [2_u32, 6, 12, 24, 48, 96] {
            let input =
                EvaluationInput::one_time(dec!(0), dec!(0), dec!(0), dec!(8000)).with_emi(months, rate);
            let installment = evaluate_at(&input, noon()).unwrap().monthly_installment;

            assert!(installment * Decimal::from(months) >= dec!(8000));
            if let Some(prev) = previous {
                assert!(installment < prev, "rate {rate}: {months} months not cheaper");
            }
            previous = Some(installment);
        }
    }
}

// =========================================================================
// Ledger through a session
// =========================================================================

#[test]
fn session_history_round_trip() {
    let mut session = Session::default();
    let inputs = [
        EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120)),
        EvaluationInput::one_time(dec!(1000), dec!(1000), dec!(0), dec!(500)),
        EvaluationInput::one_time(dec!(1500), dec!(1000), dec!(0), dec!(1200)).with_emi(12, dec!(12)),
    ];

    for (minute, input) in inputs.iter().enumerate() {
        let at = Utc.with_ymd_and_hms(2025, 9, 1, 12, minute as u32, 0).unwrap();
        session.check_affordability_at(input.clone(), at).unwrap();
    }

    let export = session.export_history().unwrap();
    let text = export.as_str().unwrap();

    assert_eq!(
        text,
        "Time,Result,Income,Expenses,Bank Balance,Purchase,EMI Months,Interest Rate (%),Monthly EMI,Leftover\n\
         2025-09-01 12:00:00,You can afford this!,3000.00,2000.00,500.00,120.00,,,0.00,880.00\n\
         2025-09-01 12:01:00,Not affordable right now.,1000.00,1000.00,0.00,500.00,,,0.00,-500.00\n\
         2025-09-01 12:02:00,You can afford this!,1500.00,1000.00,0.00,1200.00,12,12,106.62,393.38\n"
    );
    assert_eq!(session.history().len(), 3);

    session.clear_history();
    let empty = session.export_history().unwrap();

    assert_eq!(empty.as_str().unwrap(), format!("{}\n", CSV_HEADERS.join(",")));
}

#[test]
fn ledger_append_never_rewrites_history() {
    let mut ledger = HistoryLedger::new();
    let mut snapshots = Vec::new();

    for purchase in [dec!(10), dec!(20), dec!(30), dec!(40)] {
        let input = EvaluationInput::one_time(dec!(100), dec!(50), dec!(0), purchase);
        let result = evaluate_at(&input, noon()).unwrap();
        ledger.append(input, result);

        assert_eq!(&ledger.records()[..snapshots.len()], snapshots.as_slice());
        snapshots = ledger.records().to_vec();
    }

    assert_eq!(ledger.len(), 4);
}
