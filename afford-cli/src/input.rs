//! Parsing of user-typed values into an [`EvaluationInput`].
//!
//! The interactive `check` command takes `key=value` pairs:
//!
//! | Key        | Required | Meaning                                  |
//! |------------|----------|------------------------------------------|
//! | `income`   | no       | Monthly income (empty or missing = 0)    |
//! | `expenses` | no       | Monthly expenses                         |
//! | `balance`  | no       | Current bank balance                     |
//! | `purchase` | no       | Purchase amount                          |
//! | `emi`      | no       | EMI term in months; enables EMI          |
//! | `rate`     | no       | Annual interest rate %; requires `emi`   |
//!
//! ```text
//! check income=3,000 expenses=2000 balance=500 purchase=120
//! check income=1500 expenses=1000 purchase=1200 emi=12 rate=12
//! ```

use afford_core::EvaluationInput;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Errors in the `key=value` arguments of a check.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected key=value, got '{0}'")]
    MalformedPair(String),

    #[error("unknown field '{0}' (expected income, expenses, balance, purchase, emi, rate)")]
    UnknownField(String),

    #[error("field '{0}' given more than once")]
    DuplicateField(String),

    #[error("{field}: {source}")]
    InvalidAmount {
        field: String,
        #[source]
        source: ParseDecimalError,
    },

    #[error("emi: '{0}' is not a whole number of months")]
    InvalidMonths(String),

    #[error("rate given without emi; add emi=<months> to finance the purchase")]
    RateWithoutEmi,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses the arguments of a `check` command.
///
/// Negative values are accepted here; the engine rejects them with a message
/// naming the field.
pub fn parse_check_args<'a, I>(args: I) -> Result<EvaluationInput, InputError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut income = None;
    let mut expenses = None;
    let mut balance = None;
    let mut purchase = None;
    let mut months = None;
    let mut rate = None;

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| InputError::MalformedPair(arg.to_string()))?;
        let key = key.trim().to_ascii_lowercase();

        let slot = match key.as_str() {
            "income" => &mut income,
            "expenses" => &mut expenses,
            "balance" => &mut balance,
            "purchase" => &mut purchase,
            "rate" => &mut rate,
            "emi" => {
                if months.is_some() {
                    return Err(InputError::DuplicateField(key.clone()));
                }
                let parsed = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| InputError::InvalidMonths(value.to_string()))?;
                months = Some(parsed);
                continue;
            }
            _ => return Err(InputError::UnknownField(key.clone())),
        };

        if slot.is_some() {
            return Err(InputError::DuplicateField(key));
        }
        let amount = parse_decimal(value)
            .map_err(|source| InputError::InvalidAmount { field: key, source })?;
        *slot = Some(amount);
    }

    let input = EvaluationInput::one_time(
        income.unwrap_or_default(),
        expenses.unwrap_or_default(),
        balance.unwrap_or_default(),
        purchase.unwrap_or_default(),
    );

    match (months, rate) {
        (Some(months), rate) => Ok(input.with_emi(months, rate.unwrap_or_default())),
        (None, Some(_)) => Err(InputError::RateWithoutEmi),
        (None, None) => Ok(input),
    }
}

#[cfg(test)]
mod tests {
    use afford_core::PaymentPlan;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_decimal tests
    // =========================================================================

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    // =========================================================================
    // parse_check_args tests
    // =========================================================================

    #[test]
    fn parses_one_time_purchase() {
        let input =
            parse_check_args(["income=3,000", "expenses=2000", "balance=500", "purchase=120"])
                .unwrap();

        assert_eq!(
            input,
            EvaluationInput::one_time(dec!(3000), dec!(2000), dec!(500), dec!(120))
        );
    }

    #[test]
    fn parses_emi_purchase() {
        let input =
            parse_check_args(["purchase=1200", "emi=12", "rate=12", "income=1500"]).unwrap();

        assert_eq!(input.payment_plan, PaymentPlan::emi(12, dec!(12)));
        assert_eq!(input.purchase_amount, dec!(1200));
        assert_eq!(input.income, dec!(1500));
    }

    #[test]
    fn emi_without_rate_is_interest_free() {
        let input = parse_check_args(["purchase=600", "emi=6"]).unwrap();

        assert_eq!(input.payment_plan, PaymentPlan::emi(6, dec!(0)));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let input = parse_check_args(["purchase=10"]).unwrap();

        assert_eq!(input.income, dec!(0));
        assert_eq!(input.bank_balance, dec!(0));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let input = parse_check_args(["Income=5", "PURCHASE=1"]).unwrap();

        assert_eq!(input.income, dec!(5));
        assert_eq!(input.purchase_amount, dec!(1));
    }

    #[test]
    fn rejects_pair_without_equals() {
        let err = parse_check_args(["income"]).unwrap_err();

        assert!(matches!(err, InputError::MalformedPair(ref s) if s == "income"));
    }

    #[test]
    fn rejects_unknown_field() {
        let err = parse_check_args(["salary=10"]).unwrap_err();

        assert!(matches!(err, InputError::UnknownField(ref s) if s == "salary"));
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = parse_check_args(["income=1", "income=2"]).unwrap_err();

        assert!(matches!(err, InputError::DuplicateField(ref s) if s == "income"));
    }

    #[test]
    fn rejects_fractional_months() {
        let err = parse_check_args(["emi=1.5"]).unwrap_err();

        assert!(matches!(err, InputError::InvalidMonths(_)));
    }

    #[test]
    fn rejects_rate_without_emi() {
        let err = parse_check_args(["purchase=100", "rate=5"]).unwrap_err();

        assert!(matches!(err, InputError::RateWithoutEmi));
    }

    #[test]
    fn invalid_amount_names_field() {
        let err = parse_check_args(["expenses=lots"]).unwrap_err();

        assert!(err.to_string().starts_with("expenses: invalid decimal 'lots'"));
    }

    #[test]
    fn negative_amounts_pass_through_to_engine() {
        let input = parse_check_args(["income=-5"]).unwrap();

        assert_eq!(input.income, dec!(-5));
    }
}
