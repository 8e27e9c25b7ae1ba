use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::payment::amount::to_minor_units;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_separator_strip_equals_integer_cents(
        whole in 0i64..10_000_000,
        frac in 0i64..100,
    ) {
        // "12.30" must become 1230, never 12.3 cents or a float artifact.
        let formatted = format!("{whole}.{frac:02}");
        let amount: Decimal = formatted.parse().expect("formatted decimal parses");

        let cents = to_minor_units(amount).expect("amount in range");
        prop_assert_eq!(cents, whole * 100 + frac);
    }

    #[test]
    fn test_two_digit_amounts_convert_exactly(cents in 0i64..1_000_000_000) {
        let amount = Decimal::new(cents, 2);
        prop_assert_eq!(to_minor_units(amount).expect("amount in range"), cents);
    }

    #[test]
    fn test_conversion_is_idempotent(cents in 0i64..1_000_000_000) {
        let first = to_minor_units(Decimal::new(cents, 2)).expect("amount in range");
        let second = to_minor_units(Decimal::new(first, 2)).expect("amount in range");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_moves_at_most_half_a_cent(
        whole in 0i64..1_000_000,
        millis in 0i64..1000,
    ) {
        // Three fractional digits round to the nearest cent.
        let amount = Decimal::new(whole * 1000 + millis, 3);
        let cents = to_minor_units(amount).expect("amount in range");

        let floor = whole * 100 + millis / 10;
        prop_assert!(cents == floor || cents == floor + 1);
    }

    #[test]
    fn test_negative_amounts_are_rejected(cents in 1i64..1_000_000_000) {
        let amount = -Decimal::new(cents, 2);
        prop_assert!(to_minor_units(amount).is_err());
    }
}
