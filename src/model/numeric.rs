//! Safe numeric coercion.
//!
//! Every value that feeds an aggregate passes through `Numeric::to_decimal`. Absent values,
//! strings that do not parse and non-finite floats all become zero, so one bad record can only
//! ever contribute nothing to a total.

use crate::model::Amount;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// A value that can be read as a `Decimal`, falling back to zero.
pub trait Numeric {
    fn to_decimal(&self) -> Decimal;
}

/// Coerces `value` to a `Decimal`, yielding zero when it is absent or malformed.
pub fn coerce<N: Numeric>(value: N) -> Decimal {
    value.to_decimal()
}

impl Numeric for Decimal {
    fn to_decimal(&self) -> Decimal {
        *self
    }
}

impl Numeric for Amount {
    fn to_decimal(&self) -> Decimal {
        self.value()
    }
}

impl Numeric for str {
    fn to_decimal(&self) -> Decimal {
        Amount::coerce(self)
    }
}

impl Numeric for String {
    fn to_decimal(&self) -> Decimal {
        Amount::coerce(self)
    }
}

impl Numeric for f64 {
    fn to_decimal(&self) -> Decimal {
        if self.is_finite() {
            Decimal::from_f64(*self).unwrap_or_default()
        } else {
            Decimal::ZERO
        }
    }
}

impl Numeric for i64 {
    fn to_decimal(&self) -> Decimal {
        Decimal::from(*self)
    }
}

impl<T: Numeric> Numeric for Option<T> {
    fn to_decimal(&self) -> Decimal {
        self.as_ref().map(Numeric::to_decimal).unwrap_or_default()
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_decimal(&self) -> Decimal {
        (**self).to_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strings() {
        assert_eq!(coerce("12.50"), dec!(12.5));
        assert_eq!(coerce(String::from("7")), dec!(7));
        assert_eq!(coerce("not a number"), Decimal::ZERO);
        assert_eq!(coerce(""), Decimal::ZERO);
    }

    #[test]
    fn test_absent() {
        assert_eq!(coerce(None::<Decimal>), Decimal::ZERO);
        assert_eq!(coerce(None::<String>), Decimal::ZERO);
        assert_eq!(coerce(Some("3")), dec!(3));
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(coerce(2.5_f64), dec!(2.5));
    }

    #[test]
    fn test_integers_and_decimals() {
        assert_eq!(coerce(42_i64), dec!(42));
        assert_eq!(coerce(dec!(0.85)), dec!(0.85));
        assert_eq!(coerce(Amount::new(dec!(9.99))), dec!(9.99));
    }
}
