//! Amount type for parsing and displaying monetary values.
//!
//! Users type amounts the way they see them on receipts: `1,250.50`, `$12`, `₺40`, `40 TL`. This
//! module accepts those forms and renders values with exactly two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Number of decimal places shown to the user. Values are never rounded before display.
pub const DISPLAY_DP: u32 = 2;

/// A monetary or quantity value as typed by, or shown to, the user.
///
/// # Examples
///
/// ```
/// # use daybook::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("₺1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "1,250.50");
///
/// let amount = Amount::from_str("-$7").unwrap();
/// assert_eq!(amount.to_string(), "-7.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Parses `s` and returns its value, or zero if it cannot be parsed.
    pub fn coerce(s: &str) -> Decimal {
        Amount::from_str(s).map(|a| a.value()).unwrap_or_default()
    }

    /// The value rounded for display, midpoint away from zero, always carrying two decimal
    /// places (e.g. `5` becomes `5.00`).
    pub fn rounded(&self) -> Decimal {
        round_for_display(self.value)
    }
}

/// Rounds `value` to `DISPLAY_DP` places and pads the scale so that `to_string` always shows
/// exactly two decimals.
pub fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DP);
    rounded
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError {
    input: String,
    source: rust_decimal::Error,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.source, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid amount: {}", self.input, self.source)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // "40 TL", "40TL"
        let without_suffix = trimmed
            .strip_suffix("TL")
            .or_else(|| trimmed.strip_suffix("tl"))
            .unwrap_or(trimmed)
            .trim_end();

        let (negative, unsigned) = match without_suffix.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, without_suffix),
        };

        let unsigned = unsigned
            .strip_prefix('$')
            .or_else(|| unsigned.strip_prefix('₺'))
            .unwrap_or(unsigned);

        // Remove commas (thousand separators)
        let digits = unsigned.replace(',', "");
        let value = Decimal::from_str(&digits).map_err(|source| AmountError {
            input: s.to_string(),
            source,
        })?;

        Ok(Amount {
            value: if negative { -value } else { value },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        write!(f, "{sign}{}", group_thousands(whole))?;
        if !fraction.is_empty() {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

/// Inserts a comma every three digits, counting from the right.
fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
