//! Exact decimal amounts of money.

use std::{
    borrow::Borrow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Deref, Neg, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places a finalized amount is rounded to.
const CENTS_DP: u32 = 2;

/// Signed amount of money. Positive values are deposits, negative withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create amount `num * 10^-scale`, e.g. `Money::new(544, 2)` is `5.44`
    pub fn new(num: i64, scale: u32) -> Money {
        Self(Decimal::new(num, scale))
    }

    /// Sum of both amounts, `None` when it does not fit in a [`Decimal`].
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by `rate` and round half-up to whole cents.
    pub fn apply_rate(self, rate: Decimal) -> Money {
        Self(self.0 * rate).round_cents()
    }

    /// Round half-up (away from zero on the midpoint) to whole cents.
    pub fn round_cents(self) -> Money {
        Self(
            self.0
                .round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid amount")]
/// Returned when text can not be read as a decimal amount
pub struct InvalidMoneyErr(pub String);

impl FromStr for Money {
    type Err = InvalidMoneyErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| InvalidMoneyErr(s.to_owned()))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(this: Money) -> Self {
        this.0
    }
}

impl Borrow<Decimal> for Money {
    fn borrow(&self) -> &Decimal {
        &self.0
    }
}

impl Deref for Money {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// `$1,234.56`, negative amounts as `$-5.44`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.round_cents().0.abs();
        let plain = format!("{:.2}", cents);
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "${sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod test {
    use super::Money;
    use rust_decimal::Decimal;

    #[test]
    fn rate_rounds_half_up_to_cents() {
        // 50.00 * 0.0008 = 0.04
        assert_eq!(Money::new(5000, 2).apply_rate(Decimal::new(8, 4)), Money::new(4, 2));
        // 0.125 -> 0.13, -0.125 -> -0.13
        assert_eq!(Money::new(125, 1).apply_rate(Decimal::new(1, 2)), Money::new(13, 2));
        assert_eq!(Money::new(-125, 1).apply_rate(Decimal::new(1, 2)), Money::new(-13, 2));
        // 0.124 -> 0.12
        assert_eq!(Money::new(124, 1).apply_rate(Decimal::new(1, 2)), Money::new(12, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(" 12.50 ".parse::<Money>().unwrap(), Money::new(1250, 2));
        assert_eq!("-3".parse::<Money>().unwrap(), Money::new(-3, 0));
        assert!("twelve".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::new(123456789, 2).to_string(), "$1,234,567.89");
        assert_eq!(Money::new(100, 0).to_string(), "$100.00");
        assert_eq!(Money::new(-544, 2).to_string(), "$-5.44");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::new(999, 0).to_string(), "$999.00");
        assert_eq!(Money::new(1000, 0).to_string(), "$1,000.00");
    }

    #[test]
    fn checked_add_reports_overflow() {
        let max = Money::from(Decimal::MAX);
        assert_eq!(max.checked_add(Money::new(1, 0)), None);
        assert_eq!(max.checked_add(Money::new(-1, 0)), Some(Money::from(Decimal::MAX - Decimal::ONE)));
        assert_eq!(Money::new(1, 1).checked_add(Money::new(2, 1)), Some(Money::new(3, 1)));
    }

    #[test]
    fn sum_is_exact() {
        let parts = [Money::new(1, 1), Money::new(2, 1), Money::new(-3, 1)];
        assert_eq!(parts.iter().sum::<Money>(), Money::ZERO);
    }
}
