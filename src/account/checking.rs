//! Checking account rules: no overdraft, flat low-balance fee.
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{kind::check_overdraw, Transaction};
use crate::{errors::AccountErr, money::Money};

/// 0.08% of the balance per accrual
pub(super) fn interest_rate() -> Decimal {
    Decimal::new(8, 4)
}

/// Flat 5.44 fee when the balance is under 100.00
pub(super) fn fee(balance: Money) -> Money {
    if balance < Money::new(100, 0) {
        Money::new(544, 2)
    } else {
        Money::ZERO
    }
}

pub(super) fn admit(
    balance: Money,
    amount: Money,
    _date: NaiveDate,
    _existing: &[Transaction],
) -> Result<(), AccountErr> {
    check_overdraw(balance, amount)
}

#[cfg(test)]
mod test {
    use super::{admit, fee};
    use crate::{errors::AccountErr, money::Money};
    use chrono::NaiveDate;

    #[test]
    fn fee_only_below_threshold() {
        assert_eq!(fee(Money::new(9999, 2)), Money::new(544, 2));
        assert_eq!(fee(Money::new(-10, 0)), Money::new(544, 2));
        assert_eq!(fee(Money::new(100, 0)), Money::ZERO);
        assert_eq!(fee(Money::new(25000, 2)), Money::ZERO);
    }

    #[test]
    fn overdraft_is_refused_but_zero_is_fine() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let balance = Money::new(50, 0);
        assert_eq!(
            admit(balance, Money::new(-5001, 2), day, &[]),
            Err(AccountErr::Overdraw)
        );
        assert_eq!(admit(balance, Money::new(-50, 0), day, &[]), Ok(()));
    }
}
