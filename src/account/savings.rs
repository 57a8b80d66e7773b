//! Savings account rules: no overdraft, limited number of transactions.
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::{kind::check_overdraw, Transaction};
use crate::{errors::AccountErr, money::Money};

/// Transactions in one calendar month at which further ones are refused
pub const MONTHLY_LIMIT: usize = 5;
/// Transactions on one day at which further ones are refused
pub const DAILY_LIMIT: usize = 2;

/// 0.41% of the balance per accrual
pub(super) fn interest_rate() -> Decimal {
    Decimal::new(41, 4)
}

pub(super) fn fee(_balance: Money) -> Money {
    Money::ZERO
}

/// Counts are taken over the already admitted transactions. Admitting one that would bring a
/// period up to its limit is refused.
pub(super) fn admit(
    balance: Money,
    amount: Money,
    date: NaiveDate,
    existing: &[Transaction],
) -> Result<(), AccountErr> {
    check_overdraw(balance, amount)?;

    let (mut in_month, mut in_day) = (0, 0);
    for t in existing {
        let d = t.date();
        if d.year() == date.year() && d.month() == date.month() {
            in_month += 1;
            if d.day() == date.day() {
                in_day += 1;
            }
        }
    }

    let month_violated = in_month + 1 >= MONTHLY_LIMIT;
    let day_violated = in_day + 1 >= DAILY_LIMIT;
    if month_violated || day_violated {
        return Err(AccountErr::TransactionLimit {
            month_violated,
            day_violated,
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::admit;
    use crate::{account::Transaction, errors::AccountErr, money::Money};
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn history(days: &[(u32, u32)]) -> Vec<Transaction> {
        days.iter()
            .map(|&(m, d)| Transaction::new(day(m, d), Money::new(10, 0)))
            .collect()
    }

    #[test]
    fn fifth_in_month_is_refused() {
        let existing = history(&[(3, 1), (3, 2), (3, 3), (3, 4)]);
        assert_eq!(
            admit(Money::new(40, 0), Money::new(1, 0), day(3, 20), &existing),
            Err(AccountErr::TransactionLimit {
                month_violated: true,
                day_violated: false
            })
        );
        // other months are unaffected
        assert_eq!(
            admit(Money::new(40, 0), Money::new(1, 0), day(4, 1), &existing),
            Ok(())
        );
    }

    #[test]
    fn second_on_same_day_is_refused() {
        let existing = history(&[(3, 5)]);
        assert_eq!(
            admit(Money::new(10, 0), Money::new(1, 0), day(3, 5), &existing),
            Err(AccountErr::TransactionLimit {
                month_violated: false,
                day_violated: true
            })
        );
        assert_eq!(
            admit(Money::new(10, 0), Money::new(1, 0), day(3, 6), &existing),
            Ok(())
        );
    }

    #[test]
    fn both_limits_reported_together() {
        let existing = history(&[(3, 1), (3, 2), (3, 3), (3, 4)]);
        assert_eq!(
            admit(Money::new(40, 0), Money::new(1, 0), day(3, 4), &existing),
            Err(AccountErr::TransactionLimit {
                month_violated: true,
                day_violated: true
            })
        );
    }

    #[test]
    fn same_month_of_other_year_is_not_counted() {
        let existing = vec![
            Transaction::new(NaiveDate::from_ymd_opt(2023, 3, 5).unwrap(), Money::new(1, 0)),
            Transaction::new(NaiveDate::from_ymd_opt(2023, 3, 6).unwrap(), Money::new(1, 0)),
        ];
        assert_eq!(
            admit(Money::new(2, 0), Money::new(1, 0), day(3, 5), &existing),
            Ok(())
        );
    }

    #[test]
    fn overdraft_checked_first() {
        let existing = history(&[(3, 5)]);
        assert_eq!(
            admit(Money::new(10, 0), Money::new(-11, 0), day(3, 5), &existing),
            Err(AccountErr::Overdraw)
        );
    }
}
