//! Represents transactions
use std::fmt;

use chrono::NaiveDate;

use crate::money::Money;

/// Dated movement of money on a single account. Never changed once admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: NaiveDate,
    amount: Money,
}

impl Transaction {
    pub(crate) fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }

    /// day the transaction was booked on
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// signed amount, negative for withdrawals and fees
    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.date.format("%Y-%m-%d"), self.amount)
    }
}

#[cfg(test)]
mod test {
    use super::Transaction;
    use crate::money::Money;
    use chrono::NaiveDate;

    #[test]
    fn display_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            Transaction::new(date, Money::new(123450, 2)).to_string(),
            "2024-01-05, $1,234.50"
        );
        assert_eq!(
            Transaction::new(date, Money::new(-544, 2)).to_string(),
            "2024-01-05, $-5.44"
        );
    }
}
