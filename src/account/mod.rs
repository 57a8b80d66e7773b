//! Account ledger: transaction admission and interest accrual
use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

use crate::{errors::AccountErr, money::Money, AccountNumber};

mod checking;
pub(crate) mod kind;
mod savings;
mod transaction;

pub use kind::AccountKind;
pub use savings::{DAILY_LIMIT, MONTHLY_LIMIT};
pub use transaction::Transaction;

/// Outcome of a single accrual posting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// a transaction was posted
    pub applied: bool,
    /// signed amount posted (fees are negative)
    pub amount: Money,
}

/// What [`Account::apply_interest_and_fees`] posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    /// interest credited at month end
    pub interest: Posting,
    /// fee debited at month end
    pub fees: Posting,
    /// date both postings were booked on
    pub date: NaiveDate,
}

/// Single checking or savings account with its full transaction history.
///
/// `balance` always equals the sum of the amounts of `transactions`, and transactions are stored
/// in the order they were admitted which is also chronological.
///
/// Accounts are plain data. A multi-threaded host must wrap each one in a single lock so that
/// admission checks and the append happen atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    kind: AccountKind,
    balance: Money,
    transactions: Vec<Transaction>,
    latest_interest_date: Option<NaiveDate>,
}

impl Account {
    /// Create new empty account
    pub fn new(number: AccountNumber, kind: AccountKind) -> Self {
        Self {
            number,
            kind,
            balance: Money::ZERO,
            transactions: Vec::new(),
            latest_interest_date: None,
        }
    }

    /// Rebuild an account from stored history.
    ///
    /// Balance is recomputed from `history`, which must be in chronological order. Rate and
    /// overdraft rules are not re-checked since accrual postings legitimately bypass them.
    pub fn restore(
        number: AccountNumber,
        kind: AccountKind,
        latest_interest_date: Option<NaiveDate>,
        history: impl IntoIterator<Item = (NaiveDate, Money)>,
    ) -> Result<Self, AccountErr> {
        let mut acc = Self::new(number, kind);
        for (date, amount) in history {
            acc.post_unchecked(amount, date)?;
        }
        acc.latest_interest_date = latest_interest_date;
        Ok(acc)
    }

    #[cfg(test)]
    /// New checking account holding 50.00 after a deposit and a withdrawal in January 2024
    pub fn new_test_account() -> Self {
        let mut a = Account::new(1, AccountKind::Checking);
        a.add_transaction(Money::new(100, 0), ymd(2024, 1, 5)).unwrap();
        a.add_transaction(Money::new(-50, 0), ymd(2024, 1, 10)).unwrap();
        assert_eq!(a.balance(), Money::new(50, 0));
        a
    }

    /// Try to admit a new transaction.
    ///
    /// Variant rules (overdraft, rate limits) are checked first, then the date must not be before
    /// the latest admitted transaction. On error nothing is changed.
    pub fn add_transaction(
        &mut self,
        amount: Money,
        date: NaiveDate,
    ) -> Result<&Transaction, AccountErr> {
        self.kind
            .admit(self.balance, amount, date, &self.transactions)?;
        self.post_unchecked(amount, date)
    }

    /// Append without variant rules. Only the chronological order is enforced.
    ///
    /// Used for accrual postings which must never be refused for balance or rate reasons.
    fn post_unchecked(&mut self, amount: Money, date: NaiveDate) -> Result<&Transaction, AccountErr> {
        if let Some(latest_date) = self.latest_transaction_date() {
            if date < latest_date {
                return Err(AccountErr::TransactionSequence { latest_date });
            }
        }

        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountErr::AmountOutOfRange)?;

        self.balance = balance;
        self.transactions.push(Transaction::new(date, amount));
        self.transactions.last().ok_or(AccountErr::NoTransactions)
    }

    /// All transactions sorted by date, equal dates keep admission order.
    pub fn list_transactions(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by_key(|t| t.date());
        sorted
    }

    /// Credit interest and debit fees according to the account type.
    ///
    /// Both are booked on the last day of the month of the latest transaction. Interest is
    /// `balance * rate` rounded half-up to cents and is always posted, the fee only when it is
    /// above zero.
    pub fn apply_interest_and_fees(&mut self) -> Result<Accrual, AccountErr> {
        let interest = self.balance.apply_rate(self.kind.interest_rate());
        let fees = self.kind.fee(self.balance).round_cents();
        self.accrue(interest, fees)
    }

    pub(crate) fn accrue(&mut self, interest: Money, fees: Money) -> Result<Accrual, AccountErr> {
        let latest_date = self
            .latest_transaction_date()
            .ok_or(AccountErr::NoTransactions)?;
        if let Some(applied_on) = self.latest_interest_date {
            if applied_on >= latest_date {
                return Err(AccountErr::TransactionSequence { latest_date });
            }
        }
        let month_end = month_end(latest_date)?;

        // a refused posting must not leave the interest half applied
        let snapshot_len = self.transactions.len();
        let snapshot_balance = self.balance;
        let posted = self.post_accrual(interest, fees, month_end);
        if let Err(e) = posted {
            self.transactions.truncate(snapshot_len);
            self.balance = snapshot_balance;
            return Err(e);
        }

        self.latest_interest_date = Some(month_end);
        Ok(Accrual {
            interest: Posting {
                applied: true,
                amount: interest,
            },
            fees: Posting {
                applied: fees > Money::ZERO,
                amount: -fees,
            },
            date: month_end,
        })
    }

    fn post_accrual(
        &mut self,
        interest: Money,
        fees: Money,
        month_end: NaiveDate,
    ) -> Result<(), AccountErr> {
        self.post_unchecked(interest, month_end)?;
        if fees > Money::ZERO {
            self.post_unchecked(-fees, month_end)?;
        }
        Ok(())
    }
}

impl Account {
    /// number unique within the owning bank
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// checking or savings
    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// sum of all transaction amounts
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// month end interest and fees were last applied for
    pub fn latest_interest_date(&self) -> Option<NaiveDate> {
        self.latest_interest_date
    }

    /// transactions in admission order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// date of the most recent transaction, `None` for an empty account
    pub fn latest_transaction_date(&self) -> Option<NaiveDate> {
        self.transactions.iter().map(Transaction::date).max()
    }
}

/// `Checking#000000001,\tbalance: $50.00`
impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#}#{:09},\tbalance: {}",
            self.kind, self.number, self.balance
        )
    }
}

fn month_end(date: NaiveDate) -> Result<NaiveDate, AccountErr> {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next_first| next_first.pred_opt())
        .ok_or(AccountErr::DateOutOfRange(date))
}

#[cfg(test)]
fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
