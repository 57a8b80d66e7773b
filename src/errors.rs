//! Possible errors

use chrono::NaiveDate;
use thiserror::Error;

/// Group all errors that can occur when admitting a transaction or accruing interest.
///
/// Whenever one of these is returned the account is left exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountErr {
    /// Balance would drop below zero
    #[error("account has insufficient funds")]
    Overdraw,
    /// Transaction dated before the latest admitted one, or interest already applied for the
    /// period ending on `latest_date`
    #[error("transactions must be dated {latest_date} or later")]
    TransactionSequence {
        /// date of the conflicting transaction
        latest_date: NaiveDate,
    },
    /// Savings account transaction rate limit reached
    #[error("transaction limit reached (month: {month_violated}, day: {day_violated})")]
    TransactionLimit {
        /// monthly limit was reached
        month_violated: bool,
        /// daily limit was reached
        day_violated: bool,
    },
    /// Resulting balance does not fit in the decimal range
    #[error("balance would be out of the supported range")]
    AmountOutOfRange,
    /// Interest and fees can not be accrued on an account without transactions
    #[error("no transactions to accrue against")]
    NoTransactions,
    /// Month end of the latest transaction is not representable
    #[error("month end of {0} is out of the supported date range")]
    DateOutOfRange(NaiveDate),
}

/// Group errors returned by [`crate::bank::Bank`]
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankErr {
    #[error("invalid account type `{0}`")]
    InvalidAccountType(String),
    #[error("account numbers must be unique and sequential starting from 1")]
    InvalidNumbering,
    #[error("account data is inconsistent")]
    Account(#[from] AccountErr),
}

/// Group errors returned by persistence backends
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum StoreErr {
    #[error("storage i/o failed")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid json")]
    Json(#[from] serde_json::Error),
    #[error("stored bank could not be rebuilt")]
    Bank(#[from] BankErr),
}
