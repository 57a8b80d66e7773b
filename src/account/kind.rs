//! Account variants and the rules each of them applies.
use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{checking, savings, Transaction};
use crate::{
    errors::{AccountErr, BankErr},
    money::Money,
};

/// Type of account, fixed when the account is opened
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl AccountKind {
    /// Fraction of the balance paid as interest on each accrual
    pub fn interest_rate(self) -> Decimal {
        match self {
            AccountKind::Checking => checking::interest_rate(),
            AccountKind::Savings => savings::interest_rate(),
        }
    }

    /// Fee charged on accrual for the given balance. Zero means no fee.
    pub fn fee(self, balance: Money) -> Money {
        match self {
            AccountKind::Checking => checking::fee(balance),
            AccountKind::Savings => savings::fee(balance),
        }
    }

    /// Variant specific checks run before the chronological check.
    pub(super) fn admit(
        self,
        balance: Money,
        amount: Money,
        date: NaiveDate,
        existing: &[Transaction],
    ) -> Result<(), AccountErr> {
        match self {
            AccountKind::Checking => checking::admit(balance, amount, date, existing),
            AccountKind::Savings => savings::admit(balance, amount, date, existing),
        }
    }

    fn label(self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
        }
    }
}

pub(super) fn check_overdraw(balance: Money, amount: Money) -> Result<(), AccountErr> {
    let after = balance
        .checked_add(amount)
        .ok_or(AccountErr::AmountOutOfRange)?;
    if after < Money::ZERO {
        Err(AccountErr::Overdraw)
    } else {
        Ok(())
    }
}

impl FromStr for AccountKind {
    type Err = BankErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            _ => Err(BankErr::InvalidAccountType(s.to_owned())),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(self.label())
        } else {
            f.write_str(&self.label().to_ascii_lowercase())
        }
    }
}

#[cfg(test)]
mod test {
    use super::AccountKind;
    use crate::errors::BankErr;

    #[test]
    fn parse_kind() {
        assert_eq!("checking".parse(), Ok(AccountKind::Checking));
        assert_eq!(" Savings\n".parse(), Ok(AccountKind::Savings));
        assert_eq!(
            "saving".parse::<AccountKind>(),
            Err(BankErr::InvalidAccountType("saving".to_owned()))
        );
    }

    #[test]
    fn display_kind() {
        assert_eq!(AccountKind::Savings.to_string(), "savings");
        assert_eq!(format!("{:#}", AccountKind::Checking), "Checking");
    }
}
