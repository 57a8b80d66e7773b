//! Registry of accounts
use crate::{
    account::{Account, AccountKind},
    errors::BankErr,
    AccountNumber,
};

/// Owns every account. Accounts are only ever added, numbered `1..=n` in opening order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bank {
    accounts: Vec<Account>,
}

impl Bank {
    /// Create bank without accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a bank from stored accounts. Numbers must be `1..=n` in the given order.
    pub fn restore(accounts: Vec<Account>) -> Result<Self, BankErr> {
        let sequential = accounts
            .iter()
            .zip(1..)
            .all(|(acc, expected)| acc.number() == expected);
        if !sequential {
            return Err(BankErr::InvalidNumbering);
        }
        Ok(Self { accounts })
    }

    /// Open account of type named by `account_type` (`checking` or `savings`).
    ///
    /// Unknown types are refused and no account is created.
    pub fn open_account(&mut self, account_type: &str) -> Result<AccountNumber, BankErr> {
        let kind = account_type.parse()?;
        Ok(self.open(kind))
    }

    /// Open account of given kind and return its number
    pub fn open(&mut self, kind: AccountKind) -> AccountNumber {
        let number = self.next_number();
        self.accounts.push(Account::new(number, kind));
        number
    }

    /// Find account by number
    pub fn select_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.number() == number)
    }

    /// Find account by number for modification
    pub fn select_account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|acc| acc.number() == number)
    }

    /// Accounts in opening order
    pub fn list_accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// One line per account, e.g. `Savings#000000002,\tbalance: $10.00`
    pub fn summary(&self) -> impl Iterator<Item = String> + '_ {
        self.accounts.iter().map(ToString::to_string)
    }

    fn next_number(&self) -> AccountNumber {
        // accounts are never removed, so the count is the highest number in use
        self.accounts.len() as AccountNumber + 1
    }
}
