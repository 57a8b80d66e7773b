//! Persistence of the bank between sessions
use crate::{bank::Bank, errors::StoreErr};

mod json;
pub mod record;

pub use json::JsonStore;

/// Durable home for a [`Bank`].
///
/// A commit either records the whole bank or fails leaving the previous commit intact.
pub trait Store {
    /// Last committed bank, `None` if nothing was committed yet
    fn load(&self) -> Result<Option<Bank>, StoreErr>;
    /// Record the current state of `bank`
    fn commit(&mut self, bank: &Bank) -> Result<(), StoreErr>;
    /// where commits go, for log messages
    fn location(&self) -> String;
}

/// Keeps the last committed bank in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Option<record::BankRecord>,
}

impl MemoryStore {
    /// Create store with nothing committed
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Bank>, StoreErr> {
        match &self.committed {
            Some(rec) => Ok(Some(rec.clone().try_into()?)),
            None => Ok(None),
        }
    }

    fn commit(&mut self, bank: &Bank) -> Result<(), StoreErr> {
        self.committed = Some(bank.into());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}

#[cfg(test)]
mod test {
    use super::{MemoryStore, Store};
    use crate::{account::AccountKind, bank::Bank, money::Money};
    use chrono::NaiveDate;

    #[test]
    fn empty_store_loads_nothing() -> anyhow::Result<()> {
        assert!(MemoryStore::new().load()?.is_none());
        Ok(())
    }

    #[test]
    fn committed_bank_is_loaded_back() -> anyhow::Result<()> {
        let mut bank = Bank::new();
        let n = bank.open(AccountKind::Checking);
        let acc = bank.select_account_mut(n).unwrap();
        acc.add_transaction(Money::new(50, 0), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())?;
        acc.apply_interest_and_fees()?;

        let mut store = MemoryStore::new();
        store.commit(&bank)?;
        assert_eq!(store.load()?, Some(bank));
        Ok(())
    }
}
