use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::{record::BankRecord, Store};
use crate::{bank::Bank, errors::StoreErr};

const TMP_SUFFIX: &str = "tmp";

/// Stores the bank as a single pretty printed json document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store backed by the file at `path`. The file is created on first commit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Option<Bank>, StoreErr> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let rec: BankRecord = serde_json::from_str(&data)?;
        let bank = Bank::try_from(rec)?;
        tracing::debug!(path = %self.path.display(), accounts = bank.list_accounts().len(), "loaded bank");
        Ok(Some(bank))
    }

    fn commit(&mut self, bank: &Bank) -> Result<(), StoreErr> {
        let json = serde_json::to_string_pretty(&BankRecord::from(bank))?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

fn write_all(path: &Path, data: &str) -> Result<(), StoreErr> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::JsonStore;
    use crate::{account::AccountKind, bank::Bank, errors::StoreErr, money::Money, store::Store};
    use chrono::NaiveDate;

    #[test]
    fn missing_file_loads_nothing() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = JsonStore::new(dir.path().join("bank.json"));
        assert!(store.load()?.is_none());
        Ok(())
    }

    #[test]
    fn commit_then_load() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = JsonStore::new(dir.path().join("nested").join("bank.json"));

        let mut bank = Bank::new();
        bank.open(AccountKind::Checking);
        let n = bank.open(AccountKind::Savings);
        bank.select_account_mut(n)
            .unwrap()
            .add_transaction(Money::new(12345, 2), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())?;

        store.commit(&bank)?;
        assert!(!dir.path().join("nested").join("bank.json.tmp").exists());
        assert_eq!(store.load()?, Some(bank.clone()));

        // a second commit replaces the first
        bank.open(AccountKind::Checking);
        store.commit(&bank)?;
        assert_eq!(store.load()?.unwrap().list_accounts().len(), 3);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bank.json");
        std::fs::write(&path, "{ not json")?;
        let store = JsonStore::new(path);
        assert!(matches!(store.load(), Err(StoreErr::Json(_))));
        Ok(())
    }
}
