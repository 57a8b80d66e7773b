//! Runtime configuration of the binary
use std::path::PathBuf;

/// Environment variable naming the data file
pub const DATA_FILE_VAR: &str = "BANK_LEDGER_DATA";
/// Environment variable naming the log file
pub const LOG_FILE_VAR: &str = "BANK_LEDGER_LOG";

const DEFAULT_DATA_FILE: &str = "bank.json";
const DEFAULT_LOG_FILE: &str = "bank.log";

/// Where the bank is stored and where logs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// json file the bank is committed to
    pub data_file: PathBuf,
    /// file debug logs are appended to
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.into(),
            log_file: DEFAULT_LOG_FILE.into(),
        }
    }
}

impl Config {
    /// Defaults overridden by [`DATA_FILE_VAR`] and [`LOG_FILE_VAR`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variable names. Empty values
    /// are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let default = Self::default();
        Self {
            data_file: get(DATA_FILE_VAR).unwrap_or(default.data_file),
            log_file: get(LOG_FILE_VAR).unwrap_or(default.log_file),
        }
    }
}
