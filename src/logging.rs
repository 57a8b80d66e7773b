//! Tracing setup for the binary
use std::{fs::OpenOptions, sync::Mutex, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "bank_ledger=debug";

/// Install the global subscriber writing to the configured log file. Later calls do nothing.
///
/// `RUST_LOG` takes precedence over the default `bank_ledger=debug` filter. If the log file can
/// not be opened logs go to stderr.
pub fn init_tracing(config: &Config) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file);

        let builder = fmt().with_env_filter(filter).with_ansi(false);
        let installed = match file {
            Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
            Err(_) => builder.with_writer(std::io::stderr).try_init(),
        };
        if installed.is_ok() {
            tracing::debug!(log_file = %config.log_file.display(), "tracing initialized");
        }
    });
}

#[cfg(test)]
mod test {
    use crate::config::Config;

    #[test]
    fn init_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: dir.path().join("bank.json"),
            log_file: dir.path().join("bank.log"),
        };
        super::init_tracing(&config);
        super::init_tracing(&config);
    }
}
