//! # bank-ledger
//! Keeps checking and savings accounts in a json file and applies monthly interest and fees.
//!
//! ## Usage
//! - `bank-ledger` interactive menu on stdin/stdout
//! - `bank-ledger import <file.csv>` add transactions from csv with columns `account`, `date`,
//!   `amount`
//! - `bank-ledger summary` print `account,type,balance` csv of all accounts
//!
//! The data file and log file are set with `BANK_LEDGER_DATA` and `BANK_LEDGER_LOG`.

#![deny(missing_docs)]

use anyhow::Context;
use bank_ledger::{
    cli::{BankCli, UNEXPECTED_ERROR},
    config::Config,
    csv::{self, RawTransaction},
    logging,
    store::{JsonStore, Store},
};
use futures::StreamExt;
use std::{env, process::ExitCode};
use tokio::{
    io::{stdin, stdout, BufReader},
    spawn,
    sync::mpsc::{channel, Sender},
};
use tokio_stream::wrappers::ReceiverStream;

async fn read_trans_from_file(
    filename: String,
    sender: Sender<RawTransaction>,
) -> anyhow::Result<()> {
    let f = tokio::fs::File::open(filename)
        .await
        .context("access input file")?;

    let bf = BufReader::new(f);
    csv::deserialize_transactions_from_csv_reader(bf, sender)
        .await
        .context("improper content of file")
}

async fn import(config: &Config, filename: String) -> anyhow::Result<()> {
    let mut store = JsonStore::new(&config.data_file);
    let mut bank = store
        .load()
        .context("failed to load bank")?
        .unwrap_or_default();

    let (tx_raw_trans, rx_raw_trans) = channel(8192);
    let task_read_csv = spawn(read_trans_from_file(filename, tx_raw_trans));

    let (mut admitted, mut rejected) = (0usize, 0usize);
    let mut rows = ReceiverStream::new(rx_raw_trans);
    while let Some(raw) = rows.next().await {
        let outcome = match bank.select_account_mut(raw.account) {
            Some(acc) => acc
                .add_transaction(raw.amount, raw.date)
                .map(|_| ())
                .map_err(anyhow::Error::from),
            None => Err(anyhow::anyhow!("no account {}", raw.account)),
        };
        match outcome {
            Ok(()) => {
                admitted += 1;
                tracing::debug!("Created transaction: {}, {}", raw.account, raw.amount);
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(account = raw.account, date = %raw.date, amount = %raw.amount, "rejected: {e}");
            }
        }
    }
    task_read_csv.await??;

    store.commit(&bank).context("failed to save bank")?;
    tracing::debug!("Saved to {}", store.location());
    println!("{admitted} transactions added, {rejected} rejected");
    Ok(())
}

async fn summary(config: &Config) -> anyhow::Result<()> {
    let bank = JsonStore::new(&config.data_file)
        .load()
        .context("failed to load bank")?
        .unwrap_or_default();
    csv::summarize_accounts(tokio_stream::iter(bank.list_accounts()), stdout())
        .await
        .context("failed to save output")
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let store = JsonStore::new(&config.data_file);
    let mut cli = BankCli::new(store, BufReader::new(stdin()), stdout())?;
    cli.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    logging::init_tracing(&config);

    // CLI handle
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => interactive(&config).await,
        ["import", file] => import(&config, file.to_string()).await,
        ["summary"] => summary(&config).await,
        _ => {
            eprintln!("usage: bank-ledger [import <file.csv> | summary]");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            println!("{UNEXPECTED_ERROR}");
            ExitCode::FAILURE
        }
    }
}
