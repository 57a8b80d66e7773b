//! Menu driven interactive front end
use anyhow::Context;
use chrono::NaiveDate;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::{
    account::{Account, DAILY_LIMIT, MONTHLY_LIMIT},
    bank::Bank,
    errors::AccountErr,
    money::Money,
    store::Store,
    AccountNumber,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message shown when the front end stops on an unexpected error
pub const UNEXPECTED_ERROR: &str =
    "Sorry! Something unexpected happened. Check the logs or contact the developer for assistance.";

/// Input ended while the menu was waiting for it
#[derive(Debug, Error)]
#[error("input closed")]
struct InputClosed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    OpenAccount,
    Summary,
    SelectAccount,
    AddTransaction,
    ListTransactions,
    InterestAndFees,
    Quit,
}

impl Command {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Command::OpenAccount),
            "2" => Some(Command::Summary),
            "3" => Some(Command::SelectAccount),
            "4" => Some(Command::AddTransaction),
            "5" => Some(Command::ListTransactions),
            "6" => Some(Command::InterestAndFees),
            "7" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Interactive session over a bank loaded from `S`, reading commands from `R` and writing
/// prompts and results to `W`.
pub struct BankCli<S, R, W> {
    bank: Bank,
    store: S,
    selected: Option<AccountNumber>,
    input: Lines<R>,
    output: W,
}

impl<S, R, W> BankCli<S, R, W>
where
    S: Store,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Load the bank from `store`, creating and committing an empty one if there is none yet.
    pub fn new(mut store: S, input: R, output: W) -> anyhow::Result<Self> {
        let bank = match store.load().context("failed to load bank")? {
            Some(bank) => {
                tracing::debug!("Loaded from {}", store.location());
                bank
            }
            None => {
                let bank = Bank::new();
                store.commit(&bank).context("failed to save new bank")?;
                tracing::debug!("Saved to {}", store.location());
                bank
            }
        };

        Ok(Self {
            bank,
            store,
            selected: None,
            input: input.lines(),
            output,
        })
    }

    /// current state of the bank
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Show the menu and run commands until quit or end of input.
    ///
    /// Returned errors are unexpected ones (e.g. storage failures). Any change that could not
    /// be committed has already been rolled back.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let step = self.step().await;
            match step {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if e.downcast_ref::<InputClosed>().is_some() => break,
                Err(e) => return Err(e),
            }
        }
        self.output.flush().await?;
        Ok(())
    }

    async fn step(&mut self) -> anyhow::Result<bool> {
        self.display_menu().await?;
        let choice = self.read_line().await?;
        match Command::parse(&choice) {
            Some(Command::OpenAccount) => self.open_account().await?,
            Some(Command::Summary) => self.summary().await?,
            Some(Command::SelectAccount) => self.select_account().await?,
            Some(Command::AddTransaction) => self.add_transaction().await?,
            Some(Command::ListTransactions) => self.list_transactions().await?,
            Some(Command::InterestAndFees) => self.interest_and_fees().await?,
            Some(Command::Quit) => return Ok(false),
            None => {
                self.say(&format!("{} is not a valid choice", choice.trim()))
                    .await?
            }
        }
        Ok(true)
    }

    async fn display_menu(&mut self) -> anyhow::Result<()> {
        let selected = match self.selected_account() {
            Some(acc) => acc.to_string(),
            None => "None".to_owned(),
        };
        let menu = format!(
            "--------------------------------\n\
             Currently selected account: {selected}\n\
             Enter command\n\
             1: open account\n\
             2: summary\n\
             3: select account\n\
             4: add transaction\n\
             5: list transactions\n\
             6: interest and fees\n\
             7: quit\n\
             >"
        );
        self.write(&menu).await
    }

    async fn open_account(&mut self) -> anyhow::Result<()> {
        let account_type = self.prompt("Type of account? (checking/savings)\n>").await?;
        let snapshot = self.bank.clone();
        match self.bank.open_account(&account_type) {
            Ok(number) => {
                self.commit(snapshot)?;
                tracing::debug!("Created account: {number}");
            }
            Err(_) => {
                self.say(&format!("Invalid account type {}", account_type.trim()))
                    .await?
            }
        }
        Ok(())
    }

    async fn summary(&mut self) -> anyhow::Result<()> {
        let lines: Vec<String> = self.bank.summary().collect();
        for line in lines {
            self.say(&line).await?;
        }
        Ok(())
    }

    async fn select_account(&mut self) -> anyhow::Result<()> {
        let raw = self.prompt("Enter account number\n>").await?;
        let found = raw
            .trim()
            .parse::<AccountNumber>()
            .ok()
            .and_then(|number| self.bank.select_account(number))
            .map(Account::number);
        match found {
            Some(number) => self.selected = Some(number),
            None => tracing::debug!("No account {}", raw.trim()),
        }
        Ok(())
    }

    async fn add_transaction(&mut self) -> anyhow::Result<()> {
        let Some(number) = self.selected else {
            return self.require_selection().await;
        };
        let amount = self.input_amount().await?;
        let date = self.input_date().await?;

        let snapshot = self.bank.clone();
        let admitted = match self.bank.select_account_mut(number) {
            Some(acc) => acc.add_transaction(amount, date).map(|_| ()),
            None => return self.require_selection().await,
        };
        match admitted {
            Ok(()) => {
                self.commit(snapshot)?;
                tracing::debug!("Created transaction: {number}, {amount}");
            }
            Err(e) => self.say(&describe_transaction_err(&e)).await?,
        }
        Ok(())
    }

    async fn list_transactions(&mut self) -> anyhow::Result<()> {
        let Some(acc) = self.selected_account() else {
            return self.require_selection().await;
        };
        let lines: Vec<String> = acc
            .list_transactions()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        for line in lines {
            self.say(&line).await?;
        }
        Ok(())
    }

    async fn interest_and_fees(&mut self) -> anyhow::Result<()> {
        let Some(number) = self.selected else {
            return self.require_selection().await;
        };

        let snapshot = self.bank.clone();
        let accrued = match self.bank.select_account_mut(number) {
            Some(acc) => acc.apply_interest_and_fees(),
            None => return self.require_selection().await,
        };
        match accrued {
            Ok(accrual) => {
                self.commit(snapshot)?;
                if accrual.interest.applied {
                    tracing::debug!("Created transaction: {number}, {}", accrual.interest.amount);
                }
                if accrual.fees.applied {
                    tracing::debug!("Created transaction: {number}, {}", accrual.fees.amount);
                }
                tracing::debug!("Triggered interest and fees");
            }
            Err(e) => self.say(&describe_accrual_err(&e)).await?,
        }
        Ok(())
    }

    async fn input_amount(&mut self) -> anyhow::Result<Money> {
        loop {
            let raw = self.prompt("Amount?\n>").await?;
            match raw.parse::<Money>() {
                Ok(amount) => return Ok(amount),
                Err(_) => {
                    self.say("Please try again with a valid dollar amount.")
                        .await?
                }
            }
        }
    }

    async fn input_date(&mut self) -> anyhow::Result<NaiveDate> {
        loop {
            let raw = self.prompt("Date? (YYYY-MM-DD)\n>").await?;
            match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => {
                    self.say("Please try again with a valid date in the format YYYY-MM-DD.")
                        .await?
                }
            }
        }
    }

    fn selected_account(&self) -> Option<&Account> {
        self.selected
            .and_then(|number| self.bank.select_account(number))
    }

    async fn require_selection(&mut self) -> anyhow::Result<()> {
        self.say("This command requires that you first select an account.")
            .await
    }

    /// Commit the bank, putting `snapshot` back if that fails.
    fn commit(&mut self, snapshot: Bank) -> anyhow::Result<()> {
        if let Err(e) = self.store.commit(&self.bank) {
            self.bank = snapshot;
            return Err(e).with_context(|| format!("failed to save to {}", self.store.location()));
        }
        tracing::debug!("Saved to {}", self.store.location());
        Ok(())
    }

    async fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        self.write(text).await?;
        self.read_line().await
    }

    async fn read_line(&mut self) -> anyhow::Result<String> {
        match self.input.next_line().await? {
            Some(line) => Ok(line),
            None => Err(InputClosed.into()),
        }
    }

    async fn say(&mut self, line: &str) -> anyhow::Result<()> {
        self.write(line).await?;
        self.write("\n").await
    }

    async fn write(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

fn describe_transaction_err(e: &AccountErr) -> String {
    match e {
        AccountErr::Overdraw => {
            "This transaction could not be completed due to an insufficient account balance."
                .to_owned()
        }
        AccountErr::TransactionLimit {
            month_violated: true,
            ..
        } => format!("This transaction could not be completed because this account already has {MONTHLY_LIMIT} transactions in this month."),
        AccountErr::TransactionLimit { .. } => format!("This transaction could not be completed because this account already has {DAILY_LIMIT} transactions in this day."),
        AccountErr::AmountOutOfRange => {
            "This transaction could not be completed because the amount is too large.".to_owned()
        }
        AccountErr::TransactionSequence { latest_date } => format!(
            "New transactions must be from {} onward.",
            latest_date.format(DATE_FORMAT)
        ),
        other => other.to_string(),
    }
}

fn describe_accrual_err(e: &AccountErr) -> String {
    match e {
        AccountErr::TransactionSequence { latest_date } => format!(
            "Cannot apply interest and fees again in the month of {}.",
            latest_date.format("%B")
        ),
        AccountErr::NoTransactions => {
            "This account has no transactions to apply interest and fees against.".to_owned()
        }
        other => other.to_string(),
    }
}
