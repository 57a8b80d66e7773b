//! csv input/output format and functions

use chrono::NaiveDate;
use csv_async::{AsyncWriterBuilder, Terminator};
use serde::{Deserialize, Serialize};

use crate::{
    account::{Account, AccountKind},
    money::Money,
    AccountNumber,
};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::Sender,
};
use tokio_stream::{Stream, StreamExt};

/// Transaction to be added to an account, one csv row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawTransaction {
    pub account: AccountNumber,
    pub date: NaiveDate,
    pub amount: Money,
}

/// take a reader and continuously deserialize item from it into `sender`
pub async fn deserialize_transactions_from_csv_reader<'r, R: AsyncRead + Unpin + Send + 'r>(
    input: R,
    sender: Sender<RawTransaction>,
) -> anyhow::Result<()> {
    let mut builder = csv_async::AsyncReaderBuilder::new();
    builder.trim(csv_async::Trim::All);

    let mut rdr = builder.create_deserializer(input);

    let _headers = rdr.headers().await?;

    let mut records = rdr.deserialize::<RawTransaction>();
    while let Some(record) = records.next().await {
        let record: RawTransaction = record?;
        sender.send(record).await?;
    }

    Ok(())
}

/// summary of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccountSummary {
    pub account: AccountNumber,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub balance: Money,
}

impl From<&Account> for AccountSummary {
    fn from(oth: &Account) -> Self {
        Self {
            account: oth.number(),
            kind: oth.kind(),
            balance: oth.balance().round_cents(),
        }
    }
}

/// read accounts from `in_stream` and save them as [`AccountSummary`] into `wr`. Headers will be
/// included automatically. Terminator is `\r\n`.
pub async fn summarize_accounts<'a>(
    in_stream: impl Stream<Item = &'a Account> + Unpin,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut in_stream = in_stream;

    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    while let Some(acc) = in_stream.next().await {
        wr.serialize(AccountSummary::from(acc)).await?;
    }

    wr.flush().await?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct TransactionRow {
    date: NaiveDate,
    amount: Money,
}

/// write every transaction of `account` sorted by date as `date,amount` rows into `wr`
pub async fn export_transactions(
    account: &Account,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    for t in account.list_transactions() {
        let row = TransactionRow {
            date: t.date(),
            amount: t.amount(),
        };
        wr.serialize(row).await?;
    }

    wr.flush().await?;
    Ok(())
}
