//! Storage shapes of the domain types.
//!
//! Kept apart from [`crate::account`] so the ledger rules never depend on how data is stored.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    account::{Account, AccountKind, Transaction},
    bank::Bank,
    errors::BankErr,
    money::Money,
    AccountNumber,
};

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    pub accounts: Vec<AccountRecord>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub number: AccountNumber,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_interest_date: Option<NaiveDate>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: Money,
}

impl From<&Transaction> for TransactionRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date(),
            amount: t.amount(),
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(acc: &Account) -> Self {
        Self {
            number: acc.number(),
            kind: acc.kind(),
            latest_interest_date: acc.latest_interest_date(),
            transactions: acc.transactions().iter().map(Into::into).collect(),
        }
    }
}

impl From<&Bank> for BankRecord {
    fn from(bank: &Bank) -> Self {
        Self {
            accounts: bank.list_accounts().iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<AccountRecord> for Account {
    type Error = BankErr;
    fn try_from(rec: AccountRecord) -> Result<Self, Self::Error> {
        let history = rec.transactions.into_iter().map(|t| (t.date, t.amount));
        Ok(Account::restore(
            rec.number,
            rec.kind,
            rec.latest_interest_date,
            history,
        )?)
    }
}

impl TryFrom<BankRecord> for Bank {
    type Error = BankErr;
    fn try_from(rec: BankRecord) -> Result<Self, Self::Error> {
        let accounts = rec
            .accounts
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Bank::restore(accounts)
    }
}

#[cfg(test)]
mod test {
    use super::{AccountRecord, BankRecord, TransactionRecord};
    use crate::{account::AccountKind, bank::Bank, errors::{AccountErr, BankErr}, money::Money};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn json_shape() -> anyhow::Result<()> {
        let json = r#"{"accounts":[{"number":1,"type":"savings","latest_interest_date":"2024-01-31","transactions":[{"date":"2024-01-02","amount":"10.00"},{"date":"2024-01-31","amount":"0.04"}]}]}"#;
        let rec: BankRecord = serde_json::from_str(json)?;
        assert_eq!(
            rec.accounts[0].transactions[1],
            TransactionRecord {
                date: ymd(2024, 1, 31),
                amount: Money::new(4, 2)
            }
        );

        let bank = Bank::try_from(rec)?;
        let acc = bank.select_account(1).unwrap();
        assert_eq!(acc.kind(), AccountKind::Savings);
        assert_eq!(acc.balance(), Money::new(1004, 2));
        assert_eq!(serde_json::to_string(&BankRecord::from(&bank))?, json);
        Ok(())
    }

    #[test]
    fn out_of_order_history_is_rejected() {
        let rec = BankRecord {
            accounts: vec![AccountRecord {
                number: 1,
                kind: AccountKind::Checking,
                latest_interest_date: None,
                transactions: vec![
                    TransactionRecord {
                        date: ymd(2024, 2, 1),
                        amount: Money::new(1, 0),
                    },
                    TransactionRecord {
                        date: ymd(2024, 1, 1),
                        amount: Money::new(1, 0),
                    },
                ],
            }],
        };
        assert_eq!(
            Bank::try_from(rec),
            Err(BankErr::Account(AccountErr::TransactionSequence {
                latest_date: ymd(2024, 2, 1)
            }))
        );
    }
}
