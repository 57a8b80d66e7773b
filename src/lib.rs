//! Checking and savings account ledger with monthly interest and fees

#![deny(missing_docs)]

pub mod account;
pub mod bank;
pub mod cli;
pub mod config;
pub mod csv;
pub mod errors;
pub mod logging;
pub mod money;
pub mod store;

/// Account number, unique within a [`bank::Bank`] and starting from 1
pub type AccountNumber = u32;
