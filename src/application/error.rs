use thiserror::Error;

use crate::domain::{AccountError, AccountKind, AccountNumber, Amount};
use crate::storage::RegistryError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(AccountNumber),

    #[error("Invalid amount {amount} for account {account}: must be positive")]
    InvalidAmount {
        account: AccountNumber,
        amount: Amount,
    },

    #[error("Insufficient balance in account {account}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        account: AccountNumber,
        balance: Amount,
        requested: Amount,
    },

    #[error(
        "Overdraft limit exceeded on account {account}: balance {balance}, limit {overdraft_limit}, requested {requested}"
    )]
    OverdraftExceeded {
        account: AccountNumber,
        balance: Amount,
        overdraft_limit: Amount,
        requested: Amount,
    },

    #[error("Account {account} is a {actual} account; cannot {operation}")]
    WrongVariant {
        account: AccountNumber,
        actual: AccountKind,
        operation: &'static str,
    },

    #[error("Cannot {operation} on {kind} account {account}")]
    UnsupportedOperation {
        account: AccountNumber,
        kind: AccountKind,
        operation: &'static str,
    },

    #[error("Cannot {operation} on account {account}: balance {balance} would overflow")]
    Overflow {
        account: AccountNumber,
        balance: Amount,
        operation: &'static str,
    },
}

impl AppError {
    /// Attach the account number to an error raised by the account itself.
    pub fn from_account(account: AccountNumber, err: AccountError) -> Self {
        match err {
            AccountError::InvalidAmount(amount) => AppError::InvalidAmount { account, amount },
            AccountError::InsufficientBalance { balance, requested } => {
                AppError::InsufficientBalance {
                    account,
                    balance,
                    requested,
                }
            }
            AccountError::OverdraftExceeded {
                balance,
                overdraft_limit,
                requested,
            } => AppError::OverdraftExceeded {
                account,
                balance,
                overdraft_limit,
                requested,
            },
            AccountError::WrongVariant { actual, operation } => AppError::WrongVariant {
                account,
                actual,
                operation,
            },
            AccountError::UnsupportedOperation { kind, operation } => {
                AppError::UnsupportedOperation {
                    account,
                    kind,
                    operation,
                }
            }
            AccountError::Overflow { balance, operation } => AppError::Overflow {
                account,
                balance,
                operation,
            },
        }
    }

    /// True for rejections that were still recorded in the account's ledger.
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            AppError::InsufficientBalance { .. } | AppError::OverdraftExceeded { .. }
        )
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(number) => AppError::AccountNotFound(number),
            RegistryError::Duplicate(number) => AppError::AccountAlreadyExists(number),
        }
    }
}
