use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type TransactionId = Uuid;

/// Account numbers identify an account for its whole lifetime.
pub type AccountNumber = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    /// Interest accrued by the system on a loan
    Interest,
    /// Repayment instalment on a loan
    Emi,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Interest => "interest",
            TransactionKind::Emi => "emi",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who initiated the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Manual,
    System,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Manual => "manual",
            Channel::System => "system",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failed,
    FailedOverdraft,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failed => "failed",
            Outcome::FailedOverdraft => "failed_overdraft",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction records one attempt to move money on an account.
/// Rejected attempts are recorded too, with a failed outcome.
/// Transactions are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_number: AccountNumber,
    /// Always the requested magnitude; direction comes from `kind`
    pub amount: Amount,
    pub kind: TransactionKind,
    pub channel: Channel,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        account_number: AccountNumber,
        amount: Amount,
        kind: TransactionKind,
        channel: Channel,
        outcome: Outcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number,
            amount,
            kind,
            channel,
            outcome,
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

#[cfg(test)]
impl Transaction {
    /// A user-initiated transaction.
    pub(crate) fn manual(
        account_number: AccountNumber,
        amount: Amount,
        kind: TransactionKind,
        outcome: Outcome,
    ) -> Self {
        Self::new(account_number, amount, kind, Channel::Manual, outcome)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_manual_transaction() {
        let tx = Transaction::manual(7, dec!(250), TransactionKind::Deposit, Outcome::Success);

        assert_eq!(tx.account_number, 7);
        assert_eq!(tx.amount, dec!(250));
        assert_eq!(tx.channel, Channel::Manual);
        assert!(tx.is_success());
    }

    #[test]
    fn test_failed_outcomes_are_not_success() {
        assert!(!Outcome::Failed.is_success());
        assert!(!Outcome::FailedOverdraft.is_success());
    }

    #[test]
    fn test_each_transaction_gets_its_own_id() {
        let a = Transaction::manual(1, dec!(1), TransactionKind::Deposit, Outcome::Success);
        let b = Transaction::manual(1, dec!(1), TransactionKind::Deposit, Outcome::Success);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(TransactionKind::Emi.as_str(), "emi");
        assert_eq!(Channel::System.to_string(), "system");
        assert_eq!(Outcome::FailedOverdraft.to_string(), "failed_overdraft");
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::FailedOverdraft).unwrap();
        assert_eq!(json, "\"failed_overdraft\"");
    }
}
