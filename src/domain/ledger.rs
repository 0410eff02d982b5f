use serde::{Deserialize, Serialize};

use super::Transaction;

/// Append-only record of one account's transactions, oldest first.
/// Entries are never edited or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. The caller guarantees it belongs to the owning account.
    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    /// All entries in chronological (insertion) order.
    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    /// Number of entries recording a rejected attempt.
    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|t| !t.is_success())
            .count()
    }
}
