use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountKind, AccountNumber, Amount, Product, Transaction};

/// Read-only snapshot of an account and its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub account_number: AccountNumber,
    pub owner_name: String,
    pub kind: AccountKind,
    pub balance: Amount,
    pub product: Product,
    pub opened_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
}

impl AccountView {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.number(),
            owner_name: account.owner_name().to_string(),
            kind: account.kind(),
            balance: account.balance(),
            product: account.product().clone(),
            opened_at: account.opened_at(),
            transactions: account.ledger().all().to_vec(),
        }
    }
}

/// End-of-day report across every registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub generated_at: DateTime<Utc>,
    pub accounts: Vec<AccountView>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_accounts: usize,
    /// Sum of balances, clamped to the range of [`Amount`]
    pub total_balance: Amount,
    pub total_transactions: usize,
    /// Recorded rejections (failed and failed-overdraft withdrawals)
    pub failed_transactions: usize,
}

pub(crate) fn build_report<'a>(accounts: impl Iterator<Item = &'a Account>) -> ReportView {
    let mut summary = ReportSummary {
        total_accounts: 0,
        total_balance: Amount::ZERO,
        total_transactions: 0,
        failed_transactions: 0,
    };

    let accounts: Vec<AccountView> = accounts
        .inspect(|account| {
            summary.total_accounts += 1;
            summary.total_balance = summary.total_balance.saturating_add(account.balance());
            summary.total_transactions += account.ledger().count();
            summary.failed_transactions += account.ledger().failed_count();
        })
        .map(AccountView::from)
        .collect();

    ReportView {
        generated_at: Utc::now(),
        accounts,
        summary,
    }
}
