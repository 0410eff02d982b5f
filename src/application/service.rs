use tracing::{debug, info, warn};

use crate::domain::{Account, AccountNumber, AccountOpening, Amount, Transaction};
use crate::storage::AccountRegistry;

use super::reporting::build_report;
use super::{AccountView, AppError, ReportView};

/// Application service providing the bank's use cases.
/// This is the primary interface for any client (shell, script runner, tests).
#[derive(Debug, Default)]
pub struct BankService {
    registry: AccountRegistry,
}

impl BankService {
    /// Create a bank with no accounts.
    pub fn new() -> Self {
        Self {
            registry: AccountRegistry::new(),
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account. Fails if the account number is already in use.
    pub fn create_account(
        &mut self,
        number: AccountNumber,
        owner_name: impl Into<String>,
        opening: AccountOpening,
    ) -> Result<AccountView, AppError> {
        let kind = opening.kind();
        let account = self
            .registry
            .insert(Account::open(number, owner_name, opening))?;

        info!(
            account = number,
            kind = %kind,
            balance = %account.balance(),
            "account created"
        );
        Ok(AccountView::from(account))
    }

    /// Get a snapshot of an account, if it exists.
    pub fn get_account(&self, number: AccountNumber) -> Option<AccountView> {
        debug!(account = number, "account lookup");
        self.registry.lookup(number).ok().map(AccountView::from)
    }

    /// Close an account. Its ledger is discarded with it.
    pub fn delete_account(&mut self, number: AccountNumber) -> Result<(), AppError> {
        let account = self.registry.remove(number)?;
        info!(
            account = number,
            transactions = account.ledger().count(),
            "account deleted"
        );
        Ok(())
    }

    /// List snapshots of all accounts in creation order.
    pub fn list_accounts(&self) -> Vec<AccountView> {
        self.registry.all().map(AccountView::from).collect()
    }

    pub fn account_count(&self) -> usize {
        self.registry.len()
    }

    // ========================
    // Money operations
    // ========================

    /// Deposit money and return the recorded transaction.
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Amount,
    ) -> Result<Transaction, AppError> {
        let account = self.registry.lookup_mut(number)?;
        let tx = account
            .deposit(amount)
            .map_err(|e| AppError::from_account(number, e))?
            .clone();

        info!(account = number, amount = %amount, "deposit");
        Ok(tx)
    }

    /// Withdraw money and return the recorded transaction.
    /// Business-rule rejections are still recorded in the ledger before the error returns.
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Amount,
    ) -> Result<Transaction, AppError> {
        let account = self.registry.lookup_mut(number)?;
        let result = account.withdraw(amount).map(Transaction::clone);

        match result {
            Ok(tx) => {
                info!(account = number, amount = %amount, "withdrawal");
                Ok(tx)
            }
            Err(e) => {
                let err = AppError::from_account(number, e);
                if err.is_recorded() {
                    warn!(account = number, amount = %amount, error = %err, "withdrawal rejected");
                }
                Err(err)
            }
        }
    }

    /// Apply one period of interest to a savings or loan account.
    /// Returns the computed interest.
    pub fn apply_interest(&mut self, number: AccountNumber) -> Result<Amount, AppError> {
        let account = self.registry.lookup_mut(number)?;
        let kind = account.kind();
        let interest = account
            .apply_interest()
            .map_err(|e| AppError::from_account(number, e))?;

        info!(account = number, kind = %kind, interest = %interest, "interest applied");
        Ok(interest)
    }

    /// Pay an EMI instalment on a loan account.
    pub fn pay_emi(
        &mut self,
        number: AccountNumber,
        amount: Amount,
    ) -> Result<Transaction, AppError> {
        let account = self.registry.lookup_mut(number)?;
        let tx = account
            .pay_emi(amount)
            .map_err(|e| AppError::from_account(number, e))?
            .clone();

        info!(
            account = number,
            amount = %amount,
            outstanding = %account.outstanding(),
            "EMI paid"
        );
        Ok(tx)
    }

    // ========================
    // Reporting
    // ========================

    /// Build the end-of-day report. Does not modify any account.
    pub fn generate_report(&self) -> ReportView {
        let report = build_report(self.registry.all());
        debug!(
            accounts = report.summary.total_accounts,
            transactions = report.summary.total_transactions,
            "report generated"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{CurrentTerms, Outcome};

    fn current(limit: Amount) -> AccountOpening {
        AccountOpening::Current {
            opening_balance: dec!(0),
            terms: CurrentTerms {
                overdraft_limit: limit,
            },
        }
    }

    #[test]
    fn test_deposit_unknown_account() {
        let mut bank = BankService::new();
        assert_eq!(
            bank.deposit(99, dec!(10)).unwrap_err(),
            AppError::AccountNotFound(99)
        );
    }

    #[test]
    fn test_failed_withdraw_is_audited() {
        let mut bank = BankService::new();
        bank.create_account(2, "Ravi", current(dec!(100))).unwrap();

        let err = bank.withdraw(2, dec!(500)).unwrap_err();
        assert!(matches!(err, AppError::OverdraftExceeded { account: 2, .. }));
        assert!(err.is_recorded());

        let view = bank.get_account(2).unwrap();
        assert_eq!(view.balance, dec!(0));
        assert_eq!(view.transactions[0].outcome, Outcome::FailedOverdraft);
    }

    #[test]
    fn test_invalid_amount_is_not_audited() {
        let mut bank = BankService::new();
        bank.create_account(2, "Ravi", current(dec!(100))).unwrap();

        let err = bank.withdraw(2, dec!(0)).unwrap_err();
        assert!(!err.is_recorded());
        assert_eq!(bank.get_account(2).unwrap().transaction_count(), 0);
    }
}
