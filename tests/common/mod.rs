// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use rust_decimal_macros::dec;
use tellerbook::application::BankService;
use tellerbook::config::ProductDefaults;
use tellerbook::domain::{AccountNumber, AccountOpening, Amount};

/// Helper to create an empty bank
pub fn test_service() -> BankService {
    BankService::new()
}

pub fn savings(opening_balance: Amount) -> AccountOpening {
    AccountOpening::Savings {
        opening_balance,
        terms: ProductDefaults::default().savings_terms(),
    }
}

pub fn current(opening_balance: Amount, overdraft_limit: Amount) -> AccountOpening {
    let mut terms = ProductDefaults::default().current_terms();
    terms.overdraft_limit = overdraft_limit;
    AccountOpening::Current {
        opening_balance,
        terms,
    }
}

pub fn salary(opening_balance: Amount) -> AccountOpening {
    AccountOpening::Salary {
        opening_balance,
        terms: ProductDefaults::default().salary_terms(),
    }
}

pub fn loan(loan_amount: Amount) -> AccountOpening {
    AccountOpening::Loan {
        terms: ProductDefaults::default().loan_terms(loan_amount),
    }
}

/// Test fixture: one account of each kind
pub struct StandardAccounts;

impl StandardAccounts {
    pub const SAVINGS: AccountNumber = 1;
    pub const CURRENT: AccountNumber = 2;
    pub const LOAN: AccountNumber = 3;
    pub const SALARY: AccountNumber = 4;

    /// Savings 1000, current 0 with 10000 overdraft, loan of 10000, salary 2000
    pub fn create(service: &mut BankService) -> Result<()> {
        service.create_account(Self::SAVINGS, "Asha", savings(dec!(1000)))?;
        service.create_account(Self::CURRENT, "Ravi", current(dec!(0), dec!(10000)))?;
        service.create_account(Self::LOAN, "Kiran", loan(dec!(10000)))?;
        service.create_account(Self::SALARY, "Meera", salary(dec!(2000)))?;
        Ok(())
    }
}
