use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    percent_of, AccountNumber, Amount, Channel, Outcome, Transaction, TransactionKind,
    TransactionLedger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Current,
    Salary,
    Loan,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Current => "current",
            AccountKind::Salary => "salary",
            AccountKind::Loan => "loan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "savings" => Some(AccountKind::Savings),
            "current" => Some(AccountKind::Current),
            "salary" => Some(AccountKind::Salary),
            "loan" => Some(AccountKind::Loan),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTerms {
    pub min_balance: Amount,
    /// Percentage, e.g. 5.5 for 5.5%
    pub interest_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTerms {
    pub overdraft_limit: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryTerms {
    pub employer_name: String,
    pub salary_limit: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_amount: Amount,
    pub interest_rate: Decimal,
    pub emi: Amount,
    pub due_date: String,
}

/// Variant-specific terms of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
    Savings(SavingsTerms),
    Current(CurrentTerms),
    Salary(SalaryTerms),
    Loan(LoanTerms),
}

impl Product {
    pub fn kind(&self) -> AccountKind {
        match self {
            Product::Savings(_) => AccountKind::Savings,
            Product::Current(_) => AccountKind::Current,
            Product::Salary(_) => AccountKind::Salary,
            Product::Loan(_) => AccountKind::Loan,
        }
    }
}

/// Parameters for opening an account of a given kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountOpening {
    Savings {
        opening_balance: Amount,
        terms: SavingsTerms,
    },
    Current {
        opening_balance: Amount,
        terms: CurrentTerms,
    },
    Salary {
        opening_balance: Amount,
        terms: SalaryTerms,
    },
    /// Loans open with the whole loan amount outstanding.
    Loan { terms: LoanTerms },
}

impl AccountOpening {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountOpening::Savings { .. } => AccountKind::Savings,
            AccountOpening::Current { .. } => AccountKind::Current,
            AccountOpening::Salary { .. } => AccountKind::Salary,
            AccountOpening::Loan { .. } => AccountKind::Loan,
        }
    }

    fn into_parts(self) -> (Amount, Product) {
        match self {
            AccountOpening::Savings {
                opening_balance,
                terms,
            } => (opening_balance, Product::Savings(terms)),
            AccountOpening::Current {
                opening_balance,
                terms,
            } => (opening_balance, Product::Current(terms)),
            AccountOpening::Salary {
                opening_balance,
                terms,
            } => (opening_balance, Product::Salary(terms)),
            AccountOpening::Loan { terms } => (-terms.loan_amount, Product::Loan(terms)),
        }
    }
}

/// A bank account. The balance only changes through the operations below,
/// and every change is paired with exactly one ledger entry.
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    owner_name: String,
    balance: Amount,
    product: Product,
    ledger: TransactionLedger,
    opened_at: DateTime<Utc>,
}

impl Account {
    pub fn open(number: AccountNumber, owner_name: impl Into<String>, opening: AccountOpening) -> Self {
        let (balance, product) = opening.into_parts();
        Self {
            number,
            owner_name: owner_name.into(),
            balance,
            product,
            ledger: TransactionLedger::new(),
            opened_at: Utc::now(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn kind(&self) -> AccountKind {
        self.product.kind()
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Outstanding debt on a loan account (zero or less once fully repaid).
    pub fn outstanding(&self) -> Amount {
        -self.balance
    }

    /// Add money to the account.
    pub fn deposit(&mut self, amount: Amount) -> Result<&Transaction, AccountError> {
        ensure_positive(amount)?;
        self.balance = self.balance.checked_add(amount).ok_or(AccountError::Overflow {
            balance: self.balance,
            operation: "deposit",
        })?;
        Ok(self.record(amount, TransactionKind::Deposit, Channel::Manual, Outcome::Success))
    }

    /// Take money out of the account.
    ///
    /// Savings and salary accounts cannot go below zero. Current accounts may
    /// draw down to `-overdraft_limit`. Loans do not support withdrawals.
    /// A rejected withdrawal leaves the balance untouched but is still recorded.
    pub fn withdraw(&mut self, amount: Amount) -> Result<&Transaction, AccountError> {
        let available = match &self.product {
            Product::Savings(_) | Product::Salary(_) => self.balance,
            Product::Current(terms) => self.balance.saturating_add(terms.overdraft_limit),
            Product::Loan(_) => {
                return Err(AccountError::UnsupportedOperation {
                    kind: AccountKind::Loan,
                    operation: "withdraw",
                });
            }
        };
        ensure_positive(amount)?;

        if available >= amount {
            self.balance = self.balance.checked_sub(amount).ok_or(AccountError::Overflow {
                balance: self.balance,
                operation: "withdraw",
            })?;
            return Ok(self.record(
                amount,
                TransactionKind::Withdraw,
                Channel::Manual,
                Outcome::Success,
            ));
        }

        match &self.product {
            Product::Current(terms) => {
                let overdraft_limit = terms.overdraft_limit;
                self.record(
                    amount,
                    TransactionKind::Withdraw,
                    Channel::Manual,
                    Outcome::FailedOverdraft,
                );
                Err(AccountError::OverdraftExceeded {
                    balance: self.balance,
                    overdraft_limit,
                    requested: amount,
                })
            }
            _ => {
                self.record(amount, TransactionKind::Withdraw, Channel::Manual, Outcome::Failed);
                Err(AccountError::InsufficientBalance {
                    balance: self.balance,
                    requested: amount,
                })
            }
        }
    }

    /// Apply one period of interest and return the computed interest.
    ///
    /// Savings interest is credited through the deposit rule, so a zero
    /// interest amount changes nothing and records nothing. Loan interest is
    /// charged on the outstanding debt and always recorded.
    pub fn apply_interest(&mut self) -> Result<Amount, AccountError> {
        match &self.product {
            Product::Savings(terms) => {
                let interest = percent_of(self.balance, terms.interest_rate).ok_or(
                    AccountError::Overflow {
                        balance: self.balance,
                        operation: "apply interest",
                    },
                )?;
                match self.deposit(interest) {
                    Ok(_) | Err(AccountError::InvalidAmount(_)) => Ok(interest),
                    Err(e) => Err(e),
                }
            }
            Product::Loan(terms) => {
                let overflow = AccountError::Overflow {
                    balance: self.balance,
                    operation: "apply interest",
                };
                let interest =
                    percent_of(self.outstanding(), terms.interest_rate).ok_or(overflow.clone())?;
                self.balance = self.balance.checked_sub(interest).ok_or(overflow)?;
                self.record(
                    interest,
                    TransactionKind::Interest,
                    Channel::System,
                    Outcome::Success,
                );
                Ok(interest)
            }
            other => Err(AccountError::WrongVariant {
                actual: other.kind(),
                operation: "apply interest",
            }),
        }
    }

    /// Pay an EMI instalment toward a loan. Overpaying past zero is allowed.
    pub fn pay_emi(&mut self, amount: Amount) -> Result<&Transaction, AccountError> {
        if !matches!(self.product, Product::Loan(_)) {
            return Err(AccountError::WrongVariant {
                actual: self.kind(),
                operation: "pay EMI",
            });
        }
        ensure_positive(amount)?;

        self.balance = self.balance.checked_add(amount).ok_or(AccountError::Overflow {
            balance: self.balance,
            operation: "pay EMI",
        })?;
        Ok(self.record(amount, TransactionKind::Emi, Channel::Manual, Outcome::Success))
    }

    fn record(
        &mut self,
        amount: Amount,
        kind: TransactionKind,
        channel: Channel,
        outcome: Outcome,
    ) -> &Transaction {
        self.ledger
            .append(Transaction::new(self.number, amount, kind, channel, outcome));
        // Just appended, so the ledger is non-empty.
        &self.ledger.all()[self.ledger.count() - 1]
    }
}

fn ensure_positive(amount: Amount) -> Result<(), AccountError> {
    if amount <= Decimal::ZERO {
        return Err(AccountError::InvalidAmount(amount));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Amount was zero or negative; nothing is recorded.
    InvalidAmount(Amount),
    InsufficientBalance {
        balance: Amount,
        requested: Amount,
    },
    OverdraftExceeded {
        balance: Amount,
        overdraft_limit: Amount,
        requested: Amount,
    },
    WrongVariant {
        actual: AccountKind,
        operation: &'static str,
    },
    UnsupportedOperation {
        kind: AccountKind,
        operation: &'static str,
    },
    /// The new balance would not fit in an [`Amount`]; nothing is recorded.
    Overflow {
        balance: Amount,
        operation: &'static str,
    },
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::InvalidAmount(amount) => {
                write!(f, "Invalid amount {}: must be positive", amount)
            }
            AccountError::InsufficientBalance { balance, requested } => write!(
                f,
                "Insufficient balance: balance {}, requested {}",
                balance, requested
            ),
            AccountError::OverdraftExceeded {
                balance,
                overdraft_limit,
                requested,
            } => write!(
                f,
                "Overdraft limit exceeded: balance {}, overdraft limit {}, requested {}",
                balance, overdraft_limit, requested
            ),
            AccountError::WrongVariant { actual, operation } => {
                write!(f, "Cannot {} on a {} account", operation, actual)
            }
            AccountError::UnsupportedOperation { kind, operation } => {
                write!(f, "{} is not supported on {} accounts", operation, kind)
            }
            AccountError::Overflow { balance, operation } => {
                write!(f, "Cannot {}: balance {} would overflow", operation, balance)
            }
        }
    }
}

impl std::error::Error for AccountError {}
