use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, CurrentTerms, LoanTerms, SalaryTerms, SavingsTerms};

/// Runtime configuration, read from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
    pub defaults: ProductDefaults,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            defaults: ProductDefaults::default(),
        }
    }
}

/// Terms applied to new accounts when the caller does not give them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDefaults {
    pub savings_min_balance: Amount,
    pub savings_interest_rate: Decimal,
    pub current_overdraft_limit: Amount,
    pub salary_employer_name: String,
    pub salary_limit: Amount,
    pub loan_interest_rate: Decimal,
    pub loan_emi: Amount,
    pub loan_due_date: String,
}

impl Default for ProductDefaults {
    fn default() -> Self {
        Self {
            savings_min_balance: Decimal::from(1000),
            savings_interest_rate: Decimal::new(55, 1),
            current_overdraft_limit: Decimal::from(10000),
            salary_employer_name: "Company".to_string(),
            salary_limit: Decimal::from(50000),
            loan_interest_rate: Decimal::from(10),
            loan_emi: Decimal::from(2500),
            loan_due_date: "10th Every Month".to_string(),
        }
    }
}

impl ProductDefaults {
    pub fn savings_terms(&self) -> SavingsTerms {
        SavingsTerms {
            min_balance: self.savings_min_balance,
            interest_rate: self.savings_interest_rate,
        }
    }

    pub fn current_terms(&self) -> CurrentTerms {
        CurrentTerms {
            overdraft_limit: self.current_overdraft_limit,
        }
    }

    pub fn salary_terms(&self) -> SalaryTerms {
        SalaryTerms {
            employer_name: self.salary_employer_name.clone(),
            salary_limit: self.salary_limit,
        }
    }

    pub fn loan_terms(&self, loan_amount: Amount) -> LoanTerms {
        LoanTerms {
            loan_amount,
            interest_rate: self.loan_interest_rate,
            emi: self.loan_emi,
            due_date: self.loan_due_date.clone(),
        }
    }
}

impl BankConfig {
    /// Load configuration from a TOML file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
