use thiserror::Error;

use crate::domain::{Account, AccountNumber};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Account not found: {0}")]
    NotFound(AccountNumber),

    #[error("Account already exists: {0}")]
    Duplicate(AccountNumber),
}

/// In-memory store of accounts keyed by account number.
/// Iteration follows insertion order so reports are deterministic.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new account. Fails if the number is already taken.
    pub fn insert(&mut self, account: Account) -> Result<&Account, RegistryError> {
        if self.contains(account.number()) {
            return Err(RegistryError::Duplicate(account.number()));
        }
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.position(number).is_some()
    }

    pub fn lookup(&self, number: AccountNumber) -> Result<&Account, RegistryError> {
        self.accounts
            .iter()
            .find(|a| a.number() == number)
            .ok_or(RegistryError::NotFound(number))
    }

    pub fn lookup_mut(&mut self, number: AccountNumber) -> Result<&mut Account, RegistryError> {
        self.accounts
            .iter_mut()
            .find(|a| a.number() == number)
            .ok_or(RegistryError::NotFound(number))
    }

    /// Remove an account, handing it back to the caller.
    pub fn remove(&mut self, number: AccountNumber) -> Result<Account, RegistryError> {
        let index = self
            .position(number)
            .ok_or(RegistryError::NotFound(number))?;
        Ok(self.accounts.remove(index))
    }

    /// All accounts in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn position(&self, number: AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|a| a.number() == number)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{AccountOpening, CurrentTerms};

    fn account(number: AccountNumber) -> Account {
        Account::open(
            number,
            format!("Owner {}", number),
            AccountOpening::Current {
                opening_balance: dec!(0),
                terms: CurrentTerms {
                    overdraft_limit: dec!(100),
                },
            },
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = AccountRegistry::new();
        registry.insert(account(10)).unwrap();

        assert_eq!(registry.lookup(10).unwrap().owner_name(), "Owner 10");
        assert_eq!(registry.lookup(11).unwrap_err(), RegistryError::NotFound(11));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = AccountRegistry::new();
        registry.insert(account(10)).unwrap();

        let err = registry.insert(account(10)).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate(10));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut registry = AccountRegistry::new();
        registry.insert(account(1)).unwrap();
        registry.insert(account(2)).unwrap();

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.number(), 1);
        assert!(!registry.contains(1));
        assert_eq!(registry.remove(1).unwrap_err(), RegistryError::NotFound(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_all_in_insertion_order() {
        let mut registry = AccountRegistry::new();
        for number in [30, 10, 20] {
            registry.insert(account(number)).unwrap();
        }
        registry.remove(10).unwrap();
        registry.insert(account(5)).unwrap();

        let numbers: Vec<_> = registry.all().map(|a| a.number()).collect();
        assert_eq!(numbers, vec![30, 20, 5]);
    }

    #[test]
    fn test_number_can_be_reused_after_remove() {
        let mut registry = AccountRegistry::new();
        registry.insert(account(7)).unwrap();
        registry.remove(7).unwrap();
        assert!(registry.insert(account(7)).is_ok());
    }
}
