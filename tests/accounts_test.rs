mod common;

use anyhow::Result;
use common::{StandardAccounts, current, loan, salary, savings, test_service};
use rust_decimal_macros::dec;
use tellerbook::application::AppError;
use tellerbook::domain::{AccountKind, Product};

#[test]
fn test_create_each_kind() -> Result<()> {
    let mut service = test_service();
    StandardAccounts::create(&mut service)?;

    assert_eq!(service.account_count(), 4);

    let savings = service.get_account(StandardAccounts::SAVINGS).unwrap();
    assert_eq!(savings.kind, AccountKind::Savings);
    assert_eq!(savings.owner_name, "Asha");
    assert_eq!(savings.balance, dec!(1000));
    assert!(savings.transactions.is_empty());

    let loan = service.get_account(StandardAccounts::LOAN).unwrap();
    assert_eq!(loan.kind, AccountKind::Loan);
    assert_eq!(loan.balance, dec!(-10000));
    match loan.product {
        Product::Loan(terms) => {
            assert_eq!(terms.loan_amount, dec!(10000));
            assert_eq!(terms.emi, dec!(2500));
        }
        other => panic!("expected loan terms, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_duplicate_account_number_rejected() -> Result<()> {
    let mut service = test_service();
    service.create_account(7, "First", savings(dec!(100)))?;

    let err = service
        .create_account(7, "Second", current(dec!(0), dec!(500)))
        .unwrap_err();
    assert_eq!(err, AppError::AccountAlreadyExists(7));

    // The original account is untouched.
    let account = service.get_account(7).unwrap();
    assert_eq!(account.owner_name, "First");
    assert_eq!(account.kind, AccountKind::Savings);
    Ok(())
}

#[test]
fn test_delete_then_lookup() -> Result<()> {
    let mut service = test_service();
    StandardAccounts::create(&mut service)?;

    service.delete_account(StandardAccounts::CURRENT)?;

    assert!(service.get_account(StandardAccounts::CURRENT).is_none());
    assert_eq!(
        service.deposit(StandardAccounts::CURRENT, dec!(10)).unwrap_err(),
        AppError::AccountNotFound(StandardAccounts::CURRENT)
    );
    assert_eq!(
        service.delete_account(StandardAccounts::CURRENT).unwrap_err(),
        AppError::AccountNotFound(StandardAccounts::CURRENT)
    );
    assert_eq!(service.account_count(), 3);
    Ok(())
}

#[test]
fn test_deleted_number_can_be_reused() -> Result<()> {
    let mut service = test_service();
    service.create_account(9, "Old", savings(dec!(500)))?;
    service.deposit(9, dec!(100))?;
    service.delete_account(9)?;

    let view = service.create_account(9, "New", salary(dec!(0)))?;
    assert_eq!(view.owner_name, "New");
    assert!(view.transactions.is_empty());
    Ok(())
}

#[test]
fn test_list_accounts_in_creation_order() -> Result<()> {
    let mut service = test_service();
    service.create_account(30, "C", savings(dec!(0)))?;
    service.create_account(10, "A", loan(dec!(100)))?;
    service.create_account(20, "B", salary(dec!(0)))?;

    let numbers: Vec<_> = service
        .list_accounts()
        .iter()
        .map(|a| a.account_number)
        .collect();
    assert_eq!(numbers, vec![30, 10, 20]);
    Ok(())
}

#[test]
fn test_get_account_is_a_snapshot() -> Result<()> {
    let mut service = test_service();
    StandardAccounts::create(&mut service)?;

    let before = service.get_account(StandardAccounts::SAVINGS).unwrap();
    service.deposit(StandardAccounts::SAVINGS, dec!(1))?;

    assert_eq!(before.balance, dec!(1000));
    assert_eq!(before.transaction_count(), 0);
    Ok(())
}
