use std::io::{Result, Write};

use crate::application::{AccountView, ReportView};
use crate::domain::{format_amount, Product, Transaction};

pub fn write_account<W: Write>(out: &mut W, view: &AccountView) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "[{} ACCOUNT]", view.kind.as_str().to_uppercase())?;
    writeln!(out, "Account No : {}", view.account_number)?;
    writeln!(out, "Owner      : {}", view.owner_name)?;

    match &view.product {
        Product::Savings(terms) => {
            writeln!(out, "Balance    : {}", format_amount(view.balance))?;
            writeln!(
                out,
                "Min Bal    : {} | Interest: {}%",
                format_amount(terms.min_balance),
                terms.interest_rate
            )?;
        }
        Product::Current(terms) => {
            writeln!(
                out,
                "Balance    : {} | Overdraft: {}",
                format_amount(view.balance),
                format_amount(terms.overdraft_limit)
            )?;
        }
        Product::Salary(terms) => {
            writeln!(out, "Balance    : {}", format_amount(view.balance))?;
            writeln!(
                out,
                "Employer   : {} | Limit: {}",
                terms.employer_name,
                format_amount(terms.salary_limit)
            )?;
        }
        Product::Loan(terms) => {
            writeln!(out, "Outstanding: {}", format_amount(-view.balance))?;
            writeln!(
                out,
                "Interest   : {}% | EMI: {} | Due: {}",
                terms.interest_rate,
                format_amount(terms.emi),
                terms.due_date
            )?;
        }
    }
    Ok(())
}

pub fn write_transactions<W: Write>(out: &mut W, transactions: &[Transaction]) -> Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions.");
    }

    writeln!(
        out,
        "{:<20} {:<9} {:<7} {:<17} {:>12}",
        "TIMESTAMP", "KIND", "CHANNEL", "OUTCOME", "AMOUNT"
    )?;
    writeln!(out, "{}", "-".repeat(69))?;
    for tx in transactions {
        writeln!(
            out,
            "{:<20} {:<9} {:<7} {:<17} {:>12}",
            tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
            tx.kind.as_str(),
            tx.channel.as_str(),
            tx.outcome.as_str(),
            format_amount(tx.amount)
        )?;
    }
    Ok(())
}

pub fn write_account_list<W: Write>(out: &mut W, accounts: &[AccountView]) -> Result<()> {
    if accounts.is_empty() {
        return writeln!(out, "No accounts found.");
    }

    writeln!(
        out,
        "{:<10} {:<8} {:<24} {:>14} {:>6}",
        "NUMBER", "TYPE", "OWNER", "BALANCE", "TXNS"
    )?;
    writeln!(out, "{}", "-".repeat(66))?;
    for view in accounts {
        writeln!(
            out,
            "{:<10} {:<8} {:<24} {:>14} {:>6}",
            view.account_number,
            view.kind.as_str(),
            truncate(&view.owner_name, 24),
            format_amount(view.balance),
            view.transaction_count()
        )?;
    }
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, report: &ReportView) -> Result<()> {
    writeln!(out, "--- END OF DAY REPORT ---")?;
    writeln!(
        out,
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;

    for view in &report.accounts {
        write_account(out, view)?;
        writeln!(out, "Transactions:")?;
        write_transactions(out, &view.transactions)?;
        writeln!(out, "{}", "-".repeat(26))?;
    }

    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "=== SUMMARY ===")?;
    writeln!(out, "Total Accounts: {}", summary.total_accounts)?;
    writeln!(out, "Total Balance: {}", format_amount(summary.total_balance))?;
    writeln!(out, "Total Transactions: {}", summary.total_transactions)?;
    writeln!(out, "Failed Transactions: {}", summary.failed_transactions)?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
