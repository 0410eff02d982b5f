mod common;

use anyhow::Result;
use common::{StandardAccounts, test_service};
use rust_decimal_macros::dec;
use tellerbook::application::ReportView;
use tellerbook::io::Exporter;
use tempfile::TempDir;

#[test]
fn test_export_transactions_csv() -> Result<()> {
    let mut service = test_service();
    StandardAccounts::create(&mut service)?;
    service.deposit(StandardAccounts::SAVINGS, dec!(500))?;
    let _ = service.withdraw(StandardAccounts::SAVINGS, dec!(5000));
    service.apply_interest(StandardAccounts::LOAN)?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&service).export_transactions_csv(&mut buffer)?;
    assert_eq!(count, 3);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "id",
            "account_number",
            "timestamp",
            "kind",
            "channel",
            "outcome",
            "amount"
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "1");
    assert_eq!(&rows[0][3], "deposit");
    assert_eq!(&rows[0][6], "500");
    assert_eq!(&rows[1][5], "failed");
    assert_eq!(&rows[2][1], "3");
    assert_eq!(&rows[2][3], "interest");
    assert_eq!(&rows[2][4], "system");
    Ok(())
}

#[test]
fn test_export_empty_bank() -> Result<()> {
    let service = test_service();
    let mut buffer = Vec::new();
    let count = Exporter::new(&service).export_transactions_csv(&mut buffer)?;

    assert_eq!(count, 0);
    assert_eq!(
        String::from_utf8(buffer)?.trim(),
        "id,account_number,timestamp,kind,channel,outcome,amount"
    );
    Ok(())
}

#[test]
fn test_export_report_json_to_file() -> Result<()> {
    let mut service = test_service();
    StandardAccounts::create(&mut service)?;
    service.pay_emi(StandardAccounts::LOAN, dec!(2500))?;

    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("report.json");
    let file = std::fs::File::create(&path)?;
    let exported = Exporter::new(&service).export_report_json(file)?;

    let content = std::fs::read_to_string(&path)?;
    let parsed: ReportView = serde_json::from_str(&content)?;

    assert_eq!(parsed.summary, exported.summary);
    assert_eq!(parsed.summary.total_accounts, 4);
    assert_eq!(parsed.summary.total_transactions, 1);
    assert_eq!(parsed.accounts[2].balance, dec!(-7500));
    Ok(())
}
