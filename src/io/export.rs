use anyhow::Result;
use std::io::Write;

use crate::application::{BankService, ReportView};

/// Exporter for writing bank data to CSV or JSON
pub struct Exporter<'a> {
    service: &'a BankService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BankService) -> Self {
        Self { service }
    }

    /// Export every ledger entry of every account to CSV format.
    /// Rows follow account creation order, then ledger order.
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record([
            "id",
            "account_number",
            "timestamp",
            "kind",
            "channel",
            "outcome",
            "amount",
        ])?;

        let mut count = 0;
        for account in self.service.list_accounts() {
            for tx in &account.transactions {
                csv_writer.write_record(&[
                    tx.id.to_string(),
                    tx.account_number.to_string(),
                    tx.timestamp.to_rfc3339(),
                    tx.kind.as_str().to_string(),
                    tx.channel.as_str().to_string(),
                    tx.outcome.as_str().to_string(),
                    tx.amount.to_string(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the end-of-day report as pretty JSON.
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<ReportView> {
        let report = self.service.generate_report();

        let json = serde_json::to_string_pretty(&report)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(report)
    }
}
