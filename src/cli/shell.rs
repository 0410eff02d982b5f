use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::application::BankService;
use crate::config::ProductDefaults;
use crate::domain::{
    format_amount, parse_amount, AccountKind, AccountNumber, AccountOpening, Amount, Product,
};
use crate::io::Exporter;

use super::display;

/// One line of shell input.
#[derive(Parser)]
#[command(name = "bank", no_binary_name = true)]
#[command(disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Open a new account
    Create(CreateArgs),

    /// Deposit money into an account
    Deposit {
        number: AccountNumber,
        /// Amount (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        number: AccountNumber,
        /// Amount (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show account details and transactions
    Show { number: AccountNumber },

    /// List all accounts
    List,

    /// Delete an account and its ledger
    Delete { number: AccountNumber },

    /// Apply interest to a savings or loan account
    Interest { number: AccountNumber },

    /// Pay an EMI on a loan account
    Emi {
        number: AccountNumber,
        /// Amount to pay (defaults to the loan's EMI)
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Print the end-of-day report
    Report {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export data: transactions (CSV) or report (JSON)
    Export {
        export_type: String,

        /// Output file (printed if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the session
    #[command(alias = "quit")]
    Exit,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Account type: savings, current, salary, loan
    pub account_type: String,

    /// Account number (must be unique)
    pub number: AccountNumber,

    /// Owner name (quote names with spaces)
    pub owner: String,

    /// Opening balance, or the loan amount for loan accounts
    #[arg(short, long, default_value = "0")]
    pub amount: String,

    /// Interest rate in percent (savings, loan)
    #[arg(long)]
    pub rate: Option<String>,

    /// Minimum balance (savings)
    #[arg(long)]
    pub min_balance: Option<String>,

    /// Overdraft limit (current)
    #[arg(long)]
    pub overdraft: Option<String>,

    /// Employer name (salary)
    #[arg(long)]
    pub employer: Option<String>,

    /// Salary limit (salary)
    #[arg(long)]
    pub limit: Option<String>,

    /// Monthly instalment (loan)
    #[arg(long)]
    pub emi: Option<String>,

    /// Due date description (loan)
    #[arg(long)]
    pub due: Option<String>,
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellStats {
    pub commands: usize,
    pub errors: usize,
}

/// Line-oriented front end over a [`BankService`].
pub struct Shell {
    service: BankService,
    defaults: ProductDefaults,
    prompt: Option<String>,
    echo: bool,
}

impl Shell {
    pub fn new(service: BankService, defaults: ProductDefaults) -> Self {
        Self {
            service,
            defaults,
            prompt: None,
            echo: false,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Echo each command before its output (for scripts).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn service(&self) -> &BankService {
        &self.service
    }

    /// Read and execute lines until `exit` or end of input.
    /// Command failures are printed and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<ShellStats> {
        let mut stats = ShellStats::default();
        let mut lines = input.lines();

        loop {
            if let Some(prompt) = &self.prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if self.echo {
                writeln!(out, "> {}", trimmed)?;
            }
            stats.commands += 1;
            match self.execute_line(trimmed, &mut out) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    stats.errors += 1;
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
        }

        Ok(stats)
    }

    /// Parse and execute a single command line.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let tokens = tokenize(line)?;
        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(e) if !e.use_stderr() => {
                // help output
                write!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
            Err(e) => bail!("{}", e.to_string().trim_end()),
        };
        self.execute(parsed.command, out)
    }

    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<Flow> {
        match command {
            ShellCommand::Create(args) => {
                let opening = self.opening_from_args(&args)?;
                let view = self
                    .service
                    .create_account(args.number, args.owner, opening)?;
                writeln!(
                    out,
                    "Account created: {} {} ({}), balance {}",
                    view.kind,
                    view.account_number,
                    view.owner_name,
                    format_amount(view.balance)
                )?;
            }

            ShellCommand::Deposit { number, amount } => {
                let amount = parse_money(&amount)?;
                self.service.deposit(number, amount)?;
                self.print_balance(number, "Deposited", amount, out)?;
            }

            ShellCommand::Withdraw { number, amount } => {
                let amount = parse_money(&amount)?;
                self.service.withdraw(number, amount)?;
                self.print_balance(number, "Withdrew", amount, out)?;
            }

            ShellCommand::Show { number } => {
                let view = self
                    .service
                    .get_account(number)
                    .with_context(|| format!("Account not found: {}", number))?;
                display::write_account(out, &view)?;
                writeln!(out, "Transactions:")?;
                display::write_transactions(out, &view.transactions)?;
            }

            ShellCommand::List => {
                display::write_account_list(out, &self.service.list_accounts())?;
            }

            ShellCommand::Delete { number } => {
                self.service.delete_account(number)?;
                writeln!(out, "Account {} deleted", number)?;
            }

            ShellCommand::Interest { number } => {
                let interest = self.service.apply_interest(number)?;
                self.print_balance(number, "Interest applied:", interest, out)?;
            }

            ShellCommand::Emi { number, amount } => {
                let amount = match amount {
                    Some(amount) => parse_money(&amount)?,
                    None => self.scheduled_emi(number)?,
                };
                self.service.pay_emi(number, amount)?;
                self.print_balance(number, "EMI paid:", amount, out)?;
            }

            ShellCommand::Report { format } => {
                let report = self.service.generate_report();
                match format.as_str() {
                    "table" => display::write_report(out, &report)?,
                    "json" => {
                        serde_json::to_writer_pretty(&mut *out, &report)?;
                        writeln!(out)?;
                    }
                    other => bail!("Invalid report format '{}'. Valid formats: table, json", other),
                }
            }

            ShellCommand::Export {
                export_type,
                output,
            } => self.export(&export_type, output, out)?,

            ShellCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn export<W: Write>(
        &self,
        export_type: &str,
        output: Option<PathBuf>,
        out: &mut W,
    ) -> Result<()> {
        let exporter = Exporter::new(&self.service);
        let mut file = match &output {
            Some(path) => Some(
                File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            ),
            None => None,
        };
        let writer: &mut dyn Write = match file.as_mut() {
            Some(file) => file,
            None => &mut *out,
        };

        let summary = match export_type {
            "transactions" => {
                let count = exporter.export_transactions_csv(writer)?;
                format!("Exported {} transactions", count)
            }
            "report" => {
                let report = exporter.export_report_json(writer)?;
                format!("Exported report for {} accounts", report.summary.total_accounts)
            }
            _ => bail!(
                "Invalid export type '{}'. Valid types: transactions, report",
                export_type
            ),
        };

        if let Some(path) = output {
            writeln!(out, "{} to {}", summary, path.display())?;
        }
        Ok(())
    }

    fn opening_from_args(&self, args: &CreateArgs) -> Result<AccountOpening> {
        let kind = AccountKind::from_str(&args.account_type).with_context(|| {
            format!(
                "Invalid account type '{}'. Valid types: savings, current, salary, loan",
                args.account_type
            )
        })?;
        let amount = parse_money(&args.amount)?;
        let defaults = &self.defaults;

        let opening = match kind {
            AccountKind::Savings => {
                let mut terms = defaults.savings_terms();
                terms.min_balance = parse_or(&args.min_balance, terms.min_balance)?;
                terms.interest_rate = parse_or(&args.rate, terms.interest_rate)?;
                AccountOpening::Savings {
                    opening_balance: amount,
                    terms,
                }
            }
            AccountKind::Current => {
                let mut terms = defaults.current_terms();
                terms.overdraft_limit = parse_or(&args.overdraft, terms.overdraft_limit)?;
                AccountOpening::Current {
                    opening_balance: amount,
                    terms,
                }
            }
            AccountKind::Salary => {
                let mut terms = defaults.salary_terms();
                if let Some(employer) = &args.employer {
                    terms.employer_name = employer.clone();
                }
                terms.salary_limit = parse_or(&args.limit, terms.salary_limit)?;
                AccountOpening::Salary {
                    opening_balance: amount,
                    terms,
                }
            }
            AccountKind::Loan => {
                let mut terms = defaults.loan_terms(amount);
                terms.interest_rate = parse_or(&args.rate, terms.interest_rate)?;
                terms.emi = parse_or(&args.emi, terms.emi)?;
                if let Some(due) = &args.due {
                    terms.due_date = due.clone();
                }
                AccountOpening::Loan { terms }
            }
        };
        Ok(opening)
    }

    fn scheduled_emi(&self, number: AccountNumber) -> Result<Amount> {
        let view = self
            .service
            .get_account(number)
            .with_context(|| format!("Account not found: {}", number))?;
        match view.product {
            Product::Loan(terms) => Ok(terms.emi),
            _ => bail!("Account {} is a {} account; cannot pay EMI", number, view.kind),
        }
    }

    fn print_balance<W: Write>(
        &self,
        number: AccountNumber,
        action: &str,
        amount: Amount,
        out: &mut W,
    ) -> Result<()> {
        let balance = self
            .service
            .get_account(number)
            .map(|view| format_amount(view.balance))
            .unwrap_or_default();
        writeln!(
            out,
            "{} {} (account {}, balance {})",
            action,
            format_amount(amount),
            number,
            balance
        )?;
        Ok(())
    }
}

fn parse_money(input: &str) -> Result<Amount> {
    parse_amount(input).with_context(|| format!("Invalid amount '{}'. Use '50.00' or '50'", input))
}

fn parse_or(input: &Option<String>, default: Amount) -> Result<Amount> {
    match input {
        Some(value) => parse_money(value),
        None => Ok(default),
    }
}

/// Split a command line into words. Double quotes group words containing spaces.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote in: {}", line);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
