mod display;
mod shell;

use std::fs::File;
use std::io::{stdin, stdout, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::BankService;
use crate::config::BankConfig;

pub use shell::{tokenize, Flow, Shell, ShellCommand, ShellStats};

/// Tellerbook - in-memory bank account ledger
#[derive(Parser)]
#[command(name = "tellerbook")]
#[command(about = "An in-memory bank ledger with savings, current, salary and loan accounts")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Execute commands from a script file, one per line
    Run {
        /// Script file path
        script: PathBuf,

        /// Print the end-of-day report after the script finishes
        #[arg(long)]
        report: bool,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<BankConfig> {
        BankConfig::load_or_default(self.config.as_deref())
    }

    pub fn run(self, config: BankConfig) -> Result<()> {
        let service = BankService::new();

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => {
                let mut shell = Shell::new(service, config.defaults).with_prompt("bank> ");
                println!("Type 'help' for commands, 'exit' to quit.");
                shell.run(stdin().lock(), stdout().lock())?;
            }

            Commands::Run { script, report } => {
                let file = File::open(&script)
                    .with_context(|| format!("Failed to open script: {}", script.display()))?;
                let mut shell = Shell::new(service, config.defaults).with_echo(true);
                let mut out = stdout().lock();
                let stats = shell.run(BufReader::new(file), &mut out)?;

                if report {
                    shell.execute_line("report", &mut out)?;
                }
                eprintln!(
                    "Executed {} command(s), {} failed",
                    stats.commands, stats.errors
                );
            }
        }

        Ok(())
    }
}
