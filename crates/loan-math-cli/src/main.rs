mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::loan::{LoanArgs, SavingsArgs};

/// Loan payments and "what if you saved instead" comparisons
#[derive(Parser)]
#[command(
    name = "loanmath",
    version,
    about = "Loan payments and savings comparisons",
    long_about = "Computes the fixed monthly payment of an amortized loan, compares it \
                  against half and double the term, and projects what saving the same \
                  payment at 2%, 4% and 6% would have produced instead."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment breakdown, term comparisons and savings alternatives
    Analyze(LoanArgs),
    /// Monthly payment, total payment and total interest
    Payment(LoanArgs),
    /// Compare half and double the loan term
    Compare(LoanArgs),
    /// Save the loan payment at 2%, 4% and 6% instead of borrowing
    Savings(SavingsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Savings(args) => commands::loan::run_savings(args),
        Commands::Version => {
            println!("loanmath {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
