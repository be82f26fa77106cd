use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wsmonarch_core::DateRange;
use wsmonarch_finance::MissingSignPolicy;

mod config;
mod convert;
mod rules_cmd;
mod state;

use convert::{ConvertArgs, run_convert};

#[derive(Parser, Debug)]
#[command(name = "wsmonarch", version, about = "Convert Wealthsimple exports to Monarch Money CSV")]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert activity and balance JSON dumps into Monarch import CSVs
    Convert {
        /// Activity feed JSON (array of activities)
        #[arg(long)]
        activities: Option<PathBuf>,

        /// Historical financials JSON (array of daily balances)
        #[arg(long)]
        balances: Option<PathBuf>,

        /// Account label written to the Account column
        #[arg(long)]
        account: String,

        /// Account number used in output file names (default: the label)
        #[arg(long)]
        account_number: Option<String>,

        /// Reverse the activity feed (the API lists newest first)
        #[arg(long)]
        oldest_first: bool,

        /// Keep records dated on or after this day (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Keep records dated on or before this day (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Category rules file (overrides config)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// assume-positive | reject (overrides config)
        #[arg(long)]
        missing_sign: Option<MissingSignPolicy>,
    },

    /// Inspect category rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Manage ~/.wsmonarch/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Print rules in evaluation order
    Show {
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Show which category a transaction would get
    Test {
        #[arg(long = "type")]
        kind: String,

        #[arg(long)]
        subtype: Option<String>,

        /// Raw description, provider prefixes included
        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config()?;

    match cli.command {
        Command::Convert {
            activities,
            balances,
            account,
            account_number,
            oldest_first,
            start_date,
            end_date,
            rules,
            output,
            missing_sign,
        } => {
            run_convert(&ConvertArgs {
                activities,
                balances,
                account,
                account_number,
                oldest_first,
                dates: DateRange::new(start_date, end_date),
                rules: cfg.rules_path(rules)?,
                output: output.unwrap_or_else(|| cfg.output.dir.clone()),
                missing_sign: missing_sign.unwrap_or(cfg.amounts.missing_sign),
            })?;
        }

        Command::Rules { command } => match command {
            RulesCommand::Show { rules } => {
                rules_cmd::show_rules(&cfg.rules_path(rules)?)?;
            }
            RulesCommand::Test {
                kind,
                subtype,
                description,
                rules,
            } => {
                rules_cmd::test_rules(
                    &cfg.rules_path(rules)?,
                    &kind,
                    subtype.as_deref(),
                    description.as_deref(),
                )?;
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("{}", s.trim_end());
            }
        },
    }

    Ok(())
}
