pub mod commands;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "freightdesk",
    about = "Freightdesk operator CLI",
    long_about = "Inspect Freightdesk configuration, check runtime readiness, and dry-run negotiation decisions.",
    after_help = "Examples:\n  freightdesk doctor --json\n  freightdesk config\n  freightdesk negotiate --listed-rate 2100 --offer 1900 --round 2"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and load catalog readability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Evaluate one negotiation turn against the default margin policy")]
    Negotiate {
        #[arg(long, help = "Posted loadboard rate in USD")]
        listed_rate: Decimal,
        #[arg(long, help = "Carrier's offered rate in USD")]
        offer: Decimal,
        #[arg(long, default_value_t = 1, help = "Negotiation round, starting at 1")]
        round: u32,
        #[arg(long, default_value = "cli", help = "Load identifier echoed in the output")]
        load_id: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Negotiate { listed_rate, offer, round, load_id } => {
            commands::negotiate::run(commands::negotiate::NegotiateArgs {
                listed_rate,
                offer,
                round,
                load_id,
            })
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
