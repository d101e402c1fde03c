use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod config;
mod console;
mod logging;
mod parties;
mod ports;
mod reset;
mod results;
mod voters;

use config::Config;

#[derive(Parser)]
#[command(name = "evm")]
#[command(about = "Electronic voting machine console", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Configuration file (defaults to ~/.evm/evm.toml)
    #[arg(short = 'c', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the operator console
    #[command(alias = "r")]
    Run(console::RunArgs),

    /// Register a single voter
    Voter(voters::VoterArgs),

    /// Print, clear or populate the voter roll
    Voters(voters::VotersArgs),

    /// Create or drop the parties table
    Parties(parties::PartiesArgs),

    /// Zero every tally and has-voted flag
    Reset(reset::ResetArgs),

    /// Print the end-of-voting report
    Results(results::ResultsArgs),

    /// List serial ports the vote device may be attached to
    Ports(ports::PortsArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The console owns the terminal, so its log output goes to a file
    let log_to_file = matches!(cli.command, Commands::Run(_));
    logging::init(cli.debug, log_to_file)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => console::execute(args, &config),
        Commands::Voter(args) => voters::execute_voter(args, &config),
        Commands::Voters(args) => voters::execute(args, &config),
        Commands::Parties(args) => parties::execute(args, &config),
        Commands::Reset(args) => reset::execute(args, &config),
        Commands::Results(args) => results::execute(args, &config),
        Commands::Ports(args) => ports::execute(args),
    }
}
