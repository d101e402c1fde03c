use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use evm_db::sample_parties;
use inquire::Confirm;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PartiesArgs {
    #[command(subcommand)]
    command: PartiesCommand,
}

#[derive(Subcommand, Debug)]
enum PartiesCommand {
    /// Create the parties table and insert Party 1..3
    Populate,

    /// Drop the parties table and every tally in it
    Drop {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

pub fn execute(args: PartiesArgs, config: &Config) -> Result<()> {
    let mut db = config.open_database()?;

    match args.command {
        PartiesCommand::Populate => {
            let sample = sample_parties();
            let inserted = db.populate_parties(&sample)?;
            println!(
                "{} Inserted {inserted} parties ({} already present)",
                "✓".green(),
                sample.len() - inserted
            );
        }
        PartiesCommand::Drop { yes } => {
            if !yes
                && !Confirm::new("Drop the parties table and all vote tallies?")
                    .with_default(false)
                    .prompt()
                    .unwrap_or(false)
            {
                println!("Aborted");
                return Ok(());
            }
            db.drop_parties_table()?;
            println!("{} Dropped the parties table", "✓".green());
        }
    }
    Ok(())
}
