use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Config;

#[derive(Args, Debug)]
#[command(about = "Zero every tally and has-voted flag")]
pub struct ResetArgs {}

pub fn execute(_args: ResetArgs, config: &Config) -> Result<()> {
    let mut db = config.open_database()?;
    let report = db.reset_votes()?;

    println!("{} Reset complete", "✓".green());
    println!("  parties: {} tallies zeroed", report.parties);
    println!("  voters:  {} has-voted flags cleared", report.voters);
    Ok(())
}
