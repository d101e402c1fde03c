use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets};
use evm_core::{ElectionResult, Outcome};

use crate::config::Config;
use crate::voters::OutputFormat;

#[derive(Args, Debug)]
#[command(about = "Print the end-of-voting report")]
pub struct ResultsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: ResultsArgs, config: &Config) -> Result<()> {
    let db = config.open_database()?;
    let result = ElectionResult::from_parties(db.parties()?);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Human => print_human(&result),
    }
    Ok(())
}

fn print_human(result: &ElectionResult) {
    if !result.standings.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                ["Party", "Votes", "Share"].map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
            );
        for standing in &result.standings {
            table.add_row(vec![
                Cell::new(&standing.party.name),
                Cell::new(standing.party.votes).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}%", standing.percentage))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{table}");
        println!("Total votes: {}", result.total_votes);
        println!();
    }

    match &result.outcome {
        Outcome::NoParties => println!("{}", "No parties registered".yellow()),
        Outcome::Tie { parties } => {
            println!("{}", "There is a tie between:".yellow().bold());
            println!("{}", parties.join(" and "));
        }
        Outcome::Winner { party, majority } => {
            println!("{} {}", "Winner:".green().bold(), party.bold());
            if *majority {
                println!("Majority achieved");
            } else {
                println!("No majority achieved");
            }
        }
    }
}
