use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use evm_core::Voter;
use evm_db::{NewVoter, sample_voters};
use inquire::{Confirm, Text};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct VoterArgs {
    #[command(subcommand)]
    command: VoterCommand,
}

#[derive(Subcommand, Debug)]
enum VoterCommand {
    /// Add one voter; prompts for any field not given
    Add(AddArgs),
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Voter id, unique across the roll
    #[arg(long)]
    id: Option<String>,

    /// Full name
    #[arg(long)]
    name: Option<String>,

    /// URL of the voter's photograph
    #[arg(long, value_name = "URL")]
    image_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct VotersArgs {
    #[command(subcommand)]
    command: VotersCommand,
}

#[derive(Subcommand, Debug)]
enum VotersCommand {
    /// Print every voter, ordered by id
    Print {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Delete every voter
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Insert the sample voter roll; ids already present are left alone
    Populate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

pub fn execute_voter(args: VoterArgs, config: &Config) -> Result<()> {
    match args.command {
        VoterCommand::Add(args) => add(args, config),
    }
}

pub fn execute(args: VotersArgs, config: &Config) -> Result<()> {
    match args.command {
        VotersCommand::Print { format } => print(format, config),
        VotersCommand::Clear { yes } => clear(yes, config),
        VotersCommand::Populate => populate(config),
    }
}

fn prompt_if_missing(value: Option<String>, message: &str) -> Result<String> {
    let value = match value {
        Some(value) => value,
        None => Text::new(message).prompt()?,
    };
    Ok(value.trim().to_string())
}

fn add(args: AddArgs, config: &Config) -> Result<()> {
    let id = prompt_if_missing(args.id, "Voter ID:")?;
    if id.is_empty() {
        bail!("Voter ID must not be empty");
    }
    let name = prompt_if_missing(args.name, "Voter name:")?;
    if name.is_empty() {
        bail!("Voter name must not be empty");
    }
    let image_url = prompt_if_missing(args.image_url, "Photo URL:")?;

    let mut db = config.open_database()?;
    db.add_voter(&NewVoter::new(id.as_str(), name.as_str(), image_url))
        .with_context(|| format!("Failed to add voter {id}"))?;

    println!("{} Added voter {} ({})", "✓".green(), id.bold(), name);
    Ok(())
}

fn print(format: OutputFormat, config: &Config) -> Result<()> {
    let db = config.open_database()?;
    let voters = db.all_voters()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&voters)?),
        OutputFormat::Human => print_table(&voters),
    }
    Ok(())
}

fn print_table(voters: &[Voter]) {
    if voters.is_empty() {
        println!("No voters registered");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["ID", "Name", "Has Voted", "Photo"]
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

    for voter in voters {
        let voted = if voter.has_voted {
            Cell::new(voter.voted_label()).fg(Color::Green)
        } else {
            Cell::new(voter.voted_label())
        };
        table.add_row(vec![
            Cell::new(&voter.id),
            Cell::new(&voter.name),
            voted,
            Cell::new(&voter.image_url),
        ]);
    }

    println!("{table}");
    let voted = voters.iter().filter(|v| v.has_voted).count();
    println!("{} voters, {} voted", voters.len(), voted);
}

fn clear(yes: bool, config: &Config) -> Result<()> {
    let mut db = config.open_database()?;

    if !yes {
        let count = db.all_voters()?.len();
        let confirmed = Confirm::new(&format!("Delete all {count} voters?"))
            .with_default(false)
            .prompt()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let deleted = db.delete_all_voters()?;
    println!("{} Deleted {deleted} voters", "✓".green());
    Ok(())
}

fn populate(config: &Config) -> Result<()> {
    let mut db = config.open_database()?;
    let sample = sample_voters();
    let inserted = db.populate_voters(&sample)?;

    println!(
        "{} Inserted {inserted} sample voters ({} already present)",
        "✓".green(),
        sample.len() - inserted
    );
    Ok(())
}
