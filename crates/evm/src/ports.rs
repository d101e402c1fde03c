use anyhow::Result;
use clap::Args;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};

use crate::voters::OutputFormat;

#[derive(Args, Debug)]
#[command(about = "List serial ports the vote device may be attached to")]
pub struct PortsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: PortsArgs) -> Result<()> {
    let ports = evm_device::available_ports()?;

    if let OutputFormat::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(());
    }

    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Port", "Type", "Description"].map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
    for port in &ports {
        table.add_row(vec![
            Cell::new(&port.name),
            Cell::new(&port.kind),
            Cell::new(port.description.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    Ok(())
}
