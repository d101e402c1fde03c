use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use evm_core::PollingBridge;
use evm_device::SerialDevice;
use evm_ui::{App, ConsoleOptions, HttpPhotoLoader};
use log::{info, warn};

use crate::config::Config;

#[derive(Args, Debug)]
#[command(about = "Open the operator console")]
pub struct RunArgs {
    /// Serial port of the vote device (overrides [device] port)
    #[arg(long, value_name = "PORT")]
    pub port: Option<String>,

    /// Baud rate of the vote device (overrides [device] baud_rate)
    #[arg(long, value_name = "RATE")]
    pub baud: Option<u32>,

    /// Run without a vote device; device votes and marks are unavailable
    #[arg(long, conflicts_with_all = ["port", "baud"])]
    pub no_device: bool,
}

pub fn execute(args: RunArgs, config: &Config) -> Result<()> {
    let db = config.open_database()?;
    let signals = config.bridge.signal_map()?;
    let device = open_device(&args, config)?;

    let device_label = match &device {
        Some(device) => format!("device {}", device.name()),
        None => "no device".to_string(),
    };
    let loader =
        HttpPhotoLoader::new(config.photo.timeout()).context("Failed to set up photo downloads")?;
    let options = ConsoleOptions {
        poll_interval: config.bridge.poll_interval(),
        photo_size: config.photo.size,
        device_label,
    };

    let mut app = App::new(
        db,
        PollingBridge::new(device, signals),
        Box::new(loader),
        options,
    );
    info!("Console started");
    evm_ui::run(&mut app)?;
    info!("Console closed");
    Ok(())
}

fn open_device(args: &RunArgs, config: &Config) -> Result<Option<SerialDevice>> {
    if args.no_device {
        info!("Running without a vote device");
        return Ok(None);
    }

    let port = args.port.as_deref().unwrap_or(&config.device.port);
    let baud_rate = args.baud.unwrap_or(config.device.baud_rate);

    match SerialDevice::connect(port, baud_rate, config.device.read_timeout()) {
        Ok(device) => Ok(Some(device)),
        Err(e) if !config.device.required => {
            warn!("{e}; continuing without a vote device");
            eprintln!(
                "{} {e}; continuing without a vote device",
                "Warning:".yellow()
            );
            Ok(None)
        }
        Err(e) => Err(e).context("The vote device is required; pass --no-device to run without it"),
    }
}
