use crate::error::{PocketError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shows how far each played note lands from the beat", long_about = None)]
pub struct Args {
    /// List available MIDI input devices
    #[arg(long)]
    pub device_list: bool,

    /// Bind to a specific MIDI input device
    #[arg(long)]
    pub bind_to_device: Option<String>,

    /// Pick the MIDI input device from a list
    #[arg(long, conflicts_with = "bind_to_device")]
    pub choose_device: bool,

    /// Tempo of the simulated transport
    #[arg(short, long, allow_negative_numbers = true)]
    pub bpm: Option<f64>,

    /// Sample rate of the simulated host
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Samples per processing block
    #[arg(long)]
    pub block_size: Option<u32>,

    /// Transport position to start from, in quarter notes
    #[arg(long)]
    pub start_ppq: Option<f64>,

    /// Display refresh rate
    #[arg(long)]
    pub refresh_hz: Option<f64>,

    /// Largest timing offset the built-in performer plays with
    #[arg(long)]
    pub humanize_ms: Option<f64>,

    /// Built-in performer plays a note every N beats
    #[arg(long)]
    pub every_n_beats: Option<u32>,

    /// Stop after this many seconds instead of running until interrupted
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Log readings instead of drawing them
    #[arg(long)]
    pub headless: bool,

    /// Also log to the terminal (implies --headless)
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file; defaults to ./pocket.toml when present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn handle_device_list() -> Vec<String> {
    crate::midi::list_input_devices()
}

pub fn validate_device(device_name: &str, devices: &[String]) -> Result<()> {
    if devices.iter().any(|d| d.contains(device_name)) {
        Ok(())
    } else {
        Err(PocketError::DeviceNotFound(device_name.to_string()))
    }
}

/// Error text listing what is available instead
pub fn describe_missing_device(device_name: &str, devices: &[String]) -> String {
    let mut error_msg = format!(
        "Error: Device '{}' not found in available devices:\n",
        device_name
    );
    for device in devices {
        error_msg.push_str(&format!("  - {}\n", device));
    }
    error_msg
}
