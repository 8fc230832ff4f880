// config.rs

use crate::cli::Args;
use crate::error::{PocketError, Result};
use ::config::{Config, Environment, File};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
pub const DEFAULT_BLOCK_SIZE: u32 = 512;
pub const DEFAULT_BPM: f64 = 120.0;
pub const DEFAULT_HUMANIZE_MS: f64 = 15.0;

const DEFAULT_CONFIG_NAME: &str = "pocket";
const ENV_PREFIX: &str = "POCKET";

/// Everything the standalone host needs to run
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub sample_rate: f64,
    pub block_size: u32,
    pub bpm: f64,
    pub start_ppq: f64,
    pub refresh_hz: f64,
    pub humanize_ms: f64,
    pub every_n_beats: u32,
    pub device: Option<String>,
    pub headless: bool,
    pub duration_secs: Option<f64>,
}

impl Settings {
    /// Defaults, then the settings file, then `POCKET_*` variables, then flags
    pub fn load(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        Self::from_sources(args, file, true)
    }

    /// Like [`Settings::load`] with an explicit file and no environment
    pub fn load_from_file(args: &Args, path: &Path) -> Result<Self> {
        Self::from_sources(args, File::from(path).required(true), false)
    }

    fn from_sources<F>(args: &Args, file: F, use_env: bool) -> Result<Self>
    where
        F: ::config::Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder()
            .set_default("sample_rate", DEFAULT_SAMPLE_RATE)?
            .set_default("block_size", i64::from(DEFAULT_BLOCK_SIZE))?
            .set_default("bpm", DEFAULT_BPM)?
            .set_default("start_ppq", 0.0)?
            .set_default("refresh_hz", crate::event_loop::DEFAULT_REFRESH_HZ)?
            .set_default("humanize_ms", DEFAULT_HUMANIZE_MS)?
            .set_default("every_n_beats", 1_i64)?
            .set_default("headless", false)?
            .add_source(file);

        if use_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        }

        let settings: Settings = builder
            .set_override_option("sample_rate", args.sample_rate)?
            .set_override_option("block_size", args.block_size.map(i64::from))?
            .set_override_option("bpm", args.bpm)?
            .set_override_option("start_ppq", args.start_ppq)?
            .set_override_option("refresh_hz", args.refresh_hz)?
            .set_override_option("humanize_ms", args.humanize_ms)?
            .set_override_option("every_n_beats", args.every_n_beats.map(i64::from))?
            .set_override_option("device", args.bind_to_device.clone())?
            .set_override_option("duration_secs", args.duration)?
            .set_override_option("headless", (args.headless || args.verbose).then_some(true))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate.is_nan() || self.sample_rate <= 0.0 {
            return Err(PocketError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 {
            return Err(PocketError::Config("block_size must be > 0".to_string()));
        }
        if self.refresh_hz.is_nan() || self.refresh_hz <= 0.0 {
            return Err(PocketError::Config(format!(
                "refresh_hz must be > 0, got {}",
                self.refresh_hz
            )));
        }
        if self.every_n_beats == 0 {
            return Err(PocketError::Config("every_n_beats must be > 0".to_string()));
        }
        if let Some(duration) = self.duration_secs {
            if duration.is_nan() || duration < 0.0 {
                return Err(PocketError::Config(format!(
                    "duration must not be negative, got {}",
                    duration
                )));
            }
        }
        if !self.humanize_ms.is_finite() {
            return Err(PocketError::Config(format!(
                "humanize_ms must be a number, got {}",
                self.humanize_ms
            )));
        }
        if self.bpm > 0.0 {
            let half_beat_ms = 30_000.0 / self.bpm;
            if self.humanize_ms.abs() >= half_beat_ms {
                return Err(PocketError::Config(format!(
                    "humanize_ms must stay under half a beat ({:.1} ms at {} BPM), got {}",
                    half_beat_ms, self.bpm, self.humanize_ms
                )));
            }
        }
        if self.bpm <= 0.0 {
            warn!(
                "Tempo {} BPM is not positive; deviations will read as 0",
                self.bpm
            );
        }
        info!(
            "Host: {} Hz, {} samples per block, {} BPM from PPQ {}",
            self.sample_rate, self.block_size, self.bpm, self.start_ppq
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("pocket-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let path = write_config("defaults", "");
        let args = Args::parse_from(["pocket"]);
        let settings = Settings::load_from_file(&args, &path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(settings.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(settings.bpm, DEFAULT_BPM);
        assert_eq!(settings.refresh_hz, 30.0);
        assert_eq!(settings.every_n_beats, 1);
        assert_eq!(settings.device, None);
        assert_eq!(settings.duration_secs, None);
        assert!(!settings.headless);
    }

    #[test]
    fn test_file_then_flags() {
        let path = write_config("layers", "bpm = 96.0\nblock_size = 256\nheadless = true\n");
        let args = Args::parse_from(["pocket", "--bpm", "140", "--duration", "2.5"]);
        let settings = Settings::load_from_file(&args, &path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.bpm, 140.0);
        assert_eq!(settings.block_size, 256);
        assert_eq!(settings.duration_secs, Some(2.5));
        assert!(settings.headless);
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let path = write_config("zero-block", "block_size = 0\n");
        let args = Args::parse_from(["pocket"]);
        let result = Settings::load_from_file(&args, &path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(PocketError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_sample_rate_and_refresh() {
        let path = write_config("bad-rates", "");
        let args = Args::parse_from(["pocket", "--sample-rate", "0"]);
        assert!(matches!(
            Settings::load_from_file(&args, &path),
            Err(PocketError::InvalidSampleRate(_))
        ));

        let args = Args::parse_from(["pocket", "--refresh-hz", "0"]);
        assert!(matches!(
            Settings::load_from_file(&args, &path),
            Err(PocketError::Config(_))
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_humanize_is_bounded_by_half_a_beat() {
        let path = write_config("humanize", "");
        // Half a beat at 120 BPM is 250 ms
        let args = Args::parse_from(["pocket", "--humanize-ms", "249"]);
        assert!(Settings::load_from_file(&args, &path).is_ok());

        let args = Args::parse_from(["pocket", "--humanize-ms", "250"]);
        assert!(matches!(
            Settings::load_from_file(&args, &path),
            Err(PocketError::Config(_))
        ));

        let args = Args::parse_from(["pocket", "--bpm", "240", "--humanize-ms", "200"]);
        assert!(matches!(
            Settings::load_from_file(&args, &path),
            Err(PocketError::Config(_))
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let args = Args::parse_from(["pocket"]);
        let path = std::env::temp_dir().join("pocket-does-not-exist.toml");
        assert!(Settings::load_from_file(&args, &path).is_err());
    }
}
