use chrono::Local;
use simplelog::*;
use std::fs::{self, File, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// `$HOME/.local/share/pocket/logs`
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("pocket")
        .join("logs"))
}

/// One log file per day, e.g. `pocket-2024-05-01.log`
pub fn log_file_name() -> String {
    format!("pocket-{}.log", Local::now().format("%Y-%m-%d"))
}

fn open_log_file() -> Result<File, Error> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(log_file_name()))
}

/// Logs to the daily file, and to the terminal too when `to_terminal` is set.
///
/// Only the first call installs a logger; later calls report whether that
/// succeeded.
pub fn init_logger(to_terminal: bool) -> Result<(), Error> {
    let log_file = open_log_file()?;

    INIT.call_once(|| {
        let config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_thread_level(LevelFilter::Debug)
            .build();

        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![WriteLogger::new(
            LevelFilter::Debug,
            config.clone(),
            log_file,
        )];
        if to_terminal {
            loggers.push(TermLogger::new(
                LevelFilter::Info,
                config,
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ));
        }

        if CombinedLogger::init(loggers).is_ok() {
            LOGGER_INITIALIZED.store(true, Ordering::SeqCst);
        }
    });

    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Other, "Logger initialization failed"))
    }
}
