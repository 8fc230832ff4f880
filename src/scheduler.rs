use crate::error::{PocketError, Result};
use std::thread::{self, JoinHandle};

pub trait Scheduler {
    fn spawn<F, T>(&self, name: &str, f: F) -> Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;
}

/// Runs every task on its own named OS thread
pub struct ThreadScheduler;

impl ThreadScheduler {
    pub fn new() -> Self {
        ThreadScheduler
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn spawn<F, T>(&self, name: &str, f: F) -> Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        thread::Builder::new()
            .name(name.to_string())
            .spawn(f)
            .map_err(|e| PocketError::Thread(format!("failed to spawn '{}': {}", name, e)))
    }
}

pub fn create_scheduler() -> ThreadScheduler {
    ThreadScheduler::new()
}
