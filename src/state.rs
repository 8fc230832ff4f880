use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Position value published while the transport is stopped or unavailable
pub const STOPPED_POSITION: f64 = -1.0;

/// An `f64` stored as its bit pattern in an `AtomicU64`
#[derive(Debug)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A point-in-time copy of both published values.
///
/// The two fields are loaded independently, so the deviation may belong to
/// an earlier block than the position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedSnapshot {
    pub deviation_ms: f64,
    pub position_ppq: f64,
}

/// Values written by the audio thread and sampled by the UI thread.
///
/// Exactly one writer (the deviation engine) and any number of readers.
/// Every access is a single atomic load or store; nothing here blocks.
#[derive(Debug)]
pub struct PublishedState {
    last_deviation_ms: AtomicF64,
    last_position_ppq: AtomicF64,
}

impl Default for PublishedState {
    fn default() -> Self {
        Self {
            last_deviation_ms: AtomicF64::new(0.0),
            last_position_ppq: AtomicF64::new(STOPPED_POSITION),
        }
    }
}

impl PublishedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, deviation_ms: f64, position_ppq: f64) {
        self.last_position_ppq.store(position_ppq);
        self.last_deviation_ms.store(deviation_ms);
    }

    pub fn write_deviation(&self, deviation_ms: f64) {
        self.last_deviation_ms.store(deviation_ms);
    }

    pub fn write_position(&self, position_ppq: f64) {
        self.last_position_ppq.store(position_ppq);
    }

    pub fn read(&self) -> PublishedSnapshot {
        PublishedSnapshot {
            deviation_ms: self.last_deviation_ms.load(),
            position_ppq: self.last_position_ppq.load(),
        }
    }

    pub fn deviation_ms(&self) -> f64 {
        self.last_deviation_ms.load()
    }

    pub fn position_ppq(&self) -> f64 {
        self.last_position_ppq.load()
    }
}

/// Handle shared between the processor and its editor
pub type SharedState = Arc<PublishedState>;

pub fn create_shared_state() -> SharedState {
    Arc::new(PublishedState::new())
}
