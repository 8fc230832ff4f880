use super::{PlayHead, TransportSnapshot};
use crate::state::AtomicF64;
use std::sync::atomic::{AtomicBool, Ordering};

/// Simulated host playhead.
///
/// Play state may be changed from any thread. Only the audio
/// thread calls [`InternalTransport::advance`].
#[derive(Debug)]
pub struct InternalTransport {
    bpm: AtomicF64,
    position_ppq: AtomicF64,
    is_playing: AtomicBool,
}

impl Default for InternalTransport {
    fn default() -> Self {
        Self::new(120.0, 0.0)
    }
}

impl InternalTransport {
    pub fn new(bpm: f64, start_ppq: f64) -> Self {
        Self {
            bpm: AtomicF64::new(bpm),
            position_ppq: AtomicF64::new(start_ppq),
            is_playing: AtomicBool::new(false),
        }
    }

    pub fn tempo(&self) -> f64 {
        self.bpm.load()
    }

    pub fn set_playing(&self, playing: bool) {
        self.is_playing.store(playing, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::SeqCst)
    }

    pub fn position_ppq(&self) -> f64 {
        self.position_ppq.load()
    }

    /// Moves the playhead past one block of `block_len` samples.
    ///
    /// Does nothing while stopped or without a usable tempo.
    pub fn advance(&self, block_len: u32, sample_rate: f64) {
        if !self.is_playing() || sample_rate <= 0.0 {
            return;
        }
        let bpm = self.tempo();
        if bpm <= 0.0 {
            return;
        }

        let seconds = f64::from(block_len) / sample_rate;
        let position = self.position_ppq.load() + seconds * (bpm / 60.0);
        self.position_ppq.store(position);
    }
}

impl PlayHead for InternalTransport {
    fn current_position(&self) -> Option<TransportSnapshot> {
        Some(TransportSnapshot {
            is_playing: self.is_playing(),
            tempo_bpm: self.tempo(),
            position_ppq: self.position_ppq(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PPQ_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_default_initialization() {
        let transport = InternalTransport::default();
        assert_eq!(transport.tempo(), 120.0);
        assert_eq!(transport.position_ppq(), 0.0);
        assert!(!transport.is_playing());
    }

    #[test]
    fn test_does_not_advance_when_stopped() {
        let transport = InternalTransport::new(120.0, 8.0);
        transport.advance(512, 48_000.0);
        assert_eq!(transport.position_ppq(), 8.0);
    }

    #[test]
    fn test_one_beat_per_beat_length() {
        let transport = InternalTransport::new(120.0, 0.0);
        transport.set_playing(true);

        // 120 BPM at 48 kHz is 24000 samples per beat
        for _ in 0..(24_000 / 480) {
            transport.advance(480, 48_000.0);
        }
        assert!((transport.position_ppq() - 1.0).abs() < PPQ_TOLERANCE);
    }

    #[test]
    fn test_stop_keeps_position() {
        let transport = InternalTransport::new(90.0, 2.0);
        transport.set_playing(true);
        transport.advance(44_100, 44_100.0);
        let moved = transport.position_ppq();
        assert!((moved - 3.5).abs() < PPQ_TOLERANCE);

        transport.set_playing(false);
        assert_eq!(transport.position_ppq(), moved);
        let snapshot = transport.current_position().unwrap();
        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.position_ppq, moved);
    }

    #[test]
    fn test_invalid_tempo_freezes_position() {
        let transport = InternalTransport::new(0.0, 1.0);
        transport.set_playing(true);
        transport.advance(1024, 48_000.0);
        assert_eq!(transport.position_ppq(), 1.0);
    }
}
