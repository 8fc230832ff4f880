//! Host transport
//!
//! This module models the host's musical playback state:
//! - [`TransportSnapshot`] is what a processing callback sees for one block
//! - [`PlayHead`] is the transport query the host hands to the processor
//! - [`InternalTransport`] is the simulated playhead used by the standalone host
//!
//! Positions are expressed in quarter notes (PPQ) since the transport origin.

mod internal;

pub use internal::InternalTransport;

/// Transport state for a single processing block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportSnapshot {
    pub is_playing: bool,
    /// Beats per minute. May be zero or negative when the host has no tempo.
    pub tempo_bpm: f64,
    /// Position at the first sample of the block, in quarter notes
    pub position_ppq: f64,
}

impl TransportSnapshot {
    pub fn playing(tempo_bpm: f64, position_ppq: f64) -> Self {
        Self {
            is_playing: true,
            tempo_bpm,
            position_ppq,
        }
    }

    pub fn stopped(tempo_bpm: f64, position_ppq: f64) -> Self {
        Self {
            is_playing: false,
            tempo_bpm,
            position_ppq,
        }
    }

    /// Whether samples can be converted to musical time
    pub fn has_valid_tempo(&self) -> bool {
        self.tempo_bpm > 0.0
    }
}

/// Transport query offered by the host for the current block.
///
/// `None` means the host could not supply position information.
pub trait PlayHead {
    fn current_position(&self) -> Option<TransportSnapshot>;
}

impl PlayHead for TransportSnapshot {
    fn current_position(&self) -> Option<TransportSnapshot> {
        Some(*self)
    }
}

impl<P: PlayHead + ?Sized> PlayHead for &P {
    fn current_position(&self) -> Option<TransportSnapshot> {
        (**self).current_position()
    }
}

/// A host without a playhead
pub struct NoPlayHead;

impl PlayHead for NoPlayHead {
    fn current_position(&self) -> Option<TransportSnapshot> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_validity() {
        assert!(TransportSnapshot::playing(120.0, 0.0).has_valid_tempo());
        assert!(!TransportSnapshot::playing(0.0, 0.0).has_valid_tempo());
        assert!(!TransportSnapshot::playing(-90.0, 0.0).has_valid_tempo());
        assert!(!TransportSnapshot::playing(f64::NAN, 0.0).has_valid_tempo());
    }

    #[test]
    fn test_no_playhead() {
        assert!(NoPlayHead.current_position().is_none());
    }
}
