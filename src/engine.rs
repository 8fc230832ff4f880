//! Timing deviation engine
//!
//! Runs on the audio thread once per block. Compares every note-on against
//! the nearest quarter-note grid line and publishes the result into the
//! shared state. Nothing on this path allocates, locks, blocks or logs.

use crate::midi::NoteEvent;
use crate::state::{SharedState, STOPPED_POSITION};
use crate::transport::TransportSnapshot;

/// What a processed block did to the published state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockOutcome {
    /// Transport absent or stopped; state reset to the stopped sentinel
    Stopped,
    /// Position published, deviation forced to zero
    InvalidTempo,
    /// Position published, previous deviation kept
    NoNotes,
    /// Position and deviation of the last note-on in the block published
    Published(f64),
}

/// Signed distance in milliseconds between a note and the nearest quarter note.
///
/// Negative means the note landed before the grid line (rushing), positive
/// after it (dragging). Ties round away from zero. `tempo_bpm` must be > 0.
#[inline]
pub fn grid_deviation_ms(
    sample_rate: f64,
    sample_offset: u32,
    tempo_bpm: f64,
    block_start_ppq: f64,
) -> f64 {
    let seconds_into_block = f64::from(sample_offset) / sample_rate;
    let ppq_offset = seconds_into_block * (tempo_bpm / 60.0);
    let note_ppq = block_start_ppq + ppq_offset;
    let ppq_error = note_ppq - note_ppq.round();
    ppq_error * (60_000.0 / tempo_bpm)
}

/// Writes per-block timing information into a [`SharedState`].
///
/// Intended to have a single owner on the audio thread, which makes it the
/// only writer of the state.
pub struct DeviationEngine {
    state: SharedState,
}

impl DeviationEngine {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Processes one block.
    ///
    /// `sample_rate` must be positive; the caller guarantees that and that
    /// every event offset is below `block_len`. `block_len` is carried for the
    /// host contract but the grid maths only needs the offsets.
    pub fn process_block(
        &self,
        sample_rate: f64,
        block_len: u32,
        transport: Option<&TransportSnapshot>,
        events: &[NoteEvent],
    ) -> BlockOutcome {
        debug_assert!(sample_rate > 0.0);
        debug_assert!(events.iter().all(|e| e.sample_offset < block_len));

        let transport = match transport {
            Some(t) if t.is_playing => t,
            _ => {
                self.state.write(0.0, STOPPED_POSITION);
                return BlockOutcome::Stopped;
            }
        };

        self.state.write_position(transport.position_ppq);

        if !transport.has_valid_tempo() {
            self.state.write_deviation(0.0);
            return BlockOutcome::InvalidTempo;
        }

        // Last note-on in block order wins.
        let last = events.iter().filter(|e| e.is_note_on).last().map(|e| {
            grid_deviation_ms(
                sample_rate,
                e.sample_offset,
                transport.tempo_bpm,
                transport.position_ppq,
            )
        });

        match last {
            Some(deviation_ms) => {
                self.state.write_deviation(deviation_ms);
                BlockOutcome::Published(deviation_ms)
            }
            None => BlockOutcome::NoNotes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_shared_state;

    const MS_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_note_on_grid_line() {
        assert!(grid_deviation_ms(48_000.0, 24_000, 120.0, 4.0).abs() < MS_TOLERANCE);
    }

    #[test]
    fn test_half_beat_tie_rounds_up() {
        let deviation = grid_deviation_ms(48_000.0, 12_000, 120.0, 4.0);
        assert!((deviation + 250.0).abs() < MS_TOLERANCE);
    }

    #[test]
    fn test_late_note() {
        // 4.0 + 480/48000 * 2 = 4.02 quarter notes, 0.02 * 500 = 10 ms late
        let deviation = grid_deviation_ms(48_000.0, 480, 120.0, 4.0);
        assert!((deviation - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_early_note_just_before_the_bar() {
        // block starts 30 ms before beat 8 at 100 BPM (600 ms per beat)
        let start = 8.0 - 30.0 / 600.0;
        let deviation = grid_deviation_ms(44_100.0, 0, 100.0, start);
        assert!((deviation + 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_outcomes() {
        let engine = DeviationEngine::new(create_shared_state());
        let playing = TransportSnapshot::playing(120.0, 1.0);

        assert_eq!(
            engine.process_block(48_000.0, 512, None, &[]),
            BlockOutcome::Stopped
        );
        assert_eq!(
            engine.process_block(48_000.0, 512, Some(&playing), &[NoteEvent::other(3)]),
            BlockOutcome::NoNotes
        );
        assert_eq!(
            engine.process_block(
                48_000.0,
                512,
                Some(&TransportSnapshot::playing(0.0, 1.0)),
                &[NoteEvent::note_on(0)]
            ),
            BlockOutcome::InvalidTempo
        );
        assert_eq!(
            engine.process_block(48_000.0, 512, Some(&playing), &[NoteEvent::note_on(0)]),
            BlockOutcome::Published(0.0)
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_offset_past_the_last_sample_is_rejected() {
        let engine = DeviationEngine::new(create_shared_state());
        let playing = TransportSnapshot::playing(120.0, 0.0);
        engine.process_block(48_000.0, 512, Some(&playing), &[NoteEvent::note_on(512)]);
    }
}
