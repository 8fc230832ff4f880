use crate::host::{push_bounded, BlockContext, EventSource};
use crate::midi::NoteEvent;
use log::debug;

/// Timing offsets cycled through by the performer, as a fraction of the
/// configured humanize amount
const HUMANIZE_PATTERN: [f64; 8] = [0.0, -0.6, 0.35, 1.0, -1.0, 0.15, -0.25, 0.7];

/// Synthetic player used when no MIDI device is bound.
///
/// Plays a note-on every `every_n_beats` quarter notes, pushed early or late
/// by up to `humanize_ms`, and a note-off half a beat later.
#[derive(Debug, Clone)]
pub struct Performer {
    humanize_ms: f64,
    every_n_beats: u32,
}

impl Performer {
    pub fn new(humanize_ms: f64, every_n_beats: u32) -> Self {
        debug!(
            "Performer: one note every {} beat(s), humanize {} ms",
            every_n_beats, humanize_ms
        );
        Self {
            humanize_ms: humanize_ms.abs(),
            every_n_beats: every_n_beats.max(1),
        }
    }

    /// Offset in ms applied to the note on `beat`
    pub fn offset_ms(&self, beat: i64) -> f64 {
        let index = beat.rem_euclid(HUMANIZE_PATTERN.len() as i64) as usize;
        HUMANIZE_PATTERN[index] * self.humanize_ms
    }

    fn plays_on(&self, beat: i64) -> bool {
        beat.rem_euclid(i64::from(self.every_n_beats)) == 0
    }
}

impl EventSource for Performer {
    fn fill_block(&mut self, ctx: &BlockContext, events: &mut Vec<NoteEvent>) {
        let transport = match ctx.transport {
            Some(t) if t.is_playing && t.has_valid_tempo() => t,
            _ => return,
        };

        let beats_per_second = transport.tempo_bpm / 60.0;
        let ms_per_beat = 60_000.0 / transport.tempo_bpm;
        let block_start = transport.position_ppq;
        let block_end =
            block_start + f64::from(ctx.block_len) / ctx.sample_rate * beats_per_second;

        // Widest shift the pattern can apply, in beats, plus the note-off gap
        let reach = self.humanize_ms / ms_per_beat + 0.5;
        let first = (block_start - reach).floor() as i64;
        let last = (block_end + reach).ceil() as i64;

        for beat in first..=last {
            if !self.plays_on(beat) {
                continue;
            }
            let note_on = beat as f64 + self.offset_ms(beat) / ms_per_beat;
            for (at, is_note_on) in [(note_on, true), (note_on + 0.5, false)] {
                if at >= block_start && at < block_end {
                    let seconds = (at - block_start) / beats_per_second;
                    let offset = ((seconds * ctx.sample_rate).round() as u32)
                        .min(ctx.block_len.saturating_sub(1));
                    let event = if is_note_on {
                        NoteEvent::note_on(offset)
                    } else {
                        NoteEvent::other(offset)
                    };
                    push_bounded(events, event);
                }
            }
        }

        events.sort_unstable_by_key(|e| e.sample_offset);
    }
}
