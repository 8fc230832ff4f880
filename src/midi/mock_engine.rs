use crate::midi::{MidiInput, RawMidi};
use std::collections::VecDeque;
use std::time::Instant;

/// Scripted input for tests and headless runs
#[derive(Default)]
pub struct MockMidiInput {
    pending: VecDeque<RawMidi>,
}

impl MockMidiInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `data` as if it had arrived at `received`
    pub fn push(&mut self, received: Instant, data: &[u8]) {
        self.pending.push_back(RawMidi::new(received, data));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl MidiInput for MockMidiInput {
    fn try_recv(&mut self) -> Option<RawMidi> {
        self.pending.pop_front()
    }
}
