use super::MidiMessage;

/// One MIDI message inside a processing block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// Offset from the first sample of the block
    pub sample_offset: u32,
    pub is_note_on: bool,
}

impl NoteEvent {
    pub fn note_on(sample_offset: u32) -> Self {
        Self {
            sample_offset,
            is_note_on: true,
        }
    }

    /// Any message that is not a note-on (note-off, controllers, clock...)
    pub fn other(sample_offset: u32) -> Self {
        Self {
            sample_offset,
            is_note_on: false,
        }
    }

    pub fn from_bytes(sample_offset: u32, data: &[u8]) -> Self {
        let is_note_on = MidiMessage::parse(data).map_or(false, |m| m.is_note_on());
        Self {
            sample_offset,
            is_note_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        assert!(NoteEvent::from_bytes(10, &[0x90, 36, 127]).is_note_on);
        assert!(!NoteEvent::from_bytes(10, &[0x90, 36, 0]).is_note_on);
        assert!(!NoteEvent::from_bytes(10, &[0x80, 36, 64]).is_note_on);
        assert!(!NoteEvent::from_bytes(10, &[0xB0, 64, 127]).is_note_on);
        assert_eq!(NoteEvent::from_bytes(10, &[0x90, 36, 1]).sample_offset, 10);
    }
}
