use std::time::Instant;

/// Represents a MIDI message received from an input
#[derive(Debug, Clone, PartialEq)]
pub enum MidiMessage {
    /// Note On message with a non-zero velocity
    NoteOn { channel: u8, note: u8, velocity: u8 },
    /// Note Off message, including Note On with velocity 0
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// Control Change message with controller number and value
    ControlChange {
        channel: u8,
        controller: u8,
        value: u8,
    },
    /// Program Change message with program number
    ProgramChange { channel: u8, program: u8 },
    /// MIDI Clock timing message
    Clock,
    /// MIDI Start message
    Start,
    /// MIDI Stop message
    Stop,
    /// MIDI Continue message
    Continue,
}

impl MidiMessage {
    pub fn parse(data: &[u8]) -> Option<MidiMessage> {
        let status = *data.first()?;

        match status & 0xF0 {
            0x90 if data.len() >= 3 => {
                let (channel, note, velocity) = (status & 0x0F, data[1], data[2]);
                if velocity == 0 {
                    Some(MidiMessage::NoteOff {
                        channel,
                        note,
                        velocity,
                    })
                } else {
                    Some(MidiMessage::NoteOn {
                        channel,
                        note,
                        velocity,
                    })
                }
            }
            0x80 if data.len() >= 3 => Some(MidiMessage::NoteOff {
                channel: status & 0x0F,
                note: data[1],
                velocity: data[2],
            }),
            0xB0 if data.len() >= 3 => Some(MidiMessage::ControlChange {
                channel: status & 0x0F,
                controller: data[1],
                value: data[2],
            }),
            0xC0 if data.len() >= 2 => Some(MidiMessage::ProgramChange {
                channel: status & 0x0F,
                program: data[1],
            }),
            0xF0 => match status {
                0xF8 => Some(MidiMessage::Clock),
                0xFA => Some(MidiMessage::Start),
                0xFC => Some(MidiMessage::Stop),
                0xFB => Some(MidiMessage::Continue),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self, MidiMessage::NoteOn { .. })
    }
}

/// Longest message we keep. Channel voice messages fit in three bytes.
pub const RAW_MIDI_LEN: usize = 3;

/// A message as it arrived from an input port, stamped on arrival.
///
/// Fixed size so it can cross threads without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMidi {
    pub received: Instant,
    bytes: [u8; RAW_MIDI_LEN],
    len: u8,
}

impl RawMidi {
    /// Copies up to three bytes of `data`; longer messages (SysEx) are truncated
    pub fn new(received: Instant, data: &[u8]) -> Self {
        let len = data.len().min(RAW_MIDI_LEN);
        let mut bytes = [0u8; RAW_MIDI_LEN];
        bytes[..len].copy_from_slice(&data[..len]);
        Self {
            received,
            bytes,
            len: len as u8,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    pub fn message(&self) -> Option<MidiMessage> {
        MidiMessage::parse(self.bytes())
    }
}

/// Trait defining the interface for MIDI input implementations
pub trait MidiInput: Send {
    /// Takes the next pending message without blocking
    fn try_recv(&mut self) -> Option<RawMidi>;
}
