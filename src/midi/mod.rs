//! MIDI input for Pocket
//!
//! This module provides:
//! - [`NoteEvent`], the per-block view of a MIDI message the engine consumes
//! - [`MidiMessage`] parsing of raw channel and system messages
//! - [`MidiInput`] for non-blocking input backends
//! - [`MidirInput`] for real MIDI devices and [`MockMidiInput`] for tests
//!
mod engine;
mod event;
pub mod midir_engine;
pub mod mock_engine;

pub use engine::{MidiInput, MidiMessage, RawMidi, RAW_MIDI_LEN};
pub use event::NoteEvent;

pub use midir_engine::{list_input_devices, MidirInput};
pub use mock_engine::MockMidiInput;
